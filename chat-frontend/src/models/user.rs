use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login form body. Neither field is checked against anything, and either may
/// hold any JSON value.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub name: Option<Value>,
}

/// What the session cookie carries: `{"email": ..., "name": ...}`.
///
/// Absent fields are left out of the JSON rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

impl Identity {
    /// Email for log lines, `-` when missing.
    pub fn email_label(&self) -> String {
        match &self.email {
            Some(Value::String(email)) => email.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        }
    }
}

impl From<LoginRequest> for Identity {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            name: request.name,
        }
    }
}
