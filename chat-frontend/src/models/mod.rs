pub mod chat;
pub mod user;

pub use chat::{ChatRequest, ChatResponse, Envelope};
pub use user::{Identity, LoginRequest};
