pub mod completion;
pub mod metrics;
pub mod session;

pub use completion::{CompletionProvider, WorkerCompletionClient};
pub use session::{CookieSession, SessionManager};
