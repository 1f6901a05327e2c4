//! service-core: Shared HTTP infrastructure for the chat frontend.
pub mod error;
pub mod middleware;
pub mod observability;
