//! Conversation management for ragchat
//!
//! This crate owns the session state of a chat, derives the bounded history
//! sent with each request, and runs request/response cycles against the
//! backend.

pub mod dispatcher;
pub mod history;
pub mod observer;
pub mod session;

// Re-export commonly used types
pub use dispatcher::{DispatchOutcome, PendingDispatch, RequestDispatcher};
pub use history::{HistoryPolicy, HistoryWindow};
pub use observer::{Observers, SessionEvent, SubscriptionId};
pub use session::SessionState;
