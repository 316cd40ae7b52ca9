use thiserror::Error;

/// Fixed text shown when the backend answers with a non-200 status
pub const SERVER_ERROR_MESSAGE: &str =
    "The chat server could not process your message. Please try again.";

/// Fixed text shown when a 200 reply cannot be interpreted
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The chat server sent a reply that could not be read. Please try again.";

/// Reasons a user submission is refused before anything is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a request is already in flight for this session")]
    Busy,
}

/// Failure of a single request/response cycle against the chat backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Connection refused, DNS or TLS failure, timeout...
    #[error("transport error: {0}")]
    Transport(String),
    /// Any non-200 status; the body is deliberately not kept
    #[error("server returned HTTP {status}")]
    Server { status: u16 },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl DispatchError {
    /// Text for the SystemError turn that replaces the assistant reply
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Transport(description) => {
                format!("Could not reach the chat server: {}", description)
            }
            DispatchError::Server { .. } => SERVER_ERROR_MESSAGE.to_string(),
            DispatchError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
        }
    }
}
