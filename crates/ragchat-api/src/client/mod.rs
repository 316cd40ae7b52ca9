use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ragchat_types::DispatchError;

pub mod http;

pub use http::HttpChatBackend;

/// Request body sent to the chat backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: String,
    /// Recent turns rendered as `"<role>: <text>"`, oldest first
    pub history: Vec<String>,
}

/// Body of a successful (HTTP 200) backend reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    /// Interpret a 200 body, requiring a non-empty string `response` field
    pub fn parse(body: &str) -> Result<String, DispatchError> {
        let parsed: ChatResponse = serde_json::from_str(body)
            .map_err(|e| DispatchError::MalformedResponse(e.to_string()))?;
        if parsed.response.trim().is_empty() {
            return Err(DispatchError::MalformedResponse("empty `response` field".to_string()));
        }
        Ok(parsed.response)
    }
}

/// Chat backend trait - one request/response cycle per call.
///
/// Implementations perform exactly one outbound call and never retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a request and return the assistant reply text
    async fn send(&self, request: &ChatRequest) -> Result<String, DispatchError>;
}
