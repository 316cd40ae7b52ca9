//! # ragchat-api
//!
//! Client side of the RAG chat backend contract.
//!
//! ## Wire format
//!
//! - **Request**: `POST` with `{"query": ..., "session_id": ..., "history": [...]}`
//! - **Response**: HTTP 200 with `{"response": ...}`; any other status is a failure
//!
//! ## Example
//!
//! ```rust,no_run
//! use ragchat_api::{ChatBackend, ChatRequest, HttpChatBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HttpChatBackend::new("http://localhost:8000/chat".to_string());
//!     let request = ChatRequest {
//!         query: "What does Anantya.ai offer?".to_string(),
//!         session_id: "2b5d0c1e-2f43-4a39-9a61-0d0a4cfa53a0".to_string(),
//!         history: vec![],
//!     };
//!
//!     match backend.send(&request).await {
//!         Ok(reply) => println!("Response: {}", reply),
//!         Err(e) => eprintln!("{}", e.user_message()),
//!     }
//! }
//! ```

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::{ChatBackend, ChatRequest, ChatResponse, HttpChatBackend};

pub use config::{normalize_endpoint, CHAT_ROUTE};
