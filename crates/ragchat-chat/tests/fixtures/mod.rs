#![allow(dead_code)]

use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use ragchat_api::HttpChatBackend;
use ragchat_chat::{HistoryWindow, RequestDispatcher};

/// Start a mock backend answering `/chat` with the given status and JSON body
pub async fn backend_with(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

/// Mock backend that replies successfully after a delay
pub async fn slow_backend(reply: &str, delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": reply }))
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    server
}

pub fn dispatcher_for(endpoint: String) -> RequestDispatcher {
    let backend = HttpChatBackend::new(endpoint);
    RequestDispatcher::new(Arc::new(backend), HistoryWindow::default())
}

pub fn chat_url(server: &MockServer) -> String {
    format!("{}/chat", server.uri())
}

/// An endpoint on a port nobody listens on
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/chat", port)
}
