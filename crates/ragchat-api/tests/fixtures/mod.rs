#![allow(dead_code)]

use serde_json::json;
use std::net::TcpListener;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock chat backend for exercising the HTTP client
pub struct BackendMockServer {
    server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Full URL of the chat route on the mock server
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.server.uri())
    }

    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mock a successful reply for any well-formed JSON chat request
    pub async fn mock_reply(&self, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": reply })))
            .mount(&self.server)
            .await;
    }

    /// Mock a reply that only matches the exact request body
    pub async fn mock_reply_for(&self, expected_body: serde_json::Value, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": reply })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a raw 200 body (used for malformed payloads)
    pub async fn mock_raw_body(&self, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a FastAPI-style error status
    pub async fn mock_status(&self, status: u16, detail: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "detail": detail })))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Parsed JSON bodies of every request seen so far
    pub async fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

/// An endpoint on a port nobody listens on, for connection-refused scenarios
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/chat", port)
}

/// Serve one request with `status`, announcing a 100 byte body but sending
/// only 3 bytes before closing the connection.
pub async fn truncated_body_endpoint(status: u16) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Consume the whole request before answering
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(end) = find_header_end(&request) {
                let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {} Oops\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\nabc",
            status
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/chat", addr)
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}
