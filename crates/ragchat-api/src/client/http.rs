use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::error::Error as StdError;

use crate::client::{ChatBackend, ChatRequest, ChatResponse};
use ragchat_logging::{log_request, log_response};
use ragchat_types::DispatchError;

/// HTTP implementation of the chat backend contract
pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
    verbose: bool,
}

impl HttpChatBackend {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    /// Use a preconfigured reqwest client (shared connection pool, proxies...)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Dump every request and response to the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<String, DispatchError> {
        log_request(&self.endpoint, request, self.verbose);
        log::debug!(
            "POST {} (session {}, {} history lines)",
            self.endpoint,
            request.session_id,
            request.history.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(describe_error(&e)))?;

        let status = response.status();
        let headers = response.headers().clone();

        if status != StatusCode::OK {
            log::warn!("chat backend returned HTTP {}", status.as_u16());
            if self.verbose {
                let body = response.text().await.unwrap_or_default();
                log_response(&status, &headers, &body, self.verbose);
            }
            return Err(DispatchError::Server { status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(describe_error(&e)))?;
        log_response(&status, &headers, &body, self.verbose);

        let reply = ChatResponse::parse(&body);
        if let Err(ref e) = reply {
            log::warn!("{}", e);
        }
        reply
    }
}

/// Flatten an error and its sources into one line, e.g.
/// `error sending request for url (...): client error (Connect): Connection refused`
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        msg: &'static str,
        inner: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.inner.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_describe_error_walks_sources() {
        let err = Layer {
            msg: "error sending request",
            inner: Some(Box::new(Layer {
                msg: "tcp connect error",
                inner: Some(Box::new(Layer { msg: "Connection refused", inner: None })),
            })),
        };
        assert_eq!(
            describe_error(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn test_describe_error_skips_repeated_text() {
        let err = Layer {
            msg: "timed out",
            inner: Some(Box::new(Layer { msg: "timed out", inner: None })),
        };
        assert_eq!(describe_error(&err), "timed out");
    }

    #[test]
    fn test_builder_options() {
        let backend = HttpChatBackend::new("http://localhost:8000/chat".to_string())
            .with_verbose(true)
            .with_client(reqwest::Client::new());
        assert_eq!(backend.endpoint(), "http://localhost:8000/chat");
        assert!(backend.verbose);
    }
}
