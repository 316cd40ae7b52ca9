/// Route served by the RAG backend for chat requests
pub const CHAT_ROUTE: &str = "chat";

/// Normalize an endpoint URL so that a bare host points at the chat route.
///
/// `http://localhost:8000` and `http://localhost:8000/` both become
/// `http://localhost:8000/chat`; URLs that already carry a path are kept as-is.
pub fn normalize_endpoint(url: &str) -> String {
    let url = url.trim();
    match reqwest::Url::parse(url) {
        Ok(parsed) if parsed.path() == "/" && parsed.query().is_none() => {
            format!("{}/{}", url.trim_end_matches('/'), CHAT_ROUTE)
        }
        _ => url.to_string(),
    }
}
