//! Mock HTTP adapter for testing without network calls.
//!
//! Serves scripted responses keyed by exact URL and records every request.

use crate::domain::DomainError;
use crate::ports::{HttpPort, HttpResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
enum Scripted {
    Page(HttpResponse),
    Status(u16),
}

/// Scripted HttpPort. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MockHttp {
    routes: HashMap<String, Scripted>,
    requests: Mutex<Vec<String>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url`, optionally pointing at a next page.
    pub fn with_page(mut self, url: &str, body: impl Into<String>, next: Option<&str>) -> Self {
        self.routes.insert(
            url.to_string(),
            Scripted::Page(HttpResponse {
                body: body.into(),
                next_link: next.map(String::from),
            }),
        );
        self
    }

    /// Serve `body` as JSON at `url`.
    pub fn with_json(self, url: &str, body: &serde_json::Value, next: Option<&str>) -> Self {
        self.with_page(url, body.to_string(), next)
    }

    /// Fail `url` with an HTTP status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Scripted::Status(status));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait::async_trait]
impl HttpPort for MockHttp {
    async fn get(&self, url: &Url) -> Result<HttpResponse, DomainError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }
        match self.routes.get(url.as_str()) {
            Some(Scripted::Page(page)) => Ok(page.clone()),
            Some(Scripted::Status(code)) => Err(DomainError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}", code),
            }),
            None => Err(DomainError::Transport {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_and_records() {
        let http = MockHttp::new()
            .with_page("https://a.example/one", "[1]", Some("https://a.example/two"))
            .with_status("https://a.example/two", 500);

        let one = http.get(&Url::parse("https://a.example/one").unwrap()).await.unwrap();
        assert_eq!(one.body, "[1]");
        assert_eq!(one.next_link.as_deref(), Some("https://a.example/two"));

        let two = http.get(&Url::parse("https://a.example/two").unwrap()).await;
        assert!(matches!(two, Err(DomainError::Transport { .. })));

        assert_eq!(http.requests(), vec!["https://a.example/one", "https://a.example/two"]);
    }
}
