//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use url::Url;

/// A successful (2xx) GET response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub body: String,
    /// Target of the `rel="next"` entry in the `Link` header, if any.
    pub next_link: Option<String>,
}

/// HTTP transport. GET only.
#[async_trait::async_trait]
pub trait HttpPort: Send + Sync {
    /// Issue one GET. Non-2xx statuses and connection failures are `DomainError::Transport`.
    async fn get(&self, url: &Url) -> Result<HttpResponse, DomainError>;
}

/// Response cache keyed by request URL with a fixed time-to-live.
///
/// Must stay invisible to callers: a cold and a warm cache yield the same results.
#[async_trait::async_trait]
pub trait ResponseCachePort: Send + Sync {
    /// Fresh entry for `url`, or `None` when absent or expired.
    async fn get(&self, url: &str) -> Result<Option<HttpResponse>, DomainError>;

    async fn put(&self, url: &str, response: &HttpResponse) -> Result<(), DomainError>;
}
