//! Read-through/write-through cache decorator over any HttpPort.
//!
//! Cache failures degrade to the live transport; they never fail a query.

use crate::domain::DomainError;
use crate::ports::{HttpPort, HttpResponse, ResponseCachePort};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub struct CachedHttp {
    inner: Arc<dyn HttpPort>,
    cache: Arc<dyn ResponseCachePort>,
}

impl CachedHttp {
    pub fn new(inner: Arc<dyn HttpPort>, cache: Arc<dyn ResponseCachePort>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait::async_trait]
impl HttpPort for CachedHttp {
    async fn get(&self, url: &Url) -> Result<HttpResponse, DomainError> {
        match self.cache.get(url.as_str()).await {
            Ok(Some(hit)) => {
                debug!(url = %url, "cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(url = %url, "cache miss"),
            Err(e) => warn!(url = %url, error = %e, "cache read failed, fetching live"),
        }

        let response = self.inner.get(url).await?;
        if let Err(e) = self.cache.put(url.as_str(), &response).await {
            warn!(url = %url, error = %e, "cache write failed");
        }
        Ok(response)
    }
}
