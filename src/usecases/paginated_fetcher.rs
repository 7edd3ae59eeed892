//! Link-paginated collection fetch: GET -> decode JSON array -> merge by key -> follow `next`.
//!
//! - Pages are requested one at a time; each request completes before the next starts
//! - A failed page discards everything collected so far (no partial results)
//! - Records that do not fit the target type fail the fetch as protocol errors

use crate::domain::{DomainError, KeyedCollection};
use crate::ports::HttpPort;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Default page size sent as `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

pub struct PaginatedFetcher {
    http: Arc<dyn HttpPort>,
    page_limit: u32,
}

impl PaginatedFetcher {
    pub fn new(http: Arc<dyn HttpPort>, page_limit: u32) -> Self {
        Self { http, page_limit }
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// First-page URL: `seed` with `limit` then `params` appended to its query.
    pub fn first_page_url(&self, seed: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = seed.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &self.page_limit.to_string());
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        url
    }

    /// Fetch every page starting at `seed`, keyed by `key`. Later duplicates overwrite earlier ones.
    pub async fn fetch_all<T, K>(
        &self,
        seed: &Url,
        params: &[(&str, &str)],
        key: K,
    ) -> Result<KeyedCollection<T>, DomainError>
    where
        T: DeserializeOwned,
        K: Fn(&T) -> String,
    {
        let mut result = KeyedCollection::new();
        let mut visited = HashSet::new();
        let mut url = self.first_page_url(seed, params);
        let mut pages = 0usize;

        loop {
            if !visited.insert(url.to_string()) {
                return Err(DomainError::protocol(format!(
                    "pagination loops back to {}",
                    url
                )));
            }

            let response = self.http.get(&url).await?;
            pages += 1;

            let records = decode_page(&url, &response.body)?;
            let count = records.len();
            for (index, raw) in records.into_iter().enumerate() {
                let record: T = serde_json::from_value(raw).map_err(|e| {
                    DomainError::protocol(format!("record {} on {} has unexpected shape: {}", index, url, e))
                })?;
                result.insert(key(&record), record);
            }
            debug!(url = %url, page = pages, records = count, "fetched page");

            let Some(next) = response.next_link else {
                break;
            };
            url = Url::parse(&next).map_err(|e| {
                DomainError::protocol(format!("invalid next link {:?} from {}: {}", next, url, e))
            })?;
        }

        info!(seed = %seed, pages, records = result.len(), "pagination complete");
        Ok(result)
    }
}

fn decode_page(url: &Url, body: &str) -> Result<Vec<serde_json::Value>, DomainError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| DomainError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => Err(DomainError::protocol(format!(
            "expected a JSON array from {}, got {}",
            url,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
