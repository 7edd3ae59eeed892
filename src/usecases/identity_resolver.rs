//! Identity resolution: handle -> Webfinger -> activity URL -> server base -> directory -> profile ID.
//!
//! Two round trips are unavoidable: Webfinger does not expose the numeric account ID,
//! so the server's local directory is scanned to bridge from actor URI to ID.

use crate::domain::{
    Actor, DirectoryEntry, DomainError, Handle, KeyedCollection, RecordId, WebfingerDocument,
    directory_url, resolve_server_base,
};
use crate::ports::HttpPort;
use crate::usecases::PaginatedFetcher;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

pub struct IdentityResolver {
    http: Arc<dyn HttpPort>,
    fetcher: Arc<PaginatedFetcher>,
}

impl IdentityResolver {
    pub fn new(http: Arc<dyn HttpPort>, fetcher: Arc<PaginatedFetcher>) -> Self {
        Self { http, fetcher }
    }

    /// Query Webfinger and return the actor's `application/activity+json` self link.
    ///
    /// Unreachable endpoint, malformed JSON and a missing link are all protocol errors.
    pub async fn resolve_activity_url(&self, handle: &Handle) -> Result<Url, DomainError> {
        let webfinger = handle.webfinger_url()?;
        let response = self.http.get(&webfinger).await.map_err(|e| {
            DomainError::protocol_caused_by(format!("webfinger lookup for {} failed", handle), e)
        })?;

        let document: WebfingerDocument = serde_json::from_str(&response.body).map_err(|e| {
            DomainError::protocol_caused_by(
                format!("webfinger response for {} is malformed", handle),
                DomainError::Decode {
                    url: webfinger.to_string(),
                    message: e.to_string(),
                },
            )
        })?;

        let href = document.activity_href().ok_or_else(|| {
            DomainError::protocol(format!(
                "webfinger for {} has no self link of type application/activity+json",
                handle
            ))
        })?;
        debug!(handle = %handle, href, "webfinger resolved");

        Url::parse(href)
            .map_err(|e| DomainError::protocol(format!("activity URL {:?} is invalid: {}", href, e)))
    }

    /// Full local directory of the server, keyed by each account's `uri`.
    pub async fn resolve_directory(
        &self,
        server_base: &Url,
    ) -> Result<KeyedCollection<DirectoryEntry>, DomainError> {
        let seed = directory_url(server_base)?;
        self.fetcher
            .fetch_all(&seed, &[("local", "true")], |e: &DirectoryEntry| e.uri.clone())
            .await
    }

    /// Directory entry whose canonical URI equals the activity URL.
    pub fn resolve_profile_id(
        activity_url: &Url,
        directory: &KeyedCollection<DirectoryEntry>,
    ) -> Result<RecordId, DomainError> {
        directory
            .get(activity_url.as_str())
            .map(|entry| entry.id.clone())
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "{} is not listed in the server directory ({} entries scanned)",
                    activity_url,
                    directory.len()
                ))
            })
    }

    /// Resolve every derived field of the actor.
    pub async fn resolve(&self, handle: &Handle) -> Result<Actor, DomainError> {
        let activity_url = self.resolve_activity_url(handle).await?;
        let server_base = resolve_server_base(&activity_url)?;
        let directory = self.resolve_directory(&server_base).await?;
        let profile_id = Self::resolve_profile_id(&activity_url, &directory)?;

        info!(
            handle = %handle,
            server = %server_base,
            profile_id = %profile_id,
            "actor resolved"
        );

        Ok(Actor {
            handle: handle.clone(),
            activity_url,
            server_base,
            profile_id,
        })
    }
}
