//! Handles and the endpoint URLs derived from them.
//!
//! Everything here is string/URL transformation; no I/O.

use crate::domain::{DomainError, RecordId};
use std::fmt;
use url::Url;
use validator::ValidateEmail;

/// Email-shaped account handle, `local@domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    email: String,
    split: usize,
}

/// Syntactic check only; never touches the network.
pub fn is_valid_handle(candidate: &str) -> bool {
    candidate.validate_email()
}

impl Handle {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim();
        if !is_valid_handle(email) {
            return Err(DomainError::InvalidHandle(raw.to_string()));
        }
        let split = email
            .rfind('@')
            .ok_or_else(|| DomainError::InvalidHandle(raw.to_string()))?;
        Ok(Self {
            email: email.to_string(),
            split,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.email
    }

    pub fn local_part(&self) -> &str {
        &self.email[..self.split]
    }

    pub fn domain(&self) -> &str {
        &self.email[self.split + 1..]
    }

    /// `https://{domain}/.well-known/webfinger?resource=acct:{email}`
    pub fn webfinger_url(&self) -> Result<Url, DomainError> {
        Url::parse(&format!(
            "https://{}/.well-known/webfinger?resource=acct:{}",
            self.domain(),
            self.email
        ))
        .map_err(|e| DomainError::InvalidHandle(format!("{} ({})", self.email, e)))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// Strip path, query and fragment from the actor URL, leaving the server's API root.
pub fn resolve_server_base(activity_url: &Url) -> Result<Url, DomainError> {
    if activity_url.cannot_be_a_base() || activity_url.host_str().is_none() {
        return Err(DomainError::protocol(format!(
            "activity URL {} has no host",
            activity_url
        )));
    }
    let mut base = activity_url.clone();
    base.set_path("");
    base.set_query(None);
    base.set_fragment(None);
    Ok(base)
}

fn api_url(server_base: &Url, path: &str) -> Result<Url, DomainError> {
    server_base
        .join(path)
        .map_err(|e| DomainError::protocol(format!("cannot build {} on {}: {}", path, server_base, e)))
}

/// `{server_base}/api/v1/directory`
pub fn directory_url(server_base: &Url) -> Result<Url, DomainError> {
    api_url(server_base, "api/v1/directory")
}

/// `{server_base}/api/v1/accounts/{profile_id}/statuses`
pub fn statuses_url(server_base: &Url, profile_id: &RecordId) -> Result<Url, DomainError> {
    api_url(
        server_base,
        &format!("api/v1/accounts/{}/statuses", profile_id.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_local_and_domain() {
        let h = Handle::parse("alice@example.social").unwrap();
        assert_eq!(h.local_part(), "alice");
        assert_eq!(h.domain(), "example.social");
        assert_eq!(h.to_string(), "alice@example.social");
    }

    #[test]
    fn test_invalid_handles_rejected() {
        for raw in ["", "alice", "@example.social", "alice@", "a b@example.social"] {
            assert!(
                matches!(Handle::parse(raw), Err(DomainError::InvalidHandle(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_webfinger_url() {
        let h = Handle::parse("alice@example.social").unwrap();
        assert_eq!(
            h.webfinger_url().unwrap().as_str(),
            "https://example.social/.well-known/webfinger?resource=acct:alice@example.social"
        );
    }

    #[test]
    fn test_server_base_strips_path_and_query() {
        let activity = Url::parse("https://example.social:8443/users/alice?x=1#top").unwrap();
        let base = resolve_server_base(&activity).unwrap();
        assert_eq!(base.as_str(), "https://example.social:8443/");
    }

    #[test]
    fn test_api_urls() {
        let base = Url::parse("https://example.social/").unwrap();
        assert_eq!(
            directory_url(&base).unwrap().as_str(),
            "https://example.social/api/v1/directory"
        );
        assert_eq!(
            statuses_url(&base, &RecordId::new("109")).unwrap().as_str(),
            "https://example.social/api/v1/accounts/109/statuses"
        );
    }
}
