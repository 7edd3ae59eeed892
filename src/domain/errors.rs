//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Handle failed syntactic validation. Raised before any network call.
    #[error("{0} is not a valid handle")]
    InvalidHandle(String),

    /// Non-2xx status or connection failure.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Response body is not valid JSON (or not the expected JSON container).
    #[error("failed to decode response from {url} as JSON: {message}")]
    Decode { url: String, message: String },

    /// Well-formed response lacking an expected field or shape.
    #[error("protocol error: {message}")]
    Protocol {
        message: String,
        #[source]
        source: Option<Box<DomainError>>,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("response cache error: {0}")]
    Cache(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Prompt or rendering failure at the CLI boundary.
    #[error("ui error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying failure as a protocol error, keeping it as the source.
    pub fn protocol_caused_by(message: impl Into<String>, cause: DomainError) -> Self {
        Self::Protocol {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_protocol_keeps_cause() {
        let cause = DomainError::Transport {
            url: "https://example.social/.well-known/webfinger".into(),
            message: "HTTP 502".into(),
        };
        let err = DomainError::protocol_caused_by("webfinger lookup failed", cause);
        assert_eq!(err.to_string(), "protocol error: webfinger lookup failed");
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("HTTP 502"));
    }
}
