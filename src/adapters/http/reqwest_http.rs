//! reqwest-backed HttpPort.
//!
//! No retries and no explicit timeout: a failure aborts the caller's query.

use crate::adapters::http::link_header;
use crate::domain::DomainError;
use crate::ports::{HttpPort, HttpResponse};
use reqwest::header::{ACCEPT, LINK, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

const AGENT: &str = concat!("mastodon-swims/", env!("CARGO_PKG_VERSION"));

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpPort for ReqwestHttp {
    async fn get(&self, url: &Url) -> Result<HttpResponse, DomainError> {
        let transport = |message: String| DomainError::Transport {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, "remote returned error");
            return Err(transport(format!(
                "HTTP {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let next_link = response
            .headers()
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(link_header::next_link);

        let body = response
            .text()
            .await
            .map_err(|e| transport(format!("reading body: {}", e)))?;

        debug!(url = %url, bytes = body.len(), has_next = next_link.is_some(), "GET ok");

        Ok(HttpResponse { body, next_link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_success_with_next_link() {
        let server = MockServer::start().await;
        let next = format!("{}/api/v1/directory?limit=10&offset=10", server.uri());
        Mock::given(method("GET"))
            .and(path("/api/v1/directory"))
            .and(query_param("limit", "10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", format!("<{}>; rel=\"next\"", next).as_str())
                    .set_body_string("[]"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/api/v1/directory?limit=10", server.uri())).unwrap();
        let res = ReqwestHttp::new().get(&url).await.unwrap();
        assert_eq!(res.body, "[]");
        assert_eq!(res.next_link, Some(next));
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/api/v1/directory", server.uri())).unwrap();
        let err = ReqwestHttp::new().get(&url).await.unwrap_err();
        match err {
            DomainError::Transport { url: failed, message } => {
                assert!(failed.ends_with("/api/v1/directory"));
                assert!(message.contains("503"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let url = Url::parse("http://127.0.0.1:9/nothing-here").unwrap();
        let err = ReqwestHttp::new().get(&url).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport { .. }));
    }
}
