//! SQLite-backed response cache via libsql. Implements ResponseCachePort.
//!
//! One `responses` table keyed by request URL; entries older than the TTL are ignored
//! on read and purged by `clear_expired`. Database file: {cache_dir}/responses.db

use crate::domain::DomainError;
use crate::ports::{HttpResponse, ResponseCachePort};
use libsql::{Database, params};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

const RESPONSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    url TEXT PRIMARY KEY,
    body TEXT NOT NULL,
    next_link TEXT,
    stored_at INTEGER NOT NULL
)"#;

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn cache_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Cache(e.to_string())
}

/// URL-keyed response store with a fixed time-to-live.
pub struct SqliteResponseCache {
    db: Database,
    db_path: PathBuf,
    ttl: Duration,
}

impl SqliteResponseCache {
    /// Open (or create) `responses.db` under `base_dir` and ensure the schema exists.
    pub async fn connect(base_dir: impl AsRef<Path>, ttl: Duration) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(cache_err)?;
        let db_path = base.join("responses.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(cache_err)?;
        let conn = db.connect().map_err(cache_err)?;

        // PRAGMA returns a row; consume it (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Cache(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(cache_err)?.is_some() {}

        conn.execute(RESPONSES_TABLE, ()).await.map_err(cache_err)?;

        info!(
            path = %db_path.display(),
            ttl_secs = ttl.as_secs(),
            "response cache opened"
        );

        Ok(Self { db, db_path, ttl })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn cutoff(&self) -> i64 {
        now_secs() - self.ttl.as_secs() as i64
    }

    /// Delete entries older than the TTL. Returns the number of rows removed.
    pub async fn clear_expired(&self) -> Result<u64, DomainError> {
        let conn = self.db.connect().map_err(cache_err)?;
        let removed = conn
            .execute(
                "DELETE FROM responses WHERE stored_at <= ?1",
                params![self.cutoff()],
            )
            .await
            .map_err(cache_err)?;
        if removed > 0 {
            info!(removed, "purged expired cache entries");
        }
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl ResponseCachePort for SqliteResponseCache {
    async fn get(&self, url: &str) -> Result<Option<HttpResponse>, DomainError> {
        let conn = self.db.connect().map_err(cache_err)?;
        let mut rows = conn
            .query(
                "SELECT body, next_link FROM responses WHERE url = ?1 AND stored_at > ?2",
                params![url, self.cutoff()],
            )
            .await
            .map_err(cache_err)?;

        if let Some(row) = rows.next().await.map_err(cache_err)? {
            let body: String = row.get(0).map_err(cache_err)?;
            let next_link: Option<String> = row.get::<String>(1).ok();
            Ok(Some(HttpResponse { body, next_link }))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, url: &str, response: &HttpResponse) -> Result<(), DomainError> {
        let conn = self.db.connect().map_err(cache_err)?;
        conn.execute(
            r#"
            INSERT INTO responses (url, body, next_link, stored_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (url) DO UPDATE SET
                body = excluded.body,
                next_link = excluded.next_link,
                stored_at = excluded.stored_at
            "#,
            params![
                url,
                response.body.as_str(),
                response.next_link.clone(),
                now_secs()
            ],
        )
        .await
        .map_err(cache_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.social/api/v1/accounts/1/statuses?limit=10";

    fn page() -> HttpResponse {
        HttpResponse {
            body: r#"[{"id":"1"}]"#.to_string(),
            next_link: Some("https://example.social/api/v1/accounts/1/statuses?limit=10&max_id=1".into()),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqliteResponseCache::connect(dir.path(), Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(cache.get(URL).await.unwrap().is_none());

        cache.put(URL, &page()).await.unwrap();
        assert_eq!(cache.get(URL).await.unwrap(), Some(page()));

        let last = HttpResponse {
            body: "[]".into(),
            next_link: None,
        };
        cache.put(URL, &last).await.unwrap();
        assert_eq!(cache.get(URL).await.unwrap(), Some(last));
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqliteResponseCache::connect(dir.path(), Duration::ZERO)
            .await
            .unwrap();
        cache.put(URL, &page()).await.unwrap();
        assert!(cache.get(URL).await.unwrap().is_none());
        assert_eq!(cache.clear_expired().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = SqliteResponseCache::connect(dir.path(), Duration::from_secs(60))
                .await
                .unwrap();
            cache.put(URL, &page()).await.unwrap();
        }
        let cache = SqliteResponseCache::connect(dir.path(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.path().ends_with("responses.db"));
        assert_eq!(cache.get(URL).await.unwrap(), Some(page()));
    }
}
