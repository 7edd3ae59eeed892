//! Fetch service: resolve the actor, then pull every status into one immutable snapshot.
//!
//! Runs strictly sequentially; views are computed from the returned `FetchedData`.

use crate::domain::{Actor, DomainError, FetchedData, Handle, KeyedCollection, Status, statuses_url};
use crate::usecases::{IdentityResolver, PaginatedFetcher};
use std::sync::Arc;
use tracing::info;

pub struct FetchService {
    resolver: Arc<IdentityResolver>,
    fetcher: Arc<PaginatedFetcher>,
}

impl FetchService {
    pub fn new(resolver: Arc<IdentityResolver>, fetcher: Arc<PaginatedFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Every status of the actor, keyed by status ID.
    pub async fn fetch_statuses(
        &self,
        actor: &Actor,
    ) -> Result<KeyedCollection<Status>, DomainError> {
        let seed = statuses_url(&actor.server_base, &actor.profile_id)?;
        self.fetcher
            .fetch_all(&seed, &[], |s: &Status| s.id.to_string())
            .await
    }

    pub async fn fetch(&self, handle: &Handle) -> Result<FetchedData, DomainError> {
        let actor = self.resolver.resolve(handle).await?;
        let statuses = self.fetch_statuses(&actor).await?;
        info!(handle = %handle, statuses = statuses.len(), "snapshot fetched");
        Ok(FetchedData { actor, statuses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockHttp;
    use crate::adapters::parser::SentencePattern;
    use crate::domain::{ReferenceZone, SwimGoal};
    use crate::usecases::SwimLogView;
    use crate::usecases::paginated_fetcher::DEFAULT_PAGE_LIMIT;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    const WEBFINGER: &str =
        "https://example.social/.well-known/webfinger?resource=acct:alice@example.social";
    const DIRECTORY: &str = "https://example.social/api/v1/directory?limit=10&local=true";
    const STATUSES: &str = "https://example.social/api/v1/accounts/109/statuses?limit=10";
    const ALICE: &str = "https://example.social/users/alice";

    fn service(http: Arc<MockHttp>) -> FetchService {
        let fetcher = Arc::new(PaginatedFetcher::new(http.clone(), DEFAULT_PAGE_LIMIT));
        let resolver = Arc::new(IdentityResolver::new(http, fetcher.clone()));
        FetchService::new(resolver, fetcher)
    }

    fn statuses() -> Vec<Value> {
        let logs = [
            ("1", "2024-06-11T08:00:00.000Z", "<p>Monday swim: 40 laps for 1000m</p>", "swim"),
            ("2", "2024-06-12T07:00:00.000Z", "<p>Today: 60 laps for 1500m</p>", "swim"),
            ("3", "2024-06-13T07:00:00.000Z", "<p>Nice weather</p>", "swim"),
            ("4", "2024-06-14T07:00:00.000Z", "<p>Today: 10 laps for 250m</p>", "running"),
            ("5", "2024-06-16T09:00:00.000Z", "<p>Saturday swim: 30.5 laps for 762m</p>", "swim"),
        ];
        logs.iter()
            .map(|(id, created, content, tag)| {
                json!({
                    "id": id,
                    "created_at": created,
                    "content": content,
                    "tags": [{"name": tag}],
                    "uri": format!("{}/statuses/{}", ALICE, id),
                    "visibility": "public"
                })
            })
            .collect()
    }

    fn mock_with_pages(page_sizes: &[usize]) -> MockHttp {
        let all = statuses();
        let mut mock = MockHttp::new()
            .with_json(
                WEBFINGER,
                &json!({"links": [{"rel": "self", "type": "application/activity+json", "href": ALICE}]}),
                None,
            )
            .with_json(DIRECTORY, &json!([{"id": "109", "uri": ALICE}]), None);

        let mut start = 0;
        for (i, size) in page_sizes.iter().enumerate() {
            let url = if i == 0 {
                STATUSES.to_string()
            } else {
                format!("{}&max_id=p{}", STATUSES, i)
            };
            let next = (i + 1 < page_sizes.len()).then(|| format!("{}&max_id=p{}", STATUSES, i + 1));
            let page: Vec<Value> = all[start..start + size].to_vec();
            mock = mock.with_json(&url, &Value::Array(page), next.as_deref());
            start += size;
        }
        mock
    }

    fn view() -> SwimLogView {
        SwimLogView::new(
            Arc::new(SentencePattern::new()),
            ReferenceZone::Named(chrono_tz::UTC),
            SwimGoal::default(),
        )
    }

    #[tokio::test]
    async fn test_fetch_resolves_and_collects() {
        let http = Arc::new(mock_with_pages(&[3, 2]));
        let handle = Handle::parse("alice@example.social").unwrap();

        let data = service(http.clone()).fetch(&handle).await.unwrap();

        assert_eq!(data.actor.profile_id.as_str(), "109");
        assert_eq!(data.statuses.len(), 5);
        assert_eq!(http.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_page_boundaries_do_not_change_statistics() {
        let handle = Handle::parse("alice@example.social").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let v = view();

        let layouts: [&[usize]; 4] = [&[5], &[1, 4], &[2, 2, 1], &[1, 1, 1, 1, 1]];
        let mut results = Vec::new();
        for layout in layouts {
            let http = Arc::new(mock_with_pages(layout));
            let data = service(http).fetch(&handle).await.unwrap();
            let entries = v.list_swim_entries(&data.statuses, today).unwrap();
            results.push((entries.clone(), v.get_statistics(&entries, today)));
        }

        let (entries, stats) = &results[0];
        assert_eq!(entries.len(), 3);
        assert_eq!(stats.total_distance, 1000 + 1500 + 762);
        assert!((stats.total_laps - 130.5).abs() < f64::EPSILON);
        for other in &results[1..] {
            assert_eq!(other, &results[0]);
        }
    }

    #[tokio::test]
    async fn test_failed_statuses_page_fails_whole_fetch() {
        let http = Arc::new(mock_with_pages(&[3]).with_status(STATUSES, 500));
        let handle = Handle::parse("alice@example.social").unwrap();
        let err = service(http).fetch(&handle).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport { .. }));
    }
}
