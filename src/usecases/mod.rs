//! Application use cases. Orchestrate domain logic via ports.

pub mod fetch_service;
pub mod identity_resolver;
pub mod paginated_fetcher;
pub mod swim_log;

pub use fetch_service::FetchService;
pub use identity_resolver::IdentityResolver;
pub use paginated_fetcher::PaginatedFetcher;
pub use swim_log::SwimLogView;
