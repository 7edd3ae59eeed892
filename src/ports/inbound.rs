//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: CLI runs one query (swims or statuses) for one handle.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    async fn run(&self) -> Result<(), DomainError>;
}
