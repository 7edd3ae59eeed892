//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod handle;
pub mod swim;

pub use entities::{
    Actor, DirectoryEntry, FetchedData, KeyedCollection, RecordId, Status, Tag, WebfingerDocument,
    WebfingerLink,
};
pub use errors::DomainError;
pub use handle::{Handle, directory_url, is_valid_handle, resolve_server_base, statuses_url};
pub use swim::{
    DayToken, ReferenceZone, Statistics, SwimEntry, SwimGoal, parse_created_at, resolve_date,
};
