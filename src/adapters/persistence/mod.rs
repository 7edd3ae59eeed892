//! Persistence adapters. Local storage behind outbound ports.

pub mod response_cache;

pub use response_cache::SqliteResponseCache;
