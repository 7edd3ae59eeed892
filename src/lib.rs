//! mastodon-swims: resolve a Mastodon handle, fetch its statuses and track swim logs
//! against an annual distance goal. Hexagonal architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
