//! Infrastructure adapters. Implement ports.
//!
//! HTTP transport, response cache, log parser, CLI. Map errors to DomainError.

pub mod http;
pub mod parser;
pub mod persistence;
pub mod ui;
