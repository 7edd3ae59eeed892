//! Log-line parser adapters. Implement SwimLogParser.

pub mod sentence;

pub use sentence::SentencePattern;
