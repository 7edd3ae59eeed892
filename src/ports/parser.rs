//! Log-line parser port. Isolates the post format from aggregation.

use crate::domain::DayToken;

/// Fields extracted from one log line, before date resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SwimLine {
    pub day: DayToken,
    pub laps: f64,
    pub distance: i64,
}

/// Extracts a swim line from a post body.
///
/// Returns `None` when the content holds no log line; that is not an error.
pub trait SwimLogParser: Send + Sync {
    fn parse(&self, content: &str) -> Option<SwimLine>;
}
