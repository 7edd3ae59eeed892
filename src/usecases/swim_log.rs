//! Swim log view over an actor's statuses: filter -> parse -> resolve dates -> sort -> aggregate.
//!
//! Pure transforms of a fetched snapshot; nothing is cached between calls.

use crate::domain::{
    DomainError, KeyedCollection, ReferenceZone, Statistics, Status, SwimEntry, SwimGoal,
    parse_created_at, resolve_date,
};
use crate::ports::SwimLogParser;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::debug;

/// Tag marking a status as a swim log.
pub const SWIM_TAG: &str = "swim";

pub struct SwimLogView {
    parser: Arc<dyn SwimLogParser>,
    zone: ReferenceZone,
    goal: SwimGoal,
}

impl SwimLogView {
    pub fn new(parser: Arc<dyn SwimLogParser>, zone: ReferenceZone, goal: SwimGoal) -> Self {
        Self { parser, zone, goal }
    }

    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Swim entries of `today`'s calendar year, ascending by date (stable for equal dates).
    ///
    /// The year check is a prefix match on `created_at`, so last year's logs drop out
    /// once the calendar rolls over.
    pub fn list_swim_entries(
        &self,
        statuses: &KeyedCollection<Status>,
        today: NaiveDate,
    ) -> Result<Vec<SwimEntry>, DomainError> {
        let year = today.year().to_string();
        let mut entries = Vec::new();

        for status in statuses.values() {
            if !status.has_tag(SWIM_TAG) || !status.created_at.starts_with(&year) {
                continue;
            }
            let Some(line) = self.parser.parse(&status.content) else {
                debug!(id = %status.id, "swim-tagged status has no log line");
                continue;
            };
            let created = parse_created_at(&status.created_at)?;
            entries.push(SwimEntry {
                date: resolve_date(line.day, created, &self.zone),
                laps: line.laps,
                distance: line.distance,
                uri: status.uri.clone(),
            });
        }

        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    pub fn get_statistics(&self, entries: &[SwimEntry], today: NaiveDate) -> Statistics {
        Statistics::compute(entries, today, self.goal)
    }
}
