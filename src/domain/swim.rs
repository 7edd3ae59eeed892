//! Swim log domain: day tokens, date resolution, entries and goal statistics.

use crate::domain::DomainError;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::str::FromStr;

/// Annual distance goal in meters.
pub const DEFAULT_ANNUAL_GOAL_M: i64 = 100_000;
/// Pool length in meters; one lap.
pub const DEFAULT_POOL_LENGTH_M: i64 = 25;

/// Day named in a log line. Spellings are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayToken {
    Today,
    Yesterday,
    Weekday(Weekday),
}

impl FromStr for DayToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Today" => DayToken::Today,
            "Yesterday" => DayToken::Yesterday,
            "Monday" => DayToken::Weekday(Weekday::Mon),
            "Tuesday" => DayToken::Weekday(Weekday::Tue),
            "Wednesday" => DayToken::Weekday(Weekday::Wed),
            "Thursday" => DayToken::Weekday(Weekday::Thu),
            "Friday" => DayToken::Weekday(Weekday::Fri),
            "Saturday" => DayToken::Weekday(Weekday::Sat),
            "Sunday" => DayToken::Weekday(Weekday::Sun),
            other => return Err(DomainError::protocol(format!("unknown day token {other:?}"))),
        })
    }
}

/// Timezone in which calendar dates are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    #[default]
    Local,
    Named(Tz),
}

impl ReferenceZone {
    /// Calendar date of `instant` as seen in this zone.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            ReferenceZone::Local => instant.with_timezone(&Local).date_naive(),
            ReferenceZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl FromStr for ReferenceZone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Tz>()
            .map(ReferenceZone::Named)
            .map_err(|e| DomainError::Config(format!("invalid timezone {s:?}: {e}")))
    }
}

/// Parse a post's `created_at`. Offsets are honoured and normalised to UTC.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::protocol(format!("created_at {raw:?} is not RFC 3339: {e}")))
}

/// Calendar date a log line refers to, relative to the post's timestamp.
///
/// Weekday tokens resolve to the most recent such day strictly before the reference
/// date (1..=7 days back); they never resolve to the reference date itself.
pub fn resolve_date(day: DayToken, reference: DateTime<Utc>, zone: &ReferenceZone) -> NaiveDate {
    let today = zone.date_of(reference);
    match day {
        DayToken::Today => today,
        DayToken::Yesterday => today - Duration::days(1),
        DayToken::Weekday(target) => {
            let current = i64::from(today.weekday().num_days_from_monday());
            let wanted = i64::from(target.num_days_from_monday());
            let diff = match (current - wanted).rem_euclid(7) {
                0 => 7,
                d => d,
            };
            today - Duration::days(diff)
        }
    }
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwimEntry {
    pub date: NaiveDate,
    pub laps: f64,
    pub distance: i64,
    pub uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwimGoal {
    pub annual_distance_m: i64,
    pub pool_length_m: i64,
}

impl Default for SwimGoal {
    fn default() -> Self {
        Self {
            annual_distance_m: DEFAULT_ANNUAL_GOAL_M,
            pool_length_m: DEFAULT_POOL_LENGTH_M,
        }
    }
}

/// Progress against the annual goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_swims: usize,
    pub total_laps: f64,
    pub total_distance: i64,
    /// Negative once the goal has been exceeded.
    pub remaining_distance: i64,
    pub remaining_days: i64,
    pub required_average_distance: i64,
    pub required_average_laps: i64,
}

impl Statistics {
    pub fn compute(entries: &[SwimEntry], today: NaiveDate, goal: SwimGoal) -> Self {
        let total_laps: f64 = entries.iter().map(|e| e.laps).sum();
        let total_distance: i64 = entries.iter().map(|e| e.distance).sum();
        let remaining_distance = goal.annual_distance_m - total_distance;

        let mut remaining_days = NaiveDate::from_ymd_opt(today.year(), 12, 31)
            .map_or(0, |last| (last - today).num_days());
        if entries.iter().any(|e| e.date == today) {
            remaining_days -= 1;
        }

        let required_average_distance = if remaining_days > 0 {
            (remaining_distance as f64 / remaining_days as f64).ceil() as i64
        } else {
            0
        };
        let required_average_laps = if goal.pool_length_m > 0 {
            (required_average_distance as f64 / goal.pool_length_m as f64).ceil() as i64
        } else {
            0
        };

        Self {
            total_swims: entries.len(),
            total_laps,
            total_distance,
            remaining_distance,
            remaining_days,
            required_average_distance,
            required_average_laps,
        }
    }
}
