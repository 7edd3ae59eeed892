//! Regex parser for the sentence-style swim log:
//! `<p>{Day}...: {laps} laps for {distance}m`.

use crate::domain::DayToken;
use crate::ports::{SwimLine, SwimLogParser};
use regex::Regex;
use std::sync::LazyLock;

static SWIM_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"<p>(?P<day>(?:To|Yester|Mon|Tues|Wednes|Thurs|Fri|Satur|Sun)day).*: (?P<laps>[\d.]*) laps for (?P<distance>\d*)m",
    )
    .ok()
});

/// Matches the first swim sentence found in an HTML post body.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentencePattern;

impl SentencePattern {
    pub fn new() -> Self {
        Self
    }
}

impl SwimLogParser for SentencePattern {
    fn parse(&self, content: &str) -> Option<SwimLine> {
        let caps = SWIM_LINE.as_ref()?.captures(content)?;
        let day: DayToken = caps.name("day")?.as_str().parse().ok()?;
        // The character classes admit "" and "1.2.3"; those are not log lines.
        let laps: f64 = caps.name("laps")?.as_str().parse().ok()?;
        let distance: i64 = caps.name("distance")?.as_str().parse().ok()?;
        Some(SwimLine {
            day,
            laps,
            distance,
        })
    }
}
