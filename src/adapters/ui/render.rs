//! Output rendering: aligned text tables and pretty JSON.

use crate::domain::{KeyedCollection, Statistics, Status, SwimEntry};
use serde::Serialize;

#[derive(Serialize)]
struct SwimReport<'a> {
    swims: &'a [SwimEntry],
    statistics: &'a Statistics,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    statuses: &'a KeyedCollection<Status>,
}

fn is_numeric(cell: &str) -> bool {
    cell.parse::<f64>().is_ok()
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], numeric: &[bool]) -> String {
    cells
        .enumerate()
        .map(|(i, c)| {
            let w = widths[i];
            if numeric[i] {
                format!("{:>w$}", c)
            } else {
                format!("{:<w$}", c)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Plain-text table: header, dashed rule, rows. Numeric columns are right-aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let numeric: Vec<bool> = (0..headers.len())
        .map(|i| {
            let cells: Vec<&String> = rows
                .iter()
                .filter_map(|r| r.get(i))
                .filter(|c| !c.is_empty())
                .collect();
            !cells.is_empty() && cells.iter().all(|c| is_numeric(c))
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(headers.iter().copied(), &widths, &numeric));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        let cells = (0..headers.len()).map(|i| row.get(i).map(String::as_str).unwrap_or(""));
        out.push_str(&format_row(cells, &widths, &numeric));
        out.push('\n');
    }
    out
}

/// Swim entries followed by Total / Remaining / Remaining Days / Required Average rows.
pub fn swims_table(entries: &[SwimEntry], stats: &Statistics) -> String {
    let mut rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.date.format("%Y-%m-%d").to_string(),
                e.laps.to_string(),
                e.distance.to_string(),
                e.uri.clone(),
            ]
        })
        .collect();
    let summary = |label: &str, laps: String, distance: i64| {
        vec![label.to_string(), laps, distance.to_string(), String::new()]
    };
    rows.push(summary("Total", stats.total_laps.to_string(), stats.total_distance));
    rows.push(summary("Remaining", String::new(), stats.remaining_distance));
    rows.push(summary("Remaining Days", String::new(), stats.remaining_days));
    rows.push(summary(
        "Required Average",
        stats.required_average_laps.to_string(),
        stats.required_average_distance,
    ));
    render_table(&["date", "laps", "distance", "uri"], &rows)
}

pub fn swims_json(entries: &[SwimEntry], stats: &Statistics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SwimReport {
        swims: entries,
        statistics: stats,
    })
}

pub fn statuses_table(statuses: &KeyedCollection<Status>) -> String {
    let rows: Vec<Vec<String>> = statuses
        .values()
        .map(|s| vec![s.id.to_string(), s.created_at.clone(), s.content.clone()])
        .collect();
    render_table(&["id", "created_at", "content"], &rows)
}

pub fn statuses_json(statuses: &KeyedCollection<Status>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&StatusReport { statuses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, SwimGoal};
    use chrono::NaiveDate;

    fn entries() -> Vec<SwimEntry> {
        vec![SwimEntry {
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            laps: 40.0,
            distance: 1000,
            uri: "https://example.social/users/alice/statuses/1".into(),
        }]
    }

    #[test]
    fn test_render_table_alignment() {
        let out = render_table(
            &["name", "n"],
            &[vec!["a".into(), "5".into()], vec!["bbb".into(), "100".into()]],
        );
        assert_eq!(out, "name    n\n----  ---\na       5\nbbb   100\n");
    }

    #[test]
    fn test_swims_table_has_summary_rows() {
        let e = entries();
        let stats = Statistics::compute(&e, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(), SwimGoal::default());
        let out = swims_table(&e, &stats);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2 + 1 + 4);
        assert!(lines[2].starts_with("2024-06-10"));
        assert!(lines[3].starts_with("Total"));
        assert!(lines[6].starts_with("Required Average"));
        assert!(lines[4].contains("99000"));
    }

    #[test]
    fn test_swims_json_shape() {
        let e = entries();
        let stats = Statistics::compute(&e, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(), SwimGoal::default());
        let v: serde_json::Value = serde_json::from_str(&swims_json(&e, &stats).unwrap()).unwrap();
        assert_eq!(v["swims"][0]["date"], "2024-06-10");
        assert_eq!(v["swims"][0]["distance"], 1000);
        assert_eq!(v["statistics"]["remaining_distance"], 99000);
        assert_eq!(v["statistics"]["remaining_days"], 30);
    }

    #[test]
    fn test_statuses_json_keyed_by_id() {
        let mut c = KeyedCollection::new();
        c.insert(
            "42".to_string(),
            Status {
                id: RecordId::new("42"),
                created_at: "2024-06-11T08:00:00.000Z".into(),
                content: "<p>hi</p>".into(),
                tags: vec![],
                uri: "https://example.social/users/alice/statuses/42".into(),
            },
        );
        let v: serde_json::Value = serde_json::from_str(&statuses_json(&c).unwrap()).unwrap();
        assert_eq!(v["statuses"]["42"]["content"], "<p>hi</p>");
        assert!(statuses_table(&c).contains("2024-06-11T08:00:00.000Z"));
    }
}
