//! Append-only, comma-delimited stats log: one line per completed session.
//!
//! Fields, in order: timestamp, player name, win flag, formatted time, move
//! count, board width, board height, mine count. The format has no escaping,
//! so commas in the player name are replaced before writing.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::Local;

use crate::screen::game::SessionReport;

const FIELD_COUNT: usize = 8;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsRecord {
    pub timestamp: String,
    pub name: String,
    pub is_win: bool,
    pub time: String,
    pub moves: u32,
    pub width: u16,
    pub height: u16,
    pub mines: u32,
}

impl StatsRecord {
    pub fn from_report(name: &str, report: &SessionReport) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            name: sanitize_name(name),
            is_win: report.is_win,
            time: format_duration(report.elapsed),
            moves: report.moves,
            width: report.config.width,
            height: report.config.height,
            mines: report.config.mines,
        }
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.timestamp,
            self.name,
            self.is_win,
            self.time,
            self.moves,
            self.width,
            self.height,
            self.mines
        )
    }

    fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return None;
        }

        Some(Self {
            timestamp: fields[0].to_owned(),
            name: fields[1].to_owned(),
            is_win: fields[2].parse().ok()?,
            time: fields[3].to_owned(),
            moves: fields[4].parse().ok()?,
            width: fields[5].parse().ok()?,
            height: fields[6].parse().ok()?,
            mines: fields[7].parse().ok()?,
        })
    }
}

/// Appends one record, creating the log on first use.
pub fn append(path: &Path, record: &StatsRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open stats log {}", path.display()))?;
    writeln!(file, "{}", record.to_line())?;
    Ok(())
}

/// Reads the whole log. `Ok(None)` means the log does not exist yet, which the
/// menu reports as "no stats" rather than an error. Malformed lines are
/// skipped.
pub fn load(path: &Path) -> Result<Option<Vec<StatsRecord>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stats log {}", path.display()))?;

    let mut records = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match StatsRecord::parse_line(line) {
            Some(record) => records.push(record),
            None => log::warn!("Skipping malformed stats line: {line:?}"),
        }
    }

    Ok(Some(records))
}

/// The log format has no escaping, so the one delimiter is replaced.
pub fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        "anonymous".to_owned()
    } else {
        trimmed.replace(',', ".")
    }
}

pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StatsRecord {
        StatsRecord {
            timestamp: "2026-08-27 12:00:00".to_owned(),
            name: "player one".to_owned(),
            is_win: true,
            time: "1m 5s".to_owned(),
            moves: 42,
            width: 9,
            height: 9,
            mines: 10,
        }
    }

    #[test]
    fn line_round_trip() {
        let original = record();
        let parsed = StatsRecord::parse_line(&original.to_line()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(StatsRecord::parse_line(""), None);
        assert_eq!(StatsRecord::parse_line("a,b,c"), None);
        assert_eq!(
            StatsRecord::parse_line("2026-08-27 12:00:00,bob,maybe,1m 5s,42,9,9,10"),
            None
        );
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize_name("  bob  "), "bob");
        assert_eq!(sanitize_name("a,b,c"), "a.b.c");
        assert_eq!(sanitize_name("   "), "anonymous");
    }

    #[test]
    fn durations_format_as_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0m 0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "0m 59s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn append_then_load_round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!(
            "minefield-stats-test-{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        assert_eq!(load(&path).unwrap(), None);

        append(&path, &record()).unwrap();
        let mut second = record();
        second.is_win = false;
        append(&path, &second).unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded, vec![record(), second]);

        let _ = std::fs::remove_file(&path);
    }
}
