//! History query and aggregation use-cases.
//!
//! # Responsibility
//! - Translate a date window into matching entries for list display.
//! - Reshape entries into flat rows for trend charts and tabular export.
//!
//! # Invariants
//! - List views receive entries newest-first; chart series oldest-first.
//! - Chart and export rows drop nested child detail; it stays visible only
//!   in the entry detail view.
//! - Every operation is a stateless transformation of its input.

use crate::model::entry::{DateRange, Level, Meal, Medication, MoodEntry};
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use chrono::{Local, TimeZone};
use serde::Serialize;

/// Placeholder emitted for absent optional values in export rows.
pub const MISSING_VALUE: &str = "N/A";

/// One point of the history trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Human-readable day label, e.g. "Mar 5, 2026".
    pub date: String,
    pub mood: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<Level>,
}

/// One flat row of the tabular export, all values pre-rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub mood: String,
    pub sleep: String,
    pub stress: String,
    pub energy: String,
    pub notes: String,
}

/// Use-case façade over the entry repository for history views.
pub struct HistoryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> HistoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Entries within the window, sorted newest-first for list display.
    pub fn entries_in_range(&self, range: &DateRange) -> RepoResult<Vec<MoodEntry>> {
        let mut entries = self.repo.entries_in_range(range.start, range.end)?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// All medications embedded in entries within the window.
    pub fn medications_in_range(&self, range: &DateRange) -> RepoResult<Vec<Medication>> {
        let entries = self.repo.entries_in_range(range.start, range.end)?;
        Ok(entries
            .into_iter()
            .flat_map(|entry| entry.medications)
            .collect())
    }

    /// All meals embedded in entries within the window.
    pub fn meals_in_range(&self, range: &DateRange) -> RepoResult<Vec<Meal>> {
        let entries = self.repo.entries_in_range(range.start, range.end)?;
        Ok(entries.into_iter().flat_map(|entry| entry.meals).collect())
    }
}

/// Maps entries to chart points in ascending chronological order.
///
/// Accepts input in any order; the result is always oldest-first, the
/// reverse of the list-view ordering.
pub fn chart_series(entries: &[MoodEntry]) -> Vec<ChartPoint> {
    let mut points: Vec<(i64, ChartPoint)> = entries
        .iter()
        .map(|entry| {
            (
                entry.timestamp,
                ChartPoint {
                    date: format_date_label(entry.timestamp),
                    mood: entry.mood,
                    sleep: entry.sleep,
                    stress: entry.stress,
                    energy: entry.energy,
                },
            )
        })
        .collect();
    points.sort_by_key(|(timestamp, _)| *timestamp);
    points.into_iter().map(|(_, point)| point).collect()
}

/// Maps entries to flat export rows, preserving the caller's order.
///
/// Absent sleep/stress/energy values render as [`MISSING_VALUE`]; an absent
/// note renders as an empty string.
pub fn export_rows(entries: &[MoodEntry]) -> Vec<ExportRow> {
    entries
        .iter()
        .map(|entry| ExportRow {
            date: format_date_label(entry.timestamp),
            mood: entry.mood.to_string(),
            sleep: level_or_missing(entry.sleep),
            stress: level_or_missing(entry.stress),
            energy: level_or_missing(entry.energy),
            notes: entry.note.clone().unwrap_or_default(),
        })
        .collect()
}

/// Renders an epoch-millisecond timestamp as a short local-date label.
///
/// Timestamps outside the representable range fall back to the raw number
/// rather than failing the whole view.
pub fn format_date_label(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|moment| moment.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn level_or_missing(level: Option<Level>) -> String {
    level.map_or_else(|| MISSING_VALUE.to_string(), |value| value.to_string())
}
