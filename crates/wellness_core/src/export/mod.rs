//! Export snapshot assembly and file serialization.
//!
//! # Responsibility
//! - Assemble the full-database export snapshot (entries + settings).
//! - Serialize history rows to CSV and snapshots to JSON.
//!
//! # Invariants
//! - The JSON document keeps the established on-disk shape:
//!   `{moodEntries, userSettings, exportDate, exportVersion}`.
//! - CSV values are always double-quoted with embedded quotes doubled; the
//!   header row is unquoted.

use crate::model::entry::MoodEntry;
use crate::model::settings::UserSettings;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use crate::repo::settings_repo::SettingsRepository;
use crate::service::history_service::ExportRow;
use chrono::{SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Format-version string stamped into every snapshot.
pub const EXPORT_VERSION: &str = "1.0";

/// Column headers of the CSV export, in output order.
pub const CSV_HEADERS: [&str; 6] = ["Date", "Mood", "Sleep", "Stress", "Energy", "Notes"];

/// Complete database snapshot for downstream serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub mood_entries: Vec<MoodEntry>,
    pub user_settings: UserSettings,
    /// ISO-8601 instant at which the snapshot was taken.
    pub export_date: String,
    pub export_version: String,
}

/// Assembles a snapshot of every entry plus the current settings.
///
/// Settings are materialized with defaults when absent, so a snapshot is
/// always self-contained.
pub fn build_snapshot<E, S>(
    entries: &E,
    settings: &S,
    exported_at_ms: i64,
) -> RepoResult<ExportSnapshot>
where
    E: EntryRepository,
    S: SettingsRepository,
{
    Ok(ExportSnapshot {
        mood_entries: entries.list_entries()?,
        user_settings: settings.get_or_create()?,
        export_date: iso8601_utc(exported_at_ms),
        export_version: EXPORT_VERSION.to_string(),
    })
}

/// Serializes a snapshot to pretty-printed JSON.
pub fn snapshot_to_json(snapshot: &ExportSnapshot) -> RepoResult<String> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode export snapshot: {err}")))
}

/// Serializes export rows to CSV text.
pub fn rows_to_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for row in rows {
        let fields = [
            row.date.as_str(),
            row.mood.as_str(),
            row.sleep.as_str(),
            row.stress.as_str(),
            row.energy.as_str(),
            row.notes.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|field| csv_quote(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn iso8601_utc(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|moment| moment.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp_ms.to_string())
}
