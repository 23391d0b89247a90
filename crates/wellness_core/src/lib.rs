//! Core domain logic for the wellness journal.
//! This crate is the single source of truth for storage and query behavior;
//! UI shells only call into it and render the results.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use export::{build_snapshot, rows_to_csv, snapshot_to_json, ExportSnapshot, EXPORT_VERSION};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    CustomMetric, DateRange, EntryId, Level, Meal, MealCategory, Medication, MetricValue,
    MoodEntry,
};
pub use model::settings::{MetricToggles, Theme, UserSettings};
pub use repo::entry_repo::{
    EntryPatch, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use service::history_service::{
    chart_series, export_rows, ChartPoint, ExportRow, HistoryService, MISSING_VALUE,
};
pub use service::settings_service::SettingsService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
