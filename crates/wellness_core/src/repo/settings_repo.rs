//! Settings repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the single per-installation settings record.
//! - Synthesize defaults lazily on first read.
//!
//! # Invariants
//! - The settings table never holds more than one row (fixed id 1).
//! - `get_or_create` persists the defaults it returns.

use crate::model::settings::{MetricToggles, Theme, UserSettings};
use crate::repo::entry_repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SETTINGS_ROW_ID: i64 = 1;

/// Repository interface for the settings singleton.
pub trait SettingsRepository {
    /// Returns the stored settings, or `None` when none exist yet.
    fn load(&self) -> RepoResult<Option<UserSettings>>;
    /// Upserts the singleton settings row.
    fn save(&self, settings: &UserSettings) -> RepoResult<()>;
    /// Returns the stored settings, creating and persisting the defaults
    /// when the table is empty.
    fn get_or_create(&self) -> RepoResult<UserSettings>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load(&self) -> RepoResult<Option<UserSettings>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                offline_only,
                theme,
                show_sleep,
                show_stress,
                show_energy,
                show_medications,
                show_meals
             FROM user_settings
             WHERE id = ?1;",
        )?;

        stmt.query_row([SETTINGS_ROW_ID], |row| Ok(parse_settings_row(row)))
            .optional()?
            .transpose()
    }

    fn save(&self, settings: &UserSettings) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_settings (
                id,
                offline_only,
                theme,
                show_sleep,
                show_stress,
                show_energy,
                show_medications,
                show_meals
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                offline_only = excluded.offline_only,
                theme = excluded.theme,
                show_sleep = excluded.show_sleep,
                show_stress = excluded.show_stress,
                show_energy = excluded.show_energy,
                show_medications = excluded.show_medications,
                show_meals = excluded.show_meals;",
            params![
                SETTINGS_ROW_ID,
                settings.offline_only,
                settings.theme.as_str(),
                settings.metrics.show_sleep,
                settings.metrics.show_stress,
                settings.metrics.show_energy,
                settings.metrics.show_medications,
                settings.metrics.show_meals,
            ],
        )?;

        Ok(())
    }

    fn get_or_create(&self) -> RepoResult<UserSettings> {
        if let Some(settings) = self.load()? {
            return Ok(settings);
        }

        let defaults = UserSettings::default();
        self.save(&defaults)?;
        info!("event=settings_created module=repo status=ok theme=system");
        Ok(defaults)
    }
}

fn parse_settings_row(row: &Row<'_>) -> RepoResult<UserSettings> {
    let theme_text: String = row.get("theme")?;
    let theme = Theme::from_str(&theme_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid theme value `{theme_text}` in user_settings.theme"
        ))
    })?;

    Ok(UserSettings {
        offline_only: row.get("offline_only")?,
        theme,
        metrics: MetricToggles {
            show_sleep: row.get("show_sleep")?,
            show_stress: row.get("show_stress")?,
            show_energy: row.get("show_energy")?,
            show_medications: row.get("show_medications")?,
            show_meals: row.get("show_meals")?,
        },
    })
}
