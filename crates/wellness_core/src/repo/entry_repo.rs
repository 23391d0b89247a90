//! Journal entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and range-query APIs over `mood_entries` storage.
//! - Keep SQL and JSON-column details inside the persistence boundary.
//!
//! # Invariants
//! - Writes store entries as given; no content validation happens here.
//! - Update/delete of a missing id is a silent no-op, mirroring the
//!   permissive contract callers rely on.
//! - `delete_all_entries` runs in one transaction; concurrent readers see
//!   the full pre-delete set or the empty post-delete set, never a partial
//!   one.

use crate::db::DbError;
use crate::model::entry::{CustomMetric, EntryId, Level, Meal, Medication, MoodEntry};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    timestamp,
    mood,
    sleep,
    stress,
    energy,
    note,
    medications,
    meals,
    custom_metrics
FROM mood_entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Field-level patch for [`EntryRepository::update_entry`].
///
/// `None` leaves a field unchanged. The clearable scalar fields use a nested
/// `Option`: `Some(None)` clears the stored value. Child lists are replaced
/// wholesale when present; `Some(vec![])` empties them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub timestamp: Option<i64>,
    pub mood: Option<Level>,
    pub sleep: Option<Option<Level>>,
    pub stress: Option<Option<Level>>,
    pub energy: Option<Option<Level>>,
    pub note: Option<Option<String>>,
    pub medications: Option<Vec<Medication>>,
    pub meals: Option<Vec<Meal>>,
    pub custom_metrics: Option<Vec<CustomMetric>>,
}

impl EntryPatch {
    fn apply(&self, entry: &mut MoodEntry) {
        if let Some(timestamp) = self.timestamp {
            entry.timestamp = timestamp;
        }
        if let Some(mood) = self.mood {
            entry.mood = mood;
        }
        if let Some(sleep) = self.sleep {
            entry.sleep = sleep;
        }
        if let Some(stress) = self.stress {
            entry.stress = stress;
        }
        if let Some(energy) = self.energy {
            entry.energy = energy;
        }
        if let Some(note) = &self.note {
            entry.note = note.clone();
        }
        if let Some(medications) = &self.medications {
            entry.medications = medications.clone();
        }
        if let Some(meals) = &self.meals {
            entry.meals = meals.clone();
        }
        if let Some(custom_metrics) = &self.custom_metrics {
            entry.custom_metrics = custom_metrics.clone();
        }
    }
}

/// Repository interface for journal entry CRUD and range queries.
pub trait EntryRepository {
    /// Inserts a new entry and returns the store-assigned id.
    fn add_entry(&self, entry: &MoodEntry) -> RepoResult<EntryId>;
    /// Merges the patch into the entry with the given id. Missing ids are a
    /// silent no-op.
    fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> RepoResult<()>;
    /// Removes the entry with the given id. Missing ids are a no-op.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Gets one entry by id.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<MoodEntry>>;
    /// Returns every stored entry in storage order.
    fn list_entries(&self) -> RepoResult<Vec<MoodEntry>>;
    /// Returns entries whose timestamp falls within `[start_ms, end_ms]`,
    /// inclusive on both ends, in ascending timestamp order.
    fn entries_in_range(&self, start_ms: i64, end_ms: i64) -> RepoResult<Vec<MoodEntry>>;
    /// Clears the whole entries table atomically. Settings are untouched.
    fn delete_all_entries(&self) -> RepoResult<()>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn add_entry(&self, entry: &MoodEntry) -> RepoResult<EntryId> {
        self.conn.execute(
            "INSERT INTO mood_entries (
                timestamp,
                mood,
                sleep,
                stress,
                energy,
                note,
                medications,
                meals,
                custom_metrics
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                entry.timestamp,
                entry.mood,
                entry.sleep,
                entry.stress,
                entry.energy,
                entry.note.as_deref(),
                list_to_json(&entry.medications, "medications")?,
                list_to_json(&entry.meals, "meals")?,
                list_to_json(&entry.custom_metrics, "custom_metrics")?,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> RepoResult<()> {
        let Some(mut entry) = self.get_entry(id)? else {
            debug!("event=entry_update module=repo status=noop id={id} reason=not_found");
            return Ok(());
        };

        patch.apply(&mut entry);

        self.conn.execute(
            "UPDATE mood_entries
             SET
                timestamp = ?1,
                mood = ?2,
                sleep = ?3,
                stress = ?4,
                energy = ?5,
                note = ?6,
                medications = ?7,
                meals = ?8,
                custom_metrics = ?9
             WHERE id = ?10;",
            params![
                entry.timestamp,
                entry.mood,
                entry.sleep,
                entry.stress,
                entry.energy,
                entry.note.as_deref(),
                list_to_json(&entry.medications, "medications")?,
                list_to_json(&entry.meals, "meals")?,
                list_to_json(&entry.custom_metrics, "custom_metrics")?,
                id,
            ],
        )?;

        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM mood_entries WHERE id = ?1;", [id])?;
        if changed == 0 {
            debug!("event=entry_delete module=repo status=noop id={id} reason=not_found");
        }
        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<MoodEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;

        stmt.query_row([id], |row| Ok(parse_entry_row(row)))
            .optional()?
            .transpose()
    }

    fn list_entries(&self) -> RepoResult<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(&format!("{ENTRY_SELECT_SQL};"))?;
        collect_entries(&mut stmt, params![])
    }

    fn entries_in_range(&self, start_ms: i64, end_ms: i64) -> RepoResult<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE timestamp >= ?1 AND timestamp <= ?2
             ORDER BY timestamp ASC;"
        ))?;
        collect_entries(&mut stmt, params![start_ms, end_ms])
    }

    fn delete_all_entries(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM mood_entries;", [])?;
        tx.commit()?;

        info!("event=entries_cleared module=repo status=ok removed={removed}");
        Ok(())
    }
}

fn collect_entries(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> RepoResult<Vec<MoodEntry>> {
    let mut rows = stmt.query(params)?;
    let mut entries = Vec::new();

    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }

    Ok(entries)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<MoodEntry> {
    Ok(MoodEntry {
        id: Some(row.get("id")?),
        timestamp: row.get("timestamp")?,
        mood: row.get("mood")?,
        sleep: row.get("sleep")?,
        stress: row.get("stress")?,
        energy: row.get("energy")?,
        note: row.get("note")?,
        medications: list_from_json(row.get("medications")?, "medications")?,
        meals: list_from_json(row.get("meals")?, "meals")?,
        custom_metrics: list_from_json(row.get("custom_metrics")?, "custom_metrics")?,
    })
}

fn list_to_json<T: serde::Serialize>(list: &[T], column: &str) -> RepoResult<Option<String>> {
    if list.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(list)
        .map(Some)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {column}: {err}")))
}

fn list_from_json<T: serde::de::DeserializeOwned>(
    raw: Option<String>,
    column: &str,
) -> RepoResult<Vec<T>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(&text).map_err(|err| {
            RepoError::InvalidData(format!("invalid JSON in mood_entries.{column}: {err}"))
        }),
    }
}
