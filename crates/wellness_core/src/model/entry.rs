//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical `MoodEntry` record and its owned child lists.
//! - Provide lifecycle helpers for medication taken-state.
//! - Parse free-form metric input into an explicit value union.
//!
//! # Invariants
//! - `timestamp` is epoch milliseconds and is the natural sort/filter key.
//! - `mood` is always present; every other field is optional.
//! - Child lists are value composites serialized inside the parent row.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Store-assigned integer key for a persisted entry.
pub type EntryId = i64;

/// Severity/quality level. 1-5 by UI convention; not store-enforced.
pub type Level = u8;

/// One journaling session.
///
/// `id` is `None` until the store assigns a key on insert. Entries are
/// replaced or deleted wholesale; the store never merges child lists on
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<EntryId>,
    /// Epoch milliseconds at which the session was recorded.
    pub timestamp: i64,
    pub mood: Level,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sleep: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stress: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub energy: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub medications: Vec<Medication>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub meals: Vec<Meal>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub custom_metrics: Vec<CustomMetric>,
}

impl MoodEntry {
    /// Creates an entry with only the required fields set.
    pub fn new(timestamp: i64, mood: Level) -> Self {
        Self {
            id: None,
            timestamp,
            mood,
            sleep: None,
            stress: None,
            energy: None,
            note: None,
            medications: Vec::new(),
            meals: Vec::new(),
            custom_metrics: Vec::new(),
        }
    }
}

/// A medication tracked within a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    /// Free-form dosage text; may be empty.
    pub dosage: String,
    pub taken: bool,
    /// Epoch milliseconds when marked taken; `None` while unmarked.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time: Option<i64>,
}

impl Medication {
    pub fn new(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            taken: false,
            time: None,
        }
    }

    /// Flips the taken flag and recomputes `time`: set to now when the
    /// medication becomes taken, cleared when unmarked.
    pub fn toggle_taken(&mut self) {
        self.set_taken_at(!self.taken, Utc::now().timestamp_millis());
    }

    /// Deterministic variant of [`Medication::toggle_taken`] for callers
    /// that supply their own clock.
    pub fn set_taken_at(&mut self, taken: bool, now_ms: i64) {
        self.taken = taken;
        self.time = taken.then_some(now_ms);
    }
}

/// Fixed meal slot for a [`Meal`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A meal tracked within a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    /// Epoch milliseconds when the meal was added.
    pub time: i64,
    pub category: MealCategory,
    /// Optional 1-5 rating.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<Level>,
}

/// Value of a user-defined metric.
///
/// An explicit union rather than dynamic typing: the variant is chosen once
/// at input time by [`MetricValue::parse`] and persists unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl MetricValue {
    /// Ordered parse of raw user input: numeric first, then the boolean
    /// literals `true`/`false` (case-insensitive), then raw text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(number) = raw.trim().parse::<f64>() {
            return Self::Number(number);
        }
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// A user-defined metric tracked within a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMetric {
    pub name: String,
    pub value: MetricValue,
    /// Optional unit label, e.g. "steps" or "ml".
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<String>,
}

/// Inclusive timestamp window used by history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Epoch milliseconds, inclusive.
    pub start: i64,
    /// Epoch milliseconds, inclusive.
    pub end: i64,
}

impl DateRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window covering the trailing `days` days up to `now_ms`.
    ///
    /// Backs the week/month/3-months/year presets of the history view.
    pub fn trailing_days(days: i64, now_ms: i64) -> Self {
        Self {
            start: now_ms - days * 24 * 60 * 60 * 1000,
            end: now_ms,
        }
    }
}
