//! Persisted user settings.
//!
//! # Responsibility
//! - Define the single per-installation settings record.
//! - Provide the hard-coded defaults used for lazy first-read creation.
//!
//! # Invariants
//! - Exactly one settings row exists once any reader has touched the store.
//! - `offline_only` stays `true`; no cloud path exists.

use serde::{Deserialize, Serialize};

/// UI theme preference. Stored as part of settings; rendering is out of
/// scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Display flags for the optional trackers on the entry form and history
/// views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricToggles {
    pub show_sleep: bool,
    pub show_stress: bool,
    pub show_energy: bool,
    pub show_medications: bool,
    pub show_meals: bool,
}

impl Default for MetricToggles {
    fn default() -> Self {
        Self {
            show_sleep: true,
            show_stress: true,
            show_energy: true,
            show_medications: true,
            show_meals: true,
        }
    }
}

/// Singleton settings record, created lazily with these defaults on first
/// read if absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub offline_only: bool,
    pub theme: Theme,
    pub metrics: MetricToggles,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            offline_only: true,
            theme: Theme::System,
            metrics: MetricToggles::default(),
        }
    }
}
