//! Settings use-case service.
//!
//! # Responsibility
//! - Expose the settings singleton through an explicit load/save contract.
//! - Keep callers away from ambient globals and row-level details.
//!
//! # Invariants
//! - `load` always yields a settings value; first read materializes the
//!   defaults.

use crate::model::settings::UserSettings;
use crate::repo::entry_repo::RepoResult;
use crate::repo::settings_repo::SettingsRepository;

/// Configuration service backed by the settings repository.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the current settings, creating the defaults on first read.
    pub fn load(&self) -> RepoResult<UserSettings> {
        self.repo.get_or_create()
    }

    /// Persists the given settings as the singleton record.
    pub fn save(&self, settings: &UserSettings) -> RepoResult<()> {
        self.repo.save(settings)
    }
}
