//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories persist records as given; level-range checks are a UI
//!   convention, not a storage contract.
//! - Read paths reject corrupt persisted state (`InvalidData`) instead of
//!   masking it.

pub mod entry_repo;
pub mod settings_repo;
