//! Domain records for the wellness journal.
//!
//! # Responsibility
//! - Define the canonical journal-entry shape and its owned child records.
//! - Define the persisted settings singleton.
//!
//! # Invariants
//! - Child records (medications, meals, custom metrics) live inside their
//!   parent entry; they carry no independent identity or lifecycle.
//! - Level fields (mood, sleep, stress, energy) use 1-5 by UI convention;
//!   the store does not enforce the range.

pub mod entry;
pub mod settings;
