//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wellness_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("wellness_core version={}", wellness_core::core_version());
    println!(
        "wellness_core schema_version={}",
        wellness_core::db::migrations::latest_version()
    );
}
