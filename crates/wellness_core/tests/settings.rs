use wellness_core::db::open_db_in_memory;
use wellness_core::{
    SettingsRepository, SettingsService, SqliteSettingsRepository, Theme, UserSettings,
};

#[test]
fn load_on_empty_store_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    assert!(repo.load().unwrap().is_none());
}

#[test]
fn get_or_create_synthesizes_and_persists_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    let settings = repo.get_or_create().unwrap();
    assert!(settings.offline_only);
    assert_eq!(settings.theme, Theme::System);
    assert!(settings.metrics.show_sleep);
    assert!(settings.metrics.show_stress);
    assert!(settings.metrics.show_energy);
    assert!(settings.metrics.show_medications);
    assert!(settings.metrics.show_meals);

    // Exactly one row, and a second read sees the persisted record.
    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1);
    assert_eq!(repo.load().unwrap().unwrap(), settings);
}

#[test]
fn repeated_get_or_create_never_adds_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    repo.get_or_create().unwrap();
    repo.get_or_create().unwrap();

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1);
}

#[test]
fn save_then_load_roundtrips_changes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    let mut settings = repo.get_or_create().unwrap();
    settings.theme = Theme::Dark;
    settings.metrics.show_meals = false;
    repo.save(&settings).unwrap();

    let loaded = repo.load().unwrap().unwrap();
    assert_eq!(loaded.theme, Theme::Dark);
    assert!(!loaded.metrics.show_meals);
    assert!(loaded.metrics.show_sleep);

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1);
}

#[test]
fn corrupt_theme_text_is_rejected_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    repo.get_or_create().unwrap();
    conn.execute("UPDATE user_settings SET theme = 'sepia';", [])
        .unwrap();

    let err = repo.load().unwrap_err();
    assert!(err.to_string().contains("sepia"));
}

#[test]
fn settings_service_exposes_load_save_contract() {
    let conn = open_db_in_memory().unwrap();
    let service = SettingsService::new(SqliteSettingsRepository::new(&conn));

    let loaded = service.load().unwrap();
    assert_eq!(loaded, UserSettings::default());

    let mut updated = loaded;
    updated.theme = Theme::Light;
    service.save(&updated).unwrap();

    assert_eq!(service.load().unwrap().theme, Theme::Light);
}
