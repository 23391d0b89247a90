use wellness_core::db::open_db_in_memory;
use wellness_core::{
    CustomMetric, EntryPatch, EntryRepository, Meal, MealCategory, Medication, MetricValue,
    MoodEntry, SqliteEntryRepository,
};

fn full_entry(timestamp: i64) -> MoodEntry {
    let mut entry = MoodEntry::new(timestamp, 4);
    entry.sleep = Some(3);
    entry.stress = Some(2);
    entry.energy = Some(5);
    entry.note = Some("slept well, long walk".to_string());
    entry.medications = vec![Medication {
        name: "Ibuprofen".to_string(),
        dosage: "400mg".to_string(),
        taken: true,
        time: Some(timestamp),
    }];
    entry.meals = vec![Meal {
        name: "Oatmeal".to_string(),
        time: timestamp,
        category: MealCategory::Breakfast,
        rating: Some(4),
    }];
    entry.custom_metrics = vec![CustomMetric {
        name: "steps".to_string(),
        value: MetricValue::Number(10000.0),
        unit: Some("steps".to_string()),
    }];
    entry
}

#[test]
fn add_assigns_id_and_roundtrips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let entry = full_entry(1_700_000_000_000);
    let id = repo.add_entry(&entry).unwrap();
    assert!(id > 0);

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.timestamp, entry.timestamp);
    assert_eq!(loaded.mood, 4);
    assert_eq!(loaded.sleep, Some(3));
    assert_eq!(loaded.note.as_deref(), Some("slept well, long walk"));
    assert_eq!(loaded.medications, entry.medications);
    assert_eq!(loaded.meals, entry.meals);
    assert_eq!(loaded.custom_metrics, entry.custom_metrics);
}

#[test]
fn add_assigns_distinct_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let first = repo.add_entry(&MoodEntry::new(1, 3)).unwrap();
    let second = repo.add_entry(&MoodEntry::new(2, 3)).unwrap();
    assert!(second > first);
}

#[test]
fn store_performs_no_content_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    // mood=9 is outside the UI's 1-5 convention but persists as given.
    let id = repo.add_entry(&MoodEntry::new(42, 9)).unwrap();
    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.mood, 9);
}

#[test]
fn update_merges_given_fields_and_keeps_the_rest() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo.add_entry(&full_entry(1_000)).unwrap();

    let patch = EntryPatch {
        mood: Some(2),
        note: Some(Some("rough afternoon".to_string())),
        ..EntryPatch::default()
    };
    repo.update_entry(id, &patch).unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.mood, 2);
    assert_eq!(loaded.note.as_deref(), Some("rough afternoon"));
    // Untouched fields survive the merge.
    assert_eq!(loaded.sleep, Some(3));
    assert_eq!(loaded.medications.len(), 1);
}

#[test]
fn update_can_clear_optional_fields_and_child_lists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo.add_entry(&full_entry(1_000)).unwrap();

    let patch = EntryPatch {
        sleep: Some(None),
        note: Some(None),
        medications: Some(Vec::new()),
        ..EntryPatch::default()
    };
    repo.update_entry(id, &patch).unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.sleep, None);
    assert_eq!(loaded.note, None);
    assert!(loaded.medications.is_empty());
    assert_eq!(loaded.meals.len(), 1);
}

#[test]
fn update_missing_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo.add_entry(&MoodEntry::new(1_000, 3)).unwrap();

    let patch = EntryPatch {
        mood: Some(5),
        ..EntryPatch::default()
    };
    repo.update_entry(id + 999, &patch).unwrap();

    // Other rows are untouched.
    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.mood, 3);
}

#[test]
fn delete_removes_entry_and_missing_id_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo.add_entry(&MoodEntry::new(1_000, 3)).unwrap();

    repo.delete_entry(id + 999).unwrap();
    assert_eq!(repo.list_entries().unwrap().len(), 1);

    repo.delete_entry(id).unwrap();
    assert!(repo.get_entry(id).unwrap().is_none());
    assert!(repo.list_entries().unwrap().is_empty());
}

#[test]
fn corrupt_child_list_json_is_rejected_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo.add_entry(&MoodEntry::new(1_000, 3)).unwrap();
    conn.execute(
        "UPDATE mood_entries SET medications = 'not json' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let err = repo.get_entry(id).unwrap_err();
    assert!(err.to_string().contains("medications"));
}
