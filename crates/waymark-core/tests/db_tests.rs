use std::collections::BTreeMap;

use rusqlite::Connection;
use tempfile::NamedTempFile;
use waymark_core::{Database, PlanItem, PlanSnapshot, TimeOfDay};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn snapshot(trip_id: &str) -> PlanSnapshot {
    PlanSnapshot {
        trip_id: trip_id.to_string(),
        trip_title: Some("Alpine Loop".to_string()),
        exported_at: None,
        days: BTreeMap::from([
            (
                1,
                vec![PlanItem::section("bled").at(Some(TimeOfDay::new(8, 15).unwrap()))],
            ),
            (2, vec![PlanItem::subsection("bled", "vintgar")]),
        ]),
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert!(db.list_plans().unwrap().is_empty());
}

#[test]
fn test_plans_are_kept_per_trip() {
    let (_temp_file, db) = create_test_db();
    db.save_plan(&snapshot("alpine-loop")).unwrap();
    db.save_plan(&snapshot("mazury")).unwrap();

    assert_eq!(db.load_plan("alpine-loop").unwrap(), Some(snapshot("alpine-loop")));
    assert!(db.delete_plan("mazury").unwrap());
    assert!(!db.delete_plan("mazury").unwrap());
    assert_eq!(db.load_plan("mazury").unwrap(), None);
    assert_eq!(db.list_plans().unwrap().len(), 1);
}

#[test]
fn test_version_one_database_is_migrated() {
    let temp_file = NamedTempFile::new().unwrap();
    {
        let conn = Connection::open(temp_file.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE plans (trip_id TEXT PRIMARY KEY NOT NULL, snapshot TEXT NOT NULL, updated_at TEXT NOT NULL);
             PRAGMA user_version = 1;",
        )
        .unwrap();
    }

    let db = Database::new(temp_file.path()).unwrap();
    db.save_plan(&snapshot("alpine-loop")).unwrap();

    let plans = db.list_plans().unwrap();
    assert_eq!(plans[0].item_count, 2);

    let version: i64 = Connection::open(temp_file.path())
        .unwrap()
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, 2);
}
