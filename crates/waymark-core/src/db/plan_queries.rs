//! Saved plan queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::PlanSnapshot,
    plan::DEFAULT_DAY_COUNT,
};

const SELECT_PLAN_SQL: &str = "SELECT snapshot FROM plans WHERE trip_id = ?1";
const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (trip_id, snapshot, item_count, updated_at) \
     VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(trip_id) DO UPDATE SET \
     snapshot = excluded.snapshot, item_count = excluded.item_count, updated_at = excluded.updated_at";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE trip_id = ?1";
const LIST_PLANS_SQL: &str =
    "SELECT trip_id, item_count, updated_at FROM plans ORDER BY updated_at DESC";

/// Summary row of a saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPlan {
    pub trip_id: String,
    pub item_count: usize,
    pub updated_at: Timestamp,
}

impl super::Database {
    /// Loads the saved plan of a trip.
    ///
    /// A missing row is `Ok(None)`. A row that no longer decodes is an error
    /// for the caller to log and discard.
    pub fn load_plan(&self, trip_id: &str) -> Result<Option<PlanSnapshot>> {
        let text: Option<String> = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![trip_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query saved plan")?;

        text.map(|text| serde_json::from_str(&text).map_err(Into::into))
            .transpose()
    }

    /// Saves a plan, replacing any previous one for the same trip.
    ///
    /// An empty plan of the default length removes the row instead; an empty
    /// plan with a custom day count is kept so the length survives.
    pub fn save_plan(&self, snapshot: &PlanSnapshot) -> Result<()> {
        if snapshot.is_empty() && snapshot.days.len() == DEFAULT_DAY_COUNT as usize {
            self.delete_plan(&snapshot.trip_id)?;
            return Ok(());
        }

        let text = serde_json::to_string(snapshot)?;
        let now = Timestamp::now().to_string();
        self.connection
            .execute(
                UPSERT_PLAN_SQL,
                params![
                    snapshot.trip_id,
                    text,
                    snapshot.item_count() as i64,
                    now
                ],
            )
            .db_context("Failed to save plan")?;
        Ok(())
    }

    /// Deletes the saved plan of a trip. Returns whether a row existed.
    pub fn delete_plan(&self, trip_id: &str) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_PLAN_SQL, params![trip_id])
            .db_context("Failed to delete saved plan")?;
        Ok(rows > 0)
    }

    /// Lists saved plans, most recently updated first.
    pub fn list_plans(&self) -> Result<Vec<StoredPlan>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                let updated_at: String = row.get(2)?;
                Ok(StoredPlan {
                    trip_id: row.get(0)?,
                    item_count: row.get::<_, i64>(1)? as usize,
                    updated_at: updated_at.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                    })?,
                })
            })
            .db_context("Failed to query saved plans")?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read saved plan row")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::super::Database;
    use crate::{models::PlanItem, WaymarkError};
    use tempfile::TempDir;

    fn snapshot(trip_id: &str, items: Vec<PlanItem>) -> crate::models::PlanSnapshot {
        crate::models::PlanSnapshot {
            trip_id: trip_id.to_string(),
            trip_title: None,
            exported_at: None,
            days: BTreeMap::from([(1, items), (2, Vec::new()), (3, Vec::new())]),
        }
    }

    fn open() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("plans.db")).unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_missing_plan_is_none() {
        let (_temp_dir, db) = open();
        assert_eq!(db.load_plan("alpine-loop").unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, db) = open();
        let saved = snapshot("alpine-loop", vec![PlanItem::section("bled")]);

        db.save_plan(&saved).unwrap();
        assert_eq!(db.load_plan("alpine-loop").unwrap(), Some(saved));
        assert_eq!(db.load_plan("mazury").unwrap(), None);
    }

    #[test]
    fn test_save_replaces_previous() {
        let (_temp_dir, db) = open();
        db.save_plan(&snapshot("alpine-loop", vec![PlanItem::section("bled")]))
            .unwrap();
        let second = snapshot("alpine-loop", vec![PlanItem::custom("Lunch")]);
        db.save_plan(&second).unwrap();

        assert_eq!(db.load_plan("alpine-loop").unwrap(), Some(second));
        assert_eq!(db.list_plans().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_plan_deletes_row() {
        let (_temp_dir, db) = open();
        db.save_plan(&snapshot("alpine-loop", vec![PlanItem::section("bled")]))
            .unwrap();
        db.save_plan(&snapshot("alpine-loop", Vec::new())).unwrap();

        assert_eq!(db.load_plan("alpine-loop").unwrap(), None);
        assert!(db.list_plans().unwrap().is_empty());
    }

    #[test]
    fn test_empty_plan_with_custom_length_is_kept() {
        let (_temp_dir, db) = open();
        let mut longer = snapshot("alpine-loop", Vec::new());
        longer.days.insert(4, Vec::new());
        longer.days.insert(5, Vec::new());
        db.save_plan(&longer).unwrap();

        let loaded = db.load_plan("alpine-loop").unwrap().unwrap();
        assert_eq!(loaded.days.len(), 5);
        assert_eq!(db.list_plans().unwrap()[0].item_count, 0);
    }

    #[test]
    fn test_list_plans_reports_counts() {
        let (_temp_dir, db) = open();
        db.save_plan(&snapshot(
            "alpine-loop",
            vec![PlanItem::section("bled"), PlanItem::custom("Lunch")],
        ))
        .unwrap();

        let plans = db.list_plans().unwrap();
        assert_eq!(plans[0].trip_id, "alpine-loop");
        assert_eq!(plans[0].item_count, 2);
    }

    #[test]
    fn test_corrupt_row_is_an_error() {
        let (_temp_dir, db) = open();
        db.connection
            .execute(
                "INSERT INTO plans (trip_id, snapshot, updated_at) VALUES ('x', 'not json', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let err = db.load_plan("x").unwrap_err();
        assert!(matches!(err, WaymarkError::Serialization { .. }));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.db");
        let saved = snapshot("alpine-loop", vec![PlanItem::section("bled")]);

        Database::new(&path).unwrap().save_plan(&saved).unwrap();
        assert_eq!(Database::new(&path).unwrap().load_plan("alpine-loop").unwrap(), Some(saved));
    }
}
