//! SQLite store for saved plans.
//!
//! Each trip's plan is kept as one JSON-encoded [`crate::models::PlanSnapshot`]
//! keyed by trip id. The store is a cache of the in-memory plan: losing it
//! costs the user their plan, never a working session.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;

pub use plan_queries::StoredPlan;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
