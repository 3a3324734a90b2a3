//! High-level planner API.
//!
//! The [`Planner`] connects the front ends to trip files, the plan state
//! model and the local store. It keeps no plan in memory between calls:
//! every operation loads the trip, restores its saved plan into a
//! [`crate::plan::TripSession`], applies one intent and saves the result.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Session ops   │    │ TripLibrary and │
//! │ (trip_handlers, │───▶│ (open, apply,   │───▶│    Database     │
//! │  plan_handlers) │    │  persist)       │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Front ends            State changes          Files and SQLite
//! ```
//!
//! File and SQLite work runs on the blocking pool through
//! `tokio::task::spawn_blocking`.
//!
//! # Example
//!
//! ```rust,no_run
//! use waymark_core::{params::AddItem, models::ItemKind, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_trips_dir(Some("trips"))
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! let change = planner
//!     .add_item(&AddItem {
//!         trip_id: "alpine-loop".to_string(),
//!         day: 1,
//!         kind: ItemKind::Section,
//!         id: Some("bled".to_string()),
//!         parent_id: None,
//!         description: None,
//!         time: Some("09:30".to_string()),
//!     })
//!     .await?;
//! println!("{change}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    error::{Result, ResultExt},
    library::TripLibrary,
};

pub mod builder;
pub mod plan_handlers;
pub mod session_ops;
pub mod trip_handlers;


pub use builder::{PlannerBuilder, DEFAULT_TRIPS_DIR};

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) library: TripLibrary,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, library: TripLibrary) -> Self {
        Self { db_path, library }
    }

    /// Location of the plan database.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn library(&self) -> &TripLibrary {
        &self.library
    }

    /// Runs file or database work on the blocking pool.
    pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        task::spawn_blocking(work)
            .await
            .with_context("Task join error")?
    }
}
