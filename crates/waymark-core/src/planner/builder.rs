//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, WaymarkError},
    library::TripLibrary,
};

/// Trips directory used when none is configured, relative to the working
/// directory.
pub const DEFAULT_TRIPS_DIR: &str = "trips";

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    trips_dir: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waymark/plans.db` or `~/.local/share/waymark/plans.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the directory holding one folder per trip. Defaults to `./trips`.
    pub fn with_trips_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.trips_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `WaymarkError::XdgDirectory` if no default database location
    /// can be determined, `WaymarkError::FileSystem` if its directory cannot
    /// be created, and `WaymarkError::Storage` if the database cannot be
    /// initialized.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WaymarkError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), WaymarkError>(())
        })
        .await
        .map_err(|e| WaymarkError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let trips_dir = self
            .trips_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TRIPS_DIR));
        if !trips_dir.is_dir() {
            warn!("Trips directory {} does not exist", trips_dir.display());
        }
        info!(
            "Planner ready: trips in {}, plans in {}",
            trips_dir.display(),
            db_path.display()
        );

        Ok(Planner::new(db_path, TripLibrary::new(trips_dir)))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waymark")
            .place_data_file("plans.db")
            .map_err(|e| WaymarkError::XdgDirectory(e.to_string()))
    }
}
