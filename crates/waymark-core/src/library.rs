//! Trip files on disk.
//!
//! A trips directory holds one folder per trip, each with a `trip.yaml`:
//!
//! ```text
//! trips/
//! ├── index.yaml          (optional: [{id, title}, ...])
//! ├── alpine-loop/
//! │   ├── trip.yaml
//! │   └── images/
//! └── mazury/
//!     └── trip.yaml
//! ```
//!
//! The folder name is the trip id.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    error::{Result, WaymarkError},
    models::{TripDocument, TripSummary},
};

/// File name of a trip description inside its folder.
pub const TRIP_FILE: &str = "trip.yaml";

/// File name of the optional trip index at the library root.
pub const INDEX_FILE: &str = "index.yaml";

/// A directory of trips.
#[derive(Debug, Clone)]
pub struct TripLibrary {
    root: PathBuf,
}

impl TripLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder of a trip.
    pub fn trip_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Lists available trips.
    ///
    /// Uses `index.yaml` when present; otherwise scans for sub-directories
    /// holding a `trip.yaml`, sorted by id. Trips that fail to parse are
    /// skipped with a warning.
    pub fn index(&self) -> Result<Vec<TripSummary>> {
        let index_path = self.root.join(INDEX_FILE);
        match fs::read_to_string(&index_path) {
            Ok(text) => {
                debug!("Reading trip index from {}", index_path.display());
                return serde_yaml::from_str(&text).map_err(|source| WaymarkError::TripFormat {
                    id: INDEX_FILE.to_string(),
                    source,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(WaymarkError::FileSystem {
                    path: index_path,
                    source,
                })
            }
        }

        let entries = fs::read_dir(&self.root).map_err(|source| WaymarkError::FileSystem {
            path: self.root.clone(),
            source,
        })?;

        let mut trips = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| WaymarkError::FileSystem {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.join(TRIP_FILE).is_file() {
                continue;
            }
            let Some(id) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping trip folder with non UTF-8 name: {}", path.display());
                continue;
            };

            match self.load(id) {
                Ok(trip) => trips.push(TripSummary {
                    id: trip.id,
                    title: trip.title,
                }),
                Err(e) => warn!("Skipping trip '{id}': {e}"),
            }
        }

        trips.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(trips)
    }

    /// Loads and validates one trip.
    pub fn load(&self, id: &str) -> Result<TripDocument> {
        validate_trip_id(id)?;

        let path = self.trip_dir(id).join(TRIP_FILE);
        let text = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                WaymarkError::TripNotFound { id: id.to_string() }
            } else {
                WaymarkError::FileSystem { path, source }
            }
        })?;

        let trip = parse_trip(id, &text)?;
        debug!("Loaded trip '{id}' with {} section(s)", trip.sections.len());
        Ok(trip)
    }
}

/// Parses the contents of a `trip.yaml` for the trip folder `id`.
pub fn parse_trip(id: &str, text: &str) -> Result<TripDocument> {
    let mut trip: TripDocument =
        serde_yaml::from_str(text).map_err(|source| WaymarkError::TripFormat {
            id: id.to_string(),
            source,
        })?;
    trip.id = id.to_string();
    trip.validate()?;
    Ok(trip)
}

/// Trip ids are folder names: no separators, no parent references.
fn validate_trip_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(WaymarkError::invalid_input("trip")
            .with_reason(format!("'{id}' is not a trip folder name")))
    }
}
