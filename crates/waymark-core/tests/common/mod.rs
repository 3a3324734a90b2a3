use std::{fs, path::Path};

use tempfile::TempDir;
use waymark_core::{Planner, PlannerBuilder};

pub const ALPINE_LOOP: &str = r#"
title: Alpine Loop
description: Three Slovenian lakes.
defaultMapCenter: { lat: 46.3, lon: 14.0 }
defaultZoom: 9
sections:
  - id: bled
    title: Lake Bled
    description: Island church and a castle above the lake.
    images: [bled.jpg]
    location: [46.3625, 14.0936]
    subsections:
      - id: vintgar
        title: Vintgar Gorge
        location: "46.3929, 14.0853"
  - id: bohinj
    title: Lake Bohinj
"#;

pub const MAZURY: &str = r#"
title: Mazury
sections:
  - id: 1
    title: Mikołajki
"#;

/// Writes a trip folder under `root`.
pub fn write_trip(root: &Path, id: &str, yaml: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).expect("Failed to create trip dir");
    fs::write(dir.join("trip.yaml"), yaml).expect("Failed to write trip");
}

/// Builds a planner over `temp_dir`, reusing whatever it already holds.
pub async fn open_planner(temp_dir: &TempDir) -> Planner {
    PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("plans.db")))
        .with_trips_dir(Some(temp_dir.path().join("trips")))
        .build()
        .await
        .expect("Failed to create planner")
}

/// Helper function to create a test planner with two trips
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let trips = temp_dir.path().join("trips");
    write_trip(&trips, "alpine-loop", ALPINE_LOOP);
    write_trip(&trips, "mazury", MAZURY);
    let planner = open_planner(&temp_dir).await;
    (temp_dir, planner)
}
