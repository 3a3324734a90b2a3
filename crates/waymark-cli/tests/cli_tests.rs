use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ALPINE_LOOP: &str = r#"
title: Alpine Loop
description: Three Slovenian lakes.
sections:
  - id: bled
    title: Lake Bled
    location: [46.3625, 14.0936]
    subsections:
      - id: vintgar
        title: Vintgar Gorge
  - id: bohinj
    title: Lake Bohinj
"#;

/// Helper function to create a trips folder with one trip
fn create_cli_test_environment() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let trip_dir = temp_dir.path().join("trips").join("alpine-loop");
    fs::create_dir_all(&trip_dir).unwrap();
    fs::write(trip_dir.join("trip.yaml"), ALPINE_LOOP).unwrap();
    temp_dir
}

/// Helper function to create a Command bound to the test folders, in plain
/// text mode
fn waymark_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("waymark").expect("Failed to find waymark binary");
    cmd.arg("--no-color")
        .arg("--trips-dir")
        .arg(root.join("trips"))
        .arg("--database-file")
        .arg(root.join("plans.db"));
    cmd
}

fn run(root: &Path, args: &[&str]) {
    waymark_cmd(root).args(args).assert().success();
}

#[test]
fn test_cli_lists_trips_by_default() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("**Alpine Loop** `alpine-loop`: no plan yet"));
}

#[test]
fn test_cli_list_empty_trips_folder() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("trips")).unwrap();

    waymark_cmd(temp_dir.path())
        .arg("trips")
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_show_trip() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .args(["show", "alpine-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Alpine Loop"))
        .stdout(predicate::str::contains("## Lake Bled `bled`"))
        .stdout(predicate::str::contains("- Vintgar Gorge `bled/vintgar`"));
}

#[test]
fn test_cli_unknown_trip_fails() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .args(["plan", "show", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip 'nowhere' not found"));
}

#[test]
fn test_cli_markers() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .args(["markers", "alpine-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Lake Bled**: 46.3625, 14.0936"));

    waymark_cmd(temp_dir.path())
        .args(["markers", "alpine-loop", "--geojson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FeatureCollection"));
}

#[test]
fn test_cli_new_plan_has_three_empty_days() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .args(["plan", "show", "alpine-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plan: Alpine Loop"))
        .stdout(predicate::str::contains("## Day 3"))
        .stdout(predicate::str::contains("_Nothing planned._"));
}

#[test]
fn test_cli_add_items_of_every_kind() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();

    waymark_cmd(root)
        .args(["plan", "add", "alpine-loop", "1", "section", "bled", "--time", "09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to day 1 at position 1"));
    run(root, &["plan", "add", "alpine-loop", "1", "subsection", "bled", "vintgar"]);
    run(root, &["plan", "add", "alpine-loop", "2", "custom", "Swim in the lake"]);

    waymark_cmd(root)
        .args(["plan", "show", "alpine-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 09:30 Lake Bled _(section)_"))
        .stdout(predicate::str::contains("2. Vintgar Gorge _(in Lake Bled)_"))
        .stdout(predicate::str::contains("1. Swim in the lake"));
}

#[test]
fn test_cli_rejects_duplicate_and_unknown_items() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    run(root, &["plan", "add", "alpine-loop", "1", "section", "bled"]);

    waymark_cmd(root)
        .args(["plan", "add", "alpine-loop", "2", "section", "bled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already planned on day 1"));

    waymark_cmd(root)
        .args(["plan", "add", "alpine-loop", "1", "section", "triglav"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist in this trip"));

    waymark_cmd(root)
        .args(["plan", "add", "alpine-loop", "7", "custom", "Rest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Day 7 is out of range"));
}

#[test]
fn test_cli_move_and_remove() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    run(root, &["plan", "add", "alpine-loop", "1", "section", "bled"]);
    run(root, &["plan", "add", "alpine-loop", "1", "section", "bohinj"]);

    waymark_cmd(root)
        .args(["plan", "move", "alpine-loop", "1", "2", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Lake Bohinj"))
        .stdout(predicate::str::contains("2. Lake Bled"));

    waymark_cmd(root)
        .args(["plan", "rm", "alpine-loop", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"))
        .stdout(predicate::str::contains("1. Lake Bled"));
}

#[test]
fn test_cli_shrinking_days_needs_force() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    run(root, &["plan", "add", "alpine-loop", "3", "section", "bohinj"]);

    waymark_cmd(root)
        .args(["plan", "days", "alpine-loop", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days"));

    waymark_cmd(root)
        .args(["plan", "days", "alpine-loop", "2", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- dropped Lake Bohinj"))
        .stdout(predicate::str::contains("## Day 3").not());
}

#[test]
fn test_cli_export_and_import() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    let file = root.join("alpine.yaml");
    run(root, &["plan", "add", "alpine-loop", "2", "section", "bohinj"]);

    waymark_cmd(root)
        .args(["plan", "export", "alpine-loop", "--output"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Exported plan"));
    assert!(fs::read_to_string(&file).unwrap().contains("tripId: alpine-loop"));

    run(root, &["plan", "clear", "alpine-loop"]);

    waymark_cmd(root)
        .args(["plan", "import", "alpine-loop"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 item(s)"))
        .stdout(predicate::str::contains("1. Lake Bohinj"));
}

#[test]
fn test_cli_export_to_stdout() {
    let temp_dir = create_cli_test_environment();

    waymark_cmd(temp_dir.path())
        .args(["plan", "export", "alpine-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tripId\": \"alpine-loop\""));
}

#[test]
fn test_cli_import_rejects_other_trip() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    let file = root.join("other.json");
    fs::write(
        &file,
        r#"{"tripId": "mazury", "days": {"1": [{"type": "custom", "description": "Sail"}]}}"#,
    )
    .unwrap();

    waymark_cmd(root)
        .args(["plan", "import", "alpine-loop"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan"));
}

#[test]
fn test_cli_pdf() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    let pdf = root.join("alpine.pdf");

    waymark_cmd(root)
        .args(["plan", "pdf", "alpine-loop", "--output"])
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("plan"));

    run(root, &["plan", "add", "alpine-loop", "1", "section", "bled"]);
    waymark_cmd(root)
        .args(["plan", "pdf", "alpine-loop", "--output"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Wrote"));
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_cli_plan_survives_between_runs() {
    let temp_dir = create_cli_test_environment();
    let root = temp_dir.path();
    run(root, &["plan", "add", "alpine-loop", "1", "custom", "Breakfast"]);

    waymark_cmd(root)
        .arg("trips")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 planned item(s)"));
}
