use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{MarkersArgs, PlanCommands, TripArgs};

/// Plan trips day by day from the terminal
///
/// Waymark reads trips from folders of YAML content and lets you schedule
/// their sections, subsections and your own notes onto the days of a trip.
/// Plans are saved locally, can be exported to JSON or YAML, imported back,
/// and printed as a PDF. The `serve` command exposes the same operations
/// over MCP for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "waymark")]
pub struct Args {
    /// Folder holding one sub-folder per trip. Defaults to ./trips
    #[arg(long, global = true)]
    pub trips_dir: Option<PathBuf>,

    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waymark/plans.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Running `waymark` without a command lists the trips.
#[derive(Subcommand)]
pub enum Commands {
    /// List the available trips and their saved plans
    #[command(alias = "ls")]
    Trips,
    /// Show the content of a trip
    Show(TripArgs),
    /// List the located sections of a trip
    Markers(MarkersArgs),
    /// View and edit the day plan of a trip
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Start the MCP server
    Serve,
}
