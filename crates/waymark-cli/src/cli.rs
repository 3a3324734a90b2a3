//! Command-line argument wrappers and the command handler.
//!
//! Each wrapper carries the clap attributes for one command and converts
//! into a core parameter type with `From`, so the core params stay free of
//! CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use waymark_core::{
    display::{OperationStatus, PlanView},
    params::*,
    ExportFormat, ItemKind, Planner,
};

use crate::renderer::TerminalRenderer;

/// Day plan operations
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the plan day by day
    #[command(alias = "s")]
    Show(TripArgs),
    /// Schedule a section, subsection or note on a day
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Remove an item from a day
    #[command(alias = "rm")]
    Remove(RemoveItemArgs),
    /// Move an item within a day or to another day
    #[command(alias = "mv")]
    Move(MoveItemArgs),
    /// Change the number of days in the plan
    Days(SetDayCountArgs),
    /// Write the plan to a JSON or YAML file
    Export(ExportPlanArgs),
    /// Replace the plan with the contents of a plan file
    Import(ImportPlanArgs),
    /// Print the plan as a PDF document
    Pdf(PdfArgs),
    /// Remove every item from the plan
    Clear(TripArgs),
}

/// Selects a trip.
#[derive(Args)]
pub struct TripArgs {
    /// Trip folder name
    #[arg(help = "Trip folder name, e.g. alpine-loop")]
    pub trip: String,
}

impl From<TripArgs> for TripId {
    fn from(val: TripArgs) -> Self {
        TripId { trip_id: val.trip }
    }
}

/// List the map markers of a trip.
#[derive(Args)]
pub struct MarkersArgs {
    /// Trip folder name
    pub trip: String,
    /// Print GeoJSON instead of a list
    #[arg(long, help = "Print a GeoJSON FeatureCollection instead of a list")]
    pub geojson: bool,
}

/// What to schedule.
#[derive(Subcommand, Debug, Clone)]
pub enum AddTarget {
    /// A section of the trip
    Section {
        /// Section id
        id: String,
    },
    /// A subsection of a section
    Subsection {
        /// Parent section id
        parent: String,
        /// Subsection id
        id: String,
    },
    /// A free-text note
    Custom {
        /// Text of the note
        text: String,
    },
}

/// Schedule an item on a day.
///
/// The item lands at the end of the day. Sections and subsections may appear
/// only once in the whole plan; notes may repeat.
#[derive(Args)]
pub struct AddItemArgs {
    /// Trip folder name
    pub trip: String,
    /// Day number, starting at 1
    pub day: u32,
    /// Time of day
    #[arg(long, global = true, help = "Time of day as HH:MM")]
    pub time: Option<String>,
    #[command(subcommand)]
    pub target: AddTarget,
}

impl From<AddItemArgs> for AddItem {
    fn from(val: AddItemArgs) -> Self {
        let (kind, id, parent_id, description) = match val.target {
            AddTarget::Section { id } => (ItemKind::Section, Some(id), None, None),
            AddTarget::Subsection { parent, id } => {
                (ItemKind::Subsection, Some(id), Some(parent), None)
            }
            AddTarget::Custom { text } => (ItemKind::Custom, None, None, Some(text)),
        };
        AddItem {
            trip_id: val.trip,
            day: val.day,
            kind,
            id,
            parent_id,
            description,
            time: val.time,
        }
    }
}

/// Remove an item from a day.
#[derive(Args)]
pub struct RemoveItemArgs {
    /// Trip folder name
    pub trip: String,
    /// Day number, starting at 1
    pub day: u32,
    /// Position of the item as listed by `plan show`
    pub position: usize,
}

impl From<RemoveItemArgs> for RemoveItem {
    fn from(val: RemoveItemArgs) -> Self {
        RemoveItem {
            trip_id: val.trip,
            day: val.day,
            position: val.position,
        }
    }
}

/// Move an item.
///
/// The destination position is counted after the item has left its old
/// place; one past the last item appends.
#[derive(Args)]
pub struct MoveItemArgs {
    /// Trip folder name
    pub trip: String,
    /// Day the item is on
    pub from_day: u32,
    /// Current position of the item
    pub from_position: usize,
    /// Destination day
    pub to_day: u32,
    /// Destination position
    pub to_position: usize,
}

impl From<MoveItemArgs> for MoveItem {
    fn from(val: MoveItemArgs) -> Self {
        MoveItem {
            trip_id: val.trip,
            from_day: val.from_day,
            from_position: val.from_position,
            to_day: val.to_day,
            to_position: val.to_position,
        }
    }
}

/// Change the number of days.
#[derive(Args)]
pub struct SetDayCountArgs {
    /// Trip folder name
    pub trip: String,
    /// New number of days
    pub days: u32,
    /// Drop the items of removed days instead of refusing
    #[arg(long, help = "Drop the items scheduled on removed days")]
    pub force: bool,
}

impl From<SetDayCountArgs> for SetDayCount {
    fn from(val: SetDayCountArgs) -> Self {
        SetDayCount {
            trip_id: val.trip,
            days: val.days,
            force: val.force,
        }
    }
}

/// Plan file format.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Json,
    #[value(alias = "yml")]
    Yaml,
}

impl From<FormatArg> for ExportFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

/// Export the plan.
#[derive(Args)]
pub struct ExportPlanArgs {
    /// Trip folder name
    pub trip: String,
    /// File to write; the plan is printed when omitted
    #[arg(short, long, help = "File to write instead of printing the plan")]
    pub output: Option<PathBuf>,
    /// File format; taken from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

impl ExportPlanArgs {
    fn resolved_format(&self) -> ExportFormat {
        self.format
            .map(ExportFormat::from)
            .or_else(|| self.output.as_deref().and_then(ExportFormat::from_path))
            .unwrap_or_default()
    }
}

impl From<&ExportPlanArgs> for ExportPlan {
    fn from(val: &ExportPlanArgs) -> Self {
        ExportPlan {
            trip_id: val.trip.clone(),
            format: val.resolved_format(),
        }
    }
}

/// Import a plan file.
#[derive(Args)]
pub struct ImportPlanArgs {
    /// Trip folder name
    pub trip: String,
    /// Plan file written by `plan export`
    pub file: PathBuf,
    /// File format; taken from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

impl From<ImportPlanArgs> for ImportPlan {
    fn from(val: ImportPlanArgs) -> Self {
        ImportPlan {
            trip_id: val.trip,
            path: val.file,
            format: val.format.map(ExportFormat::from),
        }
    }
}

/// Print the plan as a PDF.
#[derive(Args)]
pub struct PdfArgs {
    /// Trip folder name
    pub trip: String,
    /// File to write. Defaults to <trip>-plan.pdf
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn default_output(trip: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{trip}-plan.{extension}"))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Runs commands against a planner and renders their output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn list_trips(&self) -> Result<()> {
        let trips = self
            .planner
            .list_trips()
            .await
            .context("Failed to list trips")?;
        self.renderer.render(&trips.to_string())
    }

    pub async fn show_trip(&self, args: TripArgs) -> Result<()> {
        let trip = self
            .planner
            .show_trip(&args.into())
            .await
            .context("Failed to load trip")?;
        self.renderer.render(&trip.to_string())
    }

    pub async fn markers(&self, args: MarkersArgs) -> Result<()> {
        let params = TripId { trip_id: args.trip };
        if args.geojson {
            let geojson = self
                .planner
                .trip_geojson(&params)
                .await
                .context("Failed to build GeoJSON")?;
            println!("{}", serde_json::to_string_pretty(&geojson)?);
            return Ok(());
        }

        let markers = self
            .planner
            .trip_markers(&params)
            .await
            .context("Failed to list markers")?;
        self.renderer.render(&markers.to_string())
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show(args) => {
                let session = self
                    .planner
                    .show_plan(&args.into())
                    .await
                    .context("Failed to load plan")?;
                self.renderer.render(&PlanView(&session).to_string())
            }
            PlanCommands::Add(args) => {
                let change = self
                    .planner
                    .add_item(&args.into())
                    .await
                    .context("Failed to add item")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Remove(args) => {
                let change = self
                    .planner
                    .remove_item(&args.into())
                    .await
                    .context("Failed to remove item")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Move(args) => {
                let change = self
                    .planner
                    .move_item(&args.into())
                    .await
                    .context("Failed to move item")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Days(args) => {
                let change = self
                    .planner
                    .set_day_count(&args.into())
                    .await
                    .context("Failed to change the number of days")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Clear(args) => {
                let change = self
                    .planner
                    .clear_plan(&args.into())
                    .await
                    .context("Failed to clear plan")?;
                self.renderer.render(&change.to_string())
            }
            PlanCommands::Export(args) => self.export_plan(args).await,
            PlanCommands::Import(args) => {
                let result = self
                    .planner
                    .import_plan(&args.into())
                    .await
                    .context("Failed to import plan")?;
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Pdf(args) => self.export_pdf(args).await,
        }
    }

    async fn export_plan(&self, args: ExportPlanArgs) -> Result<()> {
        let params = ExportPlan::from(&args);
        debug!("Exporting {} as {}", params.trip_id, params.format);
        let text = self
            .planner
            .export_plan(&params)
            .await
            .context("Failed to export plan")?;

        match args.output {
            Some(path) => {
                write_file(&path, text.as_bytes())?;
                let status = OperationStatus::success(format!(
                    "Exported plan of '{}' to {}",
                    args.trip,
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
                Ok(())
            }
        }
    }

    async fn export_pdf(&self, args: PdfArgs) -> Result<()> {
        let bytes = self
            .planner
            .export_pdf(&TripId {
                trip_id: args.trip.clone(),
            })
            .await
            .context("Failed to create PDF")?;

        let path = args
            .output
            .unwrap_or_else(|| default_output(&args.trip, "pdf"));
        write_file(&path, &bytes)?;
        let status = OperationStatus::success(format!("Wrote {}", path.display()));
        self.renderer.render(&status.to_string())
    }
}
