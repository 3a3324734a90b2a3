//! Core library for the Waymark trip itinerary planner.
//!
//! Trips are folders of YAML content (sections, subsections, locations,
//! images). A user schedules that content onto days; the resulting plan is
//! saved locally, exported to JSON or YAML, imported back, and printed as a
//! PDF.
//!
//! # Layers
//!
//! - [`models`]: trip documents, plan items and snapshots
//! - [`plan`]: the day-plan state model and the trip session around it
//! - [`library`]: reading trips from disk
//! - [`db`]: the SQLite plan store
//! - [`export`]: plan files and PDF layout
//! - [`display`]: markdown formatting for every front end
//! - [`planner`]: the async facade the CLI and MCP server call
//!
//! # Quick Start
//!
//! ```rust
//! use waymark_core::{
//!     models::{PlanItem, TripDocument},
//!     plan::{PlanIntent, TripSession},
//!     display::PlanView,
//! };
//!
//! let mut trip: TripDocument = serde_yaml::from_str(
//!     "title: Alpine Loop\nsections:\n  - id: bled\n    title: Lake Bled\n",
//! )
//! .unwrap();
//! trip.id = "alpine-loop".to_string();
//!
//! let mut session = TripSession::new(trip);
//! session
//!     .apply(PlanIntent::Add { day: 1, item: PlanItem::section("bled") })
//!     .unwrap();
//!
//! let text = PlanView(&session).to_string();
//! assert!(text.contains("1. Lake Bled"));
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod library;
pub mod models;
pub mod params;
pub mod plan;
pub mod planner;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    ImportResult, Markers, OperationStatus, PlanChange, PlanView, TripSummaries,
};
pub use error::{Result, WaymarkError};
pub use export::{ExportFormat, PdfLayout};
pub use library::TripLibrary;
pub use models::{
    GeoPoint, ItemKey, ItemKind, PlanItem, PlanSnapshot, TimeOfDay, TripDocument, TripListing,
    TripSummary,
};
pub use params::{AddItem, ExportPlan, ImportPlan, MoveItem, RemoveItem, SetDayCount, TripId};
pub use plan::{Outcome, PlanIntent, PlanState, Slot, TripSession};
pub use planner::{Planner, PlannerBuilder};
