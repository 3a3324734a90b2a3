//! Display formatting for trips, plans and operation results.
//!
//! Domain models implement [`std::fmt::Display`] here rather than next to
//! their definitions, and wrapper types cover collections and results. All
//! output is markdown; the CLI renders it for the terminal and the MCP
//! server returns it as tool text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (TripDocument,  │───▶│ (PlanView,      │───▶│ (terminal, MCP) │
//! │  TripSession)   │    │  PlanChange)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use waymark_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Wrote plan.pdf");
//! assert_eq!(status.to_string(), "Success: Wrote plan.pdf\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod plan;
pub mod results;
pub mod status;
pub mod trip;

pub use collections::{Markers, TripSummaries};
pub use datetime::LocalDateTime;
pub use plan::PlanView;
pub use results::{ImportResult, PlanChange};
pub use status::OperationStatus;
