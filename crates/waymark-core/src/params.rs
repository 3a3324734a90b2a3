//! Parameter structures for Waymark operations.
//!
//! These are shared by every front end. The CLI wraps them in clap argument
//! structs and converts with `From`; the MCP server deserializes them
//! directly from tool arguments, with JSON schemas generated when the
//! `schema` feature is on.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│                 │
//! │  (clap derives) │    │   Core Params   │───▶ Planner
//! ├─────────────────┤    │  (this module)  │
//! │   MCP Params    │───▶│                 │
//! │ (serde+schema)  │    │                 │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! Positions in parameters are 1-based, the way people count list entries;
//! they become 0-based [`Slot`]s on the way into the plan.

use std::path::PathBuf;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WaymarkError},
    export::ExportFormat,
    models::{ItemKind, PlanItem, TimeOfDay},
    plan::{PlanIntent, Slot},
};

/// Parameters for operations on a whole trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TripId {
    /// Trip folder name, e.g. "alpine-loop"
    pub trip_id: String,
}

/// Parameters for scheduling an item on a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddItem {
    /// Trip folder name
    pub trip_id: String,
    /// Day number, starting at 1
    pub day: u32,
    /// What is being scheduled
    pub kind: ItemKind,
    /// Section id, or subsection id when `kind` is "subsection"
    #[serde(default)]
    pub id: Option<String>,
    /// Parent section id of a subsection
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Text of a custom entry
    #[serde(default)]
    pub description: Option<String>,
    /// Optional time of day, "HH:MM"
    #[serde(default)]
    pub time: Option<String>,
}

impl AddItem {
    /// Builds the plan item these parameters describe.
    pub fn to_item(&self) -> Result<PlanItem> {
        let item = match self.kind {
            ItemKind::Section => PlanItem::section(required(&self.id, "id")?),
            ItemKind::Subsection => PlanItem::subsection(
                required(&self.parent_id, "parent_id")?,
                required(&self.id, "id")?,
            ),
            ItemKind::Custom => PlanItem::custom(required(&self.description, "description")?),
        };

        let time = match self.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(
                text.parse::<TimeOfDay>()
                    .map_err(|reason| WaymarkError::invalid_input("time").with_reason(reason))?,
            ),
        };
        Ok(item.at(time))
    }

    pub fn to_intent(&self) -> Result<PlanIntent> {
        Ok(PlanIntent::Add {
            day: self.day,
            item: self.to_item()?,
        })
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| WaymarkError::invalid_input(field).with_reason("is required for this kind"))
}

/// Converts a 1-based position into a 0-based index.
fn index_of(position: usize, field: &str) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| WaymarkError::invalid_input(field).with_reason("positions start at 1"))
}

/// Parameters for removing an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemoveItem {
    /// Trip folder name
    pub trip_id: String,
    /// Day number, starting at 1
    pub day: u32,
    /// Position of the item within the day, starting at 1
    pub position: usize,
}

impl RemoveItem {
    pub fn to_intent(&self) -> Result<PlanIntent> {
        Ok(PlanIntent::Remove {
            day: self.day,
            index: index_of(self.position, "position")?,
        })
    }
}

/// Parameters for moving an item, within a day or to another day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveItem {
    /// Trip folder name
    pub trip_id: String,
    /// Day the item is on
    pub from_day: u32,
    /// Current position of the item, starting at 1
    pub from_position: usize,
    /// Day to move the item to
    pub to_day: u32,
    /// Position on the destination day, counted once the item has left its
    /// current place; one past the last item appends
    pub to_position: usize,
}

impl MoveItem {
    pub fn to_intent(&self) -> Result<PlanIntent> {
        Ok(PlanIntent::Move {
            from: Slot::new(self.from_day, index_of(self.from_position, "from_position")?),
            to: Slot::new(self.to_day, index_of(self.to_position, "to_position")?),
        })
    }
}

/// Parameters for changing the number of days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetDayCount {
    /// Trip folder name
    pub trip_id: String,
    /// New number of days
    pub days: u32,
    /// Drop items on removed days instead of refusing
    #[serde(default)]
    pub force: bool,
}

/// Parameters for exporting a plan file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportPlan {
    /// Trip folder name
    pub trip_id: String,
    /// "json" (default) or "yaml"
    #[serde(default)]
    pub format: ExportFormat,
}

/// Parameters for importing a plan file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportPlan {
    /// Trip folder name
    pub trip_id: String,
    /// Plan file to read
    pub path: PathBuf,
    /// Format of the file; guessed from the extension when absent
    #[serde(default)]
    pub format: Option<ExportFormat>,
}

impl ImportPlan {
    /// Explicit format, else the file extension, else JSON.
    pub fn resolved_format(&self) -> ExportFormat {
        self.format
            .or_else(|| ExportFormat::from_path(&self.path))
            .unwrap_or_default()
    }
}
