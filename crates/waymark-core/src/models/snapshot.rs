//! Serialized form of a day plan.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanItem;

/// A structural snapshot of a plan, used for exports, imports and the local
/// store.
///
/// Day keys are 1-based. A well-formed snapshot has exactly the keys `1..=n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    /// Folder name of the trip the plan belongs to
    pub trip_id: String,

    /// Trip title at export time, for humans reading the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_title: Option<String>,

    /// When the snapshot was written (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<Timestamp>,

    pub days: BTreeMap<u32, Vec<PlanItem>>,
}

impl PlanSnapshot {
    /// Total number of items across all days.
    pub fn item_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether no day holds any item.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
