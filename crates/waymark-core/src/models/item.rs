//! Plan items: what can be scheduled on a day.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{time, TimeOfDay};
use crate::error::{Result, WaymarkError};

/// An entry in a day plan.
///
/// Items either reference trip content (a section, or a subsection of a
/// section) or carry free text entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanItem {
    /// A whole section of the trip
    Section {
        id: String,
        #[serde(
            default,
            deserialize_with = "time::optional",
            skip_serializing_if = "Option::is_none"
        )]
        time: Option<TimeOfDay>,
    },
    /// One subsection, addressed through its parent section
    Subsection {
        id: String,
        #[serde(rename = "parentId")]
        parent_id: String,
        #[serde(
            default,
            deserialize_with = "time::optional",
            skip_serializing_if = "Option::is_none"
        )]
        time: Option<TimeOfDay>,
    },
    /// A user-authored entry with no link to trip content
    Custom {
        description: String,
        #[serde(
            default,
            deserialize_with = "time::optional",
            skip_serializing_if = "Option::is_none"
        )]
        time: Option<TimeOfDay>,
    },
}

/// Identity of a referenced item: kind, id and parent id.
///
/// Two items with equal keys may not both be in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKey {
    Section(String),
    Subsection { parent_id: String, id: String },
}

/// The three kinds of plan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Section,
    Subsection,
    Custom,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Section => "section",
            ItemKind::Subsection => "subsection",
            ItemKind::Custom => "custom",
        }
    }
}

impl PlanItem {
    /// A section reference without a time.
    pub fn section(id: impl Into<String>) -> Self {
        PlanItem::Section {
            id: id.into(),
            time: None,
        }
    }

    /// A subsection reference without a time.
    pub fn subsection(parent_id: impl Into<String>, id: impl Into<String>) -> Self {
        PlanItem::Subsection {
            id: id.into(),
            parent_id: parent_id.into(),
            time: None,
        }
    }

    /// A free-text entry without a time.
    pub fn custom(description: impl Into<String>) -> Self {
        PlanItem::Custom {
            description: description.into(),
            time: None,
        }
    }

    /// Returns the item with its time replaced.
    pub fn at(mut self, at: Option<TimeOfDay>) -> Self {
        match &mut self {
            PlanItem::Section { time, .. }
            | PlanItem::Subsection { time, .. }
            | PlanItem::Custom { time, .. } => *time = at,
        }
        self
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            PlanItem::Section { .. } => ItemKind::Section,
            PlanItem::Subsection { .. } => ItemKind::Subsection,
            PlanItem::Custom { .. } => ItemKind::Custom,
        }
    }

    pub fn time(&self) -> Option<TimeOfDay> {
        match self {
            PlanItem::Section { time, .. }
            | PlanItem::Subsection { time, .. }
            | PlanItem::Custom { time, .. } => *time,
        }
    }

    /// Identity used for duplicate detection; custom items have none.
    pub fn key(&self) -> Option<ItemKey> {
        match self {
            PlanItem::Section { id, .. } => Some(ItemKey::Section(id.clone())),
            PlanItem::Subsection { id, parent_id, .. } => Some(ItemKey::Subsection {
                parent_id: parent_id.clone(),
                id: id.clone(),
            }),
            PlanItem::Custom { .. } => None,
        }
    }

    /// Rejects items with blank ids or blank custom text.
    pub fn validate(&self) -> Result<()> {
        match self {
            PlanItem::Section { id, .. } if id.trim().is_empty() => {
                Err(WaymarkError::invalid_input("id").with_reason("section id cannot be empty"))
            }
            PlanItem::Subsection { id, parent_id, .. }
                if id.trim().is_empty() || parent_id.trim().is_empty() =>
            {
                Err(WaymarkError::invalid_input("id")
                    .with_reason("subsection id and parent id cannot be empty"))
            }
            PlanItem::Custom { description, .. } if description.trim().is_empty() => {
                Err(WaymarkError::invalid_input("description")
                    .with_reason("custom entry needs a description"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Section(id) => write!(f, "section '{id}'"),
            ItemKey::Subsection { parent_id, id } => write!(f, "subsection '{parent_id}/{id}'"),
        }
    }
}

impl fmt::Display for PlanItem {
    /// Short reference form, e.g. `section 'ptuj'` or `custom "Lunch"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.key()) {
            (PlanItem::Custom { description, .. }, _) => write!(f, "custom \"{description}\""),
            (_, Some(key)) => write!(f, "{key}"),
            (_, None) => Ok(()),
        }
    }
}
