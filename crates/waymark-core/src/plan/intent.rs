//! User intents against a plan and their outcomes.
//!
//! Front ends translate gestures (a command line, an MCP tool call) into a
//! [`PlanIntent`] and hand it to [`super::PlanState::apply`]. They never patch
//! the plan directly, and they re-render from state afterwards.

use std::fmt;

use crate::models::PlanItem;

/// A position in the plan: 1-based day, 0-based index within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub day: u32,
    pub index: usize,
}

impl Slot {
    pub fn new(day: u32, index: usize) -> Self {
        Self { day, index }
    }
}

/// A change requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanIntent {
    /// Append an item to a day
    Add { day: u32, item: PlanItem },
    /// Drop the item at a position
    Remove { day: u32, index: usize },
    /// Reorder within a day or move across days
    Move { from: Slot, to: Slot },
    /// Resize the plan to days `1..=days`
    SetDayCount { days: u32 },
    /// Empty every day
    Clear,
}

/// What an applied intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { day: u32, index: usize },
    Removed { day: u32, item: PlanItem },
    Moved { from: Slot, to: Slot },
    Resized { days: u32, dropped: Vec<PlanItem> },
    Cleared { removed: usize },
    /// The intent referred to nothing; the plan is as it was
    Unchanged,
}

impl Outcome {
    /// Whether the plan was modified and should be persisted.
    pub fn is_change(&self) -> bool {
        match self {
            Outcome::Unchanged => false,
            Outcome::Cleared { removed } => *removed > 0,
            _ => true,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} position {}", self.day, self.index + 1)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { day, index } => {
                write!(f, "Added to day {day} at position {}", index + 1)
            }
            Outcome::Removed { day, item } => write!(f, "Removed {item} from day {day}"),
            Outcome::Moved { from, to } => write!(f, "Moved item from {from} to {to}"),
            Outcome::Resized { days, dropped } if dropped.is_empty() => {
                write!(f, "Plan now has {days} days")
            }
            Outcome::Resized { days, dropped } => write!(
                f,
                "Plan now has {days} days; {} item(s) on removed days were dropped",
                dropped.len()
            ),
            Outcome::Cleared { removed } => write!(f, "Cleared {removed} item(s) from the plan"),
            Outcome::Unchanged => write!(f, "Nothing to change"),
        }
    }
}
