//! Day-plan state model.
//!
//! [`PlanState`] is the single source of truth for a trip's itinerary: an
//! ordered list of [`PlanItem`]s for each day `1..=n`. All operations are
//! synchronous and either succeed or leave the state untouched, so a
//! front end can apply a sequence of user gestures one after another and
//! always observe a consistent plan in between.
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  UI event   │───▶│ PlanIntent  │───▶│  PlanState  │───▶│  re-render  │
//! │ (CLI, MCP)  │    │ (intent.rs) │    │  (mod.rs)   │    │ (display/)  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! Invariants:
//!
//! - insertion order is display order is export order;
//! - a section or subsection appears at most once in the whole plan;
//! - a snapshot is only accepted for the trip it was taken from.
//!
//! The state model knows nothing about trip content. Checking that item
//! references exist is the job of [`TripSession`], which pairs a plan with
//! the loaded [`crate::models::TripDocument`].

use std::collections::{BTreeMap, HashSet};

use crate::{
    error::{Result, WaymarkError},
    models::{ItemKey, PlanItem, PlanSnapshot},
};

pub mod intent;
pub mod session;

#[cfg(test)]
mod tests;

pub use intent::{Outcome, PlanIntent, Slot};
pub use session::{ImportReport, TripSession};

/// Number of days a fresh plan starts with.
pub const DEFAULT_DAY_COUNT: u32 = 3;

/// Upper bound on plan length.
pub const MAX_DAY_COUNT: u32 = 31;

/// The day → ordered items mapping for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanState {
    trip_id: String,
    /// `days[0]` is day 1
    days: Vec<Vec<PlanItem>>,
}

impl PlanState {
    /// Creates an empty plan with [`DEFAULT_DAY_COUNT`] days.
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            days: vec![Vec::new(); DEFAULT_DAY_COUNT as usize],
        }
    }

    /// Id of the trip this plan belongs to.
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// Number of days, `n` in `1..=n`.
    pub fn day_count(&self) -> u32 {
        self.days.len() as u32
    }

    /// Items of one day, or `None` for an unknown day.
    pub fn day(&self, day: u32) -> Option<&[PlanItem]> {
        let index = day.checked_sub(1)? as usize;
        self.days.get(index).map(Vec::as_slice)
    }

    /// Iterates over `(day, items)` in day order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &[PlanItem])> {
        self.days
            .iter()
            .enumerate()
            .map(|(index, items)| (index as u32 + 1, items.as_slice()))
    }

    /// Total number of items across all days.
    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Whether no day holds any item.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Day and index of the item with the given identity.
    pub fn locate(&self, key: &ItemKey) -> Option<(u32, usize)> {
        self.days().find_map(|(day, items)| {
            items
                .iter()
                .position(|item| item.key().as_ref() == Some(key))
                .map(|index| (day, index))
        })
    }

    fn day_index(&self, day: u32) -> Result<usize> {
        if day == 0 || day > self.day_count() {
            return Err(WaymarkError::DayOutOfRange {
                day,
                days: self.day_count(),
            });
        }
        Ok(day as usize - 1)
    }

    /// Appends `item` to the end of `day`.
    ///
    /// Sections and subsections already scheduled anywhere in the plan are
    /// rejected with [`WaymarkError::DuplicateItem`]; custom items are always
    /// appended. Returns the day's items after the insertion.
    pub fn add_item(&mut self, day: u32, item: PlanItem) -> Result<&[PlanItem]> {
        item.validate()?;
        let index = self.day_index(day)?;

        if let Some(key) = item.key() {
            if let Some((existing_day, _)) = self.locate(&key) {
                return Err(WaymarkError::DuplicateItem {
                    item: key.to_string(),
                    day: existing_day,
                });
            }
        }

        self.days[index].push(item);
        Ok(&self.days[index])
    }

    /// Removes and returns the item at `index` of `day`.
    ///
    /// Out-of-range days or indexes are a no-op returning `None`.
    pub fn remove_item(&mut self, day: u32, index: usize) -> Option<PlanItem> {
        let day_index = self.day_index(day).ok()?;
        let items = &mut self.days[day_index];
        (index < items.len()).then(|| items.remove(index))
    }

    /// Moves an item between slots: same-day reorder when the days match,
    /// cross-day move otherwise.
    ///
    /// `to.index` is interpreted after the item has left its source, so it
    /// may range over `0..=len` of the destination without the moved item.
    /// Invalid slots are rejected before anything changes.
    pub fn move_item(&mut self, from: Slot, to: Slot) -> Result<()> {
        let from_day = self.day_index(from.day)?;
        let to_day = self.day_index(to.day)?;

        let source_len = self.days[from_day].len();
        if from.index >= source_len {
            return Err(WaymarkError::invalid_input("from_position").with_reason(format!(
                "day {} has {} item(s), no item at position {}",
                from.day,
                source_len,
                from.index + 1
            )));
        }

        let destination_len = if from_day == to_day {
            source_len - 1
        } else {
            self.days[to_day].len()
        };
        if to.index > destination_len {
            return Err(WaymarkError::invalid_input("to_position").with_reason(format!(
                "day {} can take an item at positions 1 to {}, not {}",
                to.day,
                destination_len + 1,
                to.index + 1
            )));
        }

        let item = self.days[from_day].remove(from.index);
        self.days[to_day].insert(to.index, item);
        Ok(())
    }

    /// Resizes the plan to days `1..=n`.
    ///
    /// Shrinking drops the removed days together with their items, which are
    /// returned so callers can warn about (or undo) the loss.
    pub fn set_day_count(&mut self, n: u32) -> Result<Vec<PlanItem>> {
        if n == 0 || n > MAX_DAY_COUNT {
            return Err(WaymarkError::invalid_input("days")
                .with_reason(format!("day count must be between 1 and {MAX_DAY_COUNT}")));
        }

        let dropped = if (n as usize) < self.days.len() {
            self.days.drain(n as usize..).flatten().collect()
        } else {
            self.days.resize_with(n as usize, Vec::new);
            Vec::new()
        };
        Ok(dropped)
    }

    /// Items that would be lost by shrinking to `n` days.
    pub fn items_beyond(&self, n: u32) -> usize {
        self.days.iter().skip(n as usize).map(Vec::len).sum()
    }

    /// Removes every item for which `keep` returns false, returning them.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<PlanItem>
    where
        F: FnMut(&PlanItem) -> bool,
    {
        let mut removed = Vec::new();
        for items in &mut self.days {
            let (kept, dropped): (Vec<_>, Vec<_>) = items.drain(..).partition(|item| keep(item));
            *items = kept;
            removed.extend(dropped);
        }
        removed
    }

    /// Empties every day, keeping the day count.
    pub fn clear(&mut self) {
        self.days.iter_mut().for_each(Vec::clear);
    }

    /// Structural snapshot of the plan. Pure: no side effects.
    pub fn serialize(&self) -> PlanSnapshot {
        PlanSnapshot {
            trip_id: self.trip_id.clone(),
            trip_title: None,
            exported_at: None,
            days: self
                .days()
                .map(|(day, items)| (day, items.to_vec()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    /// Replaces the plan with `snapshot` after checking that it belongs to
    /// `trip_id` and is well-formed.
    ///
    /// On error the current state is left untouched.
    pub fn deserialize(&mut self, snapshot: PlanSnapshot, trip_id: &str) -> Result<()> {
        *self = Self::from_snapshot(snapshot, trip_id)?;
        Ok(())
    }

    /// Builds a plan from `snapshot`, validating it for `trip_id`.
    pub fn from_snapshot(snapshot: PlanSnapshot, trip_id: &str) -> Result<Self> {
        if snapshot.trip_id != trip_id {
            return Err(WaymarkError::validation(format!(
                "plan belongs to trip '{}', not '{}'",
                snapshot.trip_id, trip_id
            )));
        }

        let day_count = snapshot.days.len() as u32;
        if day_count == 0 || day_count > MAX_DAY_COUNT {
            return Err(WaymarkError::validation(format!(
                "plan must have between 1 and {MAX_DAY_COUNT} days, found {day_count}"
            )));
        }
        // BTreeMap keys are sorted, so 1..=n means the last key equals n
        if snapshot.days.keys().next() != Some(&1)
            || snapshot.days.keys().next_back() != Some(&day_count)
        {
            return Err(WaymarkError::validation(format!(
                "days must be numbered 1 to {day_count} without gaps"
            )));
        }

        let mut seen = HashSet::new();
        for (day, items) in &snapshot.days {
            for item in items {
                item.validate()
                    .map_err(|e| WaymarkError::validation(format!("day {day}: {e}")))?;
                if let Some(key) = item.key() {
                    if !seen.insert(key.clone()) {
                        return Err(WaymarkError::validation(format!(
                            "{key} is scheduled more than once"
                        )));
                    }
                }
            }
        }

        Ok(Self {
            trip_id: snapshot.trip_id,
            days: snapshot.days.into_values().collect(),
        })
    }

    /// Applies one user intent. See [`PlanIntent`].
    pub fn apply(&mut self, intent: PlanIntent) -> Result<Outcome> {
        match intent {
            PlanIntent::Add { day, item } => {
                let items = self.add_item(day, item)?;
                Ok(Outcome::Added {
                    day,
                    index: items.len() - 1,
                })
            }
            PlanIntent::Remove { day, index } => Ok(match self.remove_item(day, index) {
                Some(item) => Outcome::Removed { day, item },
                None => Outcome::Unchanged,
            }),
            PlanIntent::Move { from, to } => {
                self.move_item(from, to)?;
                Ok(Outcome::Moved { from, to })
            }
            PlanIntent::SetDayCount { days } => {
                let dropped = self.set_day_count(days)?;
                Ok(Outcome::Resized { days, dropped })
            }
            PlanIntent::Clear => {
                let removed = self.len();
                self.clear();
                Ok(Outcome::Cleared { removed })
            }
        }
    }
}
