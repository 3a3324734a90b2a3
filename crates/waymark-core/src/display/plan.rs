//! Markdown rendering of a day plan.

use std::fmt;

use crate::{models::PlanItem, plan::TripSession};

/// A session's plan, rendered day by day with live titles.
///
/// The view is derived from state on every render; nothing about it is
/// stored.
pub struct PlanView<'a>(pub &'a TripSession);

impl PlanView<'_> {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>, position: usize, item: &PlanItem) -> fmt::Result {
        let session = self.0;
        write!(f, "{position}. ")?;
        if let Some(time) = item.time() {
            write!(f, "{time} ")?;
        }
        write!(f, "{}", session.resolve_title(item))?;

        match item {
            PlanItem::Section { .. } => writeln!(f, " _(section)_"),
            PlanItem::Subsection { parent_id, .. } => {
                let parent = session
                    .trip()
                    .section(parent_id)
                    .map_or(parent_id.as_str(), |section| section.display_title());
                writeln!(f, " _(in {parent})_")
            }
            PlanItem::Custom { .. } => writeln!(f),
        }
    }
}

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let plan = session.plan();
        writeln!(f, "# Plan: {}", session.trip().display_title())?;

        for (day, items) in plan.days() {
            writeln!(f)?;
            writeln!(f, "## Day {day}")?;
            writeln!(f)?;
            if items.is_empty() {
                writeln!(f, "_Nothing planned._")?;
            }
            for (index, item) in items.iter().enumerate() {
                self.fmt_item(f, index + 1, item)?;
            }
        }
        Ok(())
    }
}
