//! Result wrapper types for displaying what a plan operation did.

use std::fmt;

use super::plan::PlanView;
use crate::plan::{ImportReport, Outcome, TripSession};

const NOT_SAVED: &str =
    "> Warning: the plan could not be saved and will be lost when this session ends.";

/// The session after a change, with what changed and whether it was saved.
#[derive(Debug)]
pub struct PlanChange {
    pub session: TripSession,
    pub outcome: Outcome,
    /// False when the store could not be written
    pub persisted: bool,
}

impl fmt::Display for PlanChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.outcome)?;
        if let Outcome::Resized { dropped, .. } = &self.outcome {
            for item in dropped {
                writeln!(f, "- dropped {}", self.session.resolve_title(item))?;
            }
        }
        if !self.persisted {
            writeln!(f)?;
            writeln!(f, "{NOT_SAVED}")?;
        }
        writeln!(f)?;
        write!(f, "{}", PlanView(&self.session))
    }
}

/// The session after an import.
#[derive(Debug)]
pub struct ImportResult {
    pub session: TripSession,
    pub report: ImportReport,
    pub persisted: bool,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Imported {} item(s)", self.report.imported)?;
        if !self.report.dropped.is_empty() {
            writeln!(
                f,
                "Skipped {} item(s) that are no longer in this trip:",
                self.report.dropped.len()
            )?;
            for item in &self.report.dropped {
                writeln!(f, "- {item}")?;
            }
        }
        if !self.persisted {
            writeln!(f)?;
            writeln!(f, "{NOT_SAVED}")?;
        }
        writeln!(f)?;
        write!(f, "{}", PlanView(&self.session))
    }
}
