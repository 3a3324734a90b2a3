//! The currently loaded trip and its plan.

use jiff::Timestamp;
use log::{debug, warn};

use super::{Outcome, PlanIntent, PlanState};
use crate::{
    error::{Result, WaymarkError},
    models::{PlanItem, PlanSnapshot, TripDocument},
};

/// A loaded trip paired with its plan.
///
/// A session is created when a trip is loaded and dropped when another trip
/// is loaded; nothing about one trip's plan survives into the next.
#[derive(Debug, Clone)]
pub struct TripSession {
    trip: TripDocument,
    plan: PlanState,
}

/// Result of importing a plan file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Items now in the plan
    pub imported: usize,
    /// References to content the trip no longer has
    pub dropped: Vec<PlanItem>,
}

impl TripSession {
    /// Starts a session with an empty plan.
    pub fn new(trip: TripDocument) -> Self {
        let plan = PlanState::new(trip.id.clone());
        Self { trip, plan }
    }

    /// Starts a session from a stored snapshot.
    ///
    /// A snapshot that does not fit the trip is logged and ignored; the
    /// session then starts with an empty plan.
    pub fn restore(trip: TripDocument, snapshot: Option<PlanSnapshot>) -> Self {
        let mut session = Self::new(trip);
        if let Some(snapshot) = snapshot {
            match session.import(snapshot) {
                Ok(report) => debug!(
                    "Restored plan for '{}' with {} item(s)",
                    session.trip.id, report.imported
                ),
                Err(e) => warn!("Ignoring stored plan for '{}': {e}", session.trip.id),
            }
        }
        session
    }

    pub fn trip(&self) -> &TripDocument {
        &self.trip
    }

    pub fn plan(&self) -> &PlanState {
        &self.plan
    }

    /// Applies an intent, rejecting references to content this trip does not
    /// have.
    pub fn apply(&mut self, intent: PlanIntent) -> Result<Outcome> {
        if let PlanIntent::Add { item, .. } = &intent {
            if !self.trip.contains(item) {
                return Err(WaymarkError::DanglingReference {
                    item: item.to_string(),
                });
            }
        }
        let outcome = self.plan.apply(intent)?;
        debug!("Applied intent to '{}': {outcome}", self.trip.id);
        Ok(outcome)
    }

    /// Replaces the plan with an imported snapshot.
    ///
    /// The snapshot must belong to this trip. Items pointing at sections or
    /// subsections that no longer exist are dropped and reported. Either the
    /// whole import applies or the plan is unchanged.
    pub fn import(&mut self, snapshot: PlanSnapshot) -> Result<ImportReport> {
        let mut plan = PlanState::from_snapshot(snapshot, &self.trip.id)?;
        let dropped = plan.retain(|item| self.trip.contains(item));
        for item in &dropped {
            warn!("Dropping {item} from imported plan: not in trip '{}'", self.trip.id);
        }

        self.plan = plan;
        Ok(ImportReport {
            imported: self.plan.len(),
            dropped,
        })
    }

    /// Display title for a plan item, resolved against the live trip.
    pub fn resolve_title(&self, item: &PlanItem) -> String {
        self.trip.resolve_display_title(item)
    }

    /// Snapshot for export, stamped with the trip title and the current time.
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            trip_title: Some(self.trip.title.clone()),
            exported_at: Some(Timestamp::now()),
            ..self.plan.serialize()
        }
    }
}
