//! Loading sessions, applying intents and saving plans.

use log::{debug, warn};

use super::Planner;
use crate::{
    db::{Database, StoredPlan},
    display::PlanChange,
    error::Result,
    models::TripDocument,
    plan::{PlanIntent, TripSession},
};

impl Planner {
    /// Loads and validates one trip.
    pub async fn load_trip(&self, trip_id: &str) -> Result<TripDocument> {
        let library = self.library.clone();
        let trip_id = trip_id.to_string();
        Self::blocking(move || library.load(&trip_id)).await
    }

    /// Loads a trip and restores its saved plan.
    ///
    /// A plan that cannot be read from the store, or no longer fits the
    /// trip, is logged and replaced by an empty one.
    pub async fn open_session(&self, trip_id: &str) -> Result<TripSession> {
        let library = self.library.clone();
        let db_path = self.db_path.clone();
        let trip_id = trip_id.to_string();

        Self::blocking(move || {
            let trip = library.load(&trip_id)?;
            let stored = match Database::new(&db_path).and_then(|db| db.load_plan(&trip_id)) {
                Ok(stored) => stored,
                Err(e) => {
                    warn!("Could not read the saved plan for '{trip_id}': {e}");
                    None
                }
            };
            Ok(TripSession::restore(trip, stored))
        })
        .await
    }

    /// Saves the session's plan; an empty plan removes the saved one.
    ///
    /// Returns whether the store was written. Failures are logged and never
    /// interrupt the session.
    pub async fn persist(&self, session: &TripSession) -> bool {
        let db_path = self.db_path.clone();
        let snapshot = session.snapshot();
        let trip_id = snapshot.trip_id.clone();

        match Self::blocking(move || Database::new(&db_path)?.save_plan(&snapshot)).await {
            Ok(()) => {
                debug!("Saved plan for '{trip_id}'");
                true
            }
            Err(e) => {
                warn!("Plan for '{trip_id}' was not saved: {e}");
                false
            }
        }
    }

    /// Applies an intent to a session and saves the result if anything
    /// changed.
    pub async fn change(&self, mut session: TripSession, intent: PlanIntent) -> Result<PlanChange> {
        let outcome = session.apply(intent)?;
        let persisted = if outcome.is_change() {
            self.persist(&session).await
        } else {
            true
        };
        Ok(PlanChange {
            session,
            outcome,
            persisted,
        })
    }

    /// Opens the trip's session and applies one intent to it.
    pub async fn apply_intent(&self, trip_id: &str, intent: PlanIntent) -> Result<PlanChange> {
        let session = self.open_session(trip_id).await?;
        self.change(session, intent).await
    }

    /// Saved plans, most recently updated first.
    pub async fn saved_plans(&self) -> Result<Vec<StoredPlan>> {
        let db_path = self.db_path.clone();
        Self::blocking(move || Database::new(&db_path)?.list_plans()).await
    }
}
