//! Plan handler operations that return display types for the front ends.

use std::fs;

use jiff::Zoned;
use log::info;

use super::Planner;
use crate::{
    display::{ImportResult, PlanChange},
    error::{Result, WaymarkError},
    export::PdfLayout,
    params::{AddItem, ExportPlan, ImportPlan, MoveItem, RemoveItem, SetDayCount, TripId},
    plan::{PlanIntent, TripSession},
};

impl Planner {
    /// Handle showing a trip's plan.
    pub async fn show_plan(&self, params: &TripId) -> Result<TripSession> {
        self.open_session(&params.trip_id).await
    }

    /// Handle scheduling an item at the end of a day.
    ///
    /// Sections and subsections must exist in the trip and may be planned
    /// only once.
    pub async fn add_item(&self, params: &AddItem) -> Result<PlanChange> {
        self.apply_intent(&params.trip_id, params.to_intent()?).await
    }

    /// Handle removing the item at a position. Positions that hold nothing
    /// leave the plan unchanged.
    pub async fn remove_item(&self, params: &RemoveItem) -> Result<PlanChange> {
        self.apply_intent(&params.trip_id, params.to_intent()?).await
    }

    /// Handle reordering within a day or moving to another day.
    pub async fn move_item(&self, params: &MoveItem) -> Result<PlanChange> {
        self.apply_intent(&params.trip_id, params.to_intent()?).await
    }

    /// Handle resizing the plan.
    ///
    /// Shrinking over days that still hold items is refused unless
    /// `force` is set.
    pub async fn set_day_count(&self, params: &SetDayCount) -> Result<PlanChange> {
        let session = self.open_session(&params.trip_id).await?;
        let at_risk = session.plan().items_beyond(params.days);
        if at_risk > 0 && !params.force {
            return Err(WaymarkError::invalid_input("days").with_reason(format!(
                "days after day {} hold {at_risk} item(s); force the change to drop them",
                params.days
            )));
        }
        self.change(session, PlanIntent::SetDayCount { days: params.days })
            .await
    }

    /// Handle emptying every day of a plan.
    pub async fn clear_plan(&self, params: &TripId) -> Result<PlanChange> {
        self.apply_intent(&params.trip_id, PlanIntent::Clear).await
    }

    /// Handle exporting a plan as JSON or YAML text.
    pub async fn export_plan(&self, params: &ExportPlan) -> Result<String> {
        let session = self.open_session(&params.trip_id).await?;
        params.format.encode(&session.snapshot())
    }

    /// Handle importing a plan file, replacing the current plan.
    ///
    /// Either the whole file is accepted or the saved plan is untouched.
    pub async fn import_plan(&self, params: &ImportPlan) -> Result<ImportResult> {
        let path = params.path.clone();
        let text = Self::blocking(move || {
            fs::read_to_string(&path).map_err(|source| WaymarkError::FileSystem { path, source })
        })
        .await?;
        let snapshot = params.resolved_format().decode(&text)?;

        let mut session = self.open_session(&params.trip_id).await?;
        let report = session.import(snapshot)?;
        info!(
            "Imported {} item(s) into '{}' from {}",
            report.imported,
            params.trip_id,
            params.path.display()
        );

        let persisted = self.persist(&session).await;
        Ok(ImportResult {
            session,
            report,
            persisted,
        })
    }

    /// Handle rendering the plan as a PDF document.
    pub async fn export_pdf(&self, params: &TripId) -> Result<Vec<u8>> {
        let session = self.open_session(&params.trip_id).await?;
        let trips_root = self.library.root().to_path_buf();
        Self::blocking(move || {
            PdfLayout::build(&session, &trips_root, &Zoned::now())?.render()
        })
        .await
    }
}
