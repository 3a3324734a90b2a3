//! Trip handler operations that return display types for the front ends.

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use super::Planner;
use crate::{
    display::{Markers, TripSummaries},
    error::Result,
    models::{TripDocument, TripListing},
    params::TripId,
};

impl Planner {
    /// Lists available trips with the state of their saved plans.
    ///
    /// Trips are listed even when the plan store cannot be read.
    pub async fn list_trips(&self) -> Result<TripSummaries> {
        let trips = {
            let library = self.library.clone();
            Self::blocking(move || library.index()).await?
        };

        let saved: HashMap<_, _> = match self.saved_plans().await {
            Ok(plans) => plans
                .into_iter()
                .map(|plan| (plan.trip_id.clone(), plan))
                .collect(),
            Err(e) => {
                warn!("Could not read saved plans: {e}");
                HashMap::new()
            }
        };

        let listings = trips
            .into_iter()
            .map(|trip| {
                let stored = saved.get(&trip.id);
                TripListing {
                    planned_items: stored.map_or(0, |plan| plan.item_count),
                    updated_at: stored.map(|plan| plan.updated_at),
                    id: trip.id,
                    title: trip.title,
                }
            })
            .collect();
        Ok(TripSummaries(listings))
    }

    /// Handle showing a trip's content tree.
    pub async fn show_trip(&self, params: &TripId) -> Result<TripDocument> {
        self.load_trip(&params.trip_id).await
    }

    /// Map markers of every located section and subsection.
    pub async fn trip_markers(&self, params: &TripId) -> Result<Markers> {
        let trip = self.load_trip(&params.trip_id).await?;
        Ok(Markers(trip.markers()))
    }

    /// The same markers as a GeoJSON `FeatureCollection`.
    pub async fn trip_geojson(&self, params: &TripId) -> Result<Value> {
        let trip = self.load_trip(&params.trip_id).await?;
        Ok(trip.markers_geojson())
    }
}
