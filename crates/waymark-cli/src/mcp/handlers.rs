//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;
use waymark_core::{display::PlanView, params as core, Planner};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types.
///
/// Deserializes straight into the wrapped type and reuses its schema, so the
/// core params need no MCP-specific types of their own.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type TripId = McpParams<core::TripId>;
pub type AddItem = McpParams<core::AddItem>;
pub type RemoveItem = McpParams<core::RemoveItem>;
pub type MoveItem = McpParams<core::MoveItem>;
pub type SetDayCount = McpParams<core::SetDayCount>;
pub type ExportPlan = McpParams<core::ExportPlan>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn list_trips(&self) -> McpResult {
        debug!("list_trips");

        let trips = self
            .planner
            .lock()
            .await
            .list_trips()
            .await
            .map_err(|e| to_mcp_error("Failed to list trips", &e))?;

        Ok(text_result(format!("# Trips\n\n{trips}")))
    }

    pub async fn show_trip(&self, Parameters(params): Parameters<TripId>) -> McpResult {
        debug!("show_trip: {params:?}");

        let trip = self
            .planner
            .lock()
            .await
            .show_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load trip", &e))?;

        Ok(text_result(trip.to_string()))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<TripId>) -> McpResult {
        debug!("show_plan: {params:?}");

        let session = self
            .planner
            .lock()
            .await
            .show_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load plan", &e))?;

        Ok(text_result(PlanView(&session).to_string()))
    }

    pub async fn add_item(&self, Parameters(params): Parameters<AddItem>) -> McpResult {
        debug!("add_item: {params:?}");

        let change = self
            .planner
            .lock()
            .await
            .add_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add item", &e))?;

        Ok(text_result(change.to_string()))
    }

    pub async fn remove_item(&self, Parameters(params): Parameters<RemoveItem>) -> McpResult {
        debug!("remove_item: {params:?}");

        let change = self
            .planner
            .lock()
            .await
            .remove_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove item", &e))?;

        Ok(text_result(change.to_string()))
    }

    pub async fn move_item(&self, Parameters(params): Parameters<MoveItem>) -> McpResult {
        debug!("move_item: {params:?}");

        let change = self
            .planner
            .lock()
            .await
            .move_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to move item", &e))?;

        Ok(text_result(change.to_string()))
    }

    pub async fn set_day_count(&self, Parameters(params): Parameters<SetDayCount>) -> McpResult {
        debug!("set_day_count: {params:?}");

        let change = self
            .planner
            .lock()
            .await
            .set_day_count(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change the number of days", &e))?;

        Ok(text_result(change.to_string()))
    }

    pub async fn export_plan(&self, Parameters(params): Parameters<ExportPlan>) -> McpResult {
        debug!("export_plan: {params:?}");

        let text = self
            .planner
            .lock()
            .await
            .export_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to export plan", &e))?;

        Ok(text_result(text))
    }
}
