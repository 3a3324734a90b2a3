//! MCP server implementation for Waymark
//!
//! Exposes trip browsing and day-plan editing as Model Context Protocol
//! tools so an AI assistant can plan a trip alongside the user.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use waymark_core::Planner;

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddItem, ExportPlan, McpResult, MoveItem, RemoveItem, SetDayCount, TripId,
};

const INSTRUCTIONS: &str = r#"Waymark plans trips day by day.

## Core Concepts
- **Trips**: folders of content, each with sections and nested subsections. Sections and subsections can have a description, images and a map location.
- **Plan**: one per trip, a fixed number of days (3 by default). Each day holds an ordered list of items.
- **Items**: a section, a subsection (identified by its parent section id and its own id), or a custom free-text note. Items may carry a time of day ("HH:MM").

## Rules
- A section or subsection can be planned at most once in the whole plan; custom notes may repeat.
- Days and positions count from 1.
- When moving, `to_position` is counted after the item has left its old place; one past the last item appends.
- Shrinking the plan with `set_day_count` is refused while the removed days hold items, unless `force` is true.

## Workflow
1. `list_trips` to find the trip id.
2. `show_trip` to read its sections and subsections.
3. `add_item`, `move_item`, `remove_item` and `set_day_count` to shape the plan. Every change is saved and the updated plan is returned.
4. `show_plan` to review, `export_plan` to get a JSON or YAML copy."#;

/// MCP server for Waymark
#[derive(Clone)]
pub struct WaymarkMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaymarkMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "list_trips",
        description = "List every available trip with its id, title and the size of its saved plan. Use the id with the other tools."
    )]
    async fn list_trips(&self) -> McpResult {
        self.handlers().list_trips().await
    }

    #[tool(
        name = "show_trip",
        description = "Show the content of a trip: its sections in order, their ids, descriptions, locations, images and nested subsections. Use the ids shown here with add_item."
    )]
    async fn show_trip(&self, params: Parameters<TripId>) -> McpResult {
        self.handlers().show_trip(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show the day plan of a trip, day by day, with numbered positions and current titles. Positions shown here are the ones remove_item and move_item expect."
    )]
    async fn show_plan(&self, params: Parameters<TripId>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "add_item",
        description = "Append an item to a day. kind is 'section' (needs id), 'subsection' (needs parent_id and id) or 'custom' (needs description). Optional time as HH:MM. Sections and subsections that are already planned are rejected."
    )]
    async fn add_item(&self, params: Parameters<AddItem>) -> McpResult {
        self.handlers().add_item(params).await
    }

    #[tool(
        name = "remove_item",
        description = "Remove the item at a 1-based position of a day. A position past the end of the day changes nothing."
    )]
    async fn remove_item(&self, params: Parameters<RemoveItem>) -> McpResult {
        self.handlers().remove_item(params).await
    }

    #[tool(
        name = "move_item",
        description = "Move an item within a day or to another day. Positions are 1-based; to_position is counted after the item is taken out, and one past the last item appends."
    )]
    async fn move_item(&self, params: Parameters<MoveItem>) -> McpResult {
        self.handlers().move_item(params).await
    }

    #[tool(
        name = "set_day_count",
        description = "Change the number of days in the plan (1 to 31). Growing adds empty days at the end. Shrinking is refused while removed days hold items unless force is true, in which case those items are dropped."
    )]
    async fn set_day_count(&self, params: Parameters<SetDayCount>) -> McpResult {
        self.handlers().set_day_count(params).await
    }

    #[tool(
        name = "export_plan",
        description = "Return the saved plan as a JSON (default) or YAML document with the trip id and items per day. The document can be imported back with the CLI."
    )]
    async fn export_plan(&self, params: Parameters<ExportPlan>) -> McpResult {
        self.handlers().export_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaymarkMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waymark".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaymarkMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waymark MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use waymark_core::PlannerBuilder;

    use super::*;

    #[tokio::test]
    async fn test_all_tools_registered() {
        let temp_dir = TempDir::new().unwrap();
        let planner = PlannerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("plans.db")))
            .with_trips_dir(Some(temp_dir.path().join("trips")))
            .build()
            .await
            .unwrap();

        let server = WaymarkMcpServer::new(planner);
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "add_item",
                "export_plan",
                "list_trips",
                "move_item",
                "remove_item",
                "set_day_count",
                "show_plan",
                "show_trip",
            ]
        );
        assert_eq!(server.get_info().server_info.name, "waymark");
    }
}
