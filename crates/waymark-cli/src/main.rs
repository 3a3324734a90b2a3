//! Waymark CLI Application
//!
//! Command-line interface for the waymark trip itinerary planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaymarkMcpServer};
use renderer::TerminalRenderer;
use waymark_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        trips_dir,
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_trips_dir(trips_dir)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Waymark started");

    match command {
        Some(Show(args)) => Cli::new(planner, renderer).show_trip(args).await,
        Some(Markers(args)) => Cli::new(planner, renderer).markers(args).await,
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Waymark MCP server");
            run_stdio_server(WaymarkMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        Some(Trips) | None => Cli::new(planner, renderer).list_trips().await,
    }
}
