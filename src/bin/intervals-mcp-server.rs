// ABOUTME: Stdio MCP server binary for Intervals.icu
// ABOUTME: Loads configuration, initializes logging and serves JSON-RPC on stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intervals.icu MCP Server Binary
//!
//! Register this binary as a stdio MCP server. Default credentials come from
//! `ATHLETE_ID` and `API_KEY` (environment or `.env`).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use intervals_mcp_server::{
    config::ServerConfig,
    logging,
    mcp::{McpRequestProcessor, ServerResources, StdioTransport},
    tools::ToolRegistry,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "intervals-mcp-server")]
#[command(about = "Intervals.icu MCP Server - training data and workout planning over stdio")]
#[command(version)]
pub struct Args {
    /// Override the Intervals.icu API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Print the registered tool names and exit
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let registry = ToolRegistry::with_intervals_tools();
    if args.list_tools {
        for name in registry.tool_names() {
            println!("{name}");
        }
        return Ok(());
    }

    // .env may carry RUST_LOG, so load it before the subscriber reads the environment
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {e}");
    }
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(base_url) = args.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::new(Arc::new(config))?);
    let processor = Arc::new(McpRequestProcessor::new(resources, Arc::new(registry)));

    info!("Intervals.icu MCP server ready on stdio");
    StdioTransport::new(processor).run().await?;

    info!("Intervals.icu MCP server stopped");
    Ok(())
}
