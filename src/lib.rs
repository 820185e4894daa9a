// ABOUTME: Main library entry point for the Intervals.icu MCP server
// ABOUTME: Exposes Intervals.icu activities, calendar events and wellness data as MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Intervals.icu MCP Server
//!
//! A Model Context Protocol (MCP) server that lets AI assistants read an
//! athlete's training data from [Intervals.icu](https://intervals.icu) and
//! plan workouts on their calendar.
//!
//! ## Features
//!
//! - **Activities**: recent named activities, full activity summaries, interval analysis
//! - **Calendar**: upcoming events, event details, posting structured workouts
//! - **Wellness**: fitness, fatigue, vitals and sleep per day
//! - **MCP over stdio**: newline-delimited JSON-RPC 2.0
//!
//! ## Quick Start
//!
//! 1. Put `ATHLETE_ID` and `API_KEY` in the environment or a `.env` file
//! 2. Start the server with `intervals-mcp-server`
//! 3. Register the binary as a stdio MCP server in your client
//!
//! ## Architecture
//!
//! - **Intervals**: HTTP gateway to the Intervals.icu REST API
//! - **Models**: payload normalization and workout construction
//! - **Formatters**: plain-text rendering of activities, events and wellness
//! - **Tools**: one `McpTool` per operation, held in a `ToolRegistry`
//! - **MCP**: request routing and the stdio transport
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use intervals_mcp_server::config::ServerConfig;
//! use intervals_mcp_server::mcp::{McpRequestProcessor, ServerResources, StdioTransport};
//! use intervals_mcp_server::tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let resources = Arc::new(ServerResources::new(config)?);
//!     let registry = Arc::new(ToolRegistry::with_intervals_tools());
//!     let processor = Arc::new(McpRequestProcessor::new(resources, registry));
//!     StdioTransport::new(processor).run().await?;
//!     Ok(())
//! }
//! ```

/// Environment configuration and credential defaults
pub mod config;
/// Application constants and configuration values
pub mod constants;
/// Unified error handling system with standard error codes
pub mod errors;
/// Plain-text rendering of Intervals.icu payloads
pub mod formatters;
/// Intervals.icu HTTP gateway
pub mod intervals;
/// JSON-RPC 2.0 envelope types
pub mod jsonrpc;
/// Structured logging to stderr
pub mod logging;
/// Model Context Protocol server implementation
pub mod mcp;
/// Payload normalization and workout construction
pub mod models;
/// Tool trait, registry and implementations
pub mod tools;
/// Typed tool parameters
pub mod types;
