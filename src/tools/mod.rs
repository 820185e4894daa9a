// ABOUTME: Pluggable tool architecture for the Intervals.icu MCP server.
// ABOUTME: Trait, registry, execution context, results, errors and the tool implementations.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! Every capability exposed over MCP is an [`McpTool`] registered once in a
//! [`ToolRegistry`]. The protocol layer only ever talks to the registry.

/// Shared execution context
pub mod context;
/// Tool-level errors
pub mod errors;
/// Tool implementations
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool results
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
