// ABOUTME: Defines the McpTool trait and ToolCapabilities for the Intervals.icu tool set.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! All tools implement the `McpTool` trait which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags describing what the tool touches
//! - Async execution with a shared execution context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for discovery and logging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs an athlete id and/or API key
        const REQUIRES_CREDENTIALS = 0b0000_0001;
        /// Tool reads remote data (activities, events, wellness)
        const READS_DATA = 0b0000_0010;
        /// Tool creates remote data (calendar events)
        const WRITES_DATA = 0b0000_0100;
    }
}

impl ToolCapabilities {
    /// Check if tool needs credentials
    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        self.contains(Self::REQUIRES_CREDENTIALS)
    }

    /// Check if tool reads data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool writes data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::REQUIRES_CREDENTIALS, "requires_credentials"),
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait every Intervals.icu tool implements.
///
/// Tools are `Send + Sync` so a single registry can be shared by the
/// transport. `execute` returns `Ok` for every outcome the caller should see
/// as text, including remote failures; `Err` is reserved for argument
/// validation and internal faults.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use intervals_mcp_server::tools::{McpTool, ToolCapabilities, ToolResult, ToolExecutionContext};
/// use intervals_mcp_server::mcp::schema::JsonSchema;
/// use intervals_mcp_server::errors::AppResult;
/// use serde_json::Value;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping_intervals"
///     }
///
///     fn description(&self) -> &'static str {
///         "Reply with pong"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema {
///             schema_type: "object".to_owned(),
///             properties: None,
///             required: None,
///         }
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::empty()
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::text("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used for lookup and `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the arguments cannot be deserialized
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_capabilities() {
        let caps = ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::WRITES_DATA;
        assert_eq!(caps.describe(), "requires_credentials, writes_data");
        assert!(caps.writes_data());
        assert!(!caps.reads_data());
        assert_eq!(ToolCapabilities::empty().describe(), "none");
    }
}
