// ABOUTME: Central registry for the Intervals.icu MCP tools with lookup, listing and execution.
// ABOUTME: Built once at startup and handed to the protocol runtime as an explicit tool table.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Central registry for MCP tools, providing:
//! - Tool registration and lookup
//! - Schema generation for MCP tools/list responses
//! - Execution by name
//!
//! # Example
//!
//! ```
//! use intervals_mcp_server::tools::registry::ToolRegistry;
//!
//! let registry = ToolRegistry::with_intervals_tools();
//! assert!(registry.contains("get_activities"));
//! assert_eq!(registry.list_schemas().len(), registry.len());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::implementations::{activities, events, wellness};
use super::result::ToolResult;
use super::traits::McpTool;

/// Central registry for MCP tools.
///
/// Built once at startup and then used immutably for lookups. All tools are
/// `Arc`-wrapped for sharing across async tasks.
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry holding every Intervals.icu tool
    #[must_use]
    pub fn with_intervals_tools() -> Self {
        let mut registry = Self::new();
        registry.register_intervals_tools();
        registry
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("{}, skipping", ToolError::already_registered(&name));
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tool schemas for `tools/list`, sorted by name
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or rejects its arguments
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        tool.execute(args, context).await
    }

    fn register_intervals_tools(&mut self) {
        info!("Registering Intervals.icu tools...");

        let tools = activities::create_activity_tools()
            .into_iter()
            .chain(events::create_event_tools())
            .chain(wellness::create_wellness_tools());
        for tool in tools {
            self.register(Arc::from(tool));
        }

        info!("Registered {} Intervals.icu tools", self.len());
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tools;

    #[test]
    fn test_registers_every_tool_once() {
        let registry = ToolRegistry::with_intervals_tools();
        assert_eq!(
            registry.tool_names(),
            vec![
                tools::GET_ACTIVITIES,
                tools::GET_ACTIVITY_DETAILS,
                tools::GET_ACTIVITY_INTERVALS,
                tools::GET_EVENT_BY_ID,
                tools::GET_EVENTS,
                tools::GET_WELLNESS_DATA,
                tools::POST_EVENTS,
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::with_intervals_tools();
        let before = registry.len();
        let again = events::create_event_tools().remove(0);
        assert!(!registry.register(Arc::from(again)));
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_schemas_declare_object_type() {
        let registry = ToolRegistry::with_intervals_tools();
        for schema in registry.list_schemas() {
            assert_eq!(schema.input_schema.schema_type, "object", "{}", schema.name);
        }
    }
}
