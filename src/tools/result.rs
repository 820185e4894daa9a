// ABOUTME: Defines ToolResult, the value returned by every tool execution.
// ABOUTME: Text answers, structured payloads and caller-visible failures share one shape.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Result Types
//!
//! `ToolResult` bridges tool implementations with the MCP `tools/call`
//! response: a string content becomes a single text block, a mapping content
//! is also exposed as `structuredContent`.

use serde_json::Value;

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Create a text result
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Create a text result flagged as an error
    #[must_use]
    pub fn error_text(message: impl Into<String>) -> Self {
        Self::error(Value::String(message.into()))
    }


    /// Text content, if the result is a plain string
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.content.as_str()
    }
}
