// ABOUTME: Defines tool-specific error types for registry lookup and argument validation.
// ABOUTME: Provides structured errors that integrate with the main AppError system.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Error Types
//!
//! `ToolError` covers failures that happen before a tool can talk to
//! Intervals.icu: an unknown tool name or arguments that do not match the
//! tool's schema. Remote API failures are not errors at this level; tools
//! render them as text.

use std::error::Error;
use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// Errors specific to tool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
    /// Tool is already registered (for registry operations)
    AlreadyRegistered {
        /// Name of the already-registered tool
        tool_name: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an "already registered" error
    #[must_use]
    pub fn already_registered(tool_name: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            tool_name: tool_name.into(),
        }
    }

    /// Map a serde argument error onto the matching tool error
    ///
    /// serde reports a missing field as ``missing field `name` ``; that case
    /// becomes `MissingParameter`, everything else `InvalidParameter`.
    #[must_use]
    pub fn from_arguments(tool_name: &str, error: &serde_json::Error) -> Self {
        let text = error.to_string();
        if let Some(field) = text
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            return Self::missing_parameter(tool_name, field);
        }
        Self::invalid_parameter(tool_name, "arguments", text)
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. }
            | Self::AlreadyRegistered { tool_name } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => {
                write!(f, "Tool '{tool_name}' not found")
            }
            Self::InvalidParameter {
                tool_name,
                parameter,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter '{parameter}' for tool '{tool_name}': {reason}"
                )
            }
            Self::MissingParameter {
                tool_name,
                parameter,
            } => {
                write!(
                    f,
                    "Missing required parameter '{parameter}' for tool '{tool_name}'"
                )
            }
            Self::AlreadyRegistered { tool_name } => {
                write!(f, "Tool '{tool_name}' is already registered")
            }
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::NotFound { tool_name } => Self::not_found(format!("tool '{tool_name}'")),
            ToolError::InvalidParameter { .. } => Self::invalid_input(error.to_string()),
            ToolError::MissingParameter { .. } => {
                Self::new(ErrorCode::MissingRequiredField, error.to_string())
            }
            ToolError::AlreadyRegistered { .. } => Self::internal(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Args {
        #[allow(dead_code)]
        activity_id: String,
    }

    #[test]
    fn test_missing_field_maps_to_missing_parameter() {
        let err = serde_json::from_value::<Args>(json!({})).unwrap_err();
        let tool_err = ToolError::from_arguments("get_activity_details", &err);
        assert_eq!(
            tool_err,
            ToolError::missing_parameter("get_activity_details", "activity_id")
        );
    }

    #[test]
    fn test_wrong_type_maps_to_invalid_parameter() {
        let err = serde_json::from_value::<Args>(json!({"activity_id": 5})).unwrap_err();
        let tool_err = ToolError::from_arguments("get_activity_details", &err);
        assert!(matches!(tool_err, ToolError::InvalidParameter { .. }));
        assert_eq!(tool_err.tool_name(), "get_activity_details");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let app: AppError = ToolError::not_found("nope").into();
        assert_eq!(app.code, ErrorCode::ResourceNotFound);

        let app: AppError = ToolError::missing_parameter("t", "p").into();
        assert_eq!(app.code, ErrorCode::MissingRequiredField);
    }
}
