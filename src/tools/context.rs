// ABOUTME: Defines ToolExecutionContext which gives tools access to shared resources.
// ABOUTME: Carries the request id for tracing and the reference date for date defaults.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Execution Context
//!
//! Provides a unified context object for tool execution, containing:
//! - Access to shared server resources (configuration, HTTP client)
//! - Request tracing information
//! - The date that "today" resolves to for default date windows

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::config::ServerConfig;
use crate::intervals::IntervalsClient;
use crate::mcp::resources::ServerResources;

/// Context provided to every tool execution.
///
/// `resources` is shared across concurrent calls; cloning the context only
/// bumps the `Arc` count.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Access to configuration and the HTTP client
    pub resources: Arc<ServerResources>,
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
    /// Fixed reference date; the local date is used when unset
    today: Option<NaiveDate>,
}

impl ToolExecutionContext {
    /// Create a new context
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            resources,
            request_id: None,
            today: None,
        }
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Pin the reference date used for default date windows
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Server configuration (default credentials, base URL)
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.resources.config
    }

    /// Shared Intervals.icu client
    #[must_use]
    pub fn client(&self) -> &IntervalsClient {
        &self.resources.client
    }

    /// The reference date
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Request id rendered for log fields
    #[must_use]
    pub fn request_id_for_logging(&self) -> String {
        self.request_id
            .as_ref()
            .map_or_else(|| "none".to_owned(), ToString::to_string)
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("request_id", &self.request_id)
            .field("today", &self.today)
            .field("api_base_url", &self.resources.config.api_base_url)
            .finish_non_exhaustive()
    }
}
