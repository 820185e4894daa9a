// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds tool contexts and MCP processors pointed at a wiremock Intervals.icu stand-in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `intervals_mcp_server`

use std::sync::{Arc, Once};

use chrono::NaiveDate;
use intervals_mcp_server::{
    config::ServerConfig,
    mcp::{McpRequestProcessor, ServerResources},
    tools::{ToolExecutionContext, ToolRegistry},
};
use wiremock::MockServer;

/// Default athlete configured for every test server
pub const ATHLETE_ID: &str = "i12345";
/// Default API key configured for every test server
pub const API_KEY: &str = "secret";
/// `Basic base64("API_KEY:secret")`
pub const BASIC_AUTH: &str = "Basic QVBJX0tFWTpzZWNyZXQ=";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// The fixed "today" used by every context
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

/// Configuration with default credentials and the mock server as base URL
pub fn config_for(server: &MockServer) -> ServerConfig {
    ServerConfig {
        athlete_id: ATHLETE_ID.to_owned(),
        api_key: API_KEY.to_owned(),
        api_base_url: server.uri(),
        ..ServerConfig::default()
    }
}

/// Shared resources for an arbitrary configuration
pub fn resources_for(config: ServerConfig) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(Arc::new(config)).unwrap())
}

/// Tool context with default credentials and a pinned date
pub fn context_for(server: &MockServer) -> ToolExecutionContext {
    ToolExecutionContext::new(resources_for(config_for(server))).with_today(today())
}

/// Tool context whose configuration carries no default credentials
pub fn context_without_defaults(server: &MockServer) -> ToolExecutionContext {
    let config = ServerConfig {
        api_base_url: server.uri(),
        ..ServerConfig::default()
    };
    ToolExecutionContext::new(resources_for(config)).with_today(today())
}

/// MCP processor over the full tool registry
pub fn processor_for(server: &MockServer) -> McpRequestProcessor {
    McpRequestProcessor::new(
        resources_for(config_for(server)),
        Arc::new(ToolRegistry::with_intervals_tools()),
    )
}
