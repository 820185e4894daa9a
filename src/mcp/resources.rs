// ABOUTME: Centralized resource container shared by the MCP processor and every tool
// ABOUTME: Holds the immutable configuration and the reusable Intervals.icu HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources Module
//!
//! Built once at startup and handed around as `Arc<ServerResources>`.
//! Nothing in here is mutated after construction.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::intervals::IntervalsClient;

/// Centralized resource container for dependency injection
#[derive(Debug, Clone)]
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub client: IntervalsClient,
}

impl ServerResources {
    /// Create resources, building the HTTP client from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: Arc<ServerConfig>) -> AppResult<Self> {
        let client = IntervalsClient::new(&config)?;
        Ok(Self { config, client })
    }
}
