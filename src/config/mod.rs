// ABOUTME: Configuration module for the Intervals.icu MCP server
// ABOUTME: Re-exports the environment-derived ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module

/// Environment and server configuration
pub mod environment;

pub use environment::ServerConfig;
