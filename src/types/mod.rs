// ABOUTME: Typed request parameter definitions
// ABOUTME: Serde structs for tool arguments with defaults and lenient id parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Tool parameter structs
pub mod json_schemas;
