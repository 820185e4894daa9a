// ABOUTME: Model Context Protocol (MCP) implementation for AI assistant integration
// ABOUTME: Request processing, wire schema, shared resources and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON-RPC method routing and tool dispatch
pub mod request_processor;
/// Shared configuration and HTTP client
pub mod resources;
/// MCP wire types
pub mod schema;
/// Newline-delimited stdio transport
pub mod transport;

pub use request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use transport::StdioTransport;
