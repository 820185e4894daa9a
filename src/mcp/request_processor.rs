// ABOUTME: MCP request processing for the stdio server
// ABOUTME: Validates JSON-RPC envelopes, routes MCP methods and turns tool results into responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use super::resources::ServerResources;
use super::schema::{InitializeRequest, InitializeResponse, ToolCall, ToolResponse};
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::logging::AppLogger;
use crate::tools::{ToolExecutionContext, ToolRegistry, ToolResult};

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
    registry: Arc<ToolRegistry>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            resources,
            registry,
        }
    }

    /// Handle an MCP request; notifications produce no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        Self::log_request(&request);

        if request.is_notification() {
            debug!("Handling notification: {}", request.method);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = match self.process_request(&request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(&request, &e),
        };

        Self::log_completion("request", start_time);
        Some(response)
    }

    async fn process_request(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        if let Some(invalid) = Self::validate_request(request) {
            return Ok(invalid);
        }

        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "ping" => Ok(JsonRpcResponse::success(request.id.clone(), json!({}))),
            "tools/list" => Ok(self.handle_tools_list(request)),
            "tools/call" => self.handle_tools_call(request).await,
            _ => Ok(Self::handle_unknown_method(request)),
        }
    }

    fn validate_request(request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        let problem = if request.jsonrpc != JSONRPC_VERSION {
            format!(
                "Invalid JSON-RPC version: got '{}', expected '{}'",
                request.jsonrpc, JSONRPC_VERSION
            )
        } else if request.method.is_empty() {
            "Missing method".to_owned()
        } else {
            return None;
        };

        warn!("Rejecting invalid request: {problem}");
        Some(JsonRpcResponse::error(
            request.id.clone(),
            error_codes::INVALID_REQUEST,
            problem,
        ))
    }

    fn handle_initialize(request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let client = request
            .params
            .clone()
            .and_then(|params| serde_json::from_value::<InitializeRequest>(params).ok());
        match client {
            Some(init) => info!(
                client = init.client_info.as_ref().map_or("unknown", |c| c.name.as_str()),
                client_protocol = %init.protocol_version,
                "Handling initialize request"
            ),
            None => debug!("Handling initialize request without client info"),
        }
        let result = serde_json::to_value(InitializeResponse::for_this_server())?;
        Ok(JsonRpcResponse::success(request.id.clone(), result))
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list request");
        JsonRpcResponse::success(
            request.id.clone(),
            json!({ "tools": self.registry.list_schemas() }),
        )
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let Some(params) = request.params.clone() else {
            error!("Missing request parameters in tools/call");
            return Ok(JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                "Invalid params: Missing request parameters",
            ));
        };

        let call = match serde_json::from_value::<ToolCall>(params) {
            Ok(call) => call,
            Err(e) => {
                error!("Failed to parse tool call parameters: {e}");
                return Ok(JsonRpcResponse::error(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tool call parameters: {e}"),
                ));
            }
        };

        let mut context = ToolExecutionContext::new(Arc::clone(&self.resources));
        if let Some(id) = &request.id {
            context = context.with_request_id(id.clone());
        }

        let start_time = Instant::now();
        let outcome = self
            .registry
            .execute(&call.name, call.arguments.unwrap_or(Value::Null), &context)
            .await;
        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match outcome {
            Ok(result) => Self::tool_response(result)?,
            Err(e) => {
                warn!(tool = %call.name, "Tool call failed: {e}");
                ToolResponse::text(e.to_string(), true)
            }
        };

        AppLogger::log_mcp_tool_call(
            &call.name,
            &context.request_id_for_logging(),
            !response.is_error,
            duration_ms,
        );

        Ok(JsonRpcResponse::success(
            request.id.clone(),
            serde_json::to_value(response)?,
        ))
    }

    /// Text content becomes one text block; structured content is also echoed as pretty JSON
    fn tool_response(result: ToolResult) -> AppResult<ToolResponse> {
        match result.content {
            Value::String(text) => Ok(ToolResponse::text(text, result.is_error)),
            structured => {
                let text = serde_json::to_string_pretty(&structured)?;
                let mut response = ToolResponse::text(text, result.is_error);
                if structured.is_object() {
                    response.structured_content = Some(structured);
                }
                Ok(response)
            }
        }
    }

    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!("Unknown MCP method: {}", request.method);
        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown method: {}", request.method),
        )
    }

    fn create_error_response(request: &JsonRpcRequest, e: &AppError) -> JsonRpcResponse {
        error!(
            "Failed to process MCP request: {} | method={}, id={:?}",
            e, request.method, request.id
        );
        JsonRpcResponse::error(
            request.id.clone(),
            e.to_jsonrpc_code(),
            format!("Internal server error: {e}"),
        )
    }

    fn log_request(request: &JsonRpcRequest) {
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            mcp_params_preview = ?request.params.as_ref().map(|p| {
                let s = p.to_string();
                if s.len() > 100 {
                    let cut = (0..=100).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0);
                    format!("{}...[truncated]", &s[..cut])
                } else {
                    s
                }
            }),
            "Received MCP request"
        );
    }

    fn log_completion(request_type: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP {} processing", request_type
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn processor() -> McpRequestProcessor {
        let config = Arc::new(ServerConfig::default());
        let resources = Arc::new(ServerResources::new(config).unwrap());
        McpRequestProcessor::new(resources, Arc::new(ToolRegistry::with_intervals_tools()))
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let request = JsonRpcRequest::notification("notifications/initialized", None);
        assert!(processor().handle_request(request).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let request = JsonRpcRequest::new("resources/list", None);
        let response = processor().handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_version_is_invalid_request() {
        let mut request = JsonRpcRequest::new("ping", None);
        request.jsonrpc = "1.0".to_owned();
        let response = processor().handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let request = JsonRpcRequest::new("tools/call", None);
        let response = processor().handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_structured_result_is_mirrored() {
        let response = McpRequestProcessor::tool_response(ToolResult::ok(json!({"id": 7}))).unwrap();
        assert!(!response.is_error);
        assert_eq!(response.structured_content, Some(json!({"id": 7})));
    }
}
