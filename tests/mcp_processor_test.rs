// ABOUTME: End-to-end tests for MCP request handling over the full tool registry
// ABOUTME: Covers initialize, tools/list, tools/call result shapes and JSON-RPC error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use intervals_mcp_server::constants::protocol;
use intervals_mcp_server::jsonrpc::{error_codes, JsonRpcRequest};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tools_call(name: &str, arguments: Value) -> JsonRpcRequest {
    JsonRpcRequest::with_id(
        "tools/call",
        Some(json!({"name": name, "arguments": arguments})),
        json!("call-1"),
    )
}

#[tokio::test]
async fn test_initialize_advertises_server() {
    let server = MockServer::start().await;
    let response = common::processor_for(&server)
        .handle_request(JsonRpcRequest::new("initialize", Some(json!({
            "protocolVersion": protocol::MCP_PROTOCOL_VERSION,
            "clientInfo": {"name": "test-client", "version": "1.0"},
            "capabilities": {}
        }))))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], protocol::MCP_PROTOCOL_VERSION);
    assert_eq!(result["serverInfo"]["name"], "intervals-icu");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list_is_sorted_with_schemas() {
    let server = MockServer::start().await;
    let response = common::processor_for(&server)
        .handle_request(JsonRpcRequest::new("tools/list", None))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "get_activities",
            "get_activity_details",
            "get_activity_intervals",
            "get_event_by_id",
            "get_events",
            "get_wellness_data",
            "post_events",
        ]
    );
    for tool in &tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    let response = common::processor_for(&server)
        .handle_request(JsonRpcRequest::new("ping", None))
        .await
        .unwrap();
    assert_eq!(response.result, Some(json!({})));
}

#[tokio::test]
async fn test_tools_call_text_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/athlete/i12345/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let response = common::processor_for(&server)
        .handle_request(tools_call("get_events", json!({})))
        .await
        .unwrap();

    assert_eq!(response.id, Some(json!("call-1")));
    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("No events found"));
    assert!(result.get("structuredContent").is_none());
}

#[tokio::test]
async fn test_tools_call_structured_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i12345/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 501, "category": "WORKOUT"})))
        .mount(&server)
        .await;

    let response = common::processor_for(&server)
        .handle_request(tools_call(
            "post_events",
            json!({"name": "Bike - sweet spot Power", "steps": [{"duration": "20m", "power": "90%"}]}),
        ))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"]["id"], 501);
    let text = result["content"][0]["text"].as_str().unwrap();
    let echoed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(echoed["id"], 501);
}

#[tokio::test]
async fn test_tools_call_failures_stay_inside_the_result() {
    let server = MockServer::start().await;
    let processor = common::processor_for(&server);

    let unknown = processor
        .handle_request(tools_call("get_weather", json!({})))
        .await
        .unwrap();
    let result = unknown.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("get_weather"));

    let missing = processor
        .handle_request(tools_call("get_activity_details", json!({})))
        .await
        .unwrap();
    let result = missing.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("activity_id"));
}

#[tokio::test]
async fn test_notifications_and_unknown_methods() {
    let server = MockServer::start().await;
    let processor = common::processor_for(&server);

    let initialized = JsonRpcRequest::notification("notifications/initialized", None);
    assert!(processor.handle_request(initialized).await.is_none());

    let response = processor
        .handle_request(JsonRpcRequest::new("prompts/list", None))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
}
