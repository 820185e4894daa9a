// ABOUTME: Integration tests for the Intervals.icu HTTP gateway
// ABOUTME: Covers basic auth, query parameters, empty bodies and status-code error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use intervals_mcp_server::intervals::{paths, IntervalsClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntervalsClient {
    IntervalsClient::new(&common::config_for(server)).unwrap()
}

#[tokio::test]
async fn test_get_sends_basic_auth_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/athlete/i12345/activities"))
        .and(header("authorization", common::BASIC_AUTH))
        .and(query_param("oldest", "2025-01-30"))
        .and(query_param("newest", "2025-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .fetch(
            &paths::athlete_activities(common::ATHLETE_ID),
            common::API_KEY,
            &[
                ("oldest", "2025-01-30".to_owned()),
                ("newest", "2025-03-01".to_owned()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(payload, json!([{"id": "a1"}]));
}

#[tokio::test]
async fn test_empty_body_is_empty_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activity/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .fetch(&paths::activity("42"), common::API_KEY, &[])
        .await
        .unwrap();

    assert_eq!(payload, json!({}));
}

#[tokio::test]
async fn test_unauthorized_maps_to_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&paths::activity("42"), "wrong", &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code, Some(401));
    assert_eq!(err.message, "401 Unauthorized: Please check your API key.");
}

#[tokio::test]
async fn test_unlisted_status_keeps_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&paths::activity("42"), common::API_KEY, &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code, Some(409));
    assert_eq!(err.message, "already exists");
}

#[tokio::test]
async fn test_invalid_json_is_unexpected_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&paths::activity("42"), common::API_KEY, &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code, None);
    assert!(err.message.starts_with("Unexpected error:"));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Non-pooled server so dropping it actually closes the listener.
    let server = MockServer::builder().start().await;
    let client = client_for(&server);
    drop(server);

    let err = client
        .fetch(&paths::activity("42"), common::API_KEY, &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code, None);
    assert!(err.message.starts_with("Request error:"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let body = json!({"name": "Run - easy", "category": "WORKOUT"});
    Mock::given(method("POST"))
        .and(path("/athlete/i12345/events"))
        .and(header("authorization", common::BASIC_AUTH))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .send(
            &paths::athlete_events(common::ATHLETE_ID),
            common::API_KEY,
            &body,
        )
        .await
        .unwrap();

    assert_eq!(payload["id"], 99);
}
