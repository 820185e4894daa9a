// ABOUTME: HTTP gateway to the Intervals.icu REST API with basic auth and uniform error values
// ABOUTME: Maps HTTP status, transport and decoding failures onto ApiError instead of faulting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intervals.icu HTTP Gateway
//!
//! Every call returns an [`ApiResult`]: either the decoded JSON body, or an
//! [`ApiError`] carrying the optional HTTP status and a caller-facing message.
//! No retries are attempted; each request carries its own timeout.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ServerConfig;
use crate::constants::api;
use crate::errors::{AppError, AppResult};

/// Outcome of a gateway call
pub type ApiResult = Result<Value, ApiError>;

/// Uniform failure value returned in place of a raised fault
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code when a response was received
    pub status_code: Option<u16>,
    /// Caller-facing description of the failure
    pub message: String,
}

impl ApiError {
    /// Error for a non-2xx response; known statuses get a fixed explanation
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = status_hint(status).map_or_else(
            || body.to_owned(),
            |hint| {
                format!(
                    "{} {}: {hint}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            },
        );

        Self {
            status_code: Some(status.as_u16()),
            message,
        }
    }

    /// Error for a request that never produced a response
    #[must_use]
    pub fn request(detail: impl std::fmt::Display) -> Self {
        Self {
            status_code: None,
            message: format!("Request error: {detail}"),
        }
    }

    /// Error for any other failure (body decoding, serialization)
    #[must_use]
    pub fn unexpected(detail: impl std::fmt::Display) -> Self {
        Self {
            status_code: None,
            message: format!("Unexpected error: {detail}"),
        }
    }

    /// The `{error: true, status_code?, message}` envelope shape
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        let mut envelope = json!({
            "error": true,
            "message": self.message,
        });
        if let Some(code) = self.status_code {
            envelope["status_code"] = json!(code);
        }
        envelope
    }
}

/// Fixed explanation for the statuses Intervals.icu commonly returns
#[must_use]
pub fn status_hint(status: StatusCode) -> Option<&'static str> {
    match status.as_u16() {
        401 => Some("Please check your API key."),
        403 => Some("You may not have permission to access this resource."),
        404 => Some("The requested endpoint or ID doesn't exist."),
        422 => Some(
            "The server couldn't process the request (invalid parameters or unsupported operation).",
        ),
        429 => Some("Too many requests in a short time period."),
        500 => Some("The Intervals.icu server encountered an internal error."),
        503 => Some("The Intervals.icu server might be down or undergoing maintenance."),
        _ => None,
    }
}

/// Authenticated client for the Intervals.icu API
#[derive(Debug, Clone)]
pub struct IntervalsClient {
    http: Client,
    base_url: String,
}

impl IntervalsClient {
    /// Build a client using the configured base URL and timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    pub fn new(config: &ServerConfig) -> AppResult<Self> {
        let http = ClientBuilder::new()
            .user_agent(api::USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Base URL every path is appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with optional query parameters
    pub async fn fetch(&self, path: &str, api_key: &str, query: &[(&str, String)]) -> ApiResult {
        let url = self.url(path);
        debug!(%url, "GET Intervals.icu");

        let mut request = Self::authorized(self.http.get(&url), api_key);
        if !query.is_empty() {
            request = request.query(query);
        }
        Self::execute(request, &url).await
    }

    /// POST a JSON `body` to `path`
    pub async fn send(&self, path: &str, api_key: &str, body: &Value) -> ApiResult {
        let url = self.url(path);
        debug!(%url, "POST Intervals.icu");

        let request = Self::authorized(self.http.post(&url), api_key).json(body);
        Self::execute(request, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(request: RequestBuilder, api_key: &str) -> RequestBuilder {
        request
            .basic_auth(api::BASIC_AUTH_USERNAME, Some(api_key))
            .header(ACCEPT, "application/json")
    }

    async fn execute(request: RequestBuilder, url: &str) -> ApiResult {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(%url, "Request error: {}", e);
                return Err(ApiError::request(e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                error!(%url, "Unexpected error reading body: {}", e);
                return Err(ApiError::unexpected(e));
            }
        };

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            error!(%url, status = status.as_u16(), "HTTP error: {} - {}", status.as_u16(), text);
            return Err(ApiError::from_status(status, &text));
        }

        if body.is_empty() {
            debug!(%url, status = status.as_u16(), "Empty response body");
            return Ok(Value::Object(Map::new()));
        }

        match serde_json::from_slice(&body) {
            Ok(value) => {
                debug!(%url, status = status.as_u16(), bytes = body.len(), "Response received");
                Ok(value)
            }
            Err(e) => {
                error!(%url, "Unexpected error decoding JSON: {}", e);
                Err(ApiError::unexpected(e))
            }
        }
    }
}
