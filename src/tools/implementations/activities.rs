// ABOUTME: Completed-activity tools backed by the Intervals.icu activities endpoints.
// ABOUTME: Implements get_activities, get_activity_details and get_activity_intervals.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Tools
//!
//! - `GetActivitiesTool` - list recent activities, hiding unnamed ones by default
//! - `GetActivityDetailsTool` - one activity with seconds-in-zone listings
//! - `GetActivityIntervalsTool` - interval breakdown of one activity
//!
//! When unnamed activities are filtered out, the list tool over-fetches and,
//! if still short, looks once more in the window just before `start_date`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::constants::{api, defaults, tools};
use crate::errors::AppResult;
use crate::formatters::{format_activity_summary, format_intervals, format_zone_times};
use crate::intervals::{paths, resolve_api_key, Credentials};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::{is_empty_payload, is_named_activity, normalize_activities, JsonObject};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};
use crate::types::json_schemas::{ActivityIdParams, GetActivitiesParams};

use super::{credential_properties, date_or_offset, date_query, format_date, parse_args};

// ============================================================================
// Helper functions
// ============================================================================

fn activity_query(oldest: &str, newest: &str, limit: u32) -> Vec<(&'static str, String)> {
    let mut query = date_query(oldest, newest);
    query.push(("limit", limit.to_string()));
    query
}

/// Named activities from the window immediately preceding `start_date`
///
/// Failures are logged and yield nothing.
async fn fetch_preceding_named(
    ctx: &ToolExecutionContext,
    creds: &Credentials,
    start_date: &str,
    limit: u32,
) -> Vec<JsonObject> {
    let Ok(start) = NaiveDate::parse_from_str(start_date, api::DATE_FORMAT) else {
        warn!(start_date, "Skipping supplementary activity fetch: invalid start date");
        return Vec::new();
    };

    let older_start = format_date(start - Duration::days(defaults::SUPPLEMENTARY_WINDOW_DAYS));
    let older_end = format_date(start - Duration::days(1));
    debug!(%older_start, %older_end, "Fetching older activities to fill the limit");

    match ctx
        .client()
        .fetch(
            &paths::athlete_activities(&creds.athlete_id),
            &creds.api_key,
            &activity_query(&older_start, &older_end, limit),
        )
        .await
    {
        Ok(payload) => normalize_activities(&payload)
            .into_iter()
            .filter(is_named_activity)
            .collect(),
        Err(e) => {
            warn!("Supplementary activity fetch failed: {}", e);
            Vec::new()
        }
    }
}

/// Payload as a single mapping: first element of a list, or the mapping itself
fn single_object(payload: &Value) -> Option<&JsonObject> {
    match payload {
        Value::Array(items) => items.first().and_then(Value::as_object),
        other => other.as_object(),
    }
}

fn activity_id_schema(description: &str) -> JsonSchema {
    let mut properties = HashMap::new();
    properties.insert(
        "activity_id".to_owned(),
        PropertySchema::new("string", description),
    );
    credential_properties(&mut properties, false);
    JsonSchema::object(properties, &["activity_id"])
}

// ============================================================================
// GetActivitiesTool
// ============================================================================

/// Lists an athlete's activities in a date window
pub struct GetActivitiesTool;

#[async_trait]
impl McpTool for GetActivitiesTool {
    fn name(&self) -> &'static str {
        tools::GET_ACTIVITIES
    }

    fn description(&self) -> &'static str {
        "Get a list of activities for an athlete from Intervals.icu"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        credential_properties(&mut properties, true);
        super::date_range_properties(&mut properties, "30 days ago", "today");
        properties.insert(
            "limit".to_owned(),
            PropertySchema::new("integer", "Maximum number of activities to return")
                .with_default(json!(defaults::ACTIVITY_LIMIT)),
        );
        properties.insert(
            "include_unnamed".to_owned(),
            PropertySchema::new("boolean", "Whether to include unnamed activities")
                .with_default(json!(false)),
        );
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: GetActivitiesParams = parse_args(self.name(), args)?;
        let creds = match Credentials::resolve(
            params.credentials.athlete_id.as_deref(),
            params.credentials.api_key.as_deref(),
            ctx.config(),
        ) {
            Ok(creds) => creds,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };
        let athlete_id = &creds.athlete_id;

        let today = ctx.today();
        let start_date = date_or_offset(params.range.start(), today, -defaults::LOOKBACK_DAYS);
        let end_date = date_or_offset(params.range.end(), today, 0);
        let limit = params.limit as usize;
        let api_limit = if params.include_unnamed {
            params.limit
        } else {
            params.limit.saturating_mul(defaults::UNNAMED_OVERFETCH_FACTOR)
        };

        let payload = match ctx
            .client()
            .fetch(
                &paths::athlete_activities(athlete_id),
                &creds.api_key,
                &activity_query(&start_date, &end_date, api_limit),
            )
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching activities: {}",
                    e.message
                )))
            }
        };

        if is_empty_payload(&payload) {
            return Ok(ToolResult::text(format!(
                "No activities found for athlete {athlete_id} in the specified date range."
            )));
        }

        let mut activities = normalize_activities(&payload);
        if activities.is_empty() {
            return Ok(ToolResult::text(format!(
                "No valid activities found for athlete {athlete_id} in the specified date range."
            )));
        }

        if !params.include_unnamed {
            activities.retain(is_named_activity);
            if activities.len() < limit {
                activities.extend(fetch_preceding_named(ctx, &creds, &start_date, api_limit).await);
            }
        }
        activities.truncate(limit);

        if activities.is_empty() {
            let message = if params.include_unnamed {
                format!(
                    "No valid activities found for athlete {athlete_id} in the specified date range."
                )
            } else {
                format!(
                    "No named activities found for athlete {athlete_id} in the specified date range. \
                     Try with include_unnamed=True to see all activities."
                )
            };
            return Ok(ToolResult::text(message));
        }

        let mut summary = String::from("Activities:\n\n");
        for activity in &activities {
            summary.push_str(&format_activity_summary(activity));
            summary.push('\n');
        }
        Ok(ToolResult::text(summary))
    }
}

// ============================================================================
// GetActivityDetailsTool
// ============================================================================

/// Shows one activity in detail
pub struct GetActivityDetailsTool;

#[async_trait]
impl McpTool for GetActivityDetailsTool {
    fn name(&self) -> &'static str {
        tools::GET_ACTIVITY_DETAILS
    }

    fn description(&self) -> &'static str {
        "Get detailed information for a specific activity from Intervals.icu"
    }

    fn input_schema(&self) -> JsonSchema {
        activity_id_schema("The Intervals.icu activity ID")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: ActivityIdParams = parse_args(self.name(), args)?;
        let activity_id = &params.activity_id;
        let api_key = match resolve_api_key(params.api_key.as_deref(), ctx.config()) {
            Ok(key) => key,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };

        let payload = match ctx
            .client()
            .fetch(&paths::activity(activity_id), &api_key, &[])
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching activity details: {}",
                    e.message
                )))
            }
        };

        if is_empty_payload(&payload) {
            return Ok(ToolResult::text(format!(
                "No details found for activity {activity_id}."
            )));
        }

        let Some(activity) = single_object(&payload) else {
            return Ok(ToolResult::error_text(format!(
                "Invalid activity format for activity {activity_id}."
            )));
        };

        let mut detailed = format_activity_summary(activity);
        detailed.push_str(&format_zone_times(activity));
        Ok(ToolResult::text(detailed))
    }
}

// ============================================================================
// GetActivityIntervalsTool
// ============================================================================

/// Shows the interval breakdown of one activity
pub struct GetActivityIntervalsTool;

#[async_trait]
impl McpTool for GetActivityIntervalsTool {
    fn name(&self) -> &'static str {
        tools::GET_ACTIVITY_INTERVALS
    }

    fn description(&self) -> &'static str {
        "Get interval data for a specific activity from Intervals.icu, including power, heart \
         rate, cadence and speed per interval plus grouped intervals"
    }

    fn input_schema(&self) -> JsonSchema {
        activity_id_schema("The Intervals.icu activity ID")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: ActivityIdParams = parse_args(self.name(), args)?;
        let activity_id = &params.activity_id;
        let api_key = match resolve_api_key(params.api_key.as_deref(), ctx.config()) {
            Ok(key) => key,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };

        let payload = match ctx
            .client()
            .fetch(&paths::activity_intervals(activity_id), &api_key, &[])
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching intervals: {}",
                    e.message
                )))
            }
        };

        if is_empty_payload(&payload) {
            return Ok(ToolResult::text(format!(
                "No interval data found for activity {activity_id}."
            )));
        }

        match single_object(&payload) {
            Some(intervals)
                if intervals.contains_key("icu_intervals") || intervals.contains_key("icu_groups") =>
            {
                Ok(ToolResult::text(format_intervals(intervals)))
            }
            _ => Ok(ToolResult::error_text(format!(
                "No interval data or unrecognized format for activity {activity_id}."
            ))),
        }
    }
}

/// Create all activity tools for registration
#[must_use]
pub fn create_activity_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GetActivitiesTool),
        Box::new(GetActivityDetailsTool),
        Box::new(GetActivityIntervalsTool),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_query_order() {
        let query = activity_query("2025-01-01", "2025-01-31", 30);
        assert_eq!(
            query,
            vec![
                ("oldest", "2025-01-01".to_owned()),
                ("newest", "2025-01-31".to_owned()),
                ("limit", "30".to_owned()),
            ]
        );
    }

    #[test]
    fn test_single_object_takes_first_list_element() {
        let payload = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(single_object(&payload).and_then(|o| o.get("id")), Some(&json!("a")));
        assert!(single_object(&json!(["text"])).is_none());
        assert!(single_object(&json!(7)).is_none());
    }

    #[test]
    fn test_schema_marks_activity_id_required() {
        let schema = GetActivityDetailsTool.input_schema();
        assert_eq!(schema.required, Some(vec!["activity_id".to_owned()]));
        let properties = schema.properties.unwrap();
        assert!(properties.contains_key("api_key"));
        assert!(!properties.contains_key("athlete_id"));
    }
}
