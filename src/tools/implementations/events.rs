// ABOUTME: Calendar event tools backed by the Intervals.icu events endpoints.
// ABOUTME: Implements get_events, get_event_by_id and post_events for planned workouts.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Event Tools
//!
//! - `GetEventsTool` - upcoming calendar entries (today to 30 days ahead by default)
//! - `GetEventByIdTool` - one event with workout information and steps
//! - `PostEventsTool` - create a planned workout from a name and a list of steps

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::constants::{defaults, tools};
use crate::errors::AppResult;
use crate::formatters::{format_event_details, format_event_summary};
use crate::intervals::{paths, Credentials};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::{is_empty_payload, NewWorkoutEvent};
use crate::tools::context::ToolExecutionContext;
use crate::tools::errors::ToolError;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};
use crate::types::json_schemas::{GetEventByIdParams, GetEventsParams, PostEventsParams};

use super::{
    credential_properties, date_or_offset, date_query, date_range_properties, format_date,
    parse_args,
};

// ============================================================================
// GetEventsTool
// ============================================================================

/// Lists calendar events in a date window
pub struct GetEventsTool;

#[async_trait]
impl McpTool for GetEventsTool {
    fn name(&self) -> &'static str {
        tools::GET_EVENTS
    }

    fn description(&self) -> &'static str {
        "Get planned events (workouts, races, notes) for an athlete from Intervals.icu"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        credential_properties(&mut properties, true);
        date_range_properties(&mut properties, "today", "30 days from today");
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: GetEventsParams = parse_args(self.name(), args)?;
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
        let start_date = date_or_offset(params.range.start(), today, 0);
        let end_date = date_or_offset(params.range.end(), today, defaults::LOOKAHEAD_DAYS);

        let payload = match ctx
            .client()
            .fetch(
                &paths::athlete_events(athlete_id),
                &creds.api_key,
                &date_query(&start_date, &end_date),
            )
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching events: {}",
                    e.message
                )))
            }
        };

        let events = match payload {
            Value::Array(events) if !events.is_empty() => events,
            _ => {
                return Ok(ToolResult::text(format!(
                    "No events found for athlete {athlete_id} in the specified date range."
                )))
            }
        };

        let mut summary = String::from("Events:\n\n");
        for event in events.iter().filter_map(Value::as_object) {
            summary.push_str(&format_event_summary(event));
            summary.push_str("\n\n");
        }
        Ok(ToolResult::text(summary))
    }
}

// ============================================================================
// GetEventByIdTool
// ============================================================================

/// Shows one calendar event in detail
pub struct GetEventByIdTool;

#[async_trait]
impl McpTool for GetEventByIdTool {
    fn name(&self) -> &'static str {
        tools::GET_EVENT_BY_ID
    }

    fn description(&self) -> &'static str {
        "Get detailed information for a specific event from Intervals.icu"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "event_id".to_owned(),
            PropertySchema::new("string", "The Intervals.icu event ID"),
        );
        credential_properties(&mut properties, true);
        JsonSchema::object(properties, &["event_id"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: GetEventByIdParams = parse_args(self.name(), args)?;
        let event_id = &params.event_id;
        let creds = match Credentials::resolve(
            params.credentials.athlete_id.as_deref(),
            params.credentials.api_key.as_deref(),
            ctx.config(),
        ) {
            Ok(creds) => creds,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };

        let payload = match ctx
            .client()
            .fetch(
                &paths::athlete_event(&creds.athlete_id, event_id),
                &creds.api_key,
                &[],
            )
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching event details: {}",
                    e.message
                )))
            }
        };

        if is_empty_payload(&payload) {
            return Ok(ToolResult::text(format!(
                "No details found for event {event_id}."
            )));
        }

        match payload.as_object() {
            Some(event) => Ok(ToolResult::text(format_event_details(event))),
            None => Ok(ToolResult::error_text(format!(
                "Invalid event format for event {event_id}."
            ))),
        }
    }
}

// ============================================================================
// PostEventsTool
// ============================================================================

/// Creates a planned workout on the athlete's calendar
pub struct PostEventsTool;

impl PostEventsTool {
    fn step_items_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "duration": {
                    "type": "string",
                    "description": "Step length: '15m' minutes, '30s' seconds, '2km' distance, or bare seconds"
                },
                "power": {"type": "string", "description": "Target, e.g. '80%'"},
                "description": {"type": "string", "description": "Step label, e.g. 'Warm-up'"},
                "cadence": {"type": "string", "description": "Cadence hint, e.g. '90rpm'"}
            },
            "required": ["duration", "power"]
        })
    }
}

#[async_trait]
impl McpTool for PostEventsTool {
    fn name(&self) -> &'static str {
        tools::POST_EVENTS
    }

    fn description(&self) -> &'static str {
        "Post a planned workout to an athlete's Intervals.icu calendar. The sport is inferred \
         from the name ('Bike' for rides, 'Run' for runs, otherwise swim) and so is the target \
         ('Power', 'pace' or 'hr'). Example steps: [{\"duration\": \"15m\", \"power\": \"80%\", \
         \"description\": \"Warm-up\"}, {\"duration\": \"3m\", \"power\": \"110%\"}]"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        credential_properties(&mut properties, true);
        properties.insert(
            "start_date".to_owned(),
            PropertySchema::new(
                "string",
                "Event date in YYYY-MM-DD format (optional, defaults to today)",
            ),
        );
        properties.insert(
            "name".to_owned(),
            PropertySchema::new("string", "Workout name, e.g. 'Run - VO2 Max Intervals'"),
        );
        properties.insert(
            "steps".to_owned(),
            PropertySchema::new("array", "Workout steps in order")
                .with_items(Self::step_items_schema()),
        );
        properties.insert(
            "data".to_owned(),
            PropertySchema::new("object", "Alternative form: {\"steps\": [...]}"),
        );
        JsonSchema::object(properties, &["name"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: PostEventsParams = parse_args(self.name(), args)?;
        let creds = match Credentials::resolve(
            params.credentials.athlete_id.as_deref(),
            params.credentials.api_key.as_deref(),
            ctx.config(),
        ) {
            Ok(creds) => creds,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };
        let steps = params
            .workout_steps()
            .ok_or_else(|| ToolError::missing_parameter(self.name(), "steps"))?;

        let start_date = params
            .start()
            .map_or_else(|| format_date(ctx.today()), str::to_owned);

        let event = match NewWorkoutEvent::build(&params.name, &start_date, steps) {
            Ok(event) => event,
            Err(e) => return Ok(ToolResult::error_text(format!("Error posting event: {e}"))),
        };
        let body = event.to_payload();

        let payload = match ctx
            .client()
            .send(&paths::athlete_events(&creds.athlete_id), &creds.api_key, &body)
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error posting event: {} data used: {body}",
                    e.message
                )))
            }
        };

        if is_empty_payload(&payload) {
            return Ok(ToolResult::text(format!(
                "No events posted for athlete {}.",
                creds.athlete_id
            )));
        }

        if !payload.is_object() {
            return Ok(ToolResult::error_text(format!(
                "format error, verify intervals for correct event at {start_date}"
            )));
        }

        info!(
            athlete_id = %creds.athlete_id,
            event_id = %payload.get("id").cloned().unwrap_or_default(),
            "Posted workout event"
        );
        Ok(ToolResult::ok(payload))
    }
}

/// Create all event tools for registration
#[must_use]
pub fn create_event_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GetEventsTool),
        Box::new(GetEventByIdTool),
        Box::new(PostEventsTool),
    ]
}
