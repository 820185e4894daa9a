// ABOUTME: Intervals.icu tool implementations grouped by resource, plus shared argument helpers.
// ABOUTME: Activities, calendar events and wellness each expose a create_*_tools constructor.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - [`activities`]: `get_activities`, `get_activity_details`, `get_activity_intervals`
//! - [`events`]: `get_events`, `get_event_by_id`, `post_events`
//! - [`wellness`]: `get_wellness_data`

/// Completed activity tools
pub mod activities;
/// Calendar event tools
pub mod events;
/// Daily wellness tools
pub mod wellness;

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::api;
use crate::errors::AppResult;
use crate::mcp::schema::PropertySchema;
use crate::tools::errors::ToolError;

/// Deserialize tool arguments; absent arguments count as an empty object
pub(crate) fn parse_args<T: DeserializeOwned>(tool_name: &str, args: Value) -> AppResult<T> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::from_arguments(tool_name, &e).into())
}

/// `athlete_id` and `api_key` schema properties
pub(crate) fn credential_properties(
    properties: &mut HashMap<String, PropertySchema>,
    include_athlete: bool,
) {
    if include_athlete {
        properties.insert(
            "athlete_id".to_owned(),
            PropertySchema::new(
                "string",
                "The Intervals.icu athlete ID (optional, defaults to ATHLETE_ID)",
            ),
        );
    }
    properties.insert(
        "api_key".to_owned(),
        PropertySchema::new(
            "string",
            "The Intervals.icu API key (optional, defaults to API_KEY)",
        ),
    );
}

/// `start_date` / `end_date` schema properties
pub(crate) fn date_range_properties(
    properties: &mut HashMap<String, PropertySchema>,
    start_default: &str,
    end_default: &str,
) {
    properties.insert(
        "start_date".to_owned(),
        PropertySchema::new(
            "string",
            &format!("Start date in YYYY-MM-DD format (optional, defaults to {start_default})"),
        ),
    );
    properties.insert(
        "end_date".to_owned(),
        PropertySchema::new(
            "string",
            &format!("End date in YYYY-MM-DD format (optional, defaults to {end_default})"),
        ),
    );
}

/// Date as `YYYY-MM-DD`
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(api::DATE_FORMAT).to_string()
}

/// Given date, or `today + offset_days` when absent
pub(crate) fn date_or_offset(given: Option<&str>, today: NaiveDate, offset_days: i64) -> String {
    given.map_or_else(
        || format_date(today + Duration::days(offset_days)),
        str::to_owned,
    )
}

/// `oldest` / `newest` query parameters
pub(crate) fn date_query(oldest: &str, newest: &str) -> Vec<(&'static str, String)> {
    vec![("oldest", oldest.to_owned()), ("newest", newest.to_owned())]
}
