// ABOUTME: Type-safe parameter definitions for every Intervals.icu tool
// ABOUTME: Replaces dynamic serde_json::Value lookups with serde-validated structs and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # JSON Schema Types
//!
//! Tool arguments arrive as free-form JSON. Each tool deserializes them into
//! one of these structs, so a wrong type or a missing required field fails
//! fast with a serde error instead of a chain of `.as_*()` checks.
//!
//! Identifiers are accepted as JSON strings or numbers: Intervals.icu event
//! ids are numeric while activity ids look like `i12345`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::defaults;
use crate::models::WorkoutStep;

// ============================================================================
// Shared
// ============================================================================

/// Per-call credential overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialParams {
    /// Athlete id; falls back to `ATHLETE_ID`
    #[serde(default)]
    pub athlete_id: Option<String>,
    /// API key; falls back to `API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Optional `YYYY-MM-DD` date window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeParams {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateRangeParams {
    /// Start date, treating an empty string as absent
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        non_empty(self.start_date.as_deref())
    }

    /// End date, treating an empty string as absent
    #[must_use]
    pub fn end(&self) -> Option<&str> {
        non_empty(self.end_date.as_deref())
    }
}

// ============================================================================
// Activities
// ============================================================================

/// Parameters for `get_activities`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetActivitiesParams {
    #[serde(flatten)]
    pub credentials: CredentialParams,
    #[serde(flatten)]
    pub range: DateRangeParams,
    /// Maximum number of activities to return
    #[serde(default = "default_activity_limit")]
    pub limit: u32,
    /// Keep activities without a real name
    #[serde(default)]
    pub include_unnamed: bool,
}

/// Parameters for `get_activity_details` and `get_activity_intervals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityIdParams {
    #[serde(deserialize_with = "id_string")]
    pub activity_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

// ============================================================================
// Events
// ============================================================================

/// Parameters for `get_events`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventsParams {
    #[serde(flatten)]
    pub credentials: CredentialParams,
    #[serde(flatten)]
    pub range: DateRangeParams,
}

/// Parameters for `get_event_by_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventByIdParams {
    #[serde(deserialize_with = "id_string")]
    pub event_id: String,
    #[serde(flatten)]
    pub credentials: CredentialParams,
}

/// Legacy `data` wrapper around workout steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutData {
    pub steps: Vec<WorkoutStep>,
}

/// Parameters for `post_events`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEventsParams {
    #[serde(flatten)]
    pub credentials: CredentialParams,
    /// Event date; defaults to today
    #[serde(default)]
    pub start_date: Option<String>,
    /// Workout name; drives sport and target inference
    pub name: String,
    /// Workout steps
    #[serde(default)]
    pub steps: Option<Vec<WorkoutStep>>,
    /// Alternative shape: `{"steps": [...]}`
    #[serde(default)]
    pub data: Option<WorkoutData>,
}

impl PostEventsParams {
    /// Steps from the top level, or from `data.steps`
    #[must_use]
    pub fn workout_steps(&self) -> Option<&[WorkoutStep]> {
        self.steps
            .as_deref()
            .or_else(|| self.data.as_ref().map(|data| data.steps.as_slice()))
    }

    /// Start date, treating an empty string as absent
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        non_empty(self.start_date.as_deref())
    }
}

// ============================================================================
// Wellness
// ============================================================================

/// Parameters for `get_wellness_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetWellnessParams {
    #[serde(flatten)]
    pub credentials: CredentialParams,
    #[serde(flatten)]
    pub range: DateRangeParams,
}

// ============================================================================
// Helpers
// ============================================================================

const fn default_activity_limit() -> u32 {
    defaults::ACTIVITY_LIMIT
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_activities_defaults() {
        let params: GetActivitiesParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.limit, 10);
        assert!(!params.include_unnamed);
        assert_eq!(params.credentials, CredentialParams::default());
        assert_eq!(params.range.start(), None);
    }

    #[test]
    fn test_flattened_credentials_and_dates() {
        let params: GetActivitiesParams = serde_json::from_value(json!({
            "athlete_id": "i9",
            "api_key": "k",
            "start_date": "",
            "end_date": "2025-01-31",
            "limit": 3,
            "include_unnamed": true
        }))
        .unwrap();
        assert_eq!(params.credentials.athlete_id.as_deref(), Some("i9"));
        assert_eq!(params.range.start(), None);
        assert_eq!(params.range.end(), Some("2025-01-31"));
        assert_eq!(params.limit, 3);
    }

    #[test]
    fn test_numeric_ids_are_accepted() {
        let params: GetEventByIdParams =
            serde_json::from_value(json!({"event_id": 12345})).unwrap();
        assert_eq!(params.event_id, "12345");

        assert!(serde_json::from_value::<ActivityIdParams>(json!({"activity_id": [1]})).is_err());
    }

    #[test]
    fn test_post_events_step_shapes() {
        let top: PostEventsParams = serde_json::from_value(json!({
            "name": "Bike - VO2 Max",
            "steps": [{"duration": "15m", "power": "80%"}]
        }))
        .unwrap();
        assert_eq!(top.workout_steps().map(<[WorkoutStep]>::len), Some(1));

        let wrapped: PostEventsParams = serde_json::from_value(json!({
            "name": "Run - pace work",
            "data": {"steps": [{"duration": "3m", "power": "110%"}, {"duration": "30s", "power": "50%"}]}
        }))
        .unwrap();
        assert_eq!(wrapped.workout_steps().map(<[WorkoutStep]>::len), Some(2));

        let missing: PostEventsParams =
            serde_json::from_value(json!({"name": "Swim"})).unwrap();
        assert!(missing.workout_steps().is_none());
    }
}
