// ABOUTME: Normalization of heterogeneous Intervals.icu activity payloads into a flat list
// ABOUTME: Also holds the named-activity filter and the payload emptiness check used by the tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

/// JSON object as returned by the remote API
pub type JsonObject = Map<String, Value>;

/// Name the remote service assigns to activities the athlete never titled
pub const UNNAMED_ACTIVITY: &str = "Unnamed";

/// Keys whose presence marks a bare mapping as a single activity
const ACTIVITY_MARKER_KEYS: [&str; 3] = ["name", "startTime", "distance"];

/// Flatten an activities payload into its activity mappings
///
/// Accepted shapes:
/// - a list: its mapping elements
/// - a mapping: the mapping elements of the first list-valued entry
/// - a mapping with no list entry that looks like an activity: itself
///
/// Anything else yields an empty list.
#[must_use]
pub fn normalize_activities(payload: &Value) -> Vec<JsonObject> {
    match payload {
        Value::Array(items) => objects_in(items),
        Value::Object(map) => {
            let nested = map
                .values()
                .find_map(Value::as_array)
                .map(|items| objects_in(items))
                .unwrap_or_default();

            if nested.is_empty() && ACTIVITY_MARKER_KEYS.iter().any(|k| map.contains_key(*k)) {
                vec![map.clone()]
            } else {
                nested
            }
        }
        _ => Vec::new(),
    }
}

fn objects_in(items: &[Value]) -> Vec<JsonObject> {
    items
        .iter()
        .filter_map(Value::as_object)
        .cloned()
        .collect()
}

/// True when the activity carries a real, athlete-given name
#[must_use]
pub fn is_named_activity(activity: &JsonObject) -> bool {
    match activity.get("name") {
        Some(Value::String(name)) => !name.is_empty() && name != UNNAMED_ACTIVITY,
        Some(other) => !is_empty_payload(other),
        None => false,
    }
}

/// True for `null`, `false`, zero, and empty strings, lists or mappings
#[must_use]
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
