// ABOUTME: Text rendering for Intervals.icu calendar events (planned workouts, races, notes)
// ABOUTME: Summary view for listings and a detail view with workout information and steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::{display_value, field, first_field, format_duration, number, Section};

/// Workout / Race / Other, from the event's own markers
fn event_kind(event: &Map<String, Value>) -> &'static str {
    let truthy = |key: &str| {
        event
            .get(key)
            .is_some_and(|v| !crate::models::is_empty_payload(v))
    };
    let category = event.get("category").and_then(Value::as_str).unwrap_or("");

    if truthy("workout") || category == "WORKOUT" {
        "Workout"
    } else if truthy("race") || category.starts_with("RACE") {
        "Race"
    } else {
        "Other"
    }
}

/// One-block summary used in event listings
#[must_use]
pub fn format_event_summary(event: &Map<String, Value>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Date: {}",
        first_field(event, &["start_date_local", "date"])
            .as_deref()
            .unwrap_or("Unknown")
    );
    let _ = writeln!(out, "ID: {}", field(event, "id").as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "Type: {}", event_kind(event));
    let _ = writeln!(
        out,
        "Name: {}",
        field(event, "name").as_deref().unwrap_or("Unnamed")
    );
    let _ = write!(
        out,
        "Description: {}",
        field(event, "description")
            .as_deref()
            .unwrap_or("No description")
    );
    out
}

/// Full event view
#[must_use]
pub fn format_event_details(event: &Map<String, Value>) -> String {
    let mut out = String::from("Event Details:\n\n");
    let _ = writeln!(out, "ID: {}", field(event, "id").as_deref().unwrap_or("N/A"));
    let _ = writeln!(
        out,
        "Date: {}",
        first_field(event, &["start_date_local", "date"])
            .as_deref()
            .unwrap_or("Unknown")
    );
    let _ = writeln!(
        out,
        "Name: {}",
        field(event, "name").as_deref().unwrap_or("Unnamed")
    );
    let _ = writeln!(out, "Type: {}", event_kind(event));
    if let Some(category) = field(event, "category") {
        let _ = writeln!(out, "Category: {category}");
    }
    if let Some(sport) = field(event, "type") {
        let _ = writeln!(out, "Sport: {sport}");
    }
    let _ = writeln!(
        out,
        "Description: {}",
        field(event, "description")
            .as_deref()
            .unwrap_or("No description")
    );

    if let Some(workout) = event.get("workout").and_then(Value::as_object) {
        let mut info = Section::new("Workout Information");
        info.push("Workout ID", field(workout, "id"))
            .push("Sport", field(workout, "sport").or_else(|| field(workout, "type")))
            .push(
                "Duration",
                number(workout, "moving_time").map(format_duration),
            )
            .push("Training Load", field(workout, "icu_training_load"))
            .push(
                "Intervals",
                workout
                    .get("intervals")
                    .and_then(Value::as_array)
                    .map(|intervals| intervals.len().to_string()),
            );
        info.render_into(&mut out);
    } else {
        let mut planned = Section::new("Planned");
        planned
            .push("Target", field(event, "target"))
            .push("Moving Time", number(event, "moving_time").map(format_duration))
            .push("Training Load", field(event, "icu_training_load"));
        planned.render_into(&mut out);
    }

    let steps = event
        .get("workout_doc")
        .and_then(|doc| doc.get("steps"))
        .and_then(Value::as_array);
    if let Some(steps) = steps {
        out.push_str("\nSteps:\n");
        for (index, step) in steps.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, describe_step(step));
        }
    }

    out
}

fn describe_step(step: &Value) -> String {
    let Some(step) = step.as_object() else {
        return display_value(step).unwrap_or_else(|| "Unknown step".to_owned());
    };

    let mut parts = Vec::new();
    if let Some(reps) = field(step, "reps") {
        parts.push(format!("{reps}x"));
    }
    if let Some(secs) = number(step, "duration") {
        parts.push(format_duration(secs));
    } else if let Some(meters) = number(step, "distance") {
        parts.push(format!("{meters} m"));
    }
    if let Some(power) = step.get("power").and_then(Value::as_object) {
        let value = field(power, "value")
            .or_else(|| {
                let start = field(power, "start")?;
                let end = field(power, "end")?;
                Some(format!("{start}-{end}"))
            })
            .unwrap_or_default();
        let units = field(power, "units").unwrap_or_default();
        let target = format!("{value}{units}");
        if !target.is_empty() {
            parts.push(target);
        }
    }
    if let Some(text) = field(step, "text") {
        parts.push(text);
    }

    if parts.is_empty() {
        "Step".to_owned()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_summary_defaults() {
        let text = format_event_summary(&obj(json!({})));
        assert_eq!(
            text,
            "Date: Unknown\nID: N/A\nType: Other\nName: Unnamed\nDescription: No description"
        );
    }

    #[test]
    fn test_summary_of_planned_workout() {
        let text = format_event_summary(&obj(json!({
            "id": 99,
            "start_date_local": "2025-01-14T00:00:00",
            "category": "WORKOUT",
            "name": "Bike - VO2 Max",
            "description": "- 15m 80%"
        })));
        assert!(text.contains("ID: 99\nType: Workout\nName: Bike - VO2 Max\n"));
        assert!(text.ends_with("Description: - 15m 80%"));
    }

    #[test]
    fn test_details_with_workout_and_steps() {
        let text = format_event_details(&obj(json!({
            "id": 5,
            "name": "Run - pace work",
            "category": "WORKOUT",
            "type": "Run",
            "workout": {"id": "w1", "moving_time": 1800, "intervals": [{}, {}]},
            "workout_doc": {"steps": [
                {"duration": 600, "power": {"value": 80, "units": "%ftp"}, "text": "Warm-up"},
                {"reps": 3, "distance": 400},
                "odd"
            ]}
        })));

        assert!(text.starts_with("Event Details:\n\nID: 5\n"));
        assert!(text.contains("Sport: Run"));
        assert!(text.contains(
            "\nWorkout Information:\n- Workout ID: w1\n- Duration: 0:30:00\n- Intervals: 2\n"
        ));
        assert!(text.contains("\nSteps:\n1. 0:10:00 80%ftp Warm-up\n2. 3x 400 m\n3. odd\n"));
    }

    #[test]
    fn test_details_tolerate_wrong_types() {
        let text = format_event_details(&obj(json!({
            "workout": "not-a-map",
            "workout_doc": {"steps": "nope"},
            "moving_time": 3600
        })));
        assert!(text.contains("Planned:\n- Moving Time: 1:00:00"));
        assert!(!text.contains("Steps:"));
    }
}
