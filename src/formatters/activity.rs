// ABOUTME: Text rendering for activities, seconds-in-zone listings and interval analysis
// ABOUTME: Optional sections are printed only when at least one of their fields is present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::{field, first_field, format_duration, number, Section};

const MISSING: &str = "N/A";

/// Readable summary of one activity
#[must_use]
pub fn format_activity_summary(activity: &Map<String, Value>) -> String {
    let mut out = format!(
        "Activity: {}\n",
        field(activity, "name").unwrap_or_else(|| "Unnamed".to_owned())
    );
    let _ = writeln!(out, "ID: {}", field(activity, "id").as_deref().unwrap_or(MISSING));
    let _ = writeln!(
        out,
        "Type: {}",
        field(activity, "type").as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        out,
        "Date: {}",
        first_field(activity, &["start_date_local", "startTime", "start_date"])
            .as_deref()
            .unwrap_or("Unknown")
    );
    if let Some(description) = field(activity, "description") {
        let _ = writeln!(out, "Description: {description}");
    }

    let mut summary = Section::new("Summary");
    summary
        .push(
            "Distance",
            number(activity, "distance").map(|m| format!("{:.2} km", m / 1000.0)),
        )
        .push("Moving Time", number(activity, "moving_time").map(format_duration))
        .push("Elapsed Time", number(activity, "elapsed_time").map(format_duration))
        .push(
            "Elevation Gain",
            field(activity, "total_elevation_gain").map(|m| format!("{m} m")),
        );

    let mut power = Section::new("Power");
    power
        .push(
            "Average Power",
            first_field(activity, &["icu_average_watts", "average_watts"]).map(|w| format!("{w} W")),
        )
        .push(
            "Normalized Power",
            field(activity, "icu_weighted_avg_watts").map(|w| format!("{w} W")),
        )
        .push("Max Power", field(activity, "max_watts").map(|w| format!("{w} W")))
        .push("FTP", field(activity, "icu_ftp").map(|w| format!("{w} W")))
        .push("Intensity", field(activity, "icu_intensity"));

    let mut heart_rate = Section::new("Heart Rate");
    heart_rate
        .push(
            "Average HR",
            field(activity, "average_heartrate").map(|bpm| format!("{bpm} bpm")),
        )
        .push(
            "Max HR",
            field(activity, "max_heartrate").map(|bpm| format!("{bpm} bpm")),
        );

    let mut other = Section::new("Other");
    other
        .push(
            "Average Cadence",
            field(activity, "average_cadence").map(|c| format!("{c} rpm")),
        )
        .push("Calories", field(activity, "calories"))
        .push(
            "Average Speed",
            number(activity, "average_speed").map(|s| format!("{:.2} km/h", s * 3.6)),
        )
        .push("Training Load", field(activity, "icu_training_load"));

    for section in [&summary, &power, &heart_rate, &other] {
        section.render_into(&mut out);
    }
    out
}

/// Power and heart-rate seconds-in-zone listing, in source order
///
/// Returns an empty string when the activity has no `zones` mapping.
#[must_use]
pub fn format_zone_times(activity: &Map<String, Value>) -> String {
    let Some(zones) = activity.get("zones").and_then(Value::as_object) else {
        return String::new();
    };

    let mut out = String::new();
    for (title, key) in [("Power Zones", "power"), ("Heart Rate Zones", "hr")] {
        let _ = write!(out, "\n{title}:\n");
        for zone in zone_entries(zones, key) {
            let _ = writeln!(
                out,
                "Zone {}: {} seconds",
                field(zone, "number").as_deref().unwrap_or(MISSING),
                field(zone, "secondsInZone").as_deref().unwrap_or(MISSING),
            );
        }
    }
    out
}

fn zone_entries<'a>(
    zones: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    zones
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Interval-by-interval breakdown plus interval groups
#[must_use]
pub fn format_intervals(payload: &Map<String, Value>) -> String {
    let mut out = String::from("Intervals Analysis:\n");
    if let Some(id) = field(payload, "id") {
        let _ = writeln!(out, "Activity ID: {id}");
    }

    let intervals = objects(payload, "icu_intervals");
    if !intervals.is_empty() {
        out.push('\n');
    }
    for (index, interval) in intervals.iter().enumerate() {
        let label = first_field(interval, &["label", "type"]).unwrap_or_else(|| "Interval".to_owned());
        let _ = writeln!(out, "[{}] {label}", index + 1);
        let mut details = Section::new("Metrics");
        details
            .push("Duration", number(interval, "elapsed_time").map(format_duration))
            .push("Moving Time", number(interval, "moving_time").map(format_duration))
            .push(
                "Distance",
                number(interval, "distance").map(|m| format!("{:.2} km", m / 1000.0)),
            )
            .push(
                "Average Power",
                field(interval, "average_watts").map(|w| format!("{w} W")),
            )
            .push(
                "Normalized Power",
                field(interval, "weighted_average_watts").map(|w| format!("{w} W")),
            )
            .push("Max Power", field(interval, "max_watts").map(|w| format!("{w} W")))
            .push(
                "Average HR",
                field(interval, "average_heartrate").map(|bpm| format!("{bpm} bpm")),
            )
            .push(
                "Max HR",
                field(interval, "max_heartrate").map(|bpm| format!("{bpm} bpm")),
            )
            .push(
                "Average Cadence",
                field(interval, "average_cadence").map(|c| format!("{c} rpm")),
            )
            .push("Intensity", field(interval, "intensity"))
            .push("Zone", field(interval, "zone"));
        details.render_into(&mut out);
        out.push('\n');
    }

    let groups = objects(payload, "icu_groups");
    if !groups.is_empty() {
        out.push_str("\nInterval Groups:\n\n");
    }
    for group in groups {
        let _ = writeln!(
            out,
            "Group: {}",
            field(group, "id").as_deref().unwrap_or(MISSING)
        );
        if let Some(count) = field(group, "count") {
            let _ = writeln!(out, "Count: {count}");
        }
        if let Some(secs) = number(group, "elapsed_time") {
            let _ = writeln!(out, "Duration: {}", format_duration(secs));
        }
        if let Some(watts) = field(group, "average_watts") {
            let _ = writeln!(out, "Average Power: {watts} W");
        }
        if let Some(bpm) = field(group, "average_heartrate") {
            let _ = writeln!(out, "Average HR: {bpm} bpm");
        }
        out.push('\n');
    }

    out
}

fn objects<'a>(payload: &'a Map<String, Value>, key: &str) -> Vec<&'a Map<String, Value>> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}
