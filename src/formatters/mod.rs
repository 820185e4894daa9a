// ABOUTME: Human-readable text rendering of Intervals.icu activities, events and wellness entries
// ABOUTME: Shared field extraction helpers that tolerate missing or wrong-typed keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Text Formatters
//!
//! Tools answer with plain text aimed at an LLM reader. Every formatter takes
//! a JSON mapping straight from the remote API and never fails: a field that is
//! absent, `null` or of an unexpected type is simply left out, and a section
//! whose fields are all missing is not printed at all.

/// Activity summaries, zone listings and interval analysis
pub mod activity;
/// Calendar event summaries and details
pub mod event;
/// Daily wellness entries
pub mod wellness;

pub use activity::{format_activity_summary, format_intervals, format_zone_times};
pub use event::{format_event_details, format_event_summary};
pub use wellness::format_wellness_entry;

use serde_json::{Map, Value};

/// Scalar value rendered as text; `None` for null, empty strings and containers
pub(crate) fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Displayable text of `key`
pub(crate) fn field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(display_value)
}

/// First displayable text among `keys`
pub(crate) fn first_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field(map, key))
}

/// Numeric value of `key`
pub(crate) fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

/// Seconds as `H:MM:SS`
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Titled block of `- Label: value` lines, rendered only when non-empty
#[derive(Debug)]
pub(crate) struct Section {
    title: &'static str,
    lines: Vec<String>,
}

impl Section {
    pub(crate) const fn new(title: &'static str) -> Self {
        Self {
            title,
            lines: Vec::new(),
        }
    }

    /// Add a line when `value` is present
    pub(crate) fn push(&mut self, label: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.lines.push(format!("- {label}: {value}"));
        }
        self
    }

    pub(crate) fn render_into(&self, out: &mut String) {
        if self.lines.is_empty() {
            return;
        }
        out.push('\n');
        out.push_str(self.title);
        out.push_str(":\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_value_skips_non_scalars() {
        assert_eq!(display_value(&json!("x")), Some("x".to_owned()));
        assert_eq!(display_value(&json!(12.5)), Some("12.5".to_owned()));
        assert_eq!(display_value(&json!("")), None);
        assert_eq!(display_value(&json!(null)), None);
        assert_eq!(display_value(&json!([1])), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00:00");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(-5.0), "0:00:00");
    }

    #[test]
    fn test_empty_section_renders_nothing() {
        let mut out = String::new();
        let mut section = Section::new("Power");
        section.push("Average", None);
        section.render_into(&mut out);
        assert!(out.is_empty());

        section.push("Max", Some("400 W".to_owned()));
        section.render_into(&mut out);
        assert_eq!(out, "\nPower:\n- Max: 400 W\n");
    }
}
