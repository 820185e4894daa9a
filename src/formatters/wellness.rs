// ABOUTME: Text rendering for daily Intervals.icu wellness records
// ABOUTME: Fitness/fatigue load, vitals, sleep and subjective scores grouped into sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

use super::{field, first_field, format_duration, number, Section};

/// One wellness day
///
/// Intervals.icu keys wellness records by date, so `id` holds the date.
#[must_use]
pub fn format_wellness_entry(entry: &Map<String, Value>) -> String {
    let mut out = format!(
        "Date: {}\n",
        first_field(entry, &["id", "date"])
            .as_deref()
            .unwrap_or("Unknown")
    );

    let mut load = Section::new("Training Load");
    load.push("Fitness (CTL)", rounded(entry, "ctl"))
        .push("Fatigue (ATL)", rounded(entry, "atl"))
        .push("Ramp Rate", rounded(entry, "rampRate"));

    let mut vitals = Section::new("Vitals");
    vitals
        .push("Weight", field(entry, "weight").map(|kg| format!("{kg} kg")))
        .push(
            "Resting HR",
            field(entry, "restingHR").map(|bpm| format!("{bpm} bpm")),
        )
        .push("HRV", field(entry, "hrv"))
        .push("HRV SDNN", field(entry, "hrvSDNN"))
        .push("SpO2", field(entry, "spO2").map(|pct| format!("{pct}%")))
        .push("Respiration", field(entry, "respiration"))
        .push("Steps", field(entry, "steps"));

    let mut sleep = Section::new("Sleep");
    sleep
        .push("Duration", number(entry, "sleepSecs").map(format_duration))
        .push("Score", field(entry, "sleepScore"))
        .push("Quality", field(entry, "sleepQuality"));

    let mut subjective = Section::new("Subjective");
    subjective
        .push("Readiness", field(entry, "readiness"))
        .push("Fatigue", field(entry, "fatigue"))
        .push("Soreness", field(entry, "soreness"))
        .push("Stress", field(entry, "stress"))
        .push("Mood", field(entry, "mood"))
        .push("Motivation", field(entry, "motivation"));

    for section in [&load, &vitals, &sleep, &subjective] {
        section.render_into(&mut out);
    }
    if let Some(comments) = field(entry, "comments") {
        out.push_str("\nComments: ");
        out.push_str(&comments);
        out.push('\n');
    }
    out
}

fn rounded(entry: &Map<String, Value>, key: &str) -> Option<String> {
    number(entry, key).map(|n| format!("{n:.1}"))
}
