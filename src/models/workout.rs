// ABOUTME: Planned workout model used to build Intervals.icu event creation payloads
// ABOUTME: Parses step durations and infers sport type and training target from the workout name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Payloads
//!
//! A planned workout arrives as a free-form name plus a list of steps such as
//! `{"duration": "15m", "power": "80%"}`. [`NewWorkoutEvent::build`] turns it
//! into the JSON body accepted by `POST /athlete/{id}/events`.
//!
//! Durations carry a unit suffix: `km` is a distance (meters), `m` is minutes,
//! `s` is seconds and a bare number is seconds. Distances and times are summed
//! into the same `moving_time` field, so a workout mixing `km` steps with timed
//! steps produces a value that is neither pure seconds nor pure meters.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::constants::api;

/// Failures while building a workout payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkoutError {
    /// A step duration string that matches none of the supported forms
    #[error("Invalid step duration '{0}': expected a number with optional km, m or s suffix")]
    InvalidDuration(String),
    /// Step durations whose total does not fit in `moving_time`
    #[error("Total step duration is too large")]
    MovingTimeOverflow,
}

/// One step of a planned workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutStep {
    /// Duration with unit suffix (`15m`, `30s`, `2km`, `45`)
    #[serde(deserialize_with = "text_or_number")]
    pub duration: String,
    /// Target power, e.g. `80%` or `250w`
    #[serde(deserialize_with = "text_or_number")]
    pub power: String,
    /// Free-text label for the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cadence hint appended in parentheses to the description line
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cadence: Option<String>,
}

impl WorkoutStep {
    /// Step with duration and power only
    #[must_use]
    pub fn new(duration: impl Into<String>, power: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            power: power.into(),
            description: None,
            cadence: None,
        }
    }

    /// Attach a cadence hint
    #[must_use]
    pub fn with_cadence(mut self, cadence: impl Into<String>) -> Self {
        self.cadence = Some(cadence.into());
        self
    }

    /// Description line: `- {duration} {power}` plus ` ({cadence})` when present
    #[must_use]
    pub fn description_line(&self) -> String {
        let mut line = format!("- {} {}", self.duration, self.power);
        if let Some(cadence) = &self.cadence {
            line.push_str(&format!(" ({cadence})"));
        }
        line
    }
}

/// A parsed step duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepDuration {
    /// Time in seconds
    Seconds(i64),
    /// Distance in meters (from a `km` suffix)
    Meters(f64),
}

impl StepDuration {
    /// Parse a duration string
    ///
    /// `km` is checked before `m` so `1km` is a distance, not minutes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::InvalidDuration`] when the numeric part does not parse
    /// or the minutes do not fit in whole seconds
    pub fn parse(raw: &str) -> Result<Self, WorkoutError> {
        let value = raw.trim();
        let invalid = || WorkoutError::InvalidDuration(raw.to_owned());

        if let Some(km) = value.strip_suffix("km") {
            let km: f64 = km.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::Meters(km * 1000.0));
        }
        if let Some(minutes) = value.strip_suffix('m') {
            let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;
            return minutes
                .checked_mul(60)
                .map(Self::Seconds)
                .ok_or_else(invalid);
        }
        if let Some(seconds) = value.strip_suffix('s') {
            let seconds: i64 = seconds.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::Seconds(seconds));
        }
        value.parse().map(Self::Seconds).map_err(|_| invalid())
    }
}

/// Sum of step durations sent as `moving_time`
///
/// Stays an integer while every step is timed and widens to a float once a
/// distance step is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovingTime {
    Whole(i64),
    Mixed(f64),
}

impl Default for MovingTime {
    fn default() -> Self {
        Self::Whole(0)
    }
}

impl MovingTime {
    /// JSON number for the payload
    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Self::Whole(n) => json!(n),
            Self::Mixed(n) => json!(n),
        }
    }
}

impl MovingTime {
    /// Add one step, `None` when the whole-second total overflows
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn checked_add(self, step: StepDuration) -> Option<Self> {
        match (self, step) {
            (Self::Whole(total), StepDuration::Seconds(s)) => total.checked_add(s).map(Self::Whole),
            (Self::Whole(total), StepDuration::Meters(m)) => Some(Self::Mixed(total as f64 + m)),
            (Self::Mixed(total), StepDuration::Seconds(s)) => Some(Self::Mixed(total + s as f64)),
            (Self::Mixed(total), StepDuration::Meters(m)) => Some(Self::Mixed(total + m)),
        }
    }

    /// Sum step durations
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::MovingTimeOverflow`] when the total overflows
    pub fn total<I>(steps: I) -> Result<Self, WorkoutError>
    where
        I: IntoIterator<Item = StepDuration>,
    {
        steps.into_iter().try_fold(Self::default(), |total, step| {
            total
                .checked_add(step)
                .ok_or(WorkoutError::MovingTimeOverflow)
        })
    }
}

/// Sport type inferred from the workout name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSport {
    Ride,
    Run,
    Swim,
}

impl EventSport {
    /// `Bike` → Ride, else `Run` → Run, else Swim (case-sensitive)
    #[must_use]
    pub fn infer(name: &str) -> Self {
        if name.contains("Bike") {
            Self::Ride
        } else if name.contains("Run") {
            Self::Run
        } else {
            Self::Swim
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ride => "Ride",
            Self::Run => "Run",
            Self::Swim => "Swim",
        }
    }
}

/// Training target inferred from the workout name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutTarget {
    Power,
    Pace,
    HeartRate,
    Auto,
}

impl WorkoutTarget {
    /// `Power` → POWER, else `pace` → PACE, else `hr` → HR, else AUTO (case-sensitive)
    #[must_use]
    pub fn infer(name: &str) -> Self {
        if name.contains("Power") {
            Self::Power
        } else if name.contains("pace") {
            Self::Pace
        } else if name.contains("hr") {
            Self::HeartRate
        } else {
            Self::Auto
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Power => "POWER",
            Self::Pace => "PACE",
            Self::HeartRate => "HR",
            Self::Auto => "AUTO",
        }
    }
}

/// Event creation payload for a planned workout
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutEvent {
    pub start_date_local: String,
    pub name: String,
    pub description: String,
    pub sport: EventSport,
    pub target: WorkoutTarget,
    pub moving_time: MovingTime,
}

impl NewWorkoutEvent {
    /// Category marker for planned workouts
    pub const CATEGORY: &'static str = "WORKOUT";

    /// Build the payload for `start_date` (`YYYY-MM-DD`)
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::InvalidDuration`] if any step duration cannot be parsed
    /// and [`WorkoutError::MovingTimeOverflow`] if the durations do not sum
    pub fn build(name: &str, start_date: &str, steps: &[WorkoutStep]) -> Result<Self, WorkoutError> {
        let durations = steps
            .iter()
            .map(|step| StepDuration::parse(&step.duration))
            .collect::<Result<Vec<_>, _>>()?;
        let moving_time = MovingTime::total(durations)?;

        let description = steps
            .iter()
            .map(WorkoutStep::description_line)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_owned();

        Ok(Self {
            start_date_local: format!("{start_date}{}", api::MIDNIGHT_SUFFIX),
            name: name.to_owned(),
            description,
            sport: EventSport::infer(name),
            target: WorkoutTarget::infer(name),
            moving_time,
        })
    }

    /// JSON body for `POST /athlete/{id}/events`
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "start_date_local": self.start_date_local,
            "category": Self::CATEGORY,
            "name": self.name,
            "description": self.description,
            "type": self.sport.as_str(),
            "target": self.target.as_str(),
            "moving_time": self.moving_time.to_json(),
        })
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_conversion() {
        assert_eq!(StepDuration::parse("15m").unwrap(), StepDuration::Seconds(900));
        assert_eq!(StepDuration::parse("3m").unwrap(), StepDuration::Seconds(180));
        assert_eq!(StepDuration::parse("30s").unwrap(), StepDuration::Seconds(30));
        assert_eq!(StepDuration::parse("1km").unwrap(), StepDuration::Meters(1000.0));
        assert_eq!(StepDuration::parse("45").unwrap(), StepDuration::Seconds(45));
        assert_eq!(StepDuration::parse(" 2.5km ").unwrap(), StepDuration::Meters(2500.0));
    }

    #[test]
    fn test_invalid_duration_is_an_error() {
        assert_eq!(
            StepDuration::parse("ten minutes"),
            Err(WorkoutError::InvalidDuration("ten minutes".to_owned()))
        );
        assert!(StepDuration::parse("").is_err());
        assert!(StepDuration::parse("1.5m").is_err());
    }

    #[test]
    fn test_minutes_overflow_is_an_error() {
        assert_eq!(
            StepDuration::parse("999999999999999999m"),
            Err(WorkoutError::InvalidDuration("999999999999999999m".to_owned()))
        );
    }

    #[test]
    fn test_moving_time_overflow_is_an_error() {
        let steps = vec![
            WorkoutStep::new("9223372036854775807", "50%"),
            WorkoutStep::new("1", "50%"),
        ];
        assert_eq!(
            NewWorkoutEvent::build("Run - easy", "2025-03-01", &steps),
            Err(WorkoutError::MovingTimeOverflow)
        );
    }

    #[test]
    fn test_sport_inference() {
        assert_eq!(EventSport::infer("Bike - VO2 Max"), EventSport::Ride);
        assert_eq!(EventSport::infer("Run - pace work"), EventSport::Run);
        assert_eq!(EventSport::infer("Swim - drills"), EventSport::Swim);
        // Anything without Bike or Run falls back to swim
        assert_eq!(EventSport::infer("Strength session"), EventSport::Swim);
        assert_eq!(EventSport::infer("bike easy"), EventSport::Swim);
    }

    #[test]
    fn test_target_inference() {
        assert_eq!(WorkoutTarget::infer("Bike - Power intervals"), WorkoutTarget::Power);
        assert_eq!(WorkoutTarget::infer("Run - pace work"), WorkoutTarget::Pace);
        assert_eq!(WorkoutTarget::infer("Run - low hr"), WorkoutTarget::HeartRate);
        assert_eq!(WorkoutTarget::infer("Bike - VO2 Max"), WorkoutTarget::Auto);
    }

    #[test]
    fn test_build_ride_payload() {
        let steps = vec![WorkoutStep::new("15m", "80%"), WorkoutStep::new("3m", "110%")];
        let event = NewWorkoutEvent::build("Bike - VO2 Max", "2025-01-14", &steps).unwrap();
        let payload = event.to_payload();

        assert_eq!(payload["type"], "Ride");
        assert_eq!(payload["target"], "AUTO");
        assert_eq!(payload["category"], "WORKOUT");
        assert_eq!(payload["start_date_local"], "2025-01-14T00:00:00");
        assert_eq!(payload["description"], "- 15m 80%\n- 3m 110%");
        assert_eq!(payload["moving_time"], 1080);
    }

    #[test]
    fn test_cadence_is_appended_to_description_line() {
        let steps = vec![WorkoutStep::new("5m", "90%").with_cadence("95rpm")];
        let event = NewWorkoutEvent::build("Bike - spin", "2025-02-01", &steps).unwrap();
        assert_eq!(event.description, "- 5m 90% (95rpm)");
    }

    #[test]
    fn test_km_steps_are_summed_as_meters() {
        // Distance and time share one total; kept as-is rather than converted
        let steps = vec![WorkoutStep::new("10m", "Z2"), WorkoutStep::new("1km", "Z4")];
        let event = NewWorkoutEvent::build("Run - pace work", "2025-03-01", &steps).unwrap();
        assert_eq!(event.moving_time, MovingTime::Mixed(1600.0));
        assert_eq!(event.to_payload()["moving_time"], 1600.0);
    }

    #[test]
    fn test_steps_deserialize_numbers_as_text() {
        let step: WorkoutStep =
            serde_json::from_value(json!({"duration": 45, "power": "80%", "cadence": 90}))
                .unwrap();
        assert_eq!(step.duration, "45");
        assert_eq!(step.cadence.as_deref(), Some("90"));
        assert_eq!(step.description_line(), "- 45 80% (90)");
    }
}
