// ABOUTME: Domain models for Intervals.icu payloads
// ABOUTME: Activity normalization helpers and the planned-workout event builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models
//!
//! Remote payloads are kept as `serde_json` values: the service returns
//! heterogeneous shapes and most fields are optional. Only the outbound
//! workout event has a typed representation.

/// Activity payload normalization
pub mod activity;
/// Planned workout event payloads
pub mod workout;

pub use activity::{is_empty_payload, is_named_activity, normalize_activities, JsonObject};
pub use workout::{
    EventSport, MovingTime, NewWorkoutEvent, StepDuration, WorkoutError, WorkoutStep,
    WorkoutTarget,
};
