// ABOUTME: Intervals.icu integration: HTTP gateway, credential resolution and API paths
// ABOUTME: Everything the tools need to talk to the remote fitness service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intervals.icu API integration

/// Authenticated HTTP gateway and error envelope
pub mod client;
/// Explicit-over-default credential resolution
pub mod credentials;

pub use client::{ApiError, ApiResult, IntervalsClient};
pub use credentials::{resolve_api_key, resolve_athlete_id, Credentials, MissingCredential};

/// Remote API paths
pub mod paths {
    /// `GET /athlete/{id}/activities`
    #[must_use]
    pub fn athlete_activities(athlete_id: &str) -> String {
        format!("/athlete/{athlete_id}/activities")
    }

    /// `GET /activity/{id}`
    #[must_use]
    pub fn activity(activity_id: &str) -> String {
        format!("/activity/{activity_id}")
    }

    /// `GET /activity/{id}/intervals`
    #[must_use]
    pub fn activity_intervals(activity_id: &str) -> String {
        format!("/activity/{activity_id}/intervals")
    }

    /// `GET|POST /athlete/{id}/events`
    #[must_use]
    pub fn athlete_events(athlete_id: &str) -> String {
        format!("/athlete/{athlete_id}/events")
    }

    /// `GET /athlete/{id}/event/{event_id}`
    #[must_use]
    pub fn athlete_event(athlete_id: &str, event_id: &str) -> String {
        format!("/athlete/{athlete_id}/event/{event_id}")
    }

    /// `GET /athlete/{id}/wellness`
    #[must_use]
    pub fn athlete_wellness(athlete_id: &str) -> String {
        format!("/athlete/{athlete_id}/wellness")
    }
}
