// ABOUTME: Constants for the Intervals.icu MCP server grouped by domain
// ABOUTME: Protocol identifiers, API defaults, environment variable names and tool names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules instead of living at the
//! crate root so call sites read as `api::USER_AGENT`, `tools::GET_EVENTS`.

/// MCP / JSON-RPC protocol constants
pub mod protocol {
    /// `JSON-RPC` version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol revision advertised in `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// Server name reported to MCP clients
    pub const SERVER_NAME: &str = "intervals-icu";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Intervals.icu API constants
pub mod api {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://intervals.icu/api/v1";

    /// User agent sent with every request
    pub const USER_AGENT: &str = "intervalsicu-mcp-server/1.0";

    /// Intervals.icu expects this literal username with the API key as password
    pub const BASIC_AUTH_USERNAME: &str = "API_KEY";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Date format used for `oldest`/`newest` query parameters
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Time suffix appended to a date to form `start_date_local`
    pub const MIDNIGHT_SUFFIX: &str = "T00:00:00";
}

/// Environment variable names
pub mod env_vars {
    /// Default athlete identifier
    pub const ATHLETE_ID: &str = "ATHLETE_ID";
    /// Default API key
    pub const API_KEY: &str = "API_KEY";
    /// API base URL override
    pub const API_BASE_URL: &str = "INTERVALS_API_BASE_URL";
    /// Request timeout override (seconds)
    pub const TIMEOUT_SECS: &str = "INTERVALS_TIMEOUT_SECS";
    /// Connection timeout override (seconds)
    pub const CONNECT_TIMEOUT_SECS: &str = "INTERVALS_CONNECT_TIMEOUT_SECS";
}

/// Default date windows and limits used by the tools
pub mod defaults {
    /// Default number of activities returned by `get_activities`
    pub const ACTIVITY_LIMIT: u32 = 10;

    /// Over-fetch factor used when unnamed activities are filtered out
    pub const UNNAMED_OVERFETCH_FACTOR: u32 = 3;

    /// Days looked back by default for activities and wellness
    pub const LOOKBACK_DAYS: i64 = 30;

    /// Days looked ahead by default for events
    pub const LOOKAHEAD_DAYS: i64 = 30;

    /// Width of the supplementary activity window preceding the start date
    pub const SUPPLEMENTARY_WINDOW_DAYS: i64 = 60;
}

/// Tool names exposed over MCP
pub mod tools {
    pub const GET_ACTIVITIES: &str = "get_activities";
    pub const GET_ACTIVITY_DETAILS: &str = "get_activity_details";
    pub const GET_ACTIVITY_INTERVALS: &str = "get_activity_intervals";
    pub const GET_EVENTS: &str = "get_events";
    pub const GET_EVENT_BY_ID: &str = "get_event_by_id";
    pub const POST_EVENTS: &str = "post_events";
    pub const GET_WELLNESS_DATA: &str = "get_wellness_data";
}

/// Literal messages returned to tool callers
pub mod messages {
    /// Returned when neither an explicit nor a default athlete id is available
    pub const MISSING_ATHLETE_ID: &str =
        "Error: No athlete ID provided and no default ATHLETE_ID found in environment variables.";

    /// Returned when neither an explicit nor a default API key is available
    pub const MISSING_API_KEY: &str =
        "Error: No api_key provided and no default API_KEY found in environment variables.";
}
