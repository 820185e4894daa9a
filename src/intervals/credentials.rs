// ABOUTME: Resolves per-call Intervals.icu credentials against configured defaults
// ABOUTME: An explicit argument always wins; empty results become literal caller-facing errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use crate::config::ServerConfig;
use crate::constants::messages;

/// Which credential could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCredential {
    AthleteId,
    ApiKey,
}

impl MissingCredential {
    /// Literal message returned to the tool caller
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AthleteId => messages::MISSING_ATHLETE_ID,
            Self::ApiKey => messages::MISSING_API_KEY,
        }
    }
}

impl fmt::Display for MissingCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Athlete id and API key resolved for a single tool call
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub athlete_id: String,
    pub api_key: String,
}

impl Credentials {
    /// Resolve both athlete id and API key
    ///
    /// The athlete id is checked first, matching the order callers see errors in.
    ///
    /// # Errors
    ///
    /// Returns the first credential that resolves to an empty value
    pub fn resolve(
        athlete_id: Option<&str>,
        api_key: Option<&str>,
        config: &ServerConfig,
    ) -> Result<Self, MissingCredential> {
        let athlete_id = resolve_athlete_id(athlete_id, config)?;
        let api_key = resolve_api_key(api_key, config)?;
        Ok(Self {
            athlete_id,
            api_key,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("athlete_id", &self.athlete_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Resolve the athlete id alone
///
/// # Errors
///
/// Returns `MissingCredential::AthleteId` when the resolved value is empty
pub fn resolve_athlete_id(
    explicit: Option<&str>,
    config: &ServerConfig,
) -> Result<String, MissingCredential> {
    pick(explicit, &config.athlete_id).ok_or(MissingCredential::AthleteId)
}

/// Resolve the API key alone (activity endpoints need no athlete id)
///
/// # Errors
///
/// Returns `MissingCredential::ApiKey` when the resolved value is empty
pub fn resolve_api_key(
    explicit: Option<&str>,
    config: &ServerConfig,
) -> Result<String, MissingCredential> {
    pick(explicit, &config.api_key).ok_or(MissingCredential::ApiKey)
}

// An explicit value replaces the default even when it is empty.
fn pick(explicit: Option<&str>, default: &str) -> Option<String> {
    let value = explicit.unwrap_or(default);
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(athlete_id: &str, api_key: &str) -> ServerConfig {
        ServerConfig {
            athlete_id: athlete_id.to_owned(),
            api_key: api_key.to_owned(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let creds = Credentials::resolve(Some("i2"), Some("key2"), &config("i1", "key1")).unwrap();
        assert_eq!(creds.athlete_id, "i2");
        assert_eq!(creds.api_key, "key2");
    }

    #[test]
    fn test_falls_back_to_defaults() {
        let creds = Credentials::resolve(None, None, &config("i1", "key1")).unwrap();
        assert_eq!(creds.athlete_id, "i1");
        assert_eq!(creds.api_key, "key1");
    }

    #[test]
    fn test_missing_athlete_reported_before_key() {
        let err = Credentials::resolve(None, None, &config("", "")).unwrap_err();
        assert_eq!(err, MissingCredential::AthleteId);
        assert!(err.message().starts_with("Error: No athlete ID provided"));
    }

    #[test]
    fn test_missing_api_key_message() {
        let err = Credentials::resolve(None, None, &config("i1", "")).unwrap_err();
        assert_eq!(err, MissingCredential::ApiKey);
        assert!(err.to_string().starts_with("Error: No api_key provided"));
    }

    #[test]
    fn test_explicit_empty_value_does_not_fall_back() {
        let err = resolve_api_key(Some(""), &config("i1", "key1")).unwrap_err();
        assert_eq!(err, MissingCredential::ApiKey);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = Credentials::resolve(None, None, &config("i1", "key1")).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("key1"));
    }
}
