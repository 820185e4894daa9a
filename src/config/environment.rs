// ABOUTME: Environment configuration for the Intervals.icu MCP server
// ABOUTME: Loads default credentials, API base URL and HTTP timeouts once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration.
//!
//! The configuration is read once at startup and then shared immutably
//! through `Arc<ServerConfig>`. Missing default credentials are not fatal:
//! tools that receive no explicit override report the missing field instead.

use std::env;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::constants::{api, env_vars};

/// Server configuration resolved from the process environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Default athlete identifier (`ATHLETE_ID`), possibly empty
    pub athlete_id: String,
    /// Default API key (`API_KEY`), possibly empty
    pub api_key: String,
    /// Intervals.icu API base URL without trailing slash
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            athlete_id: String::new(),
            api_key: String::new(),
            api_base_url: api::DEFAULT_BASE_URL.to_owned(),
            request_timeout_secs: api::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: api::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is set but is not a positive integer
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is set but is not a positive integer
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(env_vars::API_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| api::DEFAULT_BASE_URL.to_owned(), |url| normalize_base_url(&url));

        let config = Self {
            athlete_id: lookup(env_vars::ATHLETE_ID).unwrap_or_default(),
            api_key: lookup(env_vars::API_KEY).unwrap_or_default(),
            api_base_url,
            request_timeout_secs: parse_secs(
                &lookup,
                env_vars::TIMEOUT_SECS,
                api::DEFAULT_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_secs(
                &lookup,
                env_vars::CONNECT_TIMEOUT_SECS,
                api::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        if config.athlete_id.is_empty() {
            warn!("ATHLETE_ID is not set; tools will require an explicit athlete_id");
        }
        if config.api_key.is_empty() {
            warn!("API_KEY is not set; tools will require an explicit api_key");
        }

        Ok(config)
    }

    /// Override the API base URL (e.g. from a command line flag)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }

    /// One-line configuration summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Intervals.icu MCP Server Configuration: api_base_url={}, default_athlete_id={}, \
             default_api_key={}, timeout={}s, connect_timeout={}s",
            self.api_base_url,
            if self.athlete_id.is_empty() {
                "<unset>"
            } else {
                self.athlete_id.as_str()
            },
            if self.api_key.is_empty() {
                "<unset>"
            } else {
                "<set>"
            },
            self.request_timeout_secs,
            self.connect_timeout_secs,
        )
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {key} value: {raw}"))?;
    if secs == 0 {
        anyhow::bail!("Invalid {key} value: must be greater than zero");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.api_base_url, "https://intervals.icu/api/v1");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_reads_credentials_and_trims_base_url() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("ATHLETE_ID", "i12345"),
            ("API_KEY", "secret"),
            ("INTERVALS_API_BASE_URL", "http://localhost:8080/api/v1/"),
        ]))
        .unwrap();

        assert_eq!(config.athlete_id, "i12345");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_rejects_invalid_timeout() {
        let result = ServerConfig::from_lookup(lookup_from(&[("INTERVALS_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());

        let result = ServerConfig::from_lookup(lookup_from(&[("INTERVALS_TIMEOUT_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_redacts_api_key() {
        let config = ServerConfig {
            api_key: "super-secret".to_owned(),
            ..ServerConfig::default()
        };
        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(summary.contains("default_api_key=<set>"));
        assert!(summary.contains("default_athlete_id=<unset>"));
    }
}
