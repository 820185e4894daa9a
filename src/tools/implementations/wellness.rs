// ABOUTME: Daily wellness tool backed by the Intervals.icu wellness endpoint.
// ABOUTME: Implements get_wellness_data for fitness, fatigue, vitals, sleep and subjective scores.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::{defaults, tools};
use crate::errors::AppResult;
use crate::formatters::format_wellness_entry;
use crate::intervals::{paths, Credentials};
use crate::mcp::schema::JsonSchema;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};
use crate::types::json_schemas::GetWellnessParams;

use super::{credential_properties, date_or_offset, date_query, date_range_properties, parse_args};

/// Lists daily wellness records in a date window
pub struct GetWellnessDataTool;

#[async_trait]
impl McpTool for GetWellnessDataTool {
    fn name(&self) -> &'static str {
        tools::GET_WELLNESS_DATA
    }

    fn description(&self) -> &'static str {
        "Get daily wellness data (fitness, fatigue, HRV, resting HR, sleep, weight) for an \
         athlete from Intervals.icu"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        credential_properties(&mut properties, true);
        date_range_properties(&mut properties, "30 days ago", "today");
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_CREDENTIALS | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params: GetWellnessParams = parse_args(self.name(), args)?;
        let creds = match Credentials::resolve(
            params.credentials.athlete_id.as_deref(),
            params.credentials.api_key.as_deref(),
            ctx.config(),
        ) {
            Ok(creds) => creds,
            Err(missing) => return Ok(ToolResult::error_text(missing.message())),
        };
        let athlete_id = &creds.athlete_id;

        let today = ctx.today();
        let start_date = date_or_offset(params.range.start(), today, -defaults::LOOKBACK_DAYS);
        let end_date = date_or_offset(params.range.end(), today, 0);

        let payload = match ctx
            .client()
            .fetch(
                &paths::athlete_wellness(athlete_id),
                &creds.api_key,
                &date_query(&start_date, &end_date),
            )
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(ToolResult::error_text(format!(
                    "Error fetching wellness data: {}",
                    e.message
                )))
            }
        };

        let entries: Vec<_> = match &payload {
            Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
            Value::Object(entry) if !entry.is_empty() => vec![entry],
            _ => Vec::new(),
        };
        if entries.is_empty() {
            return Ok(ToolResult::text(format!(
                "No wellness data found for athlete {athlete_id} in the specified date range."
            )));
        }

        let mut summary = String::from("Wellness Data:\n\n");
        for entry in entries {
            summary.push_str(&format_wellness_entry(entry));
            summary.push('\n');
        }
        Ok(ToolResult::text(summary))
    }
}

/// Create all wellness tools for registration
#[must_use]
pub fn create_wellness_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetWellnessDataTool)]
}
