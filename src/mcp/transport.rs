// ABOUTME: Newline-delimited JSON-RPC transport over stdin/stdout
// ABOUTME: Reads one request per line and writes one response line per non-notification request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::request_processor::McpRequestProcessor;
use crate::errors::AppResult;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Handles stdio transport for MCP communication
pub struct StdioTransport {
    processor: Arc<McpRequestProcessor>,
}

impl StdioTransport {
    /// Creates a new stdio transport instance
    #[must_use]
    pub const fn new(processor: Arc<McpRequestProcessor>) -> Self {
        Self { processor }
    }

    /// Run until stdin closes
    ///
    /// # Errors
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        info!("stdin closed, stopping stdio transport");
        Ok(())
    }

    /// Serve requests from any line-oriented reader, answering on `writer`
    ///
    /// # Errors
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            if line.trim_ascii().is_empty() {
                continue;
            }

            // Raw bytes: a non UTF-8 line gets a parse error instead of ending the session
            let response = match serde_json::from_slice::<JsonRpcRequest>(&line) {
                Ok(request) => self.processor.handle_request(request).await,
                Err(e) => {
                    warn!("Invalid JSON-RPC message: {}", e);
                    Some(JsonRpcResponse::parse_error())
                }
            };

            if let Some(response) = response {
                write_response(&response, &mut writer).await?;
            }
        }

        Ok(())
    }
}

/// Write one response as a single JSON line and flush
///
/// # Errors
/// Returns an error if JSON serialization fails or I/O operations fail
pub async fn write_response<W>(response: &JsonRpcResponse, writer: &mut W) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;
    debug!("Sending MCP response: {}", response_json);

    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::config::ServerConfig;
    use crate::jsonrpc::error_codes;
    use crate::mcp::resources::ServerResources;
    use crate::tools::ToolRegistry;

    fn transport() -> StdioTransport {
        let resources = Arc::new(ServerResources::new(Arc::new(ServerConfig::default())).unwrap());
        let processor =
            McpRequestProcessor::new(resources, Arc::new(ToolRegistry::with_intervals_tools()));
        StdioTransport::new(Arc::new(processor))
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        transport()
            .serve(input.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_garbage_line_gets_parse_error() {
        let responses = exchange("this is not json\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert!(responses[0]["id"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_serving() {
        let mut input = b"\xff\xfe bad\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#);
        input.push(b'\n');

        let mut output = Vec::new();
        transport().serve(input.as_slice(), &mut output).await.unwrap();
        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(responses[1]["id"], 3);
        assert!(responses[1]["error"].is_null());
    }

    #[tokio::test]
    async fn test_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let responses = exchange(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 7);
    }
}
