//! MCP server with stdio transport
//!
//! JSON-RPC 2.0 over stdin/stdout, one message per line. Handles the
//! initialize handshake, tool discovery, and tool execution; everything else
//! is logged and dropped without a protocol-visible response.

use super::protocol::{JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, Outgoing};
use super::tools::ToolHandler;
use crate::error::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// MCP protocol version this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported in the initialize handshake
pub const SERVER_NAME: &str = "membridge";

/// MCP server that handles JSON-RPC requests over stdio
pub struct McpServer {
    tool_handler: ToolHandler,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tool_handler: ToolHandler) -> Self {
        Self { tool_handler }
    }

    /// Run the server (blocking, processes stdin/stdout)
    ///
    /// Lines are handled strictly in arrival order; a later message is not
    /// read until the earlier one's backend call has completed, so response
    /// order matches request order.
    pub async fn run(&self) -> Result<()> {
        info!("MCP server started, listening on stdin...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("Received EOF, shutting down");
                    break;
                }
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    debug!("Received: {}", line);

                    for message in self.handle_line(line).await {
                        let serialized = match serde_json::to_string(&message) {
                            Ok(s) => s,
                            Err(e) => {
                                error!("Failed to serialize outgoing message: {}", e);
                                continue;
                            }
                        };

                        debug!("Sending: {}", serialized);

                        if let Err(e) = stdout.write_all(serialized.as_bytes()).await {
                            error!("Failed to write response: {}", e);
                            return Ok(());
                        }
                        if let Err(e) = stdout.write_all(b"\n").await {
                            error!("Failed to write newline: {}", e);
                            return Ok(());
                        }
                    }

                    if let Err(e) = stdout.flush().await {
                        error!("Failed to flush stdout: {}", e);
                        return Ok(());
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Handle one complete input line, returning the messages to emit.
    ///
    /// Malformed JSON and unrecognized methods yield no output at all; the
    /// caller must treat that silence as a no-op, not an error.
    pub async fn handle_line(&self, line: &str) -> Vec<Outgoing> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!("Dropping invalid JSON line: {}", e);
                return Vec::new();
            }
        };

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => vec![Outgoing::Response(self.handle_tools_list(request))],
            "tools/call" => vec![Outgoing::Response(self.handle_tools_call(request).await)],

            method => {
                warn!("Unknown method: {}", method);
                Vec::new()
            }
        }
    }

    /// Handle initialize: the response and the `initialized` notification
    /// are emitted as an adjacent pair.
    fn handle_initialize(&self, request: JsonRpcRequest) -> Vec<Outgoing> {
        debug!("Handling initialize");

        let response = JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        );

        vec![
            Outgoing::Response(response),
            Outgoing::Notification(JsonRpcNotification::initialized()),
        ]
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list");

        let tools = self.tool_handler.list_tools();

        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "tools": tools
            }),
        )
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/call");

        let params = match request.params.as_object() {
            Some(obj) => obj,
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::internal_error("params must be an object"),
                );
            }
        };

        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::internal_error("missing 'name' field"),
                );
            }
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(Value::Object(serde_json::Map::new()));

        // The backend's JSON payload is forwarded as a single text content
        // block; clients of this protocol expect that wrapping.
        match self.tool_handler.execute(tool_name, arguments).await {
            Ok(result) => JsonRpcResponse::success(
                request.id,
                serde_json::json!({
                    "content": [
                        {
                            "type": "text",
                            "text": serde_json::to_string_pretty(&result)
                                .unwrap_or_else(|_| result.to_string())
                        }
                    ]
                }),
            ),
            Err(e) => {
                error!("Tool call failed: {}", e);
                JsonRpcResponse::error(request.id, JsonRpcError::internal_error(e.to_string()))
            }
        }
    }
}
