//! MCP tool surface for the shared-memory backend
//!
//! Exposes the five memory tools (AddMemory, SearchMemory, UpdateMemory,
//! DeleteMemory, ListMemories) as static descriptors and dispatches each
//! invocation to one backend HTTP call. Tool input and backend output stay
//! opaque JSON; only the declared required fields are checked here.

use crate::backend::BackendClient;
use crate::error::{MembridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Default result limit for SearchMemory
const SEARCH_DEFAULT_LIMIT: u64 = 10;

/// Default result limit for ListMemories
const LIST_DEFAULT_LIMIT: u64 = 50;

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (e.g., "AddMemory")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The fixed set of supported tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTool {
    Add,
    Search,
    Update,
    Delete,
    List,
}

impl MemoryTool {
    /// Resolve a tool name; `None` for anything outside the static set
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AddMemory" => Some(Self::Add),
            "SearchMemory" => Some(Self::Search),
            "UpdateMemory" => Some(Self::Update),
            "DeleteMemory" => Some(Self::Delete),
            "ListMemories" => Some(Self::List),
            _ => None,
        }
    }
}

/// Tool handler that dispatches invocations to the backend gateway
pub struct ToolHandler {
    backend: BackendClient,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Get the list of all available tools (static, never changes)
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "AddMemory".to_string(),
                description: "Store memory in backend".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "required": ["project", "content"],
                    "properties": {
                        "project": { "type": "string" },
                        "content": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                }),
            },
            Tool {
                name: "SearchMemory".to_string(),
                description: "Search stored memory".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "required": ["query"],
                    "properties": {
                        "query": { "type": "string" },
                        "limit": { "type": "number" }
                    }
                }),
            },
            Tool {
                name: "UpdateMemory".to_string(),
                description: "Update existing memory by ID".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string" },
                        "content": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                }),
            },
            Tool {
                name: "DeleteMemory".to_string(),
                description: "Delete memory by ID".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string" }
                    }
                }),
            },
            Tool {
                name: "ListMemories".to_string(),
                description: "List memories by project".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "project": { "type": "string" },
                        "limit": { "type": "number" }
                    }
                }),
            },
        ]
    }

    /// Execute a tool call. Unknown tool names fail before any network call.
    pub async fn execute(&self, tool_name: &str, input: Value) -> Result<Value> {
        debug!("Executing tool: {}", tool_name);

        let tool = MemoryTool::from_name(tool_name)
            .ok_or_else(|| MembridgeError::UnknownTool(tool_name.to_string()))?;

        match tool {
            MemoryTool::Add => {
                required_str(&input, "project")?;
                required_str(&input, "content")?;
                self.backend.add_memory(&input).await
            }
            MemoryTool::Search => {
                let query = required_str(&input, "query")?;
                let limit = limit_or(&input, SEARCH_DEFAULT_LIMIT);
                self.backend.search_memory(&query, limit).await
            }
            MemoryTool::Update => {
                let (id, body) = split_id(input)?;
                self.backend.update_memory(&id, &body).await
            }
            MemoryTool::Delete => {
                let (id, _) = split_id(input)?;
                self.backend.delete_memory(&id).await
            }
            MemoryTool::List => {
                let project = input.get("project").and_then(|v| v.as_str()).map(String::from);
                let limit = limit_or(&input, LIST_DEFAULT_LIMIT);
                self.backend.list_memories(project.as_deref(), limit).await
            }
        }
    }
}

/// Fetch a required string field from the tool input
fn required_str(input: &Value, field: &str) -> Result<String> {
    input
        .get(field)
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| {
            MembridgeError::InvalidArguments(format!("missing required field '{}'", field))
        })
}

/// Read an optional numeric `limit`, falling back to the tool's default
fn limit_or(input: &Value, default: u64) -> u64 {
    input.get("limit").and_then(|v| v.as_u64()).unwrap_or(default)
}

/// Extract `id` for path placement and return the remaining fields as the
/// request body. Numeric ids are accepted and rendered as their decimal form.
fn split_id(input: Value) -> Result<(String, Value)> {
    let mut map = match input {
        Value::Object(map) => map,
        _ => {
            return Err(MembridgeError::InvalidArguments(
                "arguments must be an object".to_string(),
            ))
        }
    };

    let id = match map.remove("id") {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(_) | None => {
            return Err(MembridgeError::InvalidArguments(
                "missing required field 'id'".to_string(),
            ))
        }
    };

    Ok((id, Value::Object(map)))
}
