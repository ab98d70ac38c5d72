//! Membridge - MCP stdio bridge to a shared-memory HTTP backend
//!
//! Exposes memory storage operations (add, search, update, delete, list) as
//! MCP tools over newline-delimited JSON-RPC 2.0 on stdin/stdout, forwarding
//! each tool call to an external HTTP backend that does the actual storage.
//!
//! # Architecture
//!
//! - **Config**: gateway settings (backend URL, timeout)
//! - **Backend**: HTTP gateway, one request per tool call
//! - **MCP**: protocol types, tool surface, stdio server loop

pub mod backend;
pub mod config;
pub mod error;
pub mod mcp;

// Re-export commonly used types
pub use backend::BackendClient;
pub use config::Settings;
pub use error::{MembridgeError, Result};
pub use mcp::{McpServer, ToolHandler};
