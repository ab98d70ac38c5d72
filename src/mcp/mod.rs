//! Model Context Protocol (MCP) server implementation
//!
//! Provides a JSON-RPC 2.0 server over stdio that exposes the five memory
//! tools backed by the shared-memory HTTP backend.

pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, Outgoing};
pub use server::McpServer;
pub use tools::{MemoryTool, Tool, ToolHandler};
