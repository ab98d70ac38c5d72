//! Integration tests for the MCP dispatcher
//!
//! Exercises the handshake, tool listing, and the silence rules for
//! malformed lines and unsupported methods. None of these paths touch the
//! network, so the gateway points at a closed port.

use membridge_core::mcp::server::{PROTOCOL_VERSION, SERVER_NAME};
use membridge_core::{BackendClient, McpServer, Settings, ToolHandler};
use serde_json::Value;

fn test_server() -> McpServer {
    let backend = BackendClient::new(Settings::with_backend_url("http://127.0.0.1:1")).unwrap();
    McpServer::new(ToolHandler::new(backend))
}

async fn handle(server: &McpServer, line: &str) -> Vec<Value> {
    server
        .handle_line(line)
        .await
        .iter()
        .map(|m| serde_json::to_value(m).unwrap())
        .collect()
}

#[tokio::test]
async fn test_initialize_handshake() {
    let server = test_server();
    let out = handle(
        &server,
        r#"{"jsonrpc":"2.0","method":"initialize","id":"init-1","params":{}}"#,
    )
    .await;

    assert_eq!(out.len(), 2, "expected response + notification pair");

    let response = &out[0];
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], "init-1");
    assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
    assert_eq!(response["result"]["serverInfo"]["name"], SERVER_NAME);
    assert!(response["result"]["serverInfo"]["version"].is_string());
    assert!(response["result"]["capabilities"]["tools"].is_object());

    let notification = &out[1];
    assert_eq!(notification["method"], "notifications/initialized");
    assert!(notification.get("id").is_none(), "notifications carry no id");
    assert!(notification.get("result").is_none());
}

#[tokio::test]
async fn test_tools_list_returns_five_descriptors() {
    let server = test_server();
    let out = handle(&server, r#"{"jsonrpc":"2.0","method":"tools/list","id":2}"#).await;

    assert_eq!(out.len(), 1);
    let tools = out[0]["result"]["tools"].as_array().unwrap();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "AddMemory",
            "SearchMemory",
            "UpdateMemory",
            "DeleteMemory",
            "ListMemories"
        ]
    );

    let required = |name: &str| -> Vec<String> {
        tools
            .iter()
            .find(|t| t["name"] == name)
            .and_then(|t| t["inputSchema"]["required"].as_array())
            .map(|r| {
                r.iter()
                    .map(|v| v.as_str().unwrap().to_string())
                    .collect()
            })
            .unwrap_or_default()
    };

    assert_eq!(required("AddMemory"), vec!["project", "content"]);
    assert_eq!(required("SearchMemory"), vec!["query"]);
    assert_eq!(required("UpdateMemory"), vec!["id"]);
    assert_eq!(required("DeleteMemory"), vec!["id"]);
    assert!(required("ListMemories").is_empty());

    // Optional fields are declared but not required
    let add = tools.iter().find(|t| t["name"] == "AddMemory").unwrap();
    assert!(add["inputSchema"]["properties"]["tags"].is_object());
    let list = tools.iter().find(|t| t["name"] == "ListMemories").unwrap();
    assert!(list["inputSchema"]["properties"]["project"].is_object());
    assert!(list["inputSchema"]["properties"]["limit"].is_object());
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let server = test_server();

    for line in [
        r#"{"jsonrpc":"2.0","method":"tools/list","id":1}"#,
        r#"{"jsonrpc":"2.0","method":"initialize","id":1}"#,
    ] {
        let first: Vec<String> = server
            .handle_line(line)
            .await
            .iter()
            .map(|m| serde_json::to_string(m).unwrap())
            .collect();
        let second: Vec<String> = server
            .handle_line(line)
            .await
            .iter()
            .map(|m| serde_json::to_string(m).unwrap())
            .collect();

        assert_eq!(first, second, "no hidden state may accumulate");
    }
}

#[tokio::test]
async fn test_malformed_line_is_dropped_silently() {
    let server = test_server();

    for line in ["not json", "{\"jsonrpc\":", "[1,2,", "\"just a string"] {
        let out = server.handle_line(line).await;
        assert!(out.is_empty(), "malformed line {:?} must yield no output", line);
    }
}

#[tokio::test]
async fn test_unsupported_method_is_ignored() {
    let server = test_server();

    for method in ["resources/list", "prompts/list", "shutdown", "ping"] {
        let line = format!(r#"{{"jsonrpc":"2.0","method":"{}","id":9}}"#, method);
        let out = server.handle_line(&line).await;
        assert!(out.is_empty(), "method {:?} must yield no output", method);
    }
}

#[tokio::test]
async fn test_unknown_tool_fails_with_internal_error_code() {
    let server = test_server();
    let out = handle(
        &server,
        r#"{"jsonrpc":"2.0","method":"tools/call","id":4,"params":{"name":"EraseEverything","arguments":{}}}"#,
    )
    .await;

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 4);
    assert_eq!(out[0]["error"]["code"], -32603);
    assert_eq!(out[0]["error"]["message"], "Unknown tool: EraseEverything");
    assert!(out[0].get("result").is_none());
}

#[tokio::test]
async fn test_tools_call_without_name_is_an_error_response() {
    let server = test_server();
    let out = handle(
        &server,
        r#"{"jsonrpc":"2.0","method":"tools/call","id":5,"params":{"arguments":{}}}"#,
    )
    .await;

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["error"]["code"], -32603);
}
