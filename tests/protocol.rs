//! Protocol-level tests: JSON-RPC dispatch against the real tool registry.

use mod19_server::core::protocol::RpcRequest;
use mod19_server::core::server::{self, AppState};
use mod19_server::tools;
use serde_json::{Value, json};

fn state() -> AppState {
    AppState {
        server_name: "mod19-server".to_string(),
        server_version: "0.0.0-test".to_string(),
    }
}

fn request(body: Value) -> RpcRequest {
    serde_json::from_value(body).unwrap()
}

fn dispatch(body: Value) -> Value {
    let registry = tools::initialize();
    serde_json::to_value(server::dispatch(&state(), &registry, &request(body))).unwrap()
}

#[test]
fn initialize_reports_server_info() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
    }));

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "mod19-server");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[test]
fn tools_list_exposes_productmod19() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
    }));

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);

    let tool = &tools[0];
    assert_eq!(tool["name"], "productmod19");
    assert_eq!(tool["inputSchema"]["type"], "object");
    assert_eq!(tool["inputSchema"]["required"], json!(["a", "b"]));
    assert_eq!(tool["inputSchema"]["properties"]["a"]["type"], "integer");
}

/// Unwrap the text payload of an MCP content envelope.
fn tool_text(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn tools_call_computes_the_product() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": { "name": "productmod19", "arguments": { "a": 10, "b": 10 } },
    }));

    assert_eq!(response["result"]["isError"], false);
    assert_eq!(tool_text(&response)["result"], 5);
}

#[test]
fn tools_call_handles_negative_operands() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "tools/call",
        "params": { "name": "productmod19", "arguments": { "a": -1, "b": 5 } },
    }));

    assert_eq!(response["result"]["isError"], false);
    assert_eq!(tool_text(&response)["result"], 14);
}

#[test]
fn tools_call_with_bad_argument_is_a_tool_error() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "tools/call",
        "params": { "name": "productmod19", "arguments": { "a": "2", "b": 3 } },
    }));

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("invalid parameter a"), "unexpected text: {text}");
}

#[test]
fn tools_call_without_params_is_invalid_params() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 6,
        "method": "tools/call",
    }));

    assert_eq!(response["error"]["code"], -32602);
}

#[test]
fn unknown_tool_is_method_not_found() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "tools/call",
        "params": { "name": "sum", "arguments": {} },
    }));

    assert_eq!(response["error"]["code"], -32601);
}

#[test]
fn unknown_method_is_method_not_found() {
    let response = dispatch(json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "resources/list",
    }));

    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}
