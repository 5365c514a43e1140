//! JSON-RPC 2.0 structures and MCP tool metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version identifier carried on every request and response.
pub const JSONRPC_VERSION: &str = "2.0";
/// MCP protocol revision reported by `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 error codes used by this server.
pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC 2.0 request. `id` is `None` for notifications, which never get a
/// response.
#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response: exactly one of `result` / `error` is set.
#[derive(Serialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Serialize, Debug)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// A registered tool as reported by `tools/list`: name, description, and the
/// JSON Schema for its arguments (`inputSchema` in MCP's camelCase).
#[derive(Serialize, Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Declarative parameter record: a name plus `{type, description}` metadata.
///
/// Pure discovery metadata. Decoding the actual argument value stays with the
/// tool handler.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            type_name: "integer",
            description,
        }
    }
}

impl ToolSpec {
    /// Build a tool definition, deriving the input schema from the parameter
    /// records. Every listed parameter is required.
    pub fn new(name: &str, description: &str, params: &[ParamSpec]) -> Self {
        let mut properties = serde_json::Map::new();
        for param in params {
            properties.insert(
                param.name.to_string(),
                serde_json::json!({
                    "type": param.type_name,
                    "description": param.description,
                }),
            );
        }
        let required: Vec<Value> = params
            .iter()
            .map(|param| Value::String(param.name.to_string()))
            .collect();

        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}
