//! Registry of MCP tools: definitions for discovery, handlers for dispatch.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::protocol::ToolSpec;

/// Boxed tool handler: JSON arguments in, JSON result or argument error out.
///
/// Handlers run on any HTTP worker thread, hence `Send + Sync`.
pub type ToolHandler = Box<dyn Fn(Value) -> Result<Value, ToolError> + Send + Sync>;

/// The registry is built once at startup and shared immutably afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition together with its handler.
    pub fn register(&mut self, spec: ToolSpec, handler: ToolHandler) {
        let name = spec.name.clone();
        self.tools.push(spec);
        self.handlers.insert(name, handler);
    }

    /// All registered definitions, in registration order.
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Invoke a tool by name. `None` if no such tool is registered.
    pub fn call(&self, name: &str, arguments: Value) -> Option<Result<Value, ToolError>> {
        self.handlers.get(name).map(|handler| handler(arguments))
    }
}
