//! MCP tool implementations. Each tool module exports a `register` function
//! called from [`initialize`] during server startup.

use std::sync::Arc;

use crate::core::registry::ToolRegistry;

pub mod product_mod19;

/// Build the registry with every available tool registered.
pub fn initialize() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    // Add new tool registrations here following this pattern.
    product_mod19::register(&mut registry);

    Arc::new(registry)
}
