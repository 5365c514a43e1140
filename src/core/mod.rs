//! Core server framework:
//! - config.rs: server identity and transport settings from the environment
//! - error.rs: typed tool-argument and configuration errors
//! - protocol.rs: JSON-RPC 2.0 structures and MCP tool metadata
//! - registry.rs: tool registry for discovery and dispatch
//! - server.rs: STDIO and HTTP transports

pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
