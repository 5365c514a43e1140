//! MCP server exposing a single arithmetic tool: the product of two
//! integers reduced modulo 19.
//!
//! The server speaks JSON-RPC 2.0 over two transports (STDIO for MCP
//! Inspector and local development, HTTP for deployments) and publishes its
//! tool catalog through `tools/list` and a server-sent-events endpoint.

pub mod core;
pub mod tools;
