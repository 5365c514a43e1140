use thiserror::Error;

/// Failures produced while decoding tool arguments.
///
/// These surface as MCP tool results with `isError: true`, not as JSON-RPC
/// protocol errors: the request itself was well-formed, the tool call was not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("missing required parameter: {name}")]
    MissingParam { name: &'static str },

    #[error("invalid parameter {name}: expected {expected}")]
    InvalidParam {
        name: &'static str,
        expected: &'static str,
    },
}

/// Startup configuration failures. Reported once and fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid transport mode '{0}': must be 'stdio', 'http', or 'both'")]
    InvalidTransport(String),

    #[error("invalid port '{0}': expected a port number")]
    InvalidPort(String),
}
