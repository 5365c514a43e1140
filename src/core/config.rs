use std::env;
use std::str::FromStr;

use crate::core::error::ConfigError;

/// How the server speaks MCP: over stdin/stdout, over HTTP, or both at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Http,
    Both,
}

impl FromStr for TransportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            "both" => Ok(Self::Both),
            other => Err(ConfigError::InvalidTransport(other.to_string())),
        }
    }
}

/// Server identity and transport settings, resolved once at startup.
///
/// Environment variables:
/// - `SERVER_NAME`: name reported in initialize responses (default "mod19-server")
/// - `SERVER_VERSION`: version string (default: crate version)
/// - `MCP_TRANSPORT_MODE`: "stdio", "http", or "both" (default "both")
/// - `HOST`: bind address for HTTP mode (default "0.0.0.0")
/// - `PORT`: port number for HTTP mode (default 3000)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub transport: TransportMode,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read the configuration from the environment. An unparseable transport
    /// mode or port is an error rather than a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env::var("SERVER_NAME").unwrap_or_else(|_| "mod19-server".to_string());
        let version =
            env::var("SERVER_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

        let transport = match env::var("MCP_TRANSPORT_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => TransportMode::Both,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            name,
            version,
            transport,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mode_parses_known_values() {
        assert_eq!(
            "stdio".parse::<TransportMode>().unwrap(),
            TransportMode::Stdio
        );
        assert_eq!("http".parse::<TransportMode>().unwrap(), TransportMode::Http);
        assert_eq!("both".parse::<TransportMode>().unwrap(), TransportMode::Both);
    }

    #[test]
    fn transport_mode_rejects_unknown_values() {
        assert!("websocket".parse::<TransportMode>().is_err());
        assert!("STDIO".parse::<TransportMode>().is_err());
    }
}
