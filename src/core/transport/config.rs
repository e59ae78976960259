//! Transport configuration types.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport speaking MCP.
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with a single plain-text tool endpoint.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the tool invocation endpoint.
    #[serde(default = "default_tool_path")]
    pub tool_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_tool_path() -> String {
    "/tool".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            tool_path: default_tool_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            "" => Self::default_from_env(),
            other => {
                warn!("Transport '{}' is not compiled in, using the default", other);
                Self::default_from_env()
            }
        }
    }

    fn default_from_env() -> Self {
        match Self::default() {
            #[cfg(feature = "http")]
            Self::Http(_) => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "stdio")]
            other => other,
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (MCP)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.tool_path),
        }
    }

    /// Check if this transport is the STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_*` variables over the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host);
        let tool_path = std::env::var("MCP_HTTP_PATH").unwrap_or(defaults.tool_path);
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.enable_cors);

        Self {
            port,
            host,
            tool_path,
            enable_cors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.tool_path, "/tool");
        assert!(config.enable_cors);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "HTTP");
            std::env::set_var("MCP_HTTP_PORT", "9090");
            std::env::set_var("MCP_HTTP_PATH", "/invoke");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }

        match TransportConfig::from_env() {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 9090);
                assert_eq!(cfg.tool_path, "/invoke");
                assert!(!cfg.enable_cors);
            }
            #[allow(unreachable_patterns)]
            other => panic!("expected HTTP transport, got {:?}", other),
        }

        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::remove_var("MCP_HTTP_PATH");
            std::env::remove_var("MCP_HTTP_CORS");
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_unknown_transport_falls_back_to_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "carrier-pigeon");
        }
        let config = TransportConfig::from_env();
        assert!(!config.is_stdio());
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8080/tool");
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_stdio_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "stdio");
        }
        assert!(TransportConfig::from_env().is_stdio());
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
    }
}
