// Configuration module
// Layered load (defaults -> config file -> environment) into typed sections,
// plus the process-wide state shared by all connections.

use crate::handler::DirectoryResponder;
use serde::Deserialize;
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Directory to serve; must exist at startup
    pub root: String,
    /// Fixed Content-Type for every file, bypassing detection
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format: combined, common, or json
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub request_timeout: u64,
}

impl Config {
    /// Load configuration from the default `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("STATICD"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("serve.root", "public")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.request_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Process-wide state shared read-only across concurrent requests.
///
/// Built once at startup; requests never mutate it.
pub struct AppState {
    pub config: Config,
    pub responder: DirectoryResponder,
}

impl AppState {
    /// Validate the serve root and build the shared responder
    ///
    /// Fails when the configured root is not an existing directory; this is
    /// a fatal startup error, never a per-request one.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let responder = DirectoryResponder::new(&config.serve.root)?
            .with_content_type(config.serve.content_type.clone());
        Ok(Self { config, responder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load_from("/nonexistent/config").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.serve.root, "public");
        assert!(config.serve.content_type.is_none());
        assert_eq!(config.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_from("/nonexistent/config").unwrap();
        assert!(config.socket_addr().is_ok());
    }

    #[test]
    fn test_state_rejects_bad_root() {
        let mut config = Config::load_from("/nonexistent/config").unwrap();
        config.serve.root = "/no/such/dir".to_string();
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn test_state_accepts_directory_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from("/nonexistent/config").unwrap();
        config.serve.root = dir.path().to_string_lossy().into_owned();
        assert!(AppState::new(config).is_ok());
    }
}
