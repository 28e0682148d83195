//! Configuration structures.
//!
//! All values have working defaults; embedders deserialize overrides from
//! whatever source they use (file, env layer) and pass the structs in
//! explicitly. The core never reads the environment itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::codec::EncodingMode;

/// Global server-process configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// gRPC bind address (TCP).
    pub listen_addr: String,

    /// Maximum accepted request message size in bytes. Oversized requests
    /// are rejected by the transport before they reach the dispatcher.
    pub max_message_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:50051".to_string(),
            max_message_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error). `RUST_LOG`
    /// takes precedence when set.
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Client (tool invoker) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server endpoint URI, e.g. `http://127.0.0.1:50051`.
    pub endpoint: String,

    /// Payload encoding used for execute calls. The server answers in
    /// the same encoding.
    pub mode: EncodingMode,

    /// Per-call deadline. A dead or stalled server surfaces as a
    /// classified rpc error within this bound, never as a hang.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// TCP connect timeout (connections are established lazily on the
    /// first call).
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:50051".to_string(),
            mode: EncodingMode::Json,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Config for the given endpoint with default mode and timeouts.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Switch the payload encoding.
    pub fn with_mode(mut self, mode: EncodingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:50051");
        assert!(config.server.max_message_bytes > 0);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_client_config_round_trips_through_serde() {
        let config = ClientConfig::for_endpoint("http://tools.internal:7000")
            .with_mode(EncodingMode::Binary)
            .with_timeout(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"binary\""));
        assert!(json.contains("1500ms") || json.contains("1s 500ms"));

        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.endpoint, "http://tools.internal:7000");
        assert_eq!(back.mode, EncodingMode::Binary);
        assert_eq!(back.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"server": {"listen_addr": "0.0.0.0:9000", "max_message_bytes": 1024}}"#)
                .unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.server.max_message_bytes, 1024);
        assert_eq!(config.observability.log_level, "info");
    }
}
