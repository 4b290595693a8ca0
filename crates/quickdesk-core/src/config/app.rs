//! HTTP listener settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests running longer than this are answered with 408.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port` as accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin policy for browser clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins, or a single `"*"` for any.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_methods")]
    pub allowed_methods: Vec<String>,
    /// How long browsers may cache a preflight answer.
    #[serde(default = "default_preflight_max_age")]
    pub max_age_seconds: u64,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_origins(),
            allowed_methods: default_methods(),
            max_age_seconds: default_preflight_max_age(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_origins() -> Vec<String> {
    vec![String::from("*")]
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_preflight_max_age() -> u64 {
    60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "0.0.0.0:5000");
        assert_eq!(server.request_timeout(), Duration::from_secs(30));
        assert!(server.cors.allows_any_origin());
        assert!(server.cors.allowed_methods.contains(&"PATCH".to_string()));
    }
}
