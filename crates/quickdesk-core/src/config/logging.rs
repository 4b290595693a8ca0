//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Output encoding of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human readable output.
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `debug,sqlx=warn`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_directive")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_directive(),
            format: LogFormat::Json,
        }
    }
}

fn default_directive() -> String {
    String::from("info")
}
