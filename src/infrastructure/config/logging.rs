//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl LoggingConfig {
    /// Filter directive after applying `-v` flags.
    ///
    /// One `-v` raises the level to debug, two or more to trace.
    pub fn effective_level(&self, verbose: u8) -> &str {
        match verbose {
            0 => &self.level,
            1 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` wins over the configured level. Logs go to stderr so the
    /// server keeps stdout to itself after handoff.
    pub fn init(&self, verbose: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbose)));

        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        // Already initialized on a repeated call.
        let _ = match self.format.as_str() {
            "json" => builder.json().try_init(),
            _ => builder.try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(0), "info");
        assert_eq!(config.effective_level(1), "debug");
        assert_eq!(config.effective_level(3), "trace");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        config.init(0);
        config.init(0);
    }
}
