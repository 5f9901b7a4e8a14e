//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log lines
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include the source file and line in log lines
    pub with_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "utility-dashboard".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_location: false,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `UD_SERVICE_NAME`: Service name (default: utility-dashboard)
    /// - `UD_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `UD_JSON_LOGS`: JSON output (default: false)
    /// - `UD_LOG_LOCATION`: Include file and line (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("UD_SERVICE_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.service_name),

            log_level: lookup("UD_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),

            json_logs: lookup("UD_JSON_LOGS")
                .map(|v| truthy(&v))
                .unwrap_or(defaults.json_logs),

            with_location: lookup("UD_LOG_LOCATION")
                .map(|v| truthy(&v))
                .unwrap_or(defaults.with_location),
        }
    }

    /// Raise the filter to `debug` unless a finer one was configured.
    pub fn verbose(mut self) -> Self {
        if self.log_level == "info" || self.log_level == "warn" || self.log_level == "error" {
            self.log_level = "debug".to_string();
        }
        self
    }
}
