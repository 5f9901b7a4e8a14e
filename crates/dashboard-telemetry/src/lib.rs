//! # Dashboard Telemetry
//!
//! Logging and metrics for the utility dashboard.
//!
//! - **Logs**: `tracing` events through a `tracing-subscriber` fmt layer,
//!   human-readable or JSON.
//! - **Metrics**: Prometheus counters for bus traffic and feature lifecycle,
//!   exposed as text on demand.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dashboard_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // tracing macros now write to stderr, counters are registered
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `UD_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `UD_JSON_LOGS` | `false` | JSON log lines |
//! | `UD_LOG_LOCATION` | `false` | File and line in log lines |
//! | `UD_SERVICE_NAME` | `utility-dashboard` | Service name |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, record_bus_totals, record_failure, record_mounted, record_skipped,
    register_metrics, BUS_EVENTS_EMITTED, BUS_HANDLER_FAILURES, FEATURES_MOUNTED,
    FEATURES_SKIPPED, FEATURE_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
