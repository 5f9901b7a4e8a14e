//! # Dashboard Container
//!
//! Configuration and the wired page.
//!
//! - Configuration is resolved once from cli, environment, preferences and
//!   defaults, in that order
//! - All widget communication goes through the bus; the container only
//!   delivers user input and reads the surface

pub mod config;
pub mod dashboard;

pub use config::{ConfigError, ConfigLayer, DashboardConfig, DEFAULT_PORT, DEFAULT_PREFS_PATH};
pub use dashboard::Dashboard;
