//! # Dashboard Runtime Library
//!
//! Exposes the container for tests. The main entry point is the `main.rs`
//! binary.
//!
//! ## Boot sequence
//!
//! 1. Telemetry (`dashboard-telemetry`)
//! 2. Preferences (JSON file, or memory with `--ephemeral`)
//! 3. Layered [`DashboardConfig`]
//! 4. [`Dashboard::build`] wires bus, store, surface and features
//! 5. [`Dashboard::boot`] mounts the features for the page
//! 6. [`Dashboard::unload`] on Ctrl-C, or right away with `--once`

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod container;

pub use container::{ConfigError, ConfigLayer, Dashboard, DashboardConfig};
