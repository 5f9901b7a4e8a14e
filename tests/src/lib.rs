//! # Utility-Dashboard Test Suite
//!
//! Unified test crate for behavior that spans several crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs   # Store + projections + widgets on fixed figures
//!     └── lifecycle.rs   # Whole pages booted and unloaded via the runtime
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ud-tests
//! cargo test -p ud-tests integration::lifecycle::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
