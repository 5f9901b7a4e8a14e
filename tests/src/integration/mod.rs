//! Cross-crate integration tests.

pub mod lifecycle;
pub mod scenarios;
