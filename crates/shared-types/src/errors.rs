//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Client-side input validation failures.
///
/// These are raised before any network call and carry an HTTP-like status
/// so callers can surface them the same way as a server-side 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Period is not `YYYY-MM` with a month in 01-12.
    #[error("periodYm must be YYYY-MM, got {0:?}")]
    InvalidPeriod(String),

    /// Savings goal below zero.
    #[error("savingGoalWon must be >= 0, got {0}")]
    NegativeGoal(i64),

    /// Page identifier not recognised.
    #[error("unknown page: {0:?}")]
    UnknownPage(String),
}

impl ValidationError {
    /// Status-like code reported to the caller.
    pub fn status(&self) -> u16 {
        400
    }
}

/// Errors from the preference (local key/value) store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Reading or writing the backing file failed.
    #[error("Preference I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file is not a JSON object of strings.
    #[error("Preference file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status_is_client_error() {
        let err = ValidationError::InvalidPeriod("2025-13".into());
        assert_eq!(err.status(), 400);
        assert!(err.to_string().contains("2025-13"));
        assert_eq!(ValidationError::NegativeGoal(-5).status(), 400);
    }
}
