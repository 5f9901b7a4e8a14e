//! Error types for feature lifecycle and registration.

use thiserror::Error;

/// Failure raised by a single feature. Always contained by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("mount failed: {0}")]
    Mount(String),

    #[error("unmount failed: {0}")]
    Unmount(String),

    /// A lifecycle hook panicked instead of returning.
    #[error("panicked: {0}")]
    Panicked(String),

    /// The asynchronous part of a mount ended abnormally.
    #[error("async mount task failed: {0}")]
    Task(String),

    /// A collaborator the feature depends on failed.
    #[error("{0}")]
    Dependency(String),
}

/// Errors rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("feature id must not be empty")]
    EmptyId,

    #[error("feature {0:?} is already registered")]
    DuplicateId(String),

    /// `pages` was given but lists no page, so the feature could never mount.
    #[error("feature {0:?} restricts itself to an empty page set")]
    EmptyPageSet(String),

    #[error("registry already initialized")]
    AlreadyInitialized,
}
