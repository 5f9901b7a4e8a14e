//! # Feature Contract
//!
//! A feature attaches a piece of dashboard behaviour to the current page.
//!
//! ```rust,ignore
//! struct Clock;
//!
//! impl Feature for Clock {
//!     fn info(&self) -> FeatureInfo { FeatureInfo::new("clock") }
//!     fn when(&self, ctx: &FeatureContext) -> bool { ctx.has_any(&["clock"]) }
//!     fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
//!         Ok(MountHandle::new().with_task(spawn_ticker(ctx.clone())))
//!     }
//! }
//! ```

use crate::domain::{FeatureContext, FeatureInfo, MountHandle};
use crate::error::FeatureError;

/// The lifecycle contract of a feature.
pub trait Feature: Send + Sync {
    /// Identifier and page restriction. Read once, at registration.
    fn info(&self) -> FeatureInfo;

    /// Runtime applicability. Defaults to always applicable.
    fn when(&self, _ctx: &FeatureContext) -> bool {
        true
    }

    /// Attach to the page.
    ///
    /// Synchronous work happens here; asynchronous work is handed to the
    /// returned handle via [`MountHandle::with_async_mount`].
    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError>;

    /// Extra teardown beyond releasing the mount handle, which the registry
    /// always does after this hook returns.
    fn unmount(&self, _ctx: &FeatureContext) -> Result<(), FeatureError> {
        Ok(())
    }
}
