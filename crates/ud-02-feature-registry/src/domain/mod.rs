//! Domain layer: feature metadata, lifecycle state, mount context and
//! the resources a mounted feature holds.

pub mod context;
pub mod handle;
pub mod info;
pub mod report;

pub use context::FeatureContext;
pub use handle::{MountHandle, ResourceKeeper};
pub use info::{FeatureInfo, FeatureState, SkipReason};
pub use report::{FeatureFailure, InitReport, LifecycleStage, TeardownReport};
