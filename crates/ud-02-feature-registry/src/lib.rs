//! # UD-02 Feature Registry
//!
//! Ordered collection of feature descriptors, mounted against the current
//! page and torn down when the page goes away.
//!
//! ## Lifecycle
//!
//! ```text
//! Registered ──init()──┬──> Mounted ──teardown()──> Unmounted
//!                      └──> Skipped   (page mismatch or `when` false; final)
//! ```
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`FeatureInfo`], [`FeatureState`],
//!   [`FeatureContext`], [`MountHandle`] and the init/teardown reports
//! - **Ports Layer** (`ports/`): the [`Feature`] trait and the closure-based
//!   [`FeatureDescriptor`]
//! - **Service Layer** (`service/`): [`FeatureRegistry`]
//!
//! ## Invariants
//!
//! - Features are evaluated and torn down in registration order.
//! - A failing `when`, `mount` or `unmount` never stops its siblings; every
//!   suppressed failure is collected into the returned report.
//! - Asynchronous mounts are tracked. `teardown` aborts any that are still
//!   running before releasing the feature's subscriptions and tasks.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{
    FeatureContext, FeatureFailure, FeatureInfo, FeatureState, InitReport, LifecycleStage,
    MountHandle, ResourceKeeper, SkipReason, TeardownReport,
};
pub use error::{FeatureError, RegistryError};
pub use ports::{Feature, FeatureDescriptor};
pub use service::FeatureRegistry;
