//! Aggregated outcomes of `init`, `settle` and `teardown`.

use crate::domain::info::SkipReason;
use crate::error::FeatureError;

/// Which hook a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    When,
    Mount,
    AsyncMount,
    Unmount,
}

impl LifecycleStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::When => "when",
            LifecycleStage::Mount => "mount",
            LifecycleStage::AsyncMount => "async_mount",
            LifecycleStage::Unmount => "unmount",
        }
    }
}

/// A suppressed failure of one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFailure {
    pub feature: String,
    pub stage: LifecycleStage,
    pub error: FeatureError,
}

/// Outcome of `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Features that were mounted, in registration order.
    pub mounted: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
    pub failures: Vec<FeatureFailure>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of `teardown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Features whose unmount ran, in registration order.
    pub unmounted: Vec<String>,
    /// Features whose async mount was still running and got aborted.
    pub cancelled_mounts: Vec<String>,
    pub failures: Vec<FeatureFailure>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
