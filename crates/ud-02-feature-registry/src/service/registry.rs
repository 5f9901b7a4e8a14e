//! # Feature Registry
//!
//! Holds features in registration order and drives them through
//! `Registered -> Mounted | Skipped -> Unmounted`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = FeatureRegistry::new();
//! registry.register(CoreUi::new())?.register(DataLoader::new(source))?;
//!
//! let report = registry.init(ctx)?;   // async mounts keep running
//! registry.settle().await;            // optional: wait for them
//!
//! // page unload
//! let report = registry.teardown();
//! ```

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    FeatureContext, FeatureFailure, FeatureInfo, FeatureState, InitReport, LifecycleStage,
    MountHandle, SkipReason, TeardownReport,
};
use crate::error::{FeatureError, RegistryError};
use crate::ports::Feature;

struct FeatureEntry {
    feature: Arc<dyn Feature>,
    info: FeatureInfo,
    state: FeatureState,
    handle: Option<MountHandle>,
}

impl FeatureEntry {
    fn id(&self) -> &str {
        &self.info.id
    }

    fn failure(&self, stage: LifecycleStage, error: FeatureError) -> FeatureFailure {
        warn!(feature = %self.id(), stage = ?stage, error = %error, "Feature hook failed");
        FeatureFailure {
            feature: self.info.id.clone(),
            stage,
            error,
        }
    }
}

/// Ordered registry of features.
#[derive(Default)]
pub struct FeatureRegistry {
    entries: Vec<FeatureEntry>,
    ids: HashSet<String>,
    /// Set by `init`; reused for every unmount.
    context: Option<FeatureContext>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature.
    ///
    /// # Errors
    ///
    /// Rejects an empty or duplicate id, an empty page set, and any
    /// registration after `init`.
    pub fn register<F>(&mut self, feature: F) -> Result<&mut Self, RegistryError>
    where
        F: Feature + 'static,
    {
        self.register_shared(Arc::new(feature))
    }

    /// Append an already shared feature.
    pub fn register_shared(
        &mut self,
        feature: Arc<dyn Feature>,
    ) -> Result<&mut Self, RegistryError> {
        if self.context.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }

        let info = feature.info();
        if info.id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if info.pages.as_ref().is_some_and(|pages| pages.is_empty()) {
            return Err(RegistryError::EmptyPageSet(info.id));
        }
        if !self.ids.insert(info.id.clone()) {
            return Err(RegistryError::DuplicateId(info.id));
        }

        debug!(feature = %info.id, position = self.entries.len(), "Feature registered");
        self.entries.push(FeatureEntry {
            feature,
            info,
            state: FeatureState::Registered,
            handle: None,
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(FeatureEntry::id).collect()
    }

    pub fn state(&self, id: &str) -> Option<FeatureState> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| entry.state)
    }

    /// Ids currently mounted, in registration order.
    pub fn mounted_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.state.is_mounted())
            .map(FeatureEntry::id)
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Whether any asynchronous mount is still running.
    pub fn has_pending_mounts(&self) -> bool {
        self.entries
            .iter()
            .filter_map(|entry| entry.handle.as_ref())
            .any(MountHandle::has_pending_mount)
    }

    /// Evaluate and mount every registered feature, in order.
    ///
    /// A feature mounts when its page set (if any) contains `ctx.page` and
    /// its `when` holds. Asynchronous mounts are started but not awaited.
    ///
    /// # Errors
    ///
    /// Only [`RegistryError::AlreadyInitialized`]; feature failures are
    /// collected into the report.
    pub fn init(&mut self, ctx: FeatureContext) -> Result<InitReport, RegistryError> {
        if self.context.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        info!(page = %ctx.page, features = self.entries.len(), "Initializing features");

        let mut report = InitReport::default();
        for entry in &mut self.entries {
            if !entry.info.applies_to(ctx.page) {
                skip(entry, SkipReason::PageMismatch, &mut report);
                continue;
            }

            let feature = Arc::clone(&entry.feature);
            match catch(|| feature.when(&ctx)) {
                Ok(true) => {}
                Ok(false) => {
                    skip(entry, SkipReason::PredicateFalse, &mut report);
                    continue;
                }
                Err(error) => {
                    report.failures.push(entry.failure(LifecycleStage::When, error));
                    skip(entry, SkipReason::PredicateFailed, &mut report);
                    continue;
                }
            }

            entry.state = FeatureState::Mounted;
            let handle = match catch(|| feature.mount(&ctx)).and_then(|result| result) {
                Ok(handle) => {
                    info!(feature = %entry.id(), "Feature mounted");
                    handle
                }
                Err(error) => {
                    report.failures.push(entry.failure(LifecycleStage::Mount, error));
                    MountHandle::new()
                }
            };
            entry.handle = Some(handle);
            report.mounted.push(entry.info.id.clone());
        }

        info!(
            mounted = report.mounted.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "Features initialized"
        );
        self.context = Some(ctx);
        Ok(report)
    }

    /// Wait for every outstanding asynchronous mount to finish.
    ///
    /// Returns the failures of those mounts. Aborted mounts are not failures.
    pub async fn settle(&mut self) -> Vec<FeatureFailure> {
        let mut failures = Vec::new();
        for entry in &mut self.entries {
            let Some(handle) = entry.handle.as_mut() else {
                continue;
            };
            let Some(task) = handle.pending_mut() else {
                continue;
            };

            let outcome = task.await;
            handle.clear_pending();

            let error = match outcome {
                Ok(Ok(())) => {
                    debug!(feature = %entry.id(), "Async mount completed");
                    continue;
                }
                Ok(Err(error)) => error,
                Err(join) if join.is_cancelled() => continue,
                Err(join) => FeatureError::Task(join.to_string()),
            };
            failures.push(entry.failure(LifecycleStage::AsyncMount, error));
        }
        failures
    }

    /// Unmount every mounted feature, in registration order.
    ///
    /// For each: abort a still-running async mount, run the unmount hook,
    /// then release the mount handle. Failures are collected, never
    /// propagated. Calling it again is a no-op.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        let Some(ctx) = self.context.clone() else {
            debug!("Teardown before init, nothing mounted");
            return report;
        };

        for entry in &mut self.entries {
            if !entry.state.is_mounted() {
                continue;
            }

            let mut handle = entry.handle.take().unwrap_or_default();
            if handle.cancel_pending() {
                info!(feature = %entry.id(), "Pending async mount aborted");
                report.cancelled_mounts.push(entry.info.id.clone());
            }

            let feature = Arc::clone(&entry.feature);
            if let Err(error) = catch(|| feature.unmount(&ctx)).and_then(|result| result) {
                report
                    .failures
                    .push(entry.failure(LifecycleStage::Unmount, error));
            }

            handle.release();
            entry.state = FeatureState::Unmounted;
            info!(feature = %entry.id(), "Feature unmounted");
            report.unmounted.push(entry.info.id.clone());
        }
        report
    }
}

fn skip(entry: &mut FeatureEntry, reason: SkipReason, report: &mut InitReport) {
    debug!(feature = %entry.id(), reason = %reason, "Feature skipped");
    entry.state = FeatureState::Skipped(reason);
    report.skipped.push((entry.info.id.clone(), reason));
}

/// Run a hook, turning a panic into [`FeatureError::Panicked`].
fn catch<R>(hook: impl FnOnce() -> R) -> Result<R, FeatureError> {
    panic::catch_unwind(AssertUnwindSafe(hook))
        .map_err(|payload| FeatureError::Panicked(panic_detail(payload.as_ref())))
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
