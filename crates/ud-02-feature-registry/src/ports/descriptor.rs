//! Closure-built feature descriptor.

use std::fmt;
use std::sync::Arc;

use shared_types::entities::Page;

use crate::domain::{FeatureContext, FeatureInfo, MountHandle};
use crate::error::FeatureError;
use crate::ports::inbound::Feature;

type WhenFn = Arc<dyn Fn(&FeatureContext) -> bool + Send + Sync>;
type MountFn = Arc<dyn Fn(&FeatureContext) -> Result<MountHandle, FeatureError> + Send + Sync>;
type UnmountFn = Arc<dyn Fn(&FeatureContext) -> Result<(), FeatureError> + Send + Sync>;

/// A feature assembled from optional parts.
///
/// Absent parts fall back to the [`Feature`] defaults: no page restriction,
/// always applicable, a mount that holds nothing, no extra unmount work.
#[derive(Clone)]
pub struct FeatureDescriptor {
    info: FeatureInfo,
    when: Option<WhenFn>,
    mount: Option<MountFn>,
    unmount: Option<UnmountFn>,
}

impl FeatureDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            info: FeatureInfo::new(id),
            when: None,
            mount: None,
            unmount: None,
        }
    }

    #[must_use]
    pub fn pages(mut self, pages: impl IntoIterator<Item = Page>) -> Self {
        self.info = self.info.on_pages(pages);
        self
    }

    #[must_use]
    pub fn applies_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&FeatureContext) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(predicate));
        self
    }

    #[must_use]
    pub fn on_mount<F>(mut self, mount: F) -> Self
    where
        F: Fn(&FeatureContext) -> Result<MountHandle, FeatureError> + Send + Sync + 'static,
    {
        self.mount = Some(Arc::new(mount));
        self
    }

    #[must_use]
    pub fn on_unmount<F>(mut self, unmount: F) -> Self
    where
        F: Fn(&FeatureContext) -> Result<(), FeatureError> + Send + Sync + 'static,
    {
        self.unmount = Some(Arc::new(unmount));
        self
    }
}

impl Feature for FeatureDescriptor {
    fn info(&self) -> FeatureInfo {
        self.info.clone()
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        self.when.as_ref().map_or(true, |when| when(ctx))
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        match &self.mount {
            Some(mount) => mount(ctx),
            None => Ok(MountHandle::new()),
        }
    }

    fn unmount(&self, ctx: &FeatureContext) -> Result<(), FeatureError> {
        match &self.unmount {
            Some(unmount) => unmount(ctx),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDescriptor")
            .field("info", &self.info)
            .field("when", &self.when.is_some())
            .field("mount", &self.mount.is_some())
            .field("unmount", &self.unmount.is_some())
            .finish()
    }
}
