//! # Mount Handle
//!
//! Everything a mounted feature must release at teardown: bus
//! subscriptions, background tasks (timers), close functions of external
//! streams and, for asynchronous mounts, the still-running mount task.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::Subscription;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::FeatureError;

type Closer = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Resources {
    subscriptions: Vec<Subscription>,
    tasks: Vec<JoinHandle<()>>,
    closers: Vec<Closer>,
    released: bool,
}

impl Resources {
    fn release(&mut self) -> (Vec<Subscription>, Vec<JoinHandle<()>>, Vec<Closer>) {
        self.released = true;
        (
            std::mem::take(&mut self.subscriptions),
            std::mem::take(&mut self.tasks),
            std::mem::take(&mut self.closers),
        )
    }
}

/// Cloneable view of a handle's resources.
///
/// Given to asynchronous mount tasks so that subscriptions they make after
/// `mount` returned are still released at teardown. Anything handed over
/// after the handle was released is released immediately.
#[derive(Clone, Default)]
pub struct ResourceKeeper {
    resources: Arc<Mutex<Resources>>,
}

impl ResourceKeeper {
    pub fn hold_subscription(&self, subscription: Subscription) {
        let mut resources = self.resources.lock();
        if resources.released {
            drop(resources);
            subscription.unsubscribe();
            return;
        }
        resources.subscriptions.push(subscription);
    }

    pub fn hold_task(&self, task: JoinHandle<()>) {
        let mut resources = self.resources.lock();
        if resources.released {
            task.abort();
            return;
        }
        resources.tasks.push(task);
    }

    /// Register a close function, e.g. the one that ends an event stream.
    pub fn hold_closer(&self, close: impl FnOnce() + Send + 'static) {
        let mut resources = self.resources.lock();
        if resources.released {
            drop(resources);
            close();
            return;
        }
        resources.closers.push(Box::new(close));
    }

    /// Whether the owning feature has been torn down.
    pub fn is_released(&self) -> bool {
        self.resources.lock().released
    }

    /// Release everything, outside the lock so closers may re-enter.
    fn release(&self) -> (usize, usize, usize) {
        let (subscriptions, tasks, closers) = self.resources.lock().release();
        let counts = (subscriptions.len(), tasks.len(), closers.len());
        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        for task in tasks {
            task.abort();
        }
        for close in closers {
            close();
        }
        counts
    }
}

/// Resources owned by one mounted feature.
#[derive(Default)]
pub struct MountHandle {
    keeper: ResourceKeeper,
    pending: Option<JoinHandle<Result<(), FeatureError>>>,
}

impl MountHandle {
    /// A handle holding nothing.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.keeper.hold_subscription(subscription);
        self
    }

    #[must_use]
    pub fn with_task(self, task: JoinHandle<()>) -> Self {
        self.keeper.hold_task(task);
        self
    }

    #[must_use]
    pub fn with_closer(self, close: impl FnOnce() + Send + 'static) -> Self {
        self.keeper.hold_closer(close);
        self
    }

    /// Spawn the asynchronous remainder of a mount.
    ///
    /// The registry does not wait for it during `init`; `settle` awaits it
    /// and `teardown` aborts it if it is still running.
    #[must_use]
    pub fn with_async_mount<F>(mut self, mount: F) -> Self
    where
        F: Future<Output = Result<(), FeatureError>> + Send + 'static,
    {
        self.pending = Some(tokio::spawn(mount));
        self
    }

    /// Keeper for resources acquired later (e.g. inside an async mount).
    pub fn keeper(&self) -> ResourceKeeper {
        self.keeper.clone()
    }

    /// Whether an asynchronous mount is still outstanding.
    pub fn has_pending_mount(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub(crate) fn pending_mut(&mut self) -> Option<&mut JoinHandle<Result<(), FeatureError>>> {
        self.pending.as_mut()
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Abort a still-running async mount. Returns whether one was aborted.
    pub(crate) fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }

    /// Unsubscribe everything and abort background tasks.
    pub fn release(mut self) {
        self.cancel_pending();
        let (subscriptions, tasks, closers) = self.keeper.release();
        debug!(subscriptions, tasks, closers, "Mount handle released");
    }
}

impl fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resources = self.keeper.resources.lock();
        f.debug_struct("MountHandle")
            .field("subscriptions", &resources.subscriptions.len())
            .field("tasks", &resources.tasks.len())
            .field("closers", &resources.closers.len())
            .field("pending_mount", &self.pending.is_some())
            .finish()
    }
}
