//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::events::{DashboardEvent, EventName};
use crate::subscriber::{EmitReport, Handler, HandlerError, HandlerFailure, Subscription};

/// Trait for publishing typed dashboard events.
pub trait EventPublisher: Send + Sync {
    /// Publish an event under its own name.
    ///
    /// # Returns
    ///
    /// The delivery report for the emit.
    fn publish(&self, event: DashboardEvent) -> EmitReport;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// The bus used by the dashboard.
pub type DashboardBus = EventBus<DashboardEvent>;

/// In-process publish/subscribe bus keyed by event name.
///
/// Cloning yields another handle to the same bus.
pub struct EventBus<P> {
    inner: Arc<BusInner<P>>,
}

struct BusInner<P> {
    /// Handlers per event, in registration order.
    handlers: RwLock<HashMap<EventName, Vec<Handler<P>>>>,

    /// Total emits.
    events_emitted: AtomicU64,

    /// Total handler failures across all emits.
    handler_failures: AtomicU64,
}

fn same_handler<P>(a: &Handler<P>, b: &Handler<P>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl<P> BusInner<P> {
    fn remove(&self, event: &EventName, handler: &Handler<P>) -> bool {
        let mut handlers = self.handlers.write();
        let Some(list) = handlers.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|h| !same_handler(h, handler));
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(event);
        }
        removed
    }

    fn is_registered(&self, event: &EventName, handler: &Handler<P>) -> bool {
        self.handlers
            .read()
            .get(event)
            .is_some_and(|list| list.iter().any(|h| same_handler(h, handler)))
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Send + Sync + 'static> EventBus<P> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                handlers: RwLock::new(HashMap::new()),
                events_emitted: AtomicU64::new(0),
                handler_failures: AtomicU64::new(0),
            }),
        }
    }

    /// Register `handler` for `event`.
    ///
    /// Registering a handler that is already present for this event keeps
    /// the single existing entry.
    pub fn on(&self, event: impl Into<EventName>, handler: Handler<P>) -> Subscription {
        let event = event.into();
        {
            let mut handlers = self.inner.handlers.write();
            let list = handlers.entry(event.clone()).or_default();
            if list.iter().any(|h| same_handler(h, &handler)) {
                debug!(event = %event, "Handler already registered");
            } else {
                list.push(Arc::clone(&handler));
                debug!(event = %event, handlers = list.len(), "Handler registered");
            }
        }

        let weak = Arc::downgrade(&self.inner);
        let target = event.clone();
        Subscription::new(event, move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove(&target, &handler);
            }
        })
    }

    /// Register a closure for `event`.
    pub fn on_fn<F>(&self, event: impl Into<EventName>, f: F) -> Subscription
    where
        F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.on(event, Arc::new(f))
    }

    /// Remove `handler` from `event`. Absent handlers are ignored.
    ///
    /// # Returns
    ///
    /// Whether a handler was removed.
    pub fn off(&self, event: &EventName, handler: &Handler<P>) -> bool {
        self.inner.remove(event, handler)
    }

    /// Deliver `payload` to every handler registered for `event`.
    ///
    /// Handlers run synchronously in registration order. A handler removed
    /// by an earlier handler in the same sweep is skipped; a handler added
    /// during the sweep first sees the next emit.
    pub fn emit(&self, event: &EventName, payload: &P) -> EmitReport {
        self.inner.events_emitted.fetch_add(1, Ordering::Relaxed);

        // Snapshot so handlers may call on/off/emit without deadlocking.
        let snapshot: Vec<Handler<P>> = self
            .inner
            .handlers
            .read()
            .get(event)
            .cloned()
            .unwrap_or_default();

        let mut report = EmitReport::new(event.clone());
        for (position, handler) in snapshot.iter().enumerate() {
            if !self.inner.is_registered(event, handler) {
                continue;
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (**handler)(payload)));
            let error = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(error)) => error,
                Err(panic_payload) => HandlerError::panicked(&panic_detail(panic_payload.as_ref())),
            };

            warn!(event = %event, position, error = %error, "Event handler failed");
            report.failures.push(HandlerFailure { position, error });
        }

        if !report.failures.is_empty() {
            self.inner
                .handler_failures
                .fetch_add(report.failures.len() as u64, Ordering::Relaxed);
        }
        debug!(
            event = %event,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Event emitted"
        );
        report
    }

    /// Number of handlers currently registered for `event`.
    #[must_use]
    pub fn handler_count(&self, event: &EventName) -> usize {
        self.inner.handlers.read().get(event).map_or(0, Vec::len)
    }

    /// Total number of emits.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.inner.events_emitted.load(Ordering::Relaxed)
    }

    /// Total number of handler failures.
    #[must_use]
    pub fn handler_failures(&self) -> u64 {
        self.inner.handler_failures.load(Ordering::Relaxed)
    }
}

impl<P: Send + Sync + 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for EventBus<DashboardEvent> {
    fn publish(&self, event: DashboardEvent) -> EmitReport {
        let name = event.name();
        self.emit(&name, &event)
    }

    fn events_published(&self) -> u64 {
        self.events_emitted()
    }
}
