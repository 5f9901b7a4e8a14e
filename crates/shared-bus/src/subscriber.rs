//! # Event Subscriber
//!
//! Defines the subscription side of the event bus: handlers, the
//! unsubscribe handle and the per-emit delivery report.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::events::EventName;

/// Failure reported by a handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A handler that panicked instead of returning.
    pub(crate) fn panicked(detail: &str) -> Self {
        Self::new(format!("handler panicked: {detail}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A registered callback. Identity (the `Arc` allocation) is what `off`
/// and duplicate detection compare.
pub type Handler<P> = Arc<dyn Fn(&P) -> Result<(), HandlerError> + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<P, F>(f: F) -> Handler<P>
where
    F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One handler that failed during an emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Position of the handler in the delivery sweep.
    pub position: usize,
    pub error: HandlerError,
}

/// Outcome of a single `emit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    pub event: EventName,
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Handlers that failed; their siblings still ran.
    pub failures: Vec<HandlerFailure>,
}

impl EmitReport {
    pub(crate) fn new(event: EventName) -> Self {
        Self {
            event,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    /// True when every invoked handler succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type Cancel = Box<dyn FnOnce() + Send>;

/// Handle returned by `on`.
///
/// Calling [`Subscription::unsubscribe`] removes exactly the handler it was
/// created for from exactly its event; further calls are no-ops. Dropping
/// the handle does NOT unsubscribe.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    event: EventName,
    cancel: Mutex<Option<Cancel>>,
}

impl Subscription {
    pub(crate) fn new(event: EventName, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            event,
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Remove the handler. Idempotent.
    pub fn unsubscribe(&self) {
        let cancel = self.cancel.lock().take();
        match cancel {
            Some(cancel) => {
                cancel();
                debug!(event = %self.event, "Subscription removed");
            }
            None => debug!(event = %self.event, "Subscription already removed"),
        }
    }

    /// Whether `unsubscribe` has not been called yet.
    pub fn is_active(&self) -> bool {
        self.cancel.lock().is_some()
    }

    pub fn event(&self) -> &EventName {
        &self.event
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("active", &self.is_active())
            .finish()
    }
}
