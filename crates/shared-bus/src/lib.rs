//! # Shared Bus - Event Bus for Widget Synchronisation
//!
//! Producers (the state store, data loaders, the alert stream) and consumers
//! (widgets) never reference each other directly; both only know the bus.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ State Store  │                    │   Widget     │
//! │              │     emit()         │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘    on()
//! ```
//!
//! ## Delivery Rules
//!
//! - `emit` is synchronous: every handler registered for the event runs, in
//!   registration order, before `emit` returns.
//! - A handler that fails (returns `Err` or panics) never stops its siblings
//!   and never propagates to the emitter; failures are collected into the
//!   returned [`EmitReport`] and logged.
//! - Handlers are keyed by identity: registering the same [`Handler`] twice
//!   for one event is idempotent, distinct closures are independent.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{names, DashboardEvent, EventName, StreamStatus, UserInput};
pub use publisher::{DashboardBus, EventBus, EventPublisher};
pub use subscriber::{handler, EmitReport, Handler, HandlerError, HandlerFailure, Subscription};
