//! # UD-04 Widgets
//!
//! The concrete features of the dashboard. Each widget renders from the
//! current state on mount, re-renders on `state:changed`, and reacts to
//! user input delivered as `ui:input` events.
//!
//! | Feature | Pages | Applies when |
//! |---------|-------|--------------|
//! | `core-ui` | all | always |
//! | `data-loader` | all | always |
//! | `dashboard-render` | home | `totalPrice`, `donutElec` or `donutWater` exists |
//! | `savings-goal` | all | `goalForm` exists |
//! | `connection-toast` | all | `toast` exists |
//! | `search-logic` | search | `q` exists |
//! | `alerts-feed` | alerts | `alertList` exists |
//!
//! Widgets only write to the render [`Surface`](shared_types::Surface) and
//! only mutate shared state through the store's entry points.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod clipboard;
pub mod features;
pub mod layout;
pub mod projection;
pub mod source;
pub mod toast;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use features::{dashboard_features, register_dashboard_features, WidgetDeps};
pub use layout::{slots, surface_for};
pub use source::{ApiUsageSource, MockUsageSource, UsageSnapshot, UsageSource};
