//! # UD-01 State Store
//!
//! The single mutable shared record of the dashboard.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure rules
//!   - goal clamping and form-input parsing
//!   - the bounded, de-duplicated recent keyword list
//! - **Ports Layer** (`ports/`): `StateStoreApi`, the driving port handed to
//!   features
//! - **Service Layer** (`service/`): `StateStore`, which owns the state,
//!   persists the goal through the preference port and announces every
//!   change on the bus
//!
//! ## Invariants
//!
//! - Every mutation goes through `patch`, `set_goal`, `clear_goal` or
//!   `add_recent_keyword`; readers only ever receive snapshots.
//! - Each of those emits `state:changed` with the full updated state,
//!   except `add_recent_keyword` when the list did not change.
//! - The recent keyword list never exceeds `MAX_RECENT_KEYWORDS` entries.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{clamp_goal, parse_goal_input, remember_keyword, MAX_RECENT_KEYWORDS};
pub use ports::StateStoreApi;
pub use service::StateStore;
