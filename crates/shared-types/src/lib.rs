//! # Shared Types Crate
//!
//! Domain entities and small building blocks shared by every dashboard crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The state record, its patch type and the
//!   alert payload are defined once, here.
//! - **Validated at the edge**: A [`Period`] can only be constructed from a
//!   well-formed `YYYY-MM` string, so downstream code never re-checks it.
//! - **No ambient globals**: Persistence goes through the [`PreferenceStore`]
//!   port and output goes through an explicit [`Surface`].

pub mod entities;
pub mod errors;
pub mod format;
pub mod preferences;
pub mod surface;

pub use entities::*;
pub use errors::*;
pub use format::{format_clock, format_won, percent_of, round_half_up};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use surface::{Slot, Surface};
