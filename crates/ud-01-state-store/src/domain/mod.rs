//! Pure state rules, no I/O.

pub mod goal;
pub mod keywords;

pub use goal::{clamp_goal, parse_goal_input};
pub use keywords::{remember_keyword, MAX_RECENT_KEYWORDS};
