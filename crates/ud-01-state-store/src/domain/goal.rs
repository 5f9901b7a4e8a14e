//! Savings goal rules.

use shared_types::entities::Won;
use shared_types::format::round_half_up;

/// Clamp a requested goal to a non-negative whole amount.
///
/// Rounds to the nearest won (halves up); negatives and non-finite input
/// become 0.
pub fn clamp_goal(amount: f64) -> Won {
    let rounded = round_half_up(amount);
    u64::try_from(rounded).unwrap_or(0)
}

/// Goal form text to an amount. Surrounding whitespace is ignored; blank
/// text, separators, currency words and any other non-numeric text read
/// as 0, as does infinity.
pub fn parse_goal_input(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
