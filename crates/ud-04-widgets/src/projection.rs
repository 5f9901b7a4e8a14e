//! Pure projections from state to displayed values.
//!
//! Percentages use half-up rounding on the exact ratio, so
//! `(32600 - 37000) / 37000 * 100 = -11.89` shows as `-12`.

use shared_types::entities::{category, DashboardState, Totals, Won};
use shared_types::format::{format_won, percent_of};

/// How this month compares with the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
    Same,
}

impl Direction {
    pub fn from_percent(percent: i64) -> Self {
        match percent {
            p if p > 0 => Direction::Higher,
            p if p < 0 => Direction::Lower,
            _ => Direction::Same,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Higher => "▲",
            Direction::Lower => "▼",
            Direction::Same => "•",
        }
    }
}

/// `round((now - last) / last * 100)`, or 0 without a previous total.
pub fn percent_change(totals: Totals) -> i64 {
    if totals.last == 0 {
        return 0;
    }
    percent_of(totals.now as f64 - totals.last as f64, totals.last as f64)
}

/// Sentence shown under the total.
pub fn delta_text(percent: i64) -> String {
    let direction = Direction::from_percent(percent);
    match direction {
        Direction::Higher => format!(
            "{}% higher than last month {}",
            percent.abs(),
            direction.symbol()
        ),
        Direction::Lower => format!(
            "{}% lower than last month! {}",
            percent.abs(),
            direction.symbol()
        ),
        Direction::Same => "Same as last month.".to_string(),
    }
}

/// Widths of the last/current comparison bars, relative to the larger.
pub fn bar_widths(totals: Totals) -> (i64, i64) {
    let max = totals.now.max(totals.last).max(1) as f64;
    (
        percent_of(totals.last as f64, max),
        percent_of(totals.now as f64, max),
    )
}

/// Share of `amount` in the current total, which is floored to 1.
pub fn share(amount: Won, now: Won) -> i64 {
    percent_of(amount as f64, now.max(1) as f64)
}

/// Categories that can fill the second card, in order of preference.
const SECONDARY_CATEGORIES: [(&str, &str); 2] =
    [(category::WATER, "Water"), (category::GAS, "Gas")];

/// The category shown next to electricity: water when the breakdown has it
/// (mock data), otherwise gas (backend donut).
pub fn secondary_category(state: &DashboardState) -> (&'static str, &'static str) {
    SECONDARY_CATEGORIES
        .into_iter()
        .find(|(key, _)| state.breakdown.contains(key))
        .unwrap_or(SECONDARY_CATEGORIES[0])
}

/// Summary figures for the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_text: String,
    pub percent_change: i64,
    pub direction: Direction,
    pub delta_text: String,
    pub bar_last: i64,
    pub bar_now: i64,
    pub electricity: Won,
    pub electricity_share: i64,
    /// Breakdown key of the second card.
    pub secondary_category: &'static str,
    pub secondary_label: &'static str,
    pub secondary: Won,
    pub secondary_share: i64,
}

impl SummaryView {
    pub fn of(state: &DashboardState) -> Self {
        let totals = state.totals;
        let percent = percent_change(totals);
        let (bar_last, bar_now) = bar_widths(totals);
        let electricity = state.breakdown.get(category::ELECTRICITY);
        let (secondary_category, secondary_label) = secondary_category(state);
        let secondary = state.breakdown.get(secondary_category);
        Self {
            total_text: format_won(totals.now as f64),
            percent_change: percent,
            direction: Direction::from_percent(percent),
            delta_text: delta_text(percent),
            bar_last,
            bar_now,
            electricity,
            electricity_share: share(electricity, totals.now),
            secondary_category,
            secondary_label,
            secondary,
            secondary_share: share(secondary, totals.now),
        }
    }
}

/// Amount saved against last month, never negative.
pub fn saved_amount(totals: Totals) -> Won {
    totals.last.saturating_sub(totals.now)
}

/// Savings goal progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalView {
    pub saved: Won,
    pub goal: Won,
    /// 0-100.
    pub percent: i64,
    pub saved_text: String,
    pub hint: String,
    /// Goal set and reached.
    pub reached: bool,
}

impl GoalView {
    pub fn of(state: &DashboardState) -> Self {
        let saved = saved_amount(state.totals);
        let goal = state.goal_won;
        let (percent, hint) = if goal > 0 {
            let remaining = goal.saturating_sub(saved);
            (
                percent_of(saved as f64, goal as f64).min(100),
                format!(
                    "Goal: {} · Remaining {}",
                    format_won(goal as f64),
                    format_won(remaining as f64)
                ),
            )
        } else {
            (0, "Set a goal to track your progress".to_string())
        };
        Self {
            saved,
            goal,
            percent,
            saved_text: format!("Saved this month: {}", format_won(saved as f64)),
            hint,
            reached: goal > 0 && saved >= goal,
        }
    }
}
