//! # Core Domain Entities
//!
//! Defines the dashboard's shared state record and the values that flow
//! into it.
//!
//! ## Clusters
//!
//! - **Navigation**: `Page`, `Period`
//! - **Spending**: `Totals`, `Breakdown`, `Won`
//! - **Shared State**: `DashboardState`, `StatePatch`
//! - **Alerts**: `Alert`, `AlertLevel`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

// =============================================================================
// CLUSTER A: NAVIGATION
// =============================================================================

/// An amount of money in whole won.
pub type Won = u64;

/// The page the dashboard is currently showing.
///
/// Features restrict themselves to a subset of pages; the page is fixed for
/// the lifetime of one boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Summary dashboard (index).
    #[default]
    Home,
    /// Cost breakdown.
    Cost,
    /// Usage analytics.
    Analytics,
    /// Alert feed.
    Alerts,
    /// Settings.
    Settings,
    /// Usage log.
    Log,
    /// Keyword search.
    Search,
    /// Savings goal editor.
    Goals,
}

impl Page {
    /// Every known page, in navigation order.
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::Cost,
        Page::Analytics,
        Page::Alerts,
        Page::Settings,
        Page::Log,
        Page::Search,
        Page::Goals,
    ];

    /// Stable lowercase identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Cost => "cost",
            Page::Analytics => "analytics",
            Page::Alerts => "alerts",
            Page::Settings => "settings",
            Page::Log => "log",
            Page::Search => "search",
            Page::Goals => "goals",
        }
    }

    /// Index of the navigation dot highlighted for this page.
    ///
    /// Log and search live under the analytics tab.
    #[must_use]
    pub fn nav_index(&self) -> usize {
        match self {
            Page::Home => 0,
            Page::Cost => 1,
            Page::Analytics | Page::Log | Page::Search => 2,
            Page::Alerts => 3,
            Page::Settings => 4,
            Page::Goals => 0,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownPage(s.to_string()))
    }
}

/// A calendar year-month in fixed `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    /// Parse a `YYYY-MM` string.
    ///
    /// Exactly four digits, a dash and two digits; the month must be 01-12.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPeriod(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let digits_ok = bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
        if !digits_ok {
            return Err(invalid());
        }

        let year: u16 = raw[..4].parse().map_err(|_| invalid())?;
        let month: u8 = raw[5..].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// The period containing today's local date.
    #[must_use]
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: u16::try_from(today.year()).unwrap_or(0),
            month: u8::try_from(today.month()).unwrap_or(1),
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// The month before, crossing year boundaries.
    #[must_use]
    pub fn previous(&self) -> Self {
        match self.month {
            1 => Self {
                year: self.year.saturating_sub(1),
                month: 12,
            },
            month => Self {
                year: self.year,
                month: month - 1,
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

// =============================================================================
// CLUSTER B: SPENDING
// =============================================================================

/// Well-known breakdown categories.
pub mod category {
    pub const ELECTRICITY: &str = "electricity";
    pub const WATER: &str = "water";
    pub const GAS: &str = "gas";
}

/// Spending totals for the current and previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Current period total.
    pub now: Won,
    /// Previous period total.
    pub last: Won,
}

impl Totals {
    pub fn new(now: Won, last: Won) -> Self {
        Self { now, last }
    }
}

/// Spending per category for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Breakdown(BTreeMap<String, Won>);

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, category: impl Into<String>, amount: Won) -> Self {
        self.0.insert(category.into(), amount);
        self
    }

    /// Amount for a category; absent categories read as zero.
    #[must_use]
    pub fn get(&self, category: &str) -> Won {
        self.0.get(category).copied().unwrap_or(0)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Won)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// CLUSTER C: SHARED STATE
// =============================================================================

/// The single shared state record.
///
/// Only the state store mutates it; everyone else sees snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardState {
    /// Page identifier for this boot.
    pub page: Page,
    /// Current/previous totals.
    pub totals: Totals,
    /// Category breakdown.
    pub breakdown: Breakdown,
    /// Savings goal in won (0 = no goal).
    pub goal_won: Won,
    /// Recent search keywords, most recent first.
    pub recent_keywords: Vec<String>,
}

impl DashboardState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal_won: Won) -> Self {
        self.goal_won = goal_won;
        self
    }
}

/// A partial update to [`DashboardState`].
///
/// Each `Some` field replaces the current value wholesale (shallow merge).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatePatch {
    pub page: Option<Page>,
    pub totals: Option<Totals>,
    pub breakdown: Option<Breakdown>,
    pub goal_won: Option<Won>,
    pub recent_keywords: Option<Vec<String>>,
}

impl StatePatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn totals(mut self, totals: Totals) -> Self {
        self.totals = Some(totals);
        self
    }

    #[must_use]
    pub fn breakdown(mut self, breakdown: Breakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    #[must_use]
    pub fn goal_won(mut self, goal_won: Won) -> Self {
        self.goal_won = Some(goal_won);
        self
    }

    #[must_use]
    pub fn recent_keywords(mut self, keywords: Vec<String>) -> Self {
        self.recent_keywords = Some(keywords);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.totals.is_none()
            && self.breakdown.is_none()
            && self.goal_won.is_none()
            && self.recent_keywords.is_none()
    }

    /// Merge into `state`, returning the names of the fields written.
    pub fn apply_to(self, state: &mut DashboardState) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(page) = self.page {
            state.page = page;
            written.push("page");
        }
        if let Some(totals) = self.totals {
            state.totals = totals;
            written.push("totals");
        }
        if let Some(breakdown) = self.breakdown {
            state.breakdown = breakdown;
            written.push("breakdown");
        }
        if let Some(goal_won) = self.goal_won {
            state.goal_won = goal_won;
            written.push("goal_won");
        }
        if let Some(keywords) = self.recent_keywords {
            state.recent_keywords = keywords;
            written.push("recent_keywords");
        }
        written
    }
}

// =============================================================================
// CLUSTER D: ALERTS
// =============================================================================

/// Severity of a pushed alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AlertLevel {
    #[default]
    Info,
    Warn,
    Crit,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Warn => "WARN",
            AlertLevel::Crit => "CRIT",
        }
    }

    /// Badge style used when rendering the alert row.
    pub fn badge_class(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warn | AlertLevel::Crit => "warn",
        }
    }
}

/// Unknown levels degrade to `Info`.
impl From<String> for AlertLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "WARN" => AlertLevel::Warn,
            "CRIT" => AlertLevel::Crit,
            _ => AlertLevel::Info,
        }
    }
}

impl From<AlertLevel> for String {
    fn from(value: AlertLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alert pushed over the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    pub user_id: Option<u64>,
    pub category: Option<String>,
    pub level: AlertLevel,
    pub title: Option<String>,
    /// ISO-8601 timestamp, with or without offset.
    pub at: Option<String>,
}

impl Alert {
    /// Parse `at` into local time.
    ///
    /// Accepts RFC 3339 and offset-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read
    /// as local time). Returns `None` when absent or unparseable.
    pub fn at_local(&self) -> Option<DateTime<Local>> {
        let raw = self.at.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Local));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_valid() {
        let period = Period::parse("2025-08").unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 8);
        assert_eq!(period.to_string(), "2025-08");
    }

    #[test]
    fn test_period_rejects_bad_shapes() {
        for raw in ["2025-8", "25-08", "2025/08", "2025-08-01", "abcd-ef", "", " 2025-08"] {
            assert!(
                matches!(Period::parse(raw), Err(ValidationError::InvalidPeriod(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_period_rejects_month_out_of_range() {
        assert!(Period::parse("2025-13").is_err());
        assert!(Period::parse("2025-00").is_err());
        assert!(Period::parse("2025-12").is_ok());
    }

    #[test]
    fn test_period_previous_wraps_year() {
        assert_eq!(Period::parse("2025-08").unwrap().previous().to_string(), "2025-07");
        assert_eq!(Period::parse("2025-01").unwrap().previous().to_string(), "2024-12");
    }

    #[test]
    fn test_period_serde_as_string() {
        let period = Period::parse("2024-01").unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2024-01\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
        assert!(serde_json::from_str::<Period>("\"2024-1\"").is_err());
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("search".parse::<Page>().unwrap(), Page::Search);
        assert!("nowhere".parse::<Page>().is_err());
    }

    #[test]
    fn test_nav_index_map() {
        assert_eq!(Page::Home.nav_index(), 0);
        assert_eq!(Page::Cost.nav_index(), 1);
        assert_eq!(Page::Log.nav_index(), 2);
        assert_eq!(Page::Search.nav_index(), 2);
        assert_eq!(Page::Alerts.nav_index(), 3);
        assert_eq!(Page::Settings.nav_index(), 4);
    }

    #[test]
    fn test_breakdown_missing_category_is_zero() {
        let breakdown = Breakdown::new().with(category::ELECTRICITY, 13_830);
        assert_eq!(breakdown.get(category::ELECTRICITY), 13_830);
        assert_eq!(breakdown.get(category::GAS), 0);
    }

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let mut state = DashboardState::new(Page::Home).with_goal(500);
        let written = StatePatch::new()
            .totals(Totals::new(32_600, 37_000))
            .apply_to(&mut state);

        assert_eq!(written, vec!["totals"]);
        assert_eq!(state.totals, Totals::new(32_600, 37_000));
        assert_eq!(state.goal_won, 500);
    }

    #[test]
    fn test_empty_patch() {
        let mut state = DashboardState::default();
        let before = state.clone();
        assert!(StatePatch::new().is_empty());
        assert!(StatePatch::new().apply_to(&mut state).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_alert_decoding() {
        let alert: Alert = serde_json::from_str(
            r#"{"userId":1,"category":"BILL","level":"WARN","title":"Bill up 5%","at":"2025-08-17T17:10:12.123"}"#,
        )
        .unwrap();
        assert_eq!(alert.user_id, Some(1));
        assert_eq!(alert.level, AlertLevel::Warn);
        assert_eq!(alert.level.badge_class(), "warn");
        assert!(alert.at_local().is_some());
    }

    #[test]
    fn test_alert_unknown_level_and_missing_fields() {
        let alert: Alert = serde_json::from_str(r#"{"level":"LOUD"}"#).unwrap();
        assert_eq!(alert.level, AlertLevel::Info);
        assert!(alert.title.is_none());
        assert!(alert.at_local().is_none());
    }

    #[test]
    fn test_crit_uses_warn_badge() {
        assert_eq!(AlertLevel::Crit.badge_class(), "warn");
        assert_eq!(AlertLevel::Info.badge_class(), "info");
    }
}
