//! Request and response bodies.

use serde::{Deserialize, Serialize};
use shared_types::entities::{category, Alert, Breakdown, Totals, Won};

/// `GET /api/donut` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DonutResponse {
    pub period_ym: String,
    pub elec: Won,
    pub gas: Won,
    pub total: Won,
    pub elec_ratio: f64,
    pub gas_ratio: f64,
}

impl DonutResponse {
    /// Per-category amounts as a state breakdown.
    pub fn breakdown(&self) -> Breakdown {
        Breakdown::new()
            .with(category::ELECTRICITY, self.elec)
            .with(category::GAS, self.gas)
    }
}

/// One day of cumulative usage cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyBar {
    pub day: u32,
    pub elec_cum: Won,
    pub gas_cum: Won,
    pub total_cum: Won,
}

/// `GET /api/monthly-bars` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyBarsResponse {
    pub period_ym: String,
    pub bars: Vec<DailyBar>,
}

impl MonthlyBarsResponse {
    /// Cumulative total at the last reported day.
    pub fn month_to_date(&self) -> Won {
        self.bars
            .iter()
            .max_by_key(|bar| bar.day)
            .map_or(0, |bar| bar.total_cum)
    }
}

/// `POST /api/goals` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub user_id: u64,
    pub period_ym: String,
    pub saving_goal_won: i64,
}

/// Goal as stored by the backend, with its progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalResponse {
    pub period_ym: String,
    pub saving_goal_won: Won,
    pub baseline_total_won: Won,
    pub current_total_won: Won,
    pub saving_percent: f64,
}

impl GoalResponse {
    pub fn totals(&self) -> Totals {
        Totals::new(self.current_total_won, self.baseline_total_won)
    }
}

/// `POST /api/alerts/bill` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillAlertRequest {
    pub user_id: u64,
    pub title: String,
    pub at: Option<String>,
}

/// Named events forwarded from the alert stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEventKind {
    /// Unnamed event.
    Message,
    Connected,
    Alert,
}

impl StreamEventKind {
    /// Map an SSE event name. Other names have no listener and are dropped.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "message" => Some(StreamEventKind::Message),
            "connected" => Some(StreamEventKind::Connected),
            "alert" => Some(StreamEventKind::Alert),
            _ => None,
        }
    }
}

/// One event delivered to `subscribe_alerts` callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub kind: StreamEventKind,
    pub data: String,
}

impl StreamEvent {
    /// Decode `data` as an alert payload.
    pub fn alert(&self) -> Result<Alert, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}
