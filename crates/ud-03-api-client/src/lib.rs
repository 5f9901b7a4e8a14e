//! # UD-03 API Client
//!
//! Request/response and event-stream wrapper around the dashboard backend.
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`ApiClient::fetch_donut`] | `GET /api/donut?periodYm=` |
//! | [`ApiClient::fetch_monthly_bars`] | `GET /api/monthly-bars?periodYm=` |
//! | [`ApiClient::save_goal`] | `POST /api/goals` |
//! | [`ApiClient::fetch_goal`] | `GET /api/goals?periodYm=` |
//! | [`ApiClient::subscribe_alerts`] | `GET /api/alerts/stream?userId=` (SSE) |
//! | [`ApiClient::create_bill_alert`] | `POST /api/alerts/bill` |
//!
//! Periods and goal amounts are validated locally, before any request is
//! made, and surface as [`ClientError::Validation`] with status 400.

pub mod client;
pub mod error;
pub mod sse;
pub mod types;

pub use client::{AlertSubscription, ApiClient};
pub use error::ClientError;
pub use sse::{SseFrame, SseParser};
pub use types::*;
