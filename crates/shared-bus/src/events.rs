//! # Dashboard Events
//!
//! Event names and the payload type that flows through the dashboard bus.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use shared_types::entities::{Alert, DashboardState};

/// Identifier for a logical change category, e.g. `state:changed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(Cow<'static, str>);

impl EventName {
    /// Name backed by a static string.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventName {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for EventName {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&EventName> for EventName {
    fn from(value: &EventName) -> Self {
        value.clone()
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Well-known event names.
pub mod names {
    use super::EventName;

    /// The shared state changed; payload carries the full state.
    pub const STATE_CHANGED: EventName = EventName::from_static("state:changed");
    /// Initial usage data landed in the store.
    pub const DATA_READY: EventName = EventName::from_static("data:ready");
    /// Initial usage data could not be loaded.
    pub const DATA_ERROR: EventName = EventName::from_static("data:error");
    /// An alert arrived on the event stream.
    pub const ALERT_RECEIVED: EventName = EventName::from_static("alert:received");
    /// The alert stream connected, failed or closed.
    pub const STREAM_STATUS: EventName = EventName::from_static("stream:status");
    /// A user interaction (form submit, click).
    pub const USER_INPUT: EventName = EventName::from_static("ui:input");
}

/// State of the long-lived alert stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    Connected,
    Error(String),
    Closed,
}

/// User interactions delivered to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Savings goal form submitted with the raw input text.
    GoalSubmit(String),
    /// Savings goal clear button.
    GoalClear,
    /// Search form submitted with the raw query.
    Search(String),
    /// A chip or pill was clicked; carries its label.
    ChipClicked(String),
    /// Copy-address button on the connection toast.
    CopyAddress,
    /// Close button on the connection toast.
    CloseToast,
}

/// Payload carried by the dashboard bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    StateChanged(Arc<DashboardState>),
    DataReady(Arc<DashboardState>),
    DataError(String),
    AlertReceived(Alert),
    StreamStatus(StreamStatus),
    Input(UserInput),
}

impl DashboardEvent {
    /// The event name this payload is published under.
    pub fn name(&self) -> EventName {
        match self {
            DashboardEvent::StateChanged(_) => names::STATE_CHANGED,
            DashboardEvent::DataReady(_) => names::DATA_READY,
            DashboardEvent::DataError(_) => names::DATA_ERROR,
            DashboardEvent::AlertReceived(_) => names::ALERT_RECEIVED,
            DashboardEvent::StreamStatus(_) => names::STREAM_STATUS,
            DashboardEvent::Input(_) => names::USER_INPUT,
        }
    }

    /// The state carried by `StateChanged` / `DataReady`.
    pub fn state(&self) -> Option<&DashboardState> {
        match self {
            DashboardEvent::StateChanged(state) | DashboardEvent::DataReady(state) => Some(state.as_ref()),
            _ => None,
        }
    }
}
