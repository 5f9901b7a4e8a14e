//! Live alert list fed by the server-sent alert stream.

use std::sync::Arc;

use shared_bus::{names, DashboardEvent, EventPublisher, StreamStatus};
use shared_types::entities::{Alert, Page};
use shared_types::surface::Surface;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};
use ud_03_api_client::{ApiClient, StreamEventKind};

use crate::layout::slots;

const CONNECTING: &str = "Connecting...";
const LIVE: &str = "Live";
const DISCONNECTED: &str = "Disconnected";
const UNAVAILABLE: &str = "Alert stream unavailable (no API origin configured)";

/// One list row: `[LEVEL] title · when · category`.
pub fn alert_row(alert: &Alert) -> String {
    let when = alert
        .at_local()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "just now".to_string());
    let title = alert.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Alert");
    let category = alert
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Alert");
    format!("[{}] {title} · {when} · {category}", alert.level.as_str())
}

fn status_text(status: &StreamStatus) -> String {
    match status {
        StreamStatus::Connected => LIVE.to_string(),
        StreamStatus::Error(message) => format!("Stream error: {message}"),
        StreamStatus::Closed => DISCONNECTED.to_string(),
    }
}

pub struct AlertsFeed {
    api: Option<ApiClient>,
    user_id: u64,
}

impl AlertsFeed {
    pub fn new(api: Option<ApiClient>, user_id: u64) -> Self {
        Self { api, user_id }
    }
}

impl std::fmt::Debug for AlertsFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertsFeed")
            .field("api", &self.api.as_ref().map(ApiClient::base_url))
            .field("user_id", &self.user_id)
            .finish()
    }
}

fn show(surface: &Surface, alert: &Alert) {
    surface.prepend_item(slots::ALERT_LIST, alert_row(alert));
    if alert.level.badge_class() == "warn" {
        surface.toggle_class(slots::ALERT_LIST, "has-warn", true);
    }
}

impl Feature for AlertsFeed {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("alerts-feed").on_pages([Page::Alerts])
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        ctx.surface.has(slots::ALERT_LIST)
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        let on_alert = {
            let surface = Arc::clone(&ctx.surface);
            ctx.bus.on_fn(names::ALERT_RECEIVED, move |event: &DashboardEvent| {
                if let DashboardEvent::AlertReceived(alert) = event {
                    show(&surface, alert);
                }
                Ok(())
            })
        };
        let on_status = {
            let surface = Arc::clone(&ctx.surface);
            ctx.bus.on_fn(names::STREAM_STATUS, move |event: &DashboardEvent| {
                if let DashboardEvent::StreamStatus(status) = event {
                    surface.set_text(slots::ALERT_STATUS, status_text(status));
                }
                Ok(())
            })
        };
        let handle = MountHandle::new()
            .with_subscription(on_alert)
            .with_subscription(on_status);

        let Some(api) = &self.api else {
            ctx.surface.set_text(slots::ALERT_STATUS, UNAVAILABLE);
            return Ok(handle);
        };
        if Handle::try_current().is_err() {
            warn!("No async runtime; alert stream not opened");
            ctx.surface.set_text(slots::ALERT_STATUS, DISCONNECTED);
            return Ok(handle);
        }

        ctx.surface.set_text(slots::ALERT_STATUS, CONNECTING);
        let user_id = self.user_id;
        let events = ctx.bus.clone();
        let errors = ctx.bus.clone();
        let subscription = api.subscribe_alerts(
            user_id,
            move |event| match event.kind {
                StreamEventKind::Connected => {
                    events.publish(DashboardEvent::StreamStatus(StreamStatus::Connected));
                }
                StreamEventKind::Alert => match event.alert() {
                    Ok(alert) => {
                        debug!(user_id, level = alert.level.as_str(), "Alert received");
                        events.publish(DashboardEvent::AlertReceived(alert));
                    }
                    Err(e) => warn!(user_id, error = %e, "Malformed alert payload"),
                },
                StreamEventKind::Message => debug!(user_id, data = %event.data, "Stream message"),
            },
            move |e| {
                errors.publish(DashboardEvent::StreamStatus(StreamStatus::Error(e.to_string())));
            },
        );
        info!(user_id, "Alert feed subscribed");

        Ok(handle.with_closer(move || subscription.close()))
    }
}
