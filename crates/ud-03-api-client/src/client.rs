//! Dashboard backend client.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::entities::Period;
use shared_types::errors::ValidationError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::sse::SseParser;
use crate::types::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
/// Delay before reopening a dropped event stream, unless the server sent
/// `retry:`.
const DEFAULT_RECONNECT: Duration = Duration::from_secs(3);

/// Backend client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    ///
    /// `InvalidBaseUrl` unless the origin is absolute http(s).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        // No client-wide timeout: the alert stream stays open indefinitely.
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<R: DeserializeOwned>(request: RequestBuilder) -> Result<R, ClientError> {
        let response = request
            .header(ACCEPT, "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, ClientError> {
        debug!(path, "GET");
        Self::send_json(self.client.get(self.url(path)).query(query)).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        debug!(path, "POST");
        Self::send_json(self.client.post(self.url(path)).json(body)).await
    }

    /// Electricity/gas split for a period.
    pub async fn fetch_donut(&self, period_ym: &str) -> Result<DonutResponse, ClientError> {
        let period = Period::parse(period_ym)?;
        self.get_json("/api/donut", &[("periodYm", period.to_string())])
            .await
    }

    /// Daily cumulative costs for a period.
    pub async fn fetch_monthly_bars(
        &self,
        period_ym: &str,
    ) -> Result<MonthlyBarsResponse, ClientError> {
        let period = Period::parse(period_ym)?;
        self.get_json("/api/monthly-bars", &[("periodYm", period.to_string())])
            .await
    }

    /// Store a savings goal. A malformed period or negative goal is rejected
    /// before any request.
    pub async fn save_goal(
        &self,
        user_id: u64,
        period_ym: &str,
        saving_goal_won: i64,
    ) -> Result<GoalResponse, ClientError> {
        let period = Period::parse(period_ym)?;
        if saving_goal_won < 0 {
            return Err(ValidationError::NegativeGoal(saving_goal_won).into());
        }
        let body = GoalRequest {
            user_id,
            period_ym: period.to_string(),
            saving_goal_won,
        };
        self.post_json("/api/goals", &body).await
    }

    pub async fn fetch_goal(&self, period_ym: &str) -> Result<GoalResponse, ClientError> {
        let period = Period::parse(period_ym)?;
        self.get_json("/api/goals", &[("periodYm", period.to_string())])
            .await
    }

    /// Ask the backend to raise a bill alert. The response body is ignored.
    pub async fn create_bill_alert(
        &self,
        user_id: u64,
        title: impl Into<String>,
        at: Option<String>,
    ) -> Result<(), ClientError> {
        let body = BillAlertRequest {
            user_id,
            title: title.into(),
            at,
        };
        let _: serde_json::Value = self.post_json("/api/alerts/bill", &body).await?;
        Ok(())
    }

    /// Open the alert stream for `user_id`.
    ///
    /// `connected`, `alert` and unnamed events go to `on_event`; failures go
    /// to `on_error` and are never returned. A dropped connection is reopened
    /// after the server's `retry:` delay (3 s by default). A non-success
    /// status ends the subscription.
    pub fn subscribe_alerts<E, F>(&self, user_id: u64, on_event: E, on_error: F) -> AlertSubscription
    where
        E: Fn(StreamEvent) + Send + Sync + 'static,
        F: Fn(ClientError) + Send + Sync + 'static,
    {
        let client = self.client.clone();
        let url = self.url("/api/alerts/stream");

        let task = tokio::spawn(async move {
            let mut parser = SseParser::new();
            loop {
                parser.reset();
                let request = client
                    .get(&url)
                    .query(&[("userId", user_id)])
                    .header(ACCEPT, "text/event-stream");

                let response = match request.send().await {
                    Ok(response) => response,
                    Err(e) => {
                        on_error(ClientError::Http(e));
                        tokio::time::sleep(parser.retry().unwrap_or(DEFAULT_RECONNECT)).await;
                        continue;
                    }
                };
                let response = match ensure_success(response).await {
                    Ok(response) => response,
                    Err(e) => {
                        warn!(user_id, error = %e, "Alert stream rejected");
                        on_error(e);
                        return;
                    }
                };
                info!(user_id, "Alert stream open");

                let mut body = response.bytes_stream();
                let reason = loop {
                    match body.next().await {
                        Some(Ok(chunk)) => {
                            for frame in parser.feed(&chunk) {
                                match StreamEventKind::from_event_name(&frame.event) {
                                    Some(kind) => on_event(StreamEvent {
                                        kind,
                                        data: frame.data,
                                    }),
                                    None => debug!(event = %frame.event, "Unhandled stream event"),
                                }
                            }
                        }
                        Some(Err(e)) => break e.to_string(),
                        None => break "closed by server".to_string(),
                    }
                };

                warn!(user_id, reason = %reason, "Alert stream dropped");
                on_error(ClientError::StreamDisconnected(reason));
                tokio::time::sleep(parser.retry().unwrap_or(DEFAULT_RECONNECT)).await;
            }
        });

        AlertSubscription { task }
    }
}

/// Pass 2xx through; turn anything else into `ClientError::Status`.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let body = if text.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        text
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Live alert stream. Closing or dropping it stops the reader task.
#[derive(Debug)]
pub struct AlertSubscription {
    task: JoinHandle<()>,
}

impl AlertSubscription {
    /// Stop listening. Idempotent.
    pub fn close(&self) {
        if !self.task.is_finished() {
            self.task.abort();
            debug!("Alert stream closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AlertSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
