//! Where the initial usage figures come from.

use std::time::Duration;

use async_trait::async_trait;
use shared_types::entities::{category, Breakdown, Period, Totals};
use ud_03_api_client::{ApiClient, ClientError};

/// Totals and breakdown for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub totals: Totals,
    pub breakdown: Breakdown,
}

/// Usage data port used by the `data-loader` feature.
#[async_trait]
pub trait UsageSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn load(&self, period: Period) -> Result<UsageSnapshot, ClientError>;
}

/// Fixed figures after a simulated network delay.
#[derive(Debug, Clone)]
pub struct MockUsageSource {
    latency: Duration,
}

impl MockUsageSource {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_latency(Self::DEFAULT_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn snapshot() -> UsageSnapshot {
        UsageSnapshot {
            totals: Totals::new(32_600, 37_000),
            breakdown: Breakdown::new()
                .with(category::ELECTRICITY, 13_830)
                .with(category::WATER, 7_820),
        }
    }
}

impl Default for MockUsageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageSource for MockUsageSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn load(&self, _period: Period) -> Result<UsageSnapshot, ClientError> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::snapshot())
    }
}

/// Backend donut endpoint: this period's split and total, with the previous
/// period's total as the comparison.
#[derive(Debug, Clone)]
pub struct ApiUsageSource {
    client: ApiClient,
}

impl ApiUsageSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsageSource for ApiUsageSource {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn load(&self, period: Period) -> Result<UsageSnapshot, ClientError> {
        let current = self.client.fetch_donut(&period.to_string()).await?;
        let previous = self
            .client
            .fetch_donut(&period.previous().to_string())
            .await?;
        Ok(UsageSnapshot {
            totals: Totals::new(current.total, previous.total),
            breakdown: current.breakdown(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_then_returns_fixed_figures() {
        let started = tokio::time::Instant::now();
        let snapshot = MockUsageSource::new()
            .load(Period::parse("2025-08").unwrap())
            .await
            .unwrap();

        assert!(started.elapsed() >= MockUsageSource::DEFAULT_LATENCY);
        assert_eq!(snapshot.totals, Totals::new(32_600, 37_000));
        assert_eq!(snapshot.breakdown.get(category::ELECTRICITY), 13_830);
        assert_eq!(snapshot.breakdown.get(category::WATER), 7_820);
    }
}
