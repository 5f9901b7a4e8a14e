//! Initial usage load.

use std::sync::Arc;

use shared_bus::{DashboardEvent, EventPublisher};
use shared_types::entities::{Period, StatePatch};
use tracing::{error, info};
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::source::UsageSource;

/// Pulls the period's usage, patches it into the store and announces
/// `data:ready` (or `data:error`).
pub struct DataLoader {
    source: Arc<dyn UsageSource>,
    period: Period,
}

impl DataLoader {
    pub fn new(source: Arc<dyn UsageSource>, period: Period) -> Self {
        Self { source, period }
    }
}

impl Feature for DataLoader {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("data-loader")
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        let source = Arc::clone(&self.source);
        let period = self.period;
        let store = Arc::clone(&ctx.store);
        let bus = ctx.bus.clone();

        Ok(MountHandle::new().with_async_mount(async move {
            match source.load(period).await {
                Ok(snapshot) => {
                    store.patch(
                        StatePatch::new()
                            .totals(snapshot.totals)
                            .breakdown(snapshot.breakdown),
                    );
                    info!(source = source.name(), period = %period, "Usage data loaded");
                    bus.publish(DashboardEvent::DataReady(Arc::new(store.get())));
                    Ok(())
                }
                Err(e) => {
                    error!(source = source.name(), period = %period, error = %e, "Usage data load failed");
                    bus.publish(DashboardEvent::DataError(e.to_string()));
                    Err(FeatureError::Dependency(e.to_string()))
                }
            }
        }))
    }
}
