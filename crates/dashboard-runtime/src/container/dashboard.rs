//! # Dashboard Container
//!
//! Owns one page load: the bus, the store, the surface for the page and the
//! feature registry with every dashboard feature registered. Built once at
//! startup and handed around by reference; nothing here is global.

use std::sync::Arc;

use dashboard_telemetry::{record_bus_totals, record_failure, record_mounted, record_skipped};
use shared_bus::{DashboardBus, DashboardEvent, EmitReport, EventPublisher, UserInput};
use shared_types::entities::DashboardState;
use shared_types::preferences::PreferenceStore;
use shared_types::surface::Surface;
use tracing::{info, warn};
use ud_01_state_store::{StateStore, StateStoreApi};
use ud_02_feature_registry::{
    FeatureContext, FeatureFailure, FeatureRegistry, InitReport, TeardownReport,
};
use ud_03_api_client::ApiClient;
use ud_04_widgets::{
    register_dashboard_features, slots, surface_for, ApiUsageSource, Clipboard, MemoryClipboard,
    MockUsageSource, UsageSource, WidgetDeps,
};

use crate::container::config::{ConfigError, DashboardConfig};

/// Everything one page load needs.
pub struct Dashboard {
    config: DashboardConfig,
    bus: DashboardBus,
    store: Arc<StateStore>,
    surface: Arc<Surface>,
    registry: FeatureRegistry,
    context: FeatureContext,
}

impl Dashboard {
    /// Wire the page with the in-memory clipboard.
    pub fn build(
        config: DashboardConfig,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self, ConfigError> {
        Self::build_with(config, preferences, Arc::new(MemoryClipboard::new()))
    }

    pub fn build_with(
        config: DashboardConfig,
        preferences: Arc<dyn PreferenceStore>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self, ConfigError> {
        let api = if config.has_backend() {
            Some(ApiClient::new(config.api_origin.as_str())?)
        } else {
            None
        };
        let usage: Arc<dyn UsageSource> = match &api {
            Some(api) => Arc::new(ApiUsageSource::new(api.clone())),
            None => Arc::new(MockUsageSource::new()),
        };

        let bus = DashboardBus::new();
        let store = Arc::new(StateStore::new(
            config.page,
            bus.clone(),
            Arc::clone(&preferences),
        ));
        let surface = Arc::new(surface_for(config.page));
        surface.set_text(slots::AREA, &config.area);

        let deps = WidgetDeps {
            usage,
            period: config.period_or_current(),
            api,
            user_id: config.user_id,
            port: config.port,
            clipboard,
        };
        let mut registry = FeatureRegistry::new();
        register_dashboard_features(&mut registry, &deps)?;

        let store_api: Arc<dyn StateStoreApi> = store.clone();
        let context = FeatureContext::new(
            bus.clone(),
            store_api,
            config.page,
            Arc::clone(&surface),
            preferences,
        );

        info!(
            page = %config.page,
            source = deps.usage.name(),
            period = %deps.period,
            features = registry.len(),
            "Dashboard wired"
        );

        Ok(Self {
            config,
            bus,
            store,
            surface,
            registry,
            context,
        })
    }

    /// Evaluate and mount every feature for the page.
    pub fn boot(&mut self) -> InitReport {
        let report = match self.registry.init(self.context.clone()) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Dashboard already booted");
                return InitReport::default();
            }
        };

        record_mounted(report.mounted.len());
        for (_, reason) in &report.skipped {
            record_skipped(reason.label());
        }
        record_failures(&report.failures);
        self.record_bus();

        info!(
            page = %self.config.page,
            mounted = report.mounted.len(),
            skipped = report.skipped.len(),
            failures = report.failures.len(),
            "Dashboard booted"
        );
        report
    }

    /// Wait for asynchronous mounts (the initial data load).
    pub async fn settle(&mut self) -> Vec<FeatureFailure> {
        let failures = self.registry.settle().await;
        record_failures(&failures);
        self.record_bus();
        failures
    }

    /// Page unload: unmount everything that was mounted.
    pub fn unload(&mut self) -> TeardownReport {
        let report = self.registry.teardown();
        record_failures(&report.failures);
        self.record_bus();
        info!(
            unmounted = report.unmounted.len(),
            cancelled = report.cancelled_mounts.len(),
            failures = report.failures.len(),
            "Dashboard unloaded"
        );
        report
    }

    /// Deliver a user interaction to the mounted widgets.
    pub fn send(&self, input: UserInput) -> EmitReport {
        self.bus.publish(DashboardEvent::Input(input))
    }

    pub fn render(&self) -> String {
        self.surface.render()
    }

    pub fn state(&self) -> DashboardState {
        self.store.get()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn bus(&self) -> &DashboardBus {
        &self.bus
    }

    pub fn surface(&self) -> &Arc<Surface> {
        &self.surface
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    fn record_bus(&self) {
        record_bus_totals(self.bus.events_emitted(), self.bus.handler_failures());
    }
}

fn record_failures(failures: &[FeatureFailure]) {
    for failure in failures {
        record_failure(failure.stage.as_str());
    }
}
