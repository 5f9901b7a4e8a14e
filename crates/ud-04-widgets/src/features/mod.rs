//! The dashboard's features, in registration order.

mod alerts_feed;
mod connection_toast;
mod core_ui;
mod dashboard_render;
mod data_loader;
mod savings_goal;
mod search_logic;

use std::sync::Arc;

use shared_types::entities::Period;
use ud_02_feature_registry::{Feature, FeatureRegistry, RegistryError};
use ud_03_api_client::ApiClient;

use crate::clipboard::Clipboard;
use crate::source::UsageSource;

pub use alerts_feed::AlertsFeed;
pub use connection_toast::ConnectionToast;
pub use core_ui::CoreUi;
pub use dashboard_render::DashboardRender;
pub use data_loader::DataLoader;
pub use savings_goal::SavingsGoal;
pub use search_logic::{SearchLogic, FILTER_TABS};

/// External collaborators the widgets need.
#[derive(Clone)]
pub struct WidgetDeps {
    pub usage: Arc<dyn UsageSource>,
    pub period: Period,
    /// `None` when running without a backend; the alert feed then stays idle.
    pub api: Option<ApiClient>,
    pub user_id: u64,
    /// Port shown in the connection toast address.
    pub port: u16,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Every dashboard feature, in the order they must be registered.
pub fn dashboard_features(deps: &WidgetDeps) -> Vec<Arc<dyn Feature>> {
    vec![
        Arc::new(CoreUi::new()),
        Arc::new(DataLoader::new(Arc::clone(&deps.usage), deps.period)),
        Arc::new(DashboardRender),
        Arc::new(SavingsGoal),
        Arc::new(ConnectionToast::new(deps.port, Arc::clone(&deps.clipboard))),
        Arc::new(SearchLogic),
        Arc::new(AlertsFeed::new(deps.api.clone(), deps.user_id)),
    ]
}

/// Register [`dashboard_features`] on `registry`.
pub fn register_dashboard_features(
    registry: &mut FeatureRegistry,
    deps: &WidgetDeps,
) -> Result<(), RegistryError> {
    for feature in dashboard_features(deps) {
        registry.register_shared(feature)?;
    }
    Ok(())
}
