//! The context handed to every lifecycle hook.

use std::fmt;
use std::sync::Arc;

use shared_bus::DashboardBus;
use shared_types::entities::Page;
use shared_types::format::format_won;
use shared_types::preferences::{MemoryPreferences, PreferenceStore};
use shared_types::surface::Surface;
use ud_01_state_store::{StateStore, StateStoreApi};

/// Shared collaborators for mount/unmount.
///
/// Built once at boot and cloned into every feature; all fields are
/// handles, so clones observe the same bus, store and surface.
#[derive(Clone)]
pub struct FeatureContext {
    pub bus: DashboardBus,
    pub store: Arc<dyn StateStoreApi>,
    pub page: Page,
    pub surface: Arc<Surface>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl FeatureContext {
    pub fn new(
        bus: DashboardBus,
        store: Arc<dyn StateStoreApi>,
        page: Page,
        surface: Arc<Surface>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            bus,
            store,
            page,
            surface,
            preferences,
        }
    }

    /// Fresh bus, store and in-memory preferences around `surface`.
    pub fn in_memory(page: Page, surface: Surface) -> Self {
        let bus = DashboardBus::new();
        let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::new());
        let store = Arc::new(StateStore::new(page, bus.clone(), Arc::clone(&preferences)));
        Self::new(bus, store, page, Arc::new(surface), preferences)
    }

    /// Currency formatting helper.
    pub fn won(&self, amount: f64) -> String {
        format_won(amount)
    }

    /// Whether any of `slots` exists on the surface.
    pub fn has_any(&self, slots: &[&str]) -> bool {
        self.surface.has_any(slots)
    }
}

impl fmt::Debug for FeatureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureContext")
            .field("page", &self.page)
            .field("slots", &self.surface.ids())
            .finish_non_exhaustive()
    }
}
