//! # State Store Service
//!
//! Owns the [`DashboardState`] and funnels every mutation through the
//! four entry points of [`StateStoreApi`].

use std::sync::Arc;

use parking_lot::RwLock;
use shared_bus::{DashboardBus, DashboardEvent, EmitReport, EventPublisher};
use shared_types::entities::{DashboardState, Page, StatePatch};
use shared_types::preferences::{keys, PreferenceStore};
use tracing::{debug, info, warn};

use crate::domain::{clamp_goal, remember_keyword};
use crate::ports::StateStoreApi;

/// The shared state store.
pub struct StateStore {
    /// Current state. Never handed out by reference.
    state: RwLock<DashboardState>,

    /// Bus that receives `state:changed`.
    bus: DashboardBus,

    /// Where the savings goal is persisted.
    preferences: Arc<dyn PreferenceStore>,
}

impl StateStore {
    /// Create a store for `page`, restoring the persisted goal if any.
    pub fn new(page: Page, bus: DashboardBus, preferences: Arc<dyn PreferenceStore>) -> Self {
        let goal_won = restore_goal(preferences.as_ref());
        info!(page = %page, goal_won, "State store created");
        Self::with_state(
            DashboardState::new(page).with_goal(goal_won),
            bus,
            preferences,
        )
    }

    /// Create a store around an explicit initial state.
    pub fn with_state(
        state: DashboardState,
        bus: DashboardBus,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            state: RwLock::new(state),
            bus,
            preferences,
        }
    }

    pub fn bus(&self) -> &DashboardBus {
        &self.bus
    }

    /// Shared snapshot of the current state.
    pub fn snapshot(&self) -> Arc<DashboardState> {
        Arc::new(self.state.read().clone())
    }

    /// Emit `state:changed` with a fresh snapshot. Called with no lock held.
    fn announce(&self) -> EmitReport {
        self.bus.publish(DashboardEvent::StateChanged(self.snapshot()))
    }
}

fn restore_goal(preferences: &dyn PreferenceStore) -> u64 {
    let Some(raw) = preferences.get(keys::SAVING_GOAL_WON) else {
        return 0;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) => clamp_goal(value),
        Err(_) => {
            warn!(value = %raw, "Ignoring unreadable persisted goal");
            0
        }
    }
}

impl StateStoreApi for StateStore {
    fn get(&self) -> DashboardState {
        self.state.read().clone()
    }

    fn patch(&self, patch: StatePatch) -> EmitReport {
        let written = patch.apply_to(&mut self.state.write());
        debug!(fields = ?written, "State patched");
        self.announce()
    }

    fn set_goal(&self, amount: f64) -> EmitReport {
        let goal_won = clamp_goal(amount);
        if let Err(e) = self
            .preferences
            .set(keys::SAVING_GOAL_WON, &goal_won.to_string())
        {
            warn!(error = %e, goal_won, "Failed to persist savings goal");
        }
        self.state.write().goal_won = goal_won;
        info!(goal_won, "Savings goal set");
        self.announce()
    }

    fn clear_goal(&self) -> EmitReport {
        if let Err(e) = self.preferences.remove(keys::SAVING_GOAL_WON) {
            warn!(error = %e, "Failed to remove persisted savings goal");
        }
        self.state.write().goal_won = 0;
        info!("Savings goal cleared");
        self.announce()
    }

    fn add_recent_keyword(&self, keyword: &str) -> Option<EmitReport> {
        let changed = remember_keyword(&mut self.state.write().recent_keywords, keyword);
        if !changed {
            debug!(keyword, "Recent keyword unchanged");
            return None;
        }
        Some(self.announce())
    }
}
