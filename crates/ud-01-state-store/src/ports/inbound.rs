//! Driving port: what features may do with the shared state.

use shared_bus::EmitReport;
use shared_types::entities::{DashboardState, StatePatch};

/// Controlled access to the shared state.
///
/// Every mutating call announces the change on the bus and returns the
/// delivery report of that announcement.
pub trait StateStoreApi: Send + Sync {
    /// Snapshot of the current state.
    fn get(&self) -> DashboardState;

    /// Shallow-merge `patch` and announce. An empty patch still announces.
    fn patch(&self, patch: StatePatch) -> EmitReport;

    /// Clamp, persist and store a savings goal, then announce.
    fn set_goal(&self, amount: f64) -> EmitReport;

    /// Reset the goal to 0, drop the persisted value, then announce.
    fn clear_goal(&self) -> EmitReport;

    /// Remember a search keyword.
    ///
    /// # Returns
    ///
    /// `None` when the list did not change (nothing was announced).
    fn add_recent_keyword(&self, keyword: &str) -> Option<EmitReport>;
}
