//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PolicyTable;

/// Shared application state.
///
/// Holds the policy table every request is calculated against. The table is
/// read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// The loaded policy table.
    table: Arc<PolicyTable>,
}

impl AppState {
    /// Creates a new application state around a policy table.
    pub fn new(table: PolicyTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Returns a reference to the policy table.
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PolicyTable::statutory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_table() {
        let state = AppState::default();
        let clone = state.clone();
        assert!(std::ptr::eq(state.table(), clone.table()));
    }
}
