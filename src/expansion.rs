// src/expansion.rs
//
// Per-session expansion state. Originally this lived in a process-global
// store; owning it from the session instead keeps concurrent sessions and
// tests isolated. Every transition is idempotent so out-of-contract calls
// can never corrupt the sets.

use std::collections::HashSet;

/// Lifecycle of one address: unexpanded -> loading -> expanded, with
/// loading dropping back to unexpanded on fetch failure so the user can
/// retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    Unexpanded,
    Loading,
    Expanded,
}

#[derive(Debug, Clone, Default)]
pub struct ExpansionStateStore {
    loading: HashSet<String>,
    expanded: HashSet<String>,
}

impl ExpansionStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an address as having a fetch in flight. No-op if already loading.
    pub fn start_loading(&mut self, address: &str) {
        self.loading.insert(address.to_string());
    }

    /// Clear the in-flight mark. No-op if not loading.
    pub fn stop_loading(&mut self, address: &str) {
        self.loading.remove(address);
    }

    pub fn mark_expanded(&mut self, address: &str) {
        self.expanded.insert(address.to_string());
    }

    /// Drop all state; used when the root pivot changes.
    pub fn reset(&mut self) {
        self.loading.clear();
        self.expanded.clear();
    }

    pub fn is_loading(&self, address: &str) -> bool {
        self.loading.contains(address)
    }

    pub fn is_expanded(&self, address: &str) -> bool {
        self.expanded.contains(address)
    }

    pub fn state(&self, address: &str) -> ExpansionState {
        if self.loading.contains(address) {
            ExpansionState::Loading
        } else if self.expanded.contains(address) {
            ExpansionState::Expanded
        } else {
            ExpansionState::Unexpanded
        }
    }

    /// Advisory query for the UI contract: an address qualifies for a new
    /// expansion when it is neither loading nor already expanded. The
    /// origin check is the caller's.
    pub fn can_expand(&self, address: &str) -> bool {
        !self.is_loading(address) && !self.is_expanded(address)
    }
}
