//! BoardContext - the explicitly owned session state
//!
//! The context owns the store, the optional persistence gateway and the
//! in-memory activity log. It provides access, not logic: commands do the
//! work, the processor decides when to log and persist.

use crate::persistence::PersistenceGateway;
use crate::store::BoardStore;
use laneboard_operations::LogEntry;
use std::collections::VecDeque;

/// Default cap on retained activity entries
pub const DEFAULT_MAX_ACTIVITY_ENTRIES: usize = 500;

/// Context passed to every command
pub struct BoardContext {
    store: BoardStore,
    gateway: Option<PersistenceGateway>,
    /// Newest first
    activity: VecDeque<LogEntry>,
    max_activity_entries: usize,
}

impl BoardContext {
    /// A memory-only context around an existing store
    pub fn new(store: BoardStore) -> Self {
        Self {
            store,
            gateway: None,
            activity: VecDeque::new(),
            max_activity_entries: DEFAULT_MAX_ACTIVITY_ENTRIES,
        }
    }

    /// Restore the board through `gateway` and keep it for later snapshots.
    ///
    /// Never fails: absent or corrupt storage yields the default seed.
    pub fn open(gateway: PersistenceGateway) -> Self {
        let store = gateway.load();
        Self {
            gateway: Some(gateway),
            ..Self::new(store)
        }
    }

    /// Limit how many activity entries are retained
    pub fn with_max_activity_entries(mut self, max: usize) -> Self {
        self.max_activity_entries = max;
        self.activity.truncate(max);
        self
    }

    // =========================================================================
    // Store access
    // =========================================================================

    /// Read-only view for rendering
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    pub fn gateway(&self) -> Option<&PersistenceGateway> {
        self.gateway.as_ref()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Snapshot the store through the gateway, if one is attached.
    /// Failures are absorbed by the gateway.
    pub fn persist(&self) {
        if let Some(gateway) = &self.gateway {
            gateway.save(&self.store);
        }
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Record an entry at the front of the activity log
    pub fn append_activity(&mut self, entry: LogEntry) {
        self.activity.push_front(entry);
        self.activity.truncate(self.max_activity_entries);
    }

    /// Read activity entries, newest first
    pub fn read_activity(&self, limit: Option<usize>) -> Vec<&LogEntry> {
        let limit = limit.unwrap_or(self.activity.len());
        self.activity.iter().take(limit).collect()
    }
}
