//! Authoritative store for the ordered list of proxy location rules

use dockhand_core::{LocationId, ProxyLocation};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Ordered, mutable collection of location rules for one editing session.
///
/// The store exclusively owns the sequence. Every mutation is immediately
/// visible to [`current`](Self::current) and publishes a fresh snapshot on
/// the view-refresh channel; subscribers hold a derived, read-only
/// projection and never mutate it independently.
pub struct LocationStore {
    locations: Vec<ProxyLocation>,
    refresh: watch::Sender<Vec<ProxyLocation>>,
}

impl LocationStore {
    pub fn new() -> Self {
        let (refresh, _) = watch::channel(Vec::new());
        Self {
            locations: Vec::new(),
            refresh,
        }
    }

    /// Seed the store with existing rules, e.g. when resuming a session
    /// from a loaded document.
    pub fn from_locations(locations: Vec<ProxyLocation>) -> Self {
        let (refresh, _) = watch::channel(locations.clone());
        Self { locations, refresh }
    }

    /// Create a blank rule and append it, returning its identity.
    pub fn add_location(&mut self) -> LocationId {
        let entry = ProxyLocation::new();
        let id = entry.id();
        self.append(entry);
        id
    }

    /// Append `entry` to the end of the sequence.
    pub fn append(&mut self, entry: ProxyLocation) {
        debug!(id = %entry.id(), "appending location rule");
        self.locations.push(entry);
        self.publish();
    }

    /// Remove the rule at `index`, preserving the relative order of the
    /// rest. An out-of-range index is a caller bug: it is logged and
    /// ignored, leaving the sequence untouched.
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.locations.len() {
            warn!(
                index,
                len = self.locations.len(),
                "ignoring removal of nonexistent location rule"
            );
            return;
        }
        let removed = self.locations.remove(index);
        debug!(id = %removed.id(), index, "removed location rule");
        self.publish();
    }

    /// The live sequence, reflecting all prior mutations in call order.
    pub fn current(&self) -> &[ProxyLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Subscribe to view refreshes. The receiver sees the snapshot after
    /// every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ProxyLocation>> {
        self.refresh.subscribe()
    }

    fn publish(&self) {
        self.refresh.send_replace(self.locations.clone());
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}
