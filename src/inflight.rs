// Duplicate-submission guard.
//
// Only one action per entity id may be in flight at a time from this
// client; the triggering control stays disabled for the duration of that
// single round-trip.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone)]
pub struct InFlightRegistry {
    ids: Arc<Mutex<HashSet<String>>>,
}

/// Releases the entity id on drop, so a panicking or failing action never
/// wedges the entity.
#[derive(Debug)]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the entity for one action. Returns `None` while another action
    /// on the same id is still in flight.
    pub fn try_begin(&self, id: &str) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock().expect("inflight lock poisoned");
        if !ids.insert(id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            ids: Arc::clone(&self.ids),
            id: id.to_string(),
        })
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.ids.lock().expect("inflight lock poisoned").contains(id)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .expect("inflight lock poisoned")
            .remove(&self.id);
    }
}
