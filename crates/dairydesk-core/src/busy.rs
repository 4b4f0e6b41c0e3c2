// ── Busy/loading tracker ──
//
// Every async operation marks its triggering control busy for its whole
// duration. The flag is held by an RAII guard, so it clears on success,
// failure, and early return alike. Row-level operations key their guard
// by client id: independent rows stay independent, while a double submit
// of the same control is refused.
//
// Cache refreshes are deliberately unguarded -- concurrent refreshes are
// allowed and resolve last-writer-wins.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::ClientId;

/// A UI control that can be busy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusyKey {
    SignIn,
    CreateClient,
    UpdateClient,
    ToggleStatus(ClientId),
    DeleteClient(ClientId),
    LoadClient(ClientId),
}

pub(crate) struct BusyTracker {
    set: Arc<watch::Sender<HashSet<BusyKey>>>,
}

impl BusyTracker {
    pub(crate) fn new() -> Self {
        let (set, _) = watch::channel(HashSet::new());
        Self { set: Arc::new(set) }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<HashSet<BusyKey>> {
        self.set.subscribe()
    }

    pub(crate) fn is_busy(&self, key: &BusyKey) -> bool {
        self.set.borrow().contains(key)
    }

    pub(crate) fn any_busy(&self) -> bool {
        !self.set.borrow().is_empty()
    }

    /// Mark `key` busy. Returns `None` if it already is -- the caller
    /// refuses the overlapping submit.
    pub(crate) fn acquire(&self, key: BusyKey) -> Option<BusyGuard> {
        let mut acquired = false;
        self.set.send_modify(|set| {
            acquired = set.insert(key.clone());
        });
        acquired.then(|| BusyGuard {
            set: Arc::clone(&self.set),
            key,
        })
    }
}

/// Clears its busy flag on drop.
pub(crate) struct BusyGuard {
    set: Arc<watch::Sender<HashSet<BusyKey>>>,
    key: BusyKey,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.set.send_modify(|set| {
            set.remove(&self.key);
        });
    }
}
