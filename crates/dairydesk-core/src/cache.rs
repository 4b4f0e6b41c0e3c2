// ── Client cache ──
//
// Ordered in-memory mirror of the last full store fetch, newest-created
// first. Replaced wholesale after every mutation's refresh; never patched
// in place, and never cleared when a refresh fails. Subscribers observe
// snapshots through a watch channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{Client, ClientId};
use crate::stats::DashboardStats;

pub struct ClientCache {
    snapshot: watch::Sender<Arc<Vec<Client>>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl ClientCache {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);
        Self {
            snapshot,
            last_refresh,
        }
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Client>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Client>>> {
        self.snapshot.subscribe()
    }

    /// Replace the full list with a fresh fetch result.
    pub(crate) fn apply(&self, clients: Vec<Client>) {
        self.snapshot.send_replace(Arc::new(clients));
        self.last_refresh.send_replace(Some(Utc::now()));
    }

    /// Session teardown. Distinct from refresh failure, which leaves the
    /// stale snapshot in place.
    pub(crate) fn clear(&self) {
        self.snapshot.send_replace(Arc::new(Vec::new()));
        self.last_refresh.send_replace(None);
    }

    /// Case-insensitive substring filter over name, email, and mobile.
    /// A blank term returns the full cache in its original order.
    pub fn search(&self, term: &str) -> Vec<Client> {
        let snapshot = self.snapshot();
        if term.trim().is_empty() {
            return snapshot.as_ref().clone();
        }

        let needle = term.to_lowercase();
        snapshot
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.mobile.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Snapshot lookup by id. Single-record views go to the store instead;
    /// this serves prompts that only need the rendered row.
    pub fn find(&self, id: &ClientId) -> Option<Client> {
        self.snapshot().iter().find(|c| &c.id == id).cloned()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_clients(&self.snapshot())
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// When the last successful refresh happened, or `None` if never.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How stale the snapshot is, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}
