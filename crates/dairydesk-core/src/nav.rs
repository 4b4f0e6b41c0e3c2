// ── Screen navigator ──
//
// Single-active-screen state machine. Holds the current-client reference
// and the authentication gate; data loads triggered by screen entry are
// reported to the console, which owns the async side.

use tokio::sync::watch;
use tracing::debug;

use crate::model::Client;
use crate::screen::{CancelRule, ScreenId};

pub(crate) const DISCARD_PROMPT: &str =
    "Are you sure you want to cancel? Any unsaved changes will be lost.";

/// Explicit-confirmation capability, implemented by the rendering layer.
pub trait ConfirmGate: Send + Sync {
    /// Present `message` and return the user's choice.
    fn confirm(&self, message: &str) -> bool;
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The target screen is now active. `refresh` reports whether it
    /// loads data on entry.
    Entered { refresh: bool },
    /// Authenticated-only target requested while signed out; ignored.
    Blocked,
}

pub struct Navigator {
    active: watch::Sender<ScreenId>,
    current: watch::Sender<Option<Client>>,
    authenticated: watch::Sender<bool>,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        let (active, _) = watch::channel(ScreenId::Login);
        let (current, _) = watch::channel(None);
        let (authenticated, _) = watch::channel(false);
        Self {
            active,
            current,
            authenticated,
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn active(&self) -> ScreenId {
        *self.active.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenId> {
        self.active.subscribe()
    }

    /// Authenticated state doubles as navigation-chrome visibility.
    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn current_client(&self) -> Option<Client> {
        self.current.borrow().clone()
    }

    pub fn subscribe_current(&self) -> watch::Receiver<Option<Client>> {
        self.current.subscribe()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Switch the active screen. Re-entering the active screen counts as
    /// entry (and re-triggers its data load).
    pub(crate) fn goto(&self, target: ScreenId) -> NavOutcome {
        if target.requires_auth() && !self.is_authenticated() {
            debug!(%target, "navigation blocked while signed out");
            return NavOutcome::Blocked;
        }

        let from = *self.active.borrow();
        self.active.send_replace(target);
        if from != target {
            debug!("screen: {from} -> {target}");
        }
        NavOutcome::Entered {
            refresh: target.refreshes_on_entry(),
        }
    }

    pub(crate) fn set_authenticated(&self, authed: bool) {
        self.authenticated.send_replace(authed);
    }

    /// Unauthenticated state forces the login screen and drops any
    /// record selection.
    pub(crate) fn force_login(&self) {
        self.authenticated.send_replace(false);
        self.current.send_replace(None);
        self.active.send_replace(ScreenId::Login);
        debug!("forced login screen");
    }

    pub(crate) fn set_current(&self, client: Client) {
        self.current.send_replace(Some(client));
    }

    pub(crate) fn clear_current(&self) {
        self.current.send_replace(None);
    }

    /// Resolve the active screen's cancel rule. Returns the navigation
    /// target, or `None` when nothing changes (no rule, or the user
    /// declined the confirmation).
    pub(crate) fn cancel_target(&self, confirm: &dyn ConfirmGate) -> Option<ScreenId> {
        match self.active().cancel_rule() {
            CancelRule::ConfirmThenGoto(parent) => {
                confirm.confirm(DISCARD_PROMPT).then_some(parent)
            }
            CancelRule::Goto(parent) => Some(parent),
            CancelRule::None => None,
        }
    }
}
