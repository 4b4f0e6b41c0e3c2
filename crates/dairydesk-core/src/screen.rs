// ── Screen identifiers and per-screen behavior tables ──
//
// Exactly one screen is active at a time. Entry data-loads, cancel
// behavior, and the authentication gate are declared per screen here and
// read by the navigator -- no string-keyed dispatch.

use std::fmt;

/// Identifies each console screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Login,
    Dashboard,
    ClientsList,
    AddClient,
    EditClient,
    ClientDetails,
}

/// What cancelling (Esc / cancel button) does on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRule {
    /// Confirm discarding in-progress input, then navigate to the parent.
    ConfirmThenGoto(ScreenId),
    /// Navigate to the parent unconditionally.
    Goto(ScreenId),
    /// Nothing to cancel.
    None,
}

impl ScreenId {
    pub const ALL: [ScreenId; 6] = [
        Self::Login,
        Self::Dashboard,
        Self::ClientsList,
        Self::AddClient,
        Self::EditClient,
        Self::ClientDetails,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::ClientsList => "Clients",
            Self::AddClient => "Add Client",
            Self::EditClient => "Edit Client",
            Self::ClientDetails => "Client Details",
        }
    }

    /// Every screen except the login form is authenticated-only.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Screens that trigger a client-list refresh on entry. The dashboard
    /// additionally recomputes its stat tiles, which derive from the cache.
    pub fn refreshes_on_entry(self) -> bool {
        matches!(self, Self::Dashboard | Self::ClientsList)
    }

    /// The declarative cancel table.
    pub fn cancel_rule(self) -> CancelRule {
        match self {
            Self::AddClient => CancelRule::ConfirmThenGoto(Self::Dashboard),
            Self::EditClient => CancelRule::ConfirmThenGoto(Self::ClientDetails),
            Self::ClientDetails => CancelRule::Goto(Self::ClientsList),
            Self::ClientsList => CancelRule::Goto(Self::Dashboard),
            Self::Login | Self::Dashboard => CancelRule::None,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_login_is_public() {
        for screen in ScreenId::ALL {
            assert_eq!(screen.requires_auth(), screen != ScreenId::Login);
        }
    }

    #[test]
    fn data_loads_on_list_screens_only() {
        assert!(ScreenId::Dashboard.refreshes_on_entry());
        assert!(ScreenId::ClientsList.refreshes_on_entry());
        assert!(!ScreenId::AddClient.refreshes_on_entry());
        assert!(!ScreenId::EditClient.refreshes_on_entry());
        assert!(!ScreenId::ClientDetails.refreshes_on_entry());
        assert!(!ScreenId::Login.refreshes_on_entry());
    }

    #[test]
    fn cancel_table_matches_screen_parents() {
        assert_eq!(
            ScreenId::AddClient.cancel_rule(),
            CancelRule::ConfirmThenGoto(ScreenId::Dashboard)
        );
        assert_eq!(
            ScreenId::EditClient.cancel_rule(),
            CancelRule::ConfirmThenGoto(ScreenId::ClientDetails)
        );
        assert_eq!(
            ScreenId::ClientDetails.cancel_rule(),
            CancelRule::Goto(ScreenId::ClientsList)
        );
        assert_eq!(
            ScreenId::ClientsList.cancel_rule(),
            CancelRule::Goto(ScreenId::Dashboard)
        );
        assert_eq!(ScreenId::Login.cancel_rule(), CancelRule::None);
        assert_eq!(ScreenId::Dashboard.cancel_rule(), CancelRule::None);
    }
}
