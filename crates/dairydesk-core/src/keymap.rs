// ── Global keyboard shortcuts ──
//
// A declarative table mapping modifier+key combinations to intents,
// gated on authentication state. Key types are console-owned so the
// crate stays renderer-agnostic; the embedding layer translates its own
// key events (and maps Cmd to Ctrl on mac).

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    Ctrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Esc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifier: Modifier,
    pub key: Key,
}

impl KeyCombo {
    pub const fn ctrl(c: char) -> Self {
        Self {
            modifier: Modifier::Ctrl,
            key: Key::Char(c),
        }
    }

    pub const fn esc() -> Self {
        Self {
            modifier: Modifier::None,
            key: Key::Esc,
        }
    }
}

/// What a resolved shortcut asks for. `FocusSearch` is carried back to
/// the rendering layer; the rest the console applies itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    FocusSearch,
    Goto(ScreenId),
    Cancel,
}

struct Shortcut {
    combo: KeyCombo,
    intent: Intent,
    requires_auth: bool,
}

const SHORTCUTS: [Shortcut; 5] = [
    Shortcut {
        combo: KeyCombo::ctrl('k'),
        intent: Intent::FocusSearch,
        requires_auth: true,
    },
    Shortcut {
        combo: KeyCombo::ctrl('n'),
        intent: Intent::Goto(ScreenId::AddClient),
        requires_auth: true,
    },
    Shortcut {
        combo: KeyCombo::ctrl('d'),
        intent: Intent::Goto(ScreenId::Dashboard),
        requires_auth: true,
    },
    Shortcut {
        combo: KeyCombo::ctrl('l'),
        intent: Intent::Goto(ScreenId::ClientsList),
        requires_auth: true,
    },
    Shortcut {
        combo: KeyCombo::esc(),
        intent: Intent::Cancel,
        requires_auth: false,
    },
];

/// Resolve a key combination against the table.
pub fn resolve(combo: KeyCombo, authenticated: bool) -> Option<Intent> {
    SHORTCUTS
        .iter()
        .find(|s| s.combo == combo && (authenticated || !s.requires_auth))
        .map(|s| s.intent)
}
