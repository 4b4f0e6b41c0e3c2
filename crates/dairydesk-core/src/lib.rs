//! State and data-synchronization core for the DairyDesk client console.
//!
//! This crate owns the view-state machine and the client-list
//! synchronization logic; rendering, theming, and the managed backend are
//! external collaborators reached through capability interfaces:
//!
//! - **[`Console`]** — Central facade and CRUD orchestrator. Sequences
//!   validate → uniqueness-check → persist → cache-refresh → navigate for
//!   every mutation, owns the session lifecycle, and routes the fixed
//!   [`UiCommand`] surface the rendering layer invokes.
//!
//! - **[`ClientCache`]** — In-memory ordered mirror of the last full store
//!   fetch (newest-created first), replaced wholesale after each mutation
//!   and never cleared on error. Local substring [`search`](ClientCache::search)
//!   needs no network round-trip. Subscribers observe snapshots through
//!   `watch` channels.
//!
//! - **[`Navigator`]** — Single-active-screen state machine over
//!   [`ScreenId`], with a declarative per-screen cancel table, an
//!   authentication gate, and the current-client reference.
//!
//! - **Capability traits** — [`ClientStore`] (remote document store),
//!   [`IdentityProvider`] (sign-in / sign-out / password reset), and
//!   [`ConfirmGate`] (explicit user confirmation). Production adapters
//!   ([`FirestoreStore`], [`FirebaseIdentity`]) wrap `dairydesk-api`.

pub mod auth;
pub mod busy;
pub mod cache;
pub mod command;
pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod export;
pub mod keymap;
pub mod model;
pub mod nav;
pub mod notify;
pub mod screen;
pub mod stats;
pub mod store;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{AuthCode, AuthError, FirebaseIdentity, IdentityProvider, UserIdentity};
pub use busy::BusyKey;
pub use cache::ClientCache;
pub use command::{CommandOutcome, Origin, UiCommand};
pub use config::AppConfig;
pub use console::Console;
pub use error::{CoreError, FieldError, FormField};
pub use export::{ExportFile, ExportFormat};
pub use keymap::{Intent, Key, KeyCombo, Modifier};
pub use model::{Client, ClientForm, ClientId, ClientPatch, ClientStatus, NewClient};
pub use nav::{ConfirmGate, NavOutcome, Navigator};
pub use notify::{Notice, NoticeLevel};
pub use screen::{CancelRule, ScreenId};
pub use stats::{CounterAnimation, DashboardStats, StatProgress};
pub use store::{ClientStore, FirestoreStore, StoreError};
