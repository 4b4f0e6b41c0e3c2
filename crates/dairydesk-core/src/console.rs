// ── Console orchestrator ──
//
// Central facade over the store, identity provider, cache, and navigator.
// Every mutation runs the same sequence: validate → uniqueness-check →
// persist → cache-refresh → navigate, with the triggering control marked
// busy for the duration and every outcome surfaced as a notice.

use std::collections::HashSet;

use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use dairydesk_api::{FirestoreClient, IdentityClient, TokenCache, TransportConfig};

use crate::auth::{FirebaseIdentity, IdentityProvider, UserIdentity};
use crate::busy::{BusyKey, BusyTracker};
use crate::cache::ClientCache;
use crate::command::{CommandOutcome, Origin, UiCommand};
use crate::config::AppConfig;
use crate::error::CoreError;
use crate::export::{self, ExportFile, ExportFormat};
use crate::keymap::{self, Intent, KeyCombo};
use crate::model::{Client, ClientForm, ClientId, ClientPatch, ClientStatus, NewClient, none_if_empty};
use crate::nav::{ConfirmGate, NavOutcome, Navigator};
use crate::notify::{Notice, NoticeBoard};
use crate::screen::ScreenId;
use crate::stats::DashboardStats;
use crate::store::{ClientStore, FirestoreStore};
use crate::validate;

/// The application facade: one per session.
pub struct Console<S, P> {
    store: S,
    identity: P,
    confirm: Box<dyn ConfirmGate>,
    cache: ClientCache,
    nav: Navigator,
    session: watch::Sender<Option<UserIdentity>>,
    notices: NoticeBoard,
    busy: BusyTracker,
}

impl Console<FirestoreStore, FirebaseIdentity> {
    /// Wire the production adapters from a runtime config. The identity
    /// and Firestore clients share one token cache, so a sign-in
    /// authorizes subsequent document requests.
    pub fn from_config(
        config: &AppConfig,
        confirm: Box<dyn ConfirmGate>,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let tokens = TokenCache::new();

        let identity = IdentityClient::new(
            config.identity_url.clone(),
            config.api_key.clone(),
            tokens.clone(),
            &transport,
        )
        .map_err(wiring_error)?;

        let firestore = FirestoreClient::new(
            config.firestore_url.clone(),
            config.project_id.clone(),
            tokens,
            &transport,
        )
        .map_err(wiring_error)?;

        Ok(Self::new(
            FirestoreStore::new(firestore),
            FirebaseIdentity::new(identity),
            confirm,
        ))
    }
}

fn wiring_error(err: dairydesk_api::Error) -> CoreError {
    CoreError::Config {
        message: err.to_string(),
    }
}

impl<S: ClientStore, P: IdentityProvider> Console<S, P> {
    pub fn new(store: S, identity: P, confirm: Box<dyn ConfirmGate>) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            store,
            identity,
            confirm,
            cache: ClientCache::new(),
            nav: Navigator::new(),
            session,
            notices: NoticeBoard::new(),
            busy: BusyTracker::new(),
        }
    }

    // ── State observation ────────────────────────────────────────────

    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn session(&self) -> Option<UserIdentity> {
        self.session.borrow().clone()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.session.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<HashSet<BusyKey>> {
        self.busy.subscribe()
    }

    pub fn stats(&self) -> DashboardStats {
        self.cache.stats()
    }

    /// Local search over the cache; no network round-trip.
    pub fn search(&self, term: &str) -> Vec<Client> {
        self.cache.search(term)
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Validate and sign in. On success the session change lands the
    /// console on the dashboard.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), CoreError> {
        let email = email.trim();
        validate::validate_sign_in(email, password).map_err(CoreError::validation)?;

        let _guard = self
            .busy
            .acquire(BusyKey::SignIn)
            .ok_or(CoreError::OperationInFlight)?;

        let user = self
            .identity
            .sign_in(email, &SecretString::from(password.to_owned()))
            .await?;

        info!(email = %user.email, "signed in");
        self.apply_session_change(Some(user)).await;
        Ok(())
    }

    /// Sign out and tear the session state down.
    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.identity.sign_out().await?;
        self.apply_session_change(None).await;
        Ok(())
    }

    /// Validate the address and request a reset mail.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), CoreError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::validation(vec![crate::error::FieldError::new(
                crate::error::FormField::Email,
                "Please enter your email address first",
            )]));
        }
        if !validate::is_valid_email(email) {
            return Err(CoreError::validation(vec![crate::error::FieldError::new(
                crate::error::FormField::Email,
                "Please enter a valid email address",
            )]));
        }

        self.identity.send_password_reset(email).await?;
        self.notices
            .publish(Notice::success("Password reset email sent! Check your inbox."));
        Ok(())
    }

    /// React to an identity-provider session change. Signed in lands on
    /// the dashboard with chrome restored; signed out forces the login
    /// screen and tears down per-session state.
    pub async fn apply_session_change(&self, user: Option<UserIdentity>) {
        match user {
            Some(user) => {
                debug!(uid = %user.uid, "session established");
                self.session.send_replace(Some(user));
                self.nav.set_authenticated(true);
                self.goto(ScreenId::Dashboard).await;
            }
            None => {
                debug!("session ended");
                self.session.send_replace(None);
                self.nav.force_login();
                self.cache.clear();
            }
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Switch screens, firing the target's entry data load. A failed load
    /// keeps the stale cache and surfaces an error notice; the navigation
    /// itself stands.
    pub async fn goto(&self, target: ScreenId) -> NavOutcome {
        let outcome = self.nav.goto(target);
        if let NavOutcome::Entered { refresh: true } = outcome {
            if let Err(e) = self.refresh_clients().await {
                warn!(error = %e, screen = %target, "entry data load failed");
                let message = match target {
                    ScreenId::Dashboard => "Failed to load dashboard data",
                    _ => "Failed to load clients list",
                };
                self.notices.publish(Notice::error(message));
            }
        }
        outcome
    }

    /// Replace the cache with a fresh full fetch, newest first. The stale
    /// cache is retained on failure.
    pub async fn refresh_clients(&self) -> Result<(), CoreError> {
        match self.store.list_all().await {
            Ok(clients) => {
                debug!(count = clients.len(), "client cache refreshed");
                self.cache.apply(clients);
                Ok(())
            }
            Err(e) => Err(CoreError::unavailable(e)),
        }
    }

    /// Apply the active screen's cancel rule.
    pub async fn handle_cancel(&self) -> CommandOutcome {
        match self.nav.cancel_target(self.confirm.as_ref()) {
            Some(parent) => {
                self.goto(parent).await;
                CommandOutcome::Done
            }
            None => CommandOutcome::Unchanged,
        }
    }

    /// Resolve and apply a global keyboard shortcut. `FocusSearch` is
    /// handed back to the caller -- focusing an input is a rendering
    /// concern.
    pub async fn handle_key(&self, combo: KeyCombo) -> Option<Intent> {
        match keymap::resolve(combo, self.nav.is_authenticated())? {
            Intent::Goto(screen) => {
                self.goto(screen).await;
                None
            }
            Intent::Cancel => {
                self.handle_cancel().await;
                None
            }
            Intent::FocusSearch => Some(Intent::FocusSearch),
        }
    }

    // ── Record loading ───────────────────────────────────────────────

    /// Load a client and open its details screen.
    pub async fn view_client(&self, id: &ClientId) -> Result<(), CoreError> {
        let client = self.load_client(id).await?;
        self.nav.set_current(client);
        self.goto(ScreenId::ClientDetails).await;
        Ok(())
    }

    /// Load a client and open the edit form.
    pub async fn edit_client(&self, id: &ClientId) -> Result<(), CoreError> {
        let client = self.load_client(id).await?;
        self.nav.set_current(client);
        self.goto(ScreenId::EditClient).await;
        Ok(())
    }

    pub async fn edit_current(&self) -> Result<(), CoreError> {
        let current = self.nav.current_client().ok_or(CoreError::NoSelection)?;
        self.edit_client(&current.id).await
    }

    /// Store lookup by id -- the cache may be stale for a single-record
    /// view.
    async fn load_client(&self, id: &ClientId) -> Result<Client, CoreError> {
        let _guard = self
            .busy
            .acquire(BusyKey::LoadClient(id.clone()))
            .ok_or(CoreError::OperationInFlight)?;

        match self.store.get(id).await.map_err(CoreError::persistence)? {
            Some(client) => Ok(client),
            None => Err(CoreError::ClientNotFound { id: id.clone() }),
        }
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create a client. Validation failures abort before any network
    /// call; duplicate emails abort before any write. Success resets the
    /// form (the caller clears it on `Ok`) and lands on the dashboard.
    pub async fn create_client(&self, form: &ClientForm) -> Result<ClientId, CoreError> {
        let form = form.trimmed();
        validate::validate_client_form(&form).map_err(CoreError::validation)?;

        let _guard = self
            .busy
            .acquire(BusyKey::CreateClient)
            .ok_or(CoreError::OperationInFlight)?;

        if self.email_exists(&form.email, None).await? {
            return Err(CoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let record = NewClient {
            name: form.name.clone(),
            mobile: form.mobile.clone(),
            email: form.email.clone(),
            admin_link: none_if_empty(&form.admin_link),
            firebase_email: none_if_empty(&form.firebase_email),
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let id = self
            .store
            .create(&record)
            .await
            .map_err(CoreError::persistence)?;

        info!(%id, "client created");
        self.notices.publish(Notice::success("Client added successfully!"));
        self.goto(ScreenId::Dashboard).await;
        Ok(id)
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Update the currently selected client. The uniqueness query is
    /// skipped when the email is unchanged; otherwise the client's own
    /// record is excluded from the check.
    pub async fn update_client(&self, form: &ClientForm) -> Result<(), CoreError> {
        let current = self.nav.current_client().ok_or(CoreError::NoSelection)?;

        let form = form.trimmed();
        validate::validate_client_form(&form).map_err(CoreError::validation)?;

        let _guard = self
            .busy
            .acquire(BusyKey::UpdateClient)
            .ok_or(CoreError::OperationInFlight)?;

        if form.email != current.email && self.email_exists(&form.email, Some(&current.id)).await? {
            return Err(CoreError::DuplicateEmail);
        }

        let patch = ClientPatch::from_form(&form, Utc::now());
        self.store
            .update(&current.id, &patch)
            .await
            .map_err(CoreError::persistence)?;

        let mut updated = current;
        patch.apply_to(&mut updated);
        self.nav.set_current(updated);

        info!("client updated");
        self.notices.publish(Notice::success("Client updated successfully!"));
        self.goto(ScreenId::ClientDetails).await;

        // Consistency side effect, not navigation: list views re-render
        // from the shared cache, and a failed refresh never fails the
        // update.
        self.refresh_after_mutation().await;
        Ok(())
    }

    // ── Toggle status ────────────────────────────────────────────────

    /// Flip a client between active and inactive. All three entry points
    /// (dashboard, list, details) land here; a details-origin toggle also
    /// updates the current-client reference.
    pub async fn toggle_status(
        &self,
        id: &ClientId,
        origin: Origin,
    ) -> Result<ClientStatus, CoreError> {
        let _guard = self
            .busy
            .acquire(BusyKey::ToggleStatus(id.clone()))
            .ok_or(CoreError::OperationInFlight)?;

        let client = match self.store.get(id).await.map_err(CoreError::persistence)? {
            Some(client) => client,
            None => return Err(CoreError::ClientNotFound { id: id.clone() }),
        };

        let status = client.status.toggled();
        let patch = ClientPatch::status_only(status, Utc::now());
        self.store
            .update(id, &patch)
            .await
            .map_err(CoreError::persistence)?;

        debug!(%id, %status, ?origin, "client status toggled");

        if origin == Origin::Details {
            if let Some(mut current) = self.nav.current_client() {
                if current.id == *id {
                    patch.apply_to(&mut current);
                    self.nav.set_current(current);
                }
            }
        }

        self.refresh_after_mutation().await;
        Ok(status)
    }

    pub async fn toggle_current(&self) -> Result<ClientStatus, CoreError> {
        let current = self.nav.current_client().ok_or(CoreError::NoSelection)?;
        self.toggle_status(&current.id, Origin::Details).await
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete after an explicit confirmation naming the client. Declined
    /// confirmations change nothing.
    pub async fn delete_client(
        &self,
        id: &ClientId,
        origin: Origin,
    ) -> Result<CommandOutcome, CoreError> {
        let name = self
            .cache
            .find(id)
            .map_or_else(|| id.to_string(), |c| c.name);
        if !self.confirm.confirm(&delete_prompt(&name)) {
            return Ok(CommandOutcome::Unchanged);
        }

        let _guard = self
            .busy
            .acquire(BusyKey::DeleteClient(id.clone()))
            .ok_or(CoreError::OperationInFlight)?;

        self.store.delete(id).await.map_err(CoreError::persistence)?;

        info!(%id, ?origin, "client deleted");
        self.notices.publish(Notice::success("Client deleted successfully!"));
        self.refresh_after_mutation().await;
        Ok(CommandOutcome::Done)
    }

    /// Delete the currently viewed client, then clear the selection and
    /// return to the list.
    pub async fn delete_current(&self) -> Result<CommandOutcome, CoreError> {
        let current = self.nav.current_client().ok_or(CoreError::NoSelection)?;

        if !self.confirm.confirm(&delete_prompt(&current.name)) {
            return Ok(CommandOutcome::Unchanged);
        }

        let _guard = self
            .busy
            .acquire(BusyKey::DeleteClient(current.id.clone()))
            .ok_or(CoreError::OperationInFlight)?;

        self.store
            .delete(&current.id)
            .await
            .map_err(CoreError::persistence)?;

        info!(id = %current.id, "client deleted from details");
        self.notices.publish(Notice::success("Client deleted successfully!"));
        self.nav.clear_current();
        self.goto(ScreenId::ClientsList).await;
        Ok(CommandOutcome::Done)
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Render the cache for download. An empty cache yields a warning
    /// notice and no file.
    pub fn export(&self, format: ExportFormat) -> Option<ExportFile> {
        let snapshot = self.cache.snapshot();
        if snapshot.is_empty() {
            self.notices.publish(Notice::warning("No client data to export"));
            return None;
        }

        let file = export::export_clients(&snapshot, format, Utc::now());
        self.notices.publish(Notice::success(format!(
            "Client data exported successfully as {}",
            format.label()
        )));
        Some(file)
    }

    // ── Command dispatch ─────────────────────────────────────────────

    /// Route a UI command. This is the supervisory boundary: every error
    /// is logged and surfaced as a notice, and the application stays
    /// re-triggerable.
    pub async fn dispatch(&self, cmd: UiCommand) -> Result<CommandOutcome, CoreError> {
        let result = self.route(cmd).await;
        if let Err(e) = &result {
            warn!(error = %e, "command failed");
            self.notices.publish(Notice::error(e.to_string()));
        }
        result
    }

    async fn route(&self, cmd: UiCommand) -> Result<CommandOutcome, CoreError> {
        match cmd {
            UiCommand::ViewClient { id } => {
                self.view_client(&id).await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::EditClient { id } => {
                self.edit_client(&id).await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::EditCurrent => {
                self.edit_current().await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::SubmitAddClient { form } => {
                let id = self.create_client(&form).await?;
                Ok(CommandOutcome::Created { id })
            }
            UiCommand::SubmitEditClient { form } => {
                self.update_client(&form).await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::ToggleStatus { id, origin } => {
                self.toggle_status(&id, origin).await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::ToggleCurrent => {
                self.toggle_current().await?;
                Ok(CommandOutcome::Done)
            }
            UiCommand::DeleteClient { id, origin } => self.delete_client(&id, origin).await,
            UiCommand::DeleteCurrent => self.delete_current().await,
            UiCommand::Cancel => Ok(self.handle_cancel().await),
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Read-then-write existence check; two concurrent creates can both
    /// pass it (documented race, the store enforces nothing).
    async fn email_exists(
        &self,
        email: &str,
        exclude: Option<&ClientId>,
    ) -> Result<bool, CoreError> {
        let matches = self
            .store
            .find_by_email(email)
            .await
            .map_err(CoreError::persistence)?;

        Ok(match exclude {
            Some(own_id) => matches.iter().any(|c| &c.id != own_id),
            None => !matches.is_empty(),
        })
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh_clients().await {
            warn!(error = %e, "refresh after mutation failed, stale cache retained");
            self.notices.publish(Notice::error("Failed to refresh client data"));
        }
    }
}

fn delete_prompt(name: &str) -> String {
    format!(
        "Are you sure you want to permanently delete \"{name}\"?\n\nThis action cannot be undone."
    )
}
