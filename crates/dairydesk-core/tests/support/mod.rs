// Shared fakes for console integration tests: an in-memory ClientStore
// with call counters and failure switches, a scripted identity provider,
// and a recording confirmation gate.

use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use secrecy::SecretString;

use dairydesk_core::auth::{AuthCode, AuthError, IdentityProvider, UserIdentity};
use dairydesk_core::model::{Client, ClientForm, ClientId, ClientPatch, ClientStatus, NewClient};
use dairydesk_core::nav::ConfirmGate;
use dairydesk_core::store::{ClientStore, StoreError};

// ── MemoryStore ─────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct StoreCalls {
    pub create: u32,
    pub get: u32,
    pub list: u32,
    pub update: u32,
    pub delete: u32,
    pub query: u32,
}

#[derive(Default)]
struct MemoryInner {
    seq: u32,
    rows: Vec<Client>,
    fail_reads: bool,
    fail_writes: bool,
    calls: StoreCalls,
}

/// In-memory `ClientStore`. Clones share state, so tests keep a handle
/// for seeding and assertions while the console owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().expect("store lock")
    }

    pub fn seed(&self, client: Client) {
        self.lock().rows.push(client);
    }

    pub fn calls(&self) -> StoreCalls {
        self.lock().calls
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn row(&self, id: &ClientId) -> Option<Client> {
        self.lock().rows.iter().find(|c| &c.id == id).cloned()
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.row(id).is_some()
    }
}

impl ClientStore for MemoryStore {
    async fn create(&self, record: &NewClient) -> Result<ClientId, StoreError> {
        let mut inner = self.lock();
        inner.calls.create += 1;
        if inner.fail_writes {
            return Err(StoreError::Unavailable("write refused".into()));
        }
        inner.seq += 1;
        let id = ClientId::new(format!("mem-{}", inner.seq));
        inner.rows.push(Client {
            id: id.clone(),
            name: record.name.clone(),
            mobile: record.mobile.clone(),
            email: record.email.clone(),
            admin_link: record.admin_link.clone(),
            firebase_email: record.firebase_email.clone(),
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        });
        Ok(id)
    }

    async fn get(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let mut inner = self.lock();
        inner.calls.get += 1;
        if inner.fail_reads {
            return Err(StoreError::Unavailable("read refused".into()));
        }
        Ok(inner.rows.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Client>, StoreError> {
        let mut inner = self.lock();
        inner.calls.list += 1;
        if inner.fail_reads {
            return Err(StoreError::Unavailable("read refused".into()));
        }
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, id: &ClientId, patch: &ClientPatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.update += 1;
        if inner.fail_writes {
            return Err(StoreError::Unavailable("write refused".into()));
        }
        if let Some(row) = inner.rows.iter_mut().find(|c| &c.id == id) {
            patch.apply_to(row);
        }
        Ok(())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.delete += 1;
        if inner.fail_writes {
            return Err(StoreError::Unavailable("write refused".into()));
        }
        inner.rows.retain(|c| &c.id != id);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Client>, StoreError> {
        let mut inner = self.lock();
        inner.calls.query += 1;
        if inner.fail_reads {
            return Err(StoreError::Unavailable("read refused".into()));
        }
        Ok(inner
            .rows
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }
}

// ── FakeIdentity ────────────────────────────────────────────────────

#[derive(Default)]
struct IdentityInner {
    sign_in_calls: u32,
    reset_mails: Vec<String>,
    fail_code: Option<AuthCode>,
}

#[derive(Clone, Default)]
pub struct FakeIdentity {
    inner: Arc<Mutex<IdentityInner>>,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in_calls(&self) -> u32 {
        self.inner.lock().expect("identity lock").sign_in_calls
    }

    pub fn reset_mails(&self) -> Vec<String> {
        self.inner.lock().expect("identity lock").reset_mails.clone()
    }

    #[allow(dead_code)]
    pub fn fail_with(&self, code: AuthCode) {
        self.inner.lock().expect("identity lock").fail_code = Some(code);
    }
}

impl IdentityProvider for FakeIdentity {
    async fn sign_in(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<UserIdentity, AuthError> {
        let mut inner = self.inner.lock().expect("identity lock");
        inner.sign_in_calls += 1;
        if let Some(code) = inner.fail_code {
            return Err(AuthError::new(code, "scripted failure"));
        }
        Ok(UserIdentity {
            uid: "uid-1".into(),
            email: email.to_owned(),
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.inner
            .lock()
            .expect("identity lock")
            .reset_mails
            .push(email.to_owned());
        Ok(())
    }
}

// ── RecordingGate ───────────────────────────────────────────────────

/// Confirmation gate with a settable answer and a prompt log.
#[derive(Clone)]
pub struct RecordingGate {
    answer: Arc<Mutex<bool>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingGate {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: Arc::new(Mutex::new(answer)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        *self.answer.lock().expect("gate lock") = answer;
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("gate lock").clone()
    }
}

impl ConfirmGate for RecordingGate {
    fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .expect("gate lock")
            .push(message.to_owned());
        *self.answer.lock().expect("gate lock")
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

/// A seeded record; `n` spaces creation times one second apart.
pub fn sample_client(n: u32, name: &str, email: &str, status: ClientStatus) -> Client {
    let base = Utc
        .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .expect("valid base time");
    let at = base + Duration::seconds(i64::from(n));
    Client {
        id: ClientId::new(format!("seed-{n}")),
        name: name.into(),
        mobile: format!("+91{:010}", 1_000_000_000_u64 + u64::from(n)),
        email: email.into(),
        admin_link: None,
        firebase_email: None,
        status,
        created_at: at,
        updated_at: at,
    }
}

pub fn valid_form(name: &str, email: &str) -> ClientForm {
    ClientForm {
        name: name.into(),
        mobile: "+911234567890".into(),
        email: email.into(),
        admin_link: String::new(),
        firebase_email: String::new(),
    }
}
