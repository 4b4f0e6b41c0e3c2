// Shared transport configuration for building reqwest::Client instances.
//
// The Identity and Firestore clients share timeout and user-agent settings
// through this module, plus the `TokenCache` that carries the bearer token
// from a successful sign-in into subsequent document requests.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("dairydesk/0.1.0")
            .build()
            .map_err(crate::error::Error::Transport)
    }
}

/// Shared bearer-token slot.
///
/// The identity client fills it on sign-in and clears it on sign-out; the
/// Firestore client reads it per request. Plays the role a shared cookie
/// jar plays for session-based APIs.
#[derive(Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<Option<SecretString>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh ID token, replacing any previous one.
    pub fn store(&self, token: SecretString) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token);
        }
    }

    /// Drop the current token (sign-out).
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }

    /// Expose the current token value, if any.
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| t.expose_secret().to_owned()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.read().is_ok_and(|slot| slot.is_some())
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}
