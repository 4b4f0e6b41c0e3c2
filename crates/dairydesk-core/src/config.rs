// ── Runtime connection configuration ──
//
// Describes *how* to reach the managed backend. Carries credential data
// and tuning, but never touches disk -- the config crate (or tests)
// constructs an `AppConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for one console session against one backend project.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend project identifier.
    pub project_id: String,
    /// Web API key for the identity endpoints.
    pub api_key: SecretString,
    /// Override for the identity endpoint (emulators, tests).
    pub identity_url: Option<Url>,
    /// Override for the Firestore endpoint (emulators, tests).
    pub firestore_url: Option<Url>,
    /// Request timeout for both clients.
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_id: "dairydesk-demo".into(),
            api_key: SecretString::from(String::new()),
            identity_url: None,
            firestore_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}
