use thiserror::Error;

/// Top-level error type for the `dairydesk-api` crate.
///
/// Covers every failure mode across both API surfaces: the Identity
/// Toolkit (sign-in, password reset) and the Firestore document API.
/// `dairydesk-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Structured error from the Identity Toolkit envelope
    /// (e.g. `EMAIL_NOT_FOUND`, `INVALID_PASSWORD`).
    #[error("Authentication failed: {code}")]
    Auth { code: String, message: String },

    /// The caller is not signed in and the endpoint requires a token.
    #[error("Not authenticated -- sign in first")]
    NotAuthenticated,

    /// The backend rejected the request for the current identity.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Firestore ───────────────────────────────────────────────────
    /// Structured error from the Firestore `{error: {code, message, status}}`
    /// envelope.
    #[error("Firestore error (HTTP {status}): {message}")]
    Firestore {
        message: String,
        status: u16,
        code: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Firestore { status, .. } => matches!(status, 429 | 500 | 503),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Firestore { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the backend refused the request for the current
    /// identity (expired token, insufficient rules).
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::NotAuthenticated
        )
    }

    /// Extract the Identity Toolkit error code, if available.
    pub fn auth_code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } => Some(code),
            _ => None,
        }
    }
}
