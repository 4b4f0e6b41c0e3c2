// ── Identity capability ──
//
// The console consumes the identity provider through a small trait:
// sign-in, sign-out, password reset, with provider failures reduced to a
// fixed code enum carrying the user-facing message.

use secrecy::SecretString;
use thiserror::Error;

/// Provider failure codes the sign-in screen distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    UserDisabled,
    TooManyRequests,
    Network,
    Other,
}

impl AuthCode {
    /// User-facing message for the sign-in screen.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::UserNotFound => "No account found with this email address.",
            Self::WrongPassword => "Incorrect password. Please try again.",
            Self::InvalidEmail => "Invalid email address format.",
            Self::UserDisabled => "This account has been disabled.",
            Self::TooManyRequests => "Too many failed attempts. Please try again later.",
            Self::Network => "Network error. Please check your connection.",
            Self::Other => "Login failed. Please try again.",
        }
    }
}

/// An identity-provider failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .code.user_message())]
pub struct AuthError {
    pub code: AuthCode,
    /// Raw provider detail, for logs only.
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The signed-in user as the console tracks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
}

/// Identity provider capability consumed by the console.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserIdentity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

// ── Production adapter ──────────────────────────────────────────────

/// Adapter over the Identity Toolkit REST client.
pub struct FirebaseIdentity {
    client: dairydesk_api::IdentityClient,
}

impl FirebaseIdentity {
    pub fn new(client: dairydesk_api::IdentityClient) -> Self {
        Self { client }
    }
}

impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserIdentity, AuthError> {
        let user = self
            .client
            .sign_in_with_password(email, password)
            .await
            .map_err(map_api_error)?;
        Ok(UserIdentity {
            uid: user.local_id,
            email: user.email,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.client.sign_out();
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.client
            .send_password_reset(email)
            .await
            .map_err(map_api_error)
    }
}

/// Reduce provider envelope codes to the console's fixed set.
fn map_api_error(err: dairydesk_api::Error) -> AuthError {
    let code = classify(&err);
    AuthError::new(code, err.to_string())
}

fn classify(err: &dairydesk_api::Error) -> AuthCode {
    match err.auth_code() {
        Some("EMAIL_NOT_FOUND") => AuthCode::UserNotFound,
        Some("INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS") => AuthCode::WrongPassword,
        Some("INVALID_EMAIL") => AuthCode::InvalidEmail,
        Some("USER_DISABLED") => AuthCode::UserDisabled,
        Some("TOO_MANY_ATTEMPTS_TRY_LATER") => AuthCode::TooManyRequests,
        Some(_) => AuthCode::Other,
        None => match err {
            dairydesk_api::Error::Transport(_) => AuthCode::Network,
            _ => AuthCode::Other,
        },
    }
}
