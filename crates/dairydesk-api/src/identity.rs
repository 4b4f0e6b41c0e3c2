// Identity Toolkit REST client
//
// Email/password sign-in and password-reset mail via the managed identity
// provider. A successful sign-in deposits the ID token into the shared
// `TokenCache` so the Firestore client can authorize document requests.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{TokenCache, TransportConfig};

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// The signed-in user as reported by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInUser {
    /// Provider-assigned account id.
    pub local_id: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    local_id: String,
    email: String,
}

/// Error envelope: `{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// REST client for the identity provider.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    tokens: TokenCache,
}

impl IdentityClient {
    /// Create a new identity client.
    ///
    /// `base_url` is normally the hosted endpoint; tests and emulators pass
    /// their own.
    pub fn new(
        base_url: Option<Url>,
        api_key: SecretString,
        tokens: TokenCache,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = match base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            api_key,
            tokens,
        })
    }

    fn endpoint(&self, action: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join(&format!("v1/accounts:{action}"))?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());
        Ok(url)
    }

    /// Sign in with email and password.
    ///
    /// `POST /v1/accounts:signInWithPassword` -- on success the ID token is
    /// stored in the shared [`TokenCache`].
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignedInUser, Error> {
        let url = self.endpoint("signInWithPassword")?;
        debug!(email, "signing in");

        let resp = self
            .http
            .post(url)
            .json(&json!({
                "email": email,
                "password": password.expose_secret(),
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let body: SignInResponse = parse_response(resp).await?;
        self.tokens.store(SecretString::from(body.id_token));

        Ok(SignedInUser {
            local_id: body.local_id,
            email: body.email,
        })
    }

    /// Request a password-reset mail for `email`.
    ///
    /// `POST /v1/accounts:sendOobCode` with `requestType: PASSWORD_RESET`.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), Error> {
        let url = self.endpoint("sendOobCode")?;
        debug!(email, "requesting password reset mail");

        let resp = self
            .http
            .post(url)
            .json(&json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let _: serde_json::Value = parse_response(resp).await?;
        Ok(())
    }

    /// Drop the cached session token. The provider keeps no server-side
    /// session for password sign-in, so this is purely local.
    pub fn sign_out(&self) {
        debug!("signing out");
        self.tokens.clear();
    }

    pub fn is_signed_in(&self) -> bool {
        self.tokens.is_signed_in()
    }
}

/// Parse a provider response, mapping the error envelope to [`Error::Auth`].
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        // The provider reports failures as machine codes in `error.message`.
        return match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(Error::Auth {
                code: envelope.error.message.clone(),
                message: envelope.error.message,
            }),
            Err(_) => Err(Error::Auth {
                code: format!("HTTP_{}", status.as_u16()),
                message: body,
            }),
        };
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
