// Firestore HTTP client
//
// Wraps `reqwest::Client` with project-scoped URL construction, bearer
// authorization from the shared TokenCache, and error-envelope parsing.
// Document endpoints are implemented as inherent methods in `documents.rs`
// to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{TokenCache, TransportConfig};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Error envelope: `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Raw HTTP client for the Firestore document API.
///
/// Handles project-scoped path construction and the error envelope; all
/// methods return parsed documents -- callers never see HTTP mechanics.
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: Url,
    project_id: String,
    tokens: TokenCache,
}

impl FirestoreClient {
    /// Create a new Firestore client for a project.
    ///
    /// `base_url` is normally the hosted endpoint; tests and emulators pass
    /// their own.
    pub fn new(
        base_url: Option<Url>,
        project_id: impl Into<String>,
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
            project_id: project_id.into(),
            tokens,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn documents_root(&self) -> String {
        format!(
            "v1/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// `{base}/v1/projects/{p}/databases/(default)/documents/{collection}`
    pub(crate) fn collection_url(&self, collection: &str) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("{}/{collection}", self.documents_root()))?)
    }

    /// `{base}/.../documents/{collection}/{id}`
    pub(crate) fn document_url(&self, collection: &str, id: &str) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("{}/{collection}/{id}", self.documents_root()))?)
    }

    /// `{base}/.../documents:runQuery`
    pub(crate) fn run_query_url(&self) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("{}:runQuery", self.documents_root()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.bearer() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self
            .authorize(self.http.patch(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        // Successful deletes return an empty object.
        let _: serde_json::Value = parse_response(resp).await?;
        Ok(())
    }
}

/// Parse a Firestore response, mapping the error envelope.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        let (message, code) = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => (envelope.error.message, envelope.error.status),
            Err(_) => (body, None),
        };

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::PermissionDenied { message });
        }

        return Err(Error::Firestore {
            message,
            status: status.as_u16(),
            code,
        });
    }

    if body.is_empty() {
        // DELETE responses can be fully empty; synthesize an empty object.
        return serde_json::from_str("{}").map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Shared JSON shape for `{"fields": {...}}` request bodies.
pub(crate) fn fields_body(
    fields: &std::collections::BTreeMap<String, super::types::Value>,
) -> serde_json::Value {
    json!({ "fields": fields })
}
