// ── Remote client store capability ──
//
// The console treats the document database as an async key-value/document
// API behind this trait. The production adapter maps the Firestore REST
// client; tests substitute an in-memory store.

use thiserror::Error;

use dairydesk_api::firestore::{QuerySpec, Value};

use crate::convert;
use crate::model::{Client, ClientId, ClientPatch, NewClient};

/// The collection every client record lives in.
pub const CLIENTS_COLLECTION: &str = "clients";

/// Store-layer failures as the orchestrator sees them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Remote document store capability for the `clients` collection.
#[allow(async_fn_in_trait)]
pub trait ClientStore {
    /// Persist a new record; the store assigns the id.
    async fn create(&self, record: &NewClient) -> Result<ClientId, StoreError>;

    /// Fetch a single record, `None` if absent.
    async fn get(&self, id: &ClientId) -> Result<Option<Client>, StoreError>;

    /// All records, ordered by creation time descending.
    async fn list_all(&self) -> Result<Vec<Client>, StoreError>;

    /// Apply a partial update.
    async fn update(&self, id: &ClientId, patch: &ClientPatch) -> Result<(), StoreError>;

    /// Delete by id. Deleting an absent record is not an error.
    async fn delete(&self, id: &ClientId) -> Result<(), StoreError>;

    /// Equality query on the email field.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Client>, StoreError>;
}

// ── Production adapter ──────────────────────────────────────────────

/// `ClientStore` over the Firestore REST client.
pub struct FirestoreStore {
    client: dairydesk_api::FirestoreClient,
}

impl FirestoreStore {
    pub fn new(client: dairydesk_api::FirestoreClient) -> Self {
        Self { client }
    }
}

impl ClientStore for FirestoreStore {
    async fn create(&self, record: &NewClient) -> Result<ClientId, StoreError> {
        let fields = convert::new_client_fields(record);
        let doc = self
            .client
            .create_document(CLIENTS_COLLECTION, &fields)
            .await
            .map_err(map_store_error)?;
        Ok(ClientId::new(doc.doc_id()))
    }

    async fn get(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let doc = self
            .client
            .get_document(CLIENTS_COLLECTION, id.as_str())
            .await
            .map_err(map_store_error)?;
        Ok(doc.as_ref().map(convert::client_from_document))
    }

    async fn list_all(&self) -> Result<Vec<Client>, StoreError> {
        let docs = self
            .client
            .query_collection(
                CLIENTS_COLLECTION,
                QuerySpec {
                    order_by_desc: Some(convert::FIELD_CREATED_AT),
                    field_equals: None,
                },
            )
            .await
            .map_err(map_store_error)?;
        Ok(docs.iter().map(convert::client_from_document).collect())
    }

    async fn update(&self, id: &ClientId, patch: &ClientPatch) -> Result<(), StoreError> {
        let fields = convert::patch_fields(patch);
        self.client
            .patch_document(CLIENTS_COLLECTION, id.as_str(), &fields)
            .await
            .map_err(map_store_error)?;
        Ok(())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), StoreError> {
        self.client
            .delete_document(CLIENTS_COLLECTION, id.as_str())
            .await
            .map_err(map_store_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Client>, StoreError> {
        let docs = self
            .client
            .query_collection(
                CLIENTS_COLLECTION,
                QuerySpec {
                    order_by_desc: None,
                    field_equals: Some((convert::FIELD_EMAIL, Value::string(email))),
                },
            )
            .await
            .map_err(map_store_error)?;
        Ok(docs.iter().map(convert::client_from_document).collect())
    }
}

fn map_store_error(err: dairydesk_api::Error) -> StoreError {
    if err.is_permission_denied() {
        StoreError::PermissionDenied(err.to_string())
    } else {
        StoreError::Unavailable(err.to_string())
    }
}
