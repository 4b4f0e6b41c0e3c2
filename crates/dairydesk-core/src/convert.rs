// ── Wire ↔ domain conversion ──
//
// Maps Firestore documents to canonical `Client` records and back.
// Conversion is lenient: a record with missing or unparseable fields
// still yields a usable Client rather than failing the whole list.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use dairydesk_api::firestore::{Document, Value};

use crate::model::{Client, ClientId, ClientPatch, ClientStatus, NewClient, none_if_empty};

pub const FIELD_NAME: &str = "name";
pub const FIELD_MOBILE: &str = "mobile";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_ADMIN_LINK: &str = "adminLink";
pub const FIELD_FIREBASE_EMAIL: &str = "firebaseEmail";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Build a `Client` from a stored document.
pub fn client_from_document(doc: &Document) -> Client {
    let owned = |key: &str| doc.field_str(key).unwrap_or_default().to_owned();

    // Application timestamps win; document metadata fills gaps.
    let created_at = doc
        .field_timestamp(FIELD_CREATED_AT)
        .or(doc.create_time)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let updated_at = doc
        .field_timestamp(FIELD_UPDATED_AT)
        .or(doc.update_time)
        .unwrap_or(created_at);

    Client {
        id: ClientId::new(doc.doc_id()),
        name: owned(FIELD_NAME),
        mobile: owned(FIELD_MOBILE),
        email: owned(FIELD_EMAIL),
        admin_link: doc
            .field_str(FIELD_ADMIN_LINK)
            .and_then(none_if_empty),
        firebase_email: doc
            .field_str(FIELD_FIREBASE_EMAIL)
            .and_then(none_if_empty),
        status: doc
            .field_str(FIELD_STATUS)
            .and_then(|s| s.parse().ok())
            .unwrap_or(ClientStatus::Active),
        created_at,
        updated_at,
    }
}

/// Fields for a create. Blank optionals are stored as empty strings,
/// matching the records already in the collection.
pub fn new_client_fields(record: &NewClient) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert(FIELD_NAME.to_owned(), Value::string(record.name.clone()));
    fields.insert(FIELD_MOBILE.to_owned(), Value::string(record.mobile.clone()));
    fields.insert(FIELD_EMAIL.to_owned(), Value::string(record.email.clone()));
    fields.insert(
        FIELD_ADMIN_LINK.to_owned(),
        Value::string(record.admin_link.as_deref().unwrap_or_default()),
    );
    fields.insert(
        FIELD_FIREBASE_EMAIL.to_owned(),
        Value::string(record.firebase_email.as_deref().unwrap_or_default()),
    );
    fields.insert(
        FIELD_STATUS.to_owned(),
        Value::string(record.status.to_string()),
    );
    fields.insert(FIELD_CREATED_AT.to_owned(), Value::timestamp(record.created_at));
    fields.insert(FIELD_UPDATED_AT.to_owned(), Value::timestamp(record.updated_at));
    fields
}

/// Fields for a partial update; only present entries land in the update
/// mask.
pub fn patch_fields(patch: &ClientPatch) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    if let Some(name) = &patch.name {
        fields.insert(FIELD_NAME.to_owned(), Value::string(name.clone()));
    }
    if let Some(mobile) = &patch.mobile {
        fields.insert(FIELD_MOBILE.to_owned(), Value::string(mobile.clone()));
    }
    if let Some(email) = &patch.email {
        fields.insert(FIELD_EMAIL.to_owned(), Value::string(email.clone()));
    }
    if let Some(link) = &patch.admin_link {
        fields.insert(FIELD_ADMIN_LINK.to_owned(), Value::string(link.clone()));
    }
    if let Some(fb) = &patch.firebase_email {
        fields.insert(FIELD_FIREBASE_EMAIL.to_owned(), Value::string(fb.clone()));
    }
    if let Some(status) = patch.status {
        fields.insert(FIELD_STATUS.to_owned(), Value::string(status.to_string()));
    }
    fields.insert(FIELD_UPDATED_AT.to_owned(), Value::timestamp(patch.updated_at));
    fields
}
