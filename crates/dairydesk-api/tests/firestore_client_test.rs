// Integration tests for `FirestoreClient` using wiremock.

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dairydesk_api::firestore::{Document, QuerySpec, Value};
use dairydesk_api::{Error, FirestoreClient, TokenCache, TransportConfig};

const DOC_PREFIX: &str = "projects/test-proj/databases/(default)/documents";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FirestoreClient, TokenCache) {
    let server = MockServer::start().await;
    let tokens = TokenCache::new();
    let client = FirestoreClient::new(
        Some(server.uri().parse().expect("mock server uri")),
        "test-proj",
        tokens.clone(),
        &TransportConfig::default(),
    )
    .expect("client builds");
    (server, client, tokens)
}

fn client_doc(id: &str, name: &str, email: &str) -> serde_json::Value {
    json!({
        "name": format!("{DOC_PREFIX}/clients/{id}"),
        "fields": {
            "name": { "stringValue": name },
            "mobile": { "stringValue": "+911234567890" },
            "email": { "stringValue": email },
            "status": { "stringValue": "active" },
            "createdAt": { "timestampValue": "2024-05-01T10:00:00Z" },
            "updatedAt": { "timestampValue": "2024-05-01T10:00:00Z" },
        },
        "createTime": "2024-05-01T10:00:00Z",
        "updateTime": "2024-05-01T10:00:00Z",
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_create_document() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/{DOC_PREFIX}/clients")))
        .and(body_partial_json(json!({
            "fields": { "name": { "stringValue": "Asha Dairy" } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(client_doc("abc123", "Asha Dairy", "a@b.co")),
        )
        .mount(&server)
        .await;

    let mut fields = BTreeMap::new();
    fields.insert("name".to_owned(), Value::string("Asha Dairy"));

    let doc: Document = client.create_document("clients", &fields).await.expect("created");

    assert_eq!(doc.doc_id(), "abc123");
    assert_eq!(doc.field_str("email"), Some("a@b.co"));
    assert!(doc.field_timestamp("createdAt").is_some());
}

#[tokio::test]
async fn test_get_document_missing_is_none() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{DOC_PREFIX}/clients/nope")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Document not found", "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let doc = client.get_document("clients", "nope").await.expect("ok");
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_patch_document_sends_update_mask() {
    let (server, client, _) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/v1/{DOC_PREFIX}/clients/abc123")))
        .and(query_param("updateMask.fieldPaths", "status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(client_doc("abc123", "Asha Dairy", "a@b.co")),
        )
        .mount(&server)
        .await;

    let mut fields = BTreeMap::new();
    fields.insert("status".to_owned(), Value::string("inactive"));

    let doc = client
        .patch_document("clients", "abc123", &fields)
        .await
        .expect("patched");
    assert_eq!(doc.doc_id(), "abc123");
}

#[tokio::test]
async fn test_delete_document() {
    let (server, client, _) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/{DOC_PREFIX}/clients/abc123")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client.delete_document("clients", "abc123").await.expect("deleted");
}

#[tokio::test]
async fn test_query_collection_filters_empty_rows() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/{DOC_PREFIX}:runQuery")))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "clients" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "email" },
                        "op": "EQUAL",
                        "value": { "stringValue": "a@b.co" },
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "document": client_doc("abc123", "Asha Dairy", "a@b.co"), "readTime": "2024-05-01T10:00:01Z" },
            { "readTime": "2024-05-01T10:00:01Z" },
        ])))
        .mount(&server)
        .await;

    let docs = client
        .query_collection(
            "clients",
            QuerySpec {
                order_by_desc: None,
                field_equals: Some(("email", Value::string("a@b.co"))),
            },
        )
        .await
        .expect("query ok");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].doc_id(), "abc123");
}

#[tokio::test]
async fn test_bearer_token_attached_when_signed_in() {
    let (server, client, tokens) = setup().await;
    tokens.store(SecretString::from("tok-xyz".to_owned()));

    Mock::given(method("GET"))
        .and(path(format!("/v1/{DOC_PREFIX}/clients/abc123")))
        .and(header("authorization", "Bearer tok-xyz"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(client_doc("abc123", "Asha Dairy", "a@b.co")),
        )
        .mount(&server)
        .await;

    let doc = client.get_document("clients", "abc123").await.expect("ok");
    assert!(doc.is_some());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_403_permission_denied() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let result = client.get_document("clients", "abc123").await;

    match result {
        Err(Error::PermissionDenied { ref message }) => {
            assert!(message.contains("insufficient permissions"));
        }
        other => panic!("expected PermissionDenied, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_503_is_transient() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The service is currently unavailable.", "status": "UNAVAILABLE" }
        })))
        .mount(&server)
        .await;

    let result = client
        .query_collection("clients", QuerySpec::default())
        .await;

    assert!(matches!(&result, Err(e) if e.is_transient()));
    match result {
        Err(Error::Firestore { status, ref code, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(code.as_deref(), Some("UNAVAILABLE"));
        }
        other => panic!("expected Firestore 503 error, got: {other:?}"),
    }
}
