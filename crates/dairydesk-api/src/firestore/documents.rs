// Firestore document endpoints
//
// Document CRUD on a collection plus structured queries. The console's
// store adapter drives everything through these five calls.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::firestore::client::{FirestoreClient, fields_body};
use crate::firestore::types::{Document, QueryRow, Value};

/// Options for a structured query against one collection.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec<'a> {
    /// Order results by this field, descending.
    pub order_by_desc: Option<&'a str>,
    /// Keep only documents whose field equals the given value.
    pub field_equals: Option<(&'a str, Value)>,
}

impl FirestoreClient {
    /// Create a document with a store-assigned id.
    ///
    /// `POST .../documents/{collection}`
    pub async fn create_document(
        &self,
        collection: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Document, Error> {
        let url = self.collection_url(collection)?;
        debug!(collection, "creating document");
        self.post(url, &fields_body(fields)).await
    }

    /// Fetch a single document, or `None` if it does not exist.
    ///
    /// `GET .../documents/{collection}/{id}`
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, Error> {
        let url = self.document_url(collection, id)?;
        debug!(collection, id, "fetching document");
        match self.get(url).await {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update the named fields of a document, leaving the rest untouched.
    ///
    /// `PATCH .../documents/{collection}/{id}?updateMask.fieldPaths=...`
    pub async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Document, Error> {
        let mut url = self.document_url(collection, id)?;
        for path in fields.keys() {
            url.query_pairs_mut()
                .append_pair("updateMask.fieldPaths", path);
        }
        debug!(collection, id, "patching document");
        self.patch(url, &fields_body(fields)).await
    }

    /// Delete a document by id.
    ///
    /// `DELETE .../documents/{collection}/{id}`
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), Error> {
        let url = self.document_url(collection, id)?;
        debug!(collection, id, "deleting document");
        self.delete(url).await
    }

    /// Run a structured query over one collection.
    ///
    /// `POST .../documents:runQuery`
    pub async fn query_collection(
        &self,
        collection: &str,
        spec: QuerySpec<'_>,
    ) -> Result<Vec<Document>, Error> {
        let url = self.run_query_url()?;

        let mut query = json!({
            "from": [{ "collectionId": collection }],
        });
        if let Some((field, value)) = spec.field_equals {
            query["where"] = json!({
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": value,
                }
            });
        }
        if let Some(field) = spec.order_by_desc {
            query["orderBy"] = json!([
                { "field": { "fieldPath": field }, "direction": "DESCENDING" }
            ]);
        }

        debug!(collection, "running structured query");
        let rows: Vec<QueryRow> = self.post(url, &json!({ "structuredQuery": query })).await?;
        Ok(rows.into_iter().filter_map(|r| r.document).collect())
    }
}
