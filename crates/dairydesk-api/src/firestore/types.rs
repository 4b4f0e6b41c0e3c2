// Firestore wire types
//
// Documents carry their fields as a map of tagged values
// (`{"stringValue": "..."}`). Only the value kinds the console's schema
// uses are modeled.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tagged Firestore value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    TimestampValue(DateTime<Utc>),
    /// Firestore encodes 64-bit integers as decimal strings.
    IntegerValue(String),
    BooleanValue(bool),
    NullValue(serde_json::Value),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringValue(s.into())
    }

    pub fn timestamp(t: DateTime<Utc>) -> Self {
        Self::TimestampValue(t)
    }

    pub fn null() -> Self {
        Self::NullValue(serde_json::Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::TimestampValue(t) => Some(*t),
            _ => None,
        }
    }
}

/// A Firestore document: full resource name plus tagged fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource path:
    /// `projects/{p}/databases/(default)/documents/{collection}/{id}`.
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// The final path segment -- the store-assigned document id.
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn field_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.fields.get(key).and_then(Value::as_timestamp)
    }
}

/// One row of a `runQuery` response. Rows carrying only a `readTime`
/// (no document) occur on empty result sets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRow {
    #[serde(default)]
    pub document: Option<Document>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn value_serializes_tagged() {
        let v = Value::string("hello");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({"stringValue": "hello"}));
    }

    #[test]
    fn value_deserializes_timestamp() {
        let v: Value =
            serde_json::from_str(r#"{"timestampValue": "2024-05-01T10:00:00Z"}"#).unwrap();
        assert!(v.as_timestamp().is_some());
    }

    #[test]
    fn doc_id_is_last_path_segment() {
        let doc = Document {
            name: "projects/p/databases/(default)/documents/clients/abc123".into(),
            fields: BTreeMap::new(),
            create_time: None,
            update_time: None,
        };
        assert_eq!(doc.doc_id(), "abc123");
    }

    #[test]
    fn null_value_roundtrip() {
        let v = Value::null();
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
