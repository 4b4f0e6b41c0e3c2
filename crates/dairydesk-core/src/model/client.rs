// ── Client domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier assigned by the store on creation. Never reused or
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Activation state. The only transitions are Active ⇄ Inactive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// The canonical client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub admin_link: Option<String>,
    /// Free-text account identifier in the client's own Firebase project.
    pub firebase_email: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw payload submitted from the add/edit forms. All fields arrive as
/// text; blank optionals are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub admin_link: String,
    pub firebase_email: String,
}

impl ClientForm {
    /// Copy with every field whitespace-trimmed, as the forms submit it.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            mobile: self.mobile.trim().to_owned(),
            email: self.email.trim().to_owned(),
            admin_link: self.admin_link.trim().to_owned(),
            firebase_email: self.firebase_email.trim().to_owned(),
        }
    }
}

/// A validated record ready to persist. The orchestrator stamps status
/// and both timestamps before the store sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub admin_link: Option<String>,
    pub firebase_email: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` fields are left untouched by the store;
/// `updated_at` is unconditional because every mutation bumps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    /// `Some("")` clears the stored link.
    pub admin_link: Option<String>,
    pub firebase_email: Option<String>,
    pub status: Option<ClientStatus>,
    pub updated_at: DateTime<Utc>,
}

impl ClientPatch {
    /// Patch carrying only a status flip.
    pub fn status_only(status: ClientStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            mobile: None,
            email: None,
            admin_link: None,
            firebase_email: None,
            status: Some(status),
            updated_at,
        }
    }

    /// Full-form patch: the edit screen always submits every field.
    pub fn from_form(form: &ClientForm, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: Some(form.name.clone()),
            mobile: Some(form.mobile.clone()),
            email: Some(form.email.clone()),
            admin_link: Some(form.admin_link.clone()),
            firebase_email: Some(form.firebase_email.clone()),
            status: None,
            updated_at,
        }
    }

    /// Merge this patch into an in-memory record, mirroring what the
    /// store applies.
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(mobile) = &self.mobile {
            client.mobile = mobile.clone();
        }
        if let Some(email) = &self.email {
            client.email = email.clone();
        }
        if let Some(link) = &self.admin_link {
            client.admin_link = none_if_empty(link);
        }
        if let Some(fb) = &self.firebase_email {
            client.firebase_email = none_if_empty(fb);
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        client.updated_at = self.updated_at;
    }
}

/// Blank optional text fields are absent values.
pub fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_owned()) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Client {
        Client {
            id: ClientId::new("c1"),
            name: "Asha Dairy".into(),
            mobile: "+911234567890".into(),
            email: "asha@dairy.example".into(),
            admin_link: Some("https://admin.example/asha".into()),
            firebase_email: None,
            status: ClientStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_toggles_back_and_forth() {
        assert_eq!(ClientStatus::Active.toggled(), ClientStatus::Inactive);
        assert_eq!(ClientStatus::Active.toggled().toggled(), ClientStatus::Active);
    }

    #[test]
    fn status_parses_lowercase() {
        assert_eq!("active".parse::<ClientStatus>().unwrap(), ClientStatus::Active);
        assert_eq!("inactive".parse::<ClientStatus>().unwrap(), ClientStatus::Inactive);
        assert!("disabled".parse::<ClientStatus>().is_err());
    }

    #[test]
    fn form_trimmed_strips_all_fields() {
        let form = ClientForm {
            name: "  Asha Dairy ".into(),
            mobile: " +911234567890".into(),
            email: "asha@dairy.example  ".into(),
            admin_link: String::new(),
            firebase_email: " ".into(),
        };
        let trimmed = form.trimmed();
        assert_eq!(trimmed.name, "Asha Dairy");
        assert_eq!(trimmed.mobile, "+911234567890");
        assert!(trimmed.firebase_email.is_empty());
    }

    #[test]
    fn patch_apply_merges_and_bumps_updated_at() {
        let mut client = sample();
        let before = client.updated_at;
        let at = before + chrono::Duration::seconds(5);

        let patch = ClientPatch {
            name: Some("Asha Dairy Pvt Ltd".into()),
            admin_link: Some(String::new()),
            ..ClientPatch::status_only(ClientStatus::Inactive, at)
        };
        patch.apply_to(&mut client);

        assert_eq!(client.name, "Asha Dairy Pvt Ltd");
        assert_eq!(client.admin_link, None);
        assert_eq!(client.status, ClientStatus::Inactive);
        assert_eq!(client.updated_at, at);
    }

    #[test]
    fn client_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("adminLink").is_some());
        assert!(json.get("firebaseEmail").is_some());
        assert_eq!(json["status"], "active");
    }
}
