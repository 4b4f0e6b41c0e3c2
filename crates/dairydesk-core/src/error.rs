// ── Core error taxonomy ──
//
// User-facing errors from the orchestration layer. Nothing here is fatal:
// every variant is caught at the console boundary and surfaced as a notice
// or an inline field message, leaving the application re-triggerable.

use thiserror::Error;

use crate::auth::AuthError;
use crate::model::ClientId;
use crate::store::StoreError;

/// A form field that can carry an inline validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Mobile,
    Email,
    AdminLink,
    FirebaseEmail,
    Password,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::AdminLink => "admin link",
            Self::FirebaseEmail => "firebase email",
            Self::Password => "password",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Field-scoped input failures. No network call was made.
    #[error("Validation failed: {}", fmt_fields(.errors))]
    ValidationFailed { errors: Vec<FieldError> },

    /// Another client already holds the submitted email.
    #[error("A client with this email already exists")]
    DuplicateEmail,

    /// A mutation screen was reached without a selected record.
    #[error("No client selected")]
    NoSelection,

    #[error("Client not found: {id}")]
    ClientNotFound { id: ClientId },

    /// The triggering control is still busy with its previous submit.
    #[error("Operation already in progress")]
    OperationInFlight,

    /// Store write failed; previous state retained, safe to retry.
    #[error("Could not save changes: {message}")]
    PersistenceFailed { message: String },

    /// Cache refresh failed; the stale cache is retained, never cleared.
    #[error("Client list unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("{0}")]
    AuthFailed(#[from] AuthError),

    /// Construction/wiring failure (bad URL, client build).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationFailed { errors }
    }

    pub(crate) fn persistence(err: StoreError) -> Self {
        Self::PersistenceFailed {
            message: err.to_string(),
        }
    }

    pub(crate) fn unavailable(err: StoreError) -> Self {
        Self::StoreUnavailable {
            message: err.to_string(),
        }
    }

    /// The field-scoped failures carried by this error, if any.
    /// `DuplicateEmail` is scoped to the email field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::ValidationFailed { errors } => errors.clone(),
            Self::DuplicateEmail => vec![FieldError::new(
                FormField::Email,
                "A client with this email already exists",
            )],
            _ => Vec::new(),
        }
    }
}

fn fmt_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
