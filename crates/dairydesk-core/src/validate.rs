// ── Input validation ──
//
// Pure predicates over user input. Called synchronously wherever input
// is accepted; a failed form never reaches the network.

use crate::error::{FieldError, FormField};
use crate::model::ClientForm;

/// Fixed country-code prefix for client mobile numbers.
pub const MOBILE_COUNTRY_PREFIX: &str = "+91";

/// Minimum accepted sign-in password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Syntactic email check: `<non-space-non-@>+ '@' <non-space-non-@>+ '.'
/// <non-space-non-@>+`.
pub fn is_valid_email(s: &str) -> bool {
    fn part_ok(p: &str) -> bool {
        !p.is_empty() && !p.chars().any(|c| c.is_whitespace() || c == '@')
    }

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let Some((head, tail)) = domain.rsplit_once('.') else {
        return false;
    };
    part_ok(local) && part_ok(head) && part_ok(tail)
}

/// E.164 with the fixed country prefix: `+91` followed by exactly ten
/// ASCII digits.
pub fn is_valid_mobile(s: &str) -> bool {
    let Some(rest) = s.strip_prefix(MOBILE_COUNTRY_PREFIX) else {
        return false;
    };
    rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `s` parses as a well-formed absolute URL.
pub fn is_valid_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

pub fn is_valid_password(s: &str) -> bool {
    s.len() >= MIN_PASSWORD_LEN
}

/// Validate a submitted client form, collecting every field failure.
/// Assumes the form is already trimmed.
pub fn validate_client_form(form: &ClientForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.name.is_empty() {
        errors.push(FieldError::new(FormField::Name, "Client name is required"));
    }

    if form.mobile.is_empty() {
        errors.push(FieldError::new(FormField::Mobile, "Client mobile is required"));
    } else if !is_valid_mobile(&form.mobile) {
        errors.push(FieldError::new(
            FormField::Mobile,
            "Mobile must be in E.164 format (+91xxxxxxxxxx)",
        ));
    }

    if form.email.is_empty() {
        errors.push(FieldError::new(FormField::Email, "Client email is required"));
    } else if !is_valid_email(&form.email) {
        errors.push(FieldError::new(
            FormField::Email,
            "Please enter a valid email address",
        ));
    }

    if !form.admin_link.is_empty() && !is_valid_url(&form.admin_link) {
        errors.push(FieldError::new(
            FormField::AdminLink,
            "Please enter a valid URL",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate sign-in input before any provider call.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_valid_email(email) {
        errors.push(FieldError::new(
            FormField::Email,
            "Please enter a valid email address",
        ));
    }
    if !is_valid_password(password) {
        errors.push(FieldError::new(
            FormField::Password,
            "Password must be at least 8 characters",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
