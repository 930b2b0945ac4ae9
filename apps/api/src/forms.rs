//! Typed form submissions and their field validation.
//!
//! Each form collects every failing field instead of stopping at the first, so the browser can
//! mark them all at once.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::AuthUser;

pub const INTEREST_REASON_MAX_CHARS: usize = 200;
pub const PASSWORD_MIN_CHARS: usize = 6;

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

pub trait Validate {
    fn field_errors(&self) -> Vec<FieldError>;

    fn validate(&self) -> Result<(), AppError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidForm(errors))
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Shape check only: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for Credentials {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if is_blank(&self.email) {
            errors.push(FieldError::new("email", "Email is required."));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required."));
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Id of a resume uploaded before the account existed.
    #[serde(default)]
    pub resume_id: Option<i64>,
}

impl Validate for Registration {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = name_errors(&self.first_name, &self.last_name);
        if is_blank(&self.email) {
            errors.push(FieldError::new("email", "Email is required."));
        } else if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Invalid email address."));
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters.",
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    /// Job document id.
    pub job: String,
    pub interest_reason: String,
    pub skills: String,
    /// Freshly uploaded resume; falls back to the profile's stored resume.
    #[serde(default)]
    pub resume_id: Option<i64>,
}

impl Validate for ApplicationSubmission {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if is_blank(&self.job) {
            errors.push(FieldError::new("job", REQUIRED));
        }
        if is_blank(&self.interest_reason) {
            errors.push(FieldError::new("interestReason", REQUIRED));
        } else if self.interest_reason.chars().count() > INTEREST_REASON_MAX_CHARS {
            errors.push(FieldError::new("interestReason", "Maximum 200 characters."));
        }
        if is_blank(&self.skills) {
            errors.push(FieldError::new("skills", REQUIRED));
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub resume_id: Option<i64>,
}

impl Validate for UserDetailsUpdate {
    fn field_errors(&self) -> Vec<FieldError> {
        name_errors(&self.first_name, &self.last_name)
    }
}

fn name_errors(first_name: &str, last_name: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if is_blank(first_name) {
        errors.push(FieldError::new("firstName", "First name is required."));
    }
    if is_blank(last_name) {
        errors.push(FieldError::new("lastName", "Last name is required."));
    }
    errors
}

/// New upload wins; otherwise keep whatever resume the profile already has.
pub fn resolve_resume(uploaded: Option<i64>, user: &AuthUser) -> Option<i64> {
    uploaded.or_else(|| user.stored_resume().map(|m| m.id))
}
