//! Input validation utilities
//!
//! Validators return `Result<(), String>` with a user-facing message;
//! payload types collect those messages per field in [`FieldErrors`].

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Key under which errors that belong to no single field are reported
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

const EMAIL_MAX_LENGTH: usize = 254;
const USERNAME_MAX_LENGTH: usize = 150;

/// Field name to list of messages, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors consisting of one message on one field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Ok(value) if nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Check a required text field, recording any failure under `field`.
///
/// Surrounding whitespace is trimmed before the blank and length checks.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max_length: Option<usize>,
) -> String {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return String::new();
    };

    let value = value.trim().to_string();
    if value.is_empty() {
        errors.add(field, BLANK);
    } else if let Some(max) = max_length {
        if let Err(message) = validate_max_length(&value, max) {
            errors.add(field, message);
        }
    }

    value
}

/// Check an optional text field that may be left blank
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max_length: usize,
) -> Option<String> {
    let value = value?.trim().to_string();
    if let Err(message) = validate_max_length(&value, max_length) {
        errors.add(field, message);
    }
    Some(value)
}

/// Validate the character count of a value
pub fn validate_max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            max
        ));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err(BLANK.to_string());
    }

    validate_max_length(username, USERNAME_MAX_LENGTH)?;

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
    }

    Ok(())
}

/// Validate a non-blank email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err(BLANK.to_string());
    }

    validate_max_length(email, EMAIL_MAX_LENGTH)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Enter a valid email address.".to_string());
    }

    Ok(())
}
