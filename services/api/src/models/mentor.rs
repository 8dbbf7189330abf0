//! Mentor directory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{FieldErrors, required_text, validate_email};

const NAME_MAX_LENGTH: usize = 100;
const EXPERTISE_MAX_LENGTH: usize = 200;

/// Mentor entity as stored
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Mentor {
    pub id: i64,
    pub name: String,
    pub expertise: String,
    pub bio: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mentor {
    /// Overwrite every mutable field and stamp `updated_at`
    pub fn apply(&mut self, fields: MentorFields, now: DateTime<Utc>) {
        let MentorFields {
            name,
            expertise,
            bio,
            email,
        } = fields;

        self.name = name;
        self.expertise = expertise;
        self.bio = bio;
        self.email = email;
        self.updated_at = now;
    }
}

/// Validated mutable fields of a mentor, used for both create and replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorFields {
    pub name: String,
    pub expertise: String,
    pub bio: String,
    pub email: String,
}

/// Request body for mentor create and replace.
///
/// `id` and the timestamps are server-assigned, so any values sent for them
/// are ignored along with other unknown keys.
#[derive(Debug, Default, Deserialize)]
pub struct MentorPayload {
    pub name: Option<String>,
    pub expertise: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
}

impl MentorPayload {
    pub fn validate(self) -> Result<MentorFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", self.name, Some(NAME_MAX_LENGTH));
        let expertise = required_text(
            &mut errors,
            "expertise",
            self.expertise,
            Some(EXPERTISE_MAX_LENGTH),
        );
        let bio = required_text(&mut errors, "bio", self.bio, None);

        let email = required_text(&mut errors, "email", self.email, None);
        if errors.get("email").is_none() {
            if let Err(message) = validate_email(&email) {
                errors.add("email", message);
            }
        }

        errors.into_result(|| MentorFields {
            name,
            expertise,
            bio,
            email,
        })
    }
}

/// Wire representation of a mentor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MentorResponse {
    pub id: i64,
    pub name: String,
    pub expertise: String,
    pub bio: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mentor> for MentorResponse {
    fn from(mentor: Mentor) -> Self {
        Self {
            id: mentor.id,
            name: mentor.name,
            expertise: mentor.expertise,
            bio: mentor.bio,
            email: mentor.email,
            created_at: mentor.created_at,
            updated_at: mentor.updated_at,
        }
    }
}
