//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{
    BLANK, FieldErrors, NON_FIELD_ERRORS, REQUIRED, optional_text, validate_email,
    validate_username,
};

const NAME_MAX_LENGTH: usize = 150;

pub const PASSWORD_MISMATCH: &str = "Passwords don't match";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// User entity as stored
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_mentor: bool,
    pub is_student: bool,
    pub profile_picture: Option<String>,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Merge a profile edit; fields the edit leaves unset keep their value
    pub fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        self.username = changes.username;
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(is_mentor) = changes.is_mentor {
            self.is_mentor = is_mentor;
        }
        if let Some(is_student) = changes.is_student {
            self.is_student = is_student;
        }
        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        self.updated_at = now;
    }
}

/// New user creation payload, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_mentor: bool,
    pub is_student: bool,
}

/// Validated registration, still holding the plain-text password
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub is_mentor: bool,
    pub is_student: bool,
}

impl Registration {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash,
            is_mentor: self.is_mentor,
            is_student: self.is_student,
        }
    }
}

/// Request for user registration
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_mentor: bool,
    #[serde(default)]
    pub is_student: bool,
}

impl RegisterRequest {
    /// Field checks first; the password confirmation is only compared once
    /// every field is individually valid.
    pub fn validate(self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = check_username(&mut errors, self.username);
        let email = check_email(&mut errors, self.email).unwrap_or_default();
        let first_name =
            optional_text(&mut errors, "first_name", self.first_name, NAME_MAX_LENGTH)
                .unwrap_or_default();
        let last_name = optional_text(&mut errors, "last_name", self.last_name, NAME_MAX_LENGTH)
            .unwrap_or_default();
        let password = check_password(&mut errors, "password", self.password);
        let password2 = check_password(&mut errors, "password2", self.password2);

        if !errors.is_empty() {
            return Err(errors);
        }

        if password != password2 {
            return Err(FieldErrors::single(NON_FIELD_ERRORS, PASSWORD_MISMATCH));
        }

        Ok(Registration {
            username,
            email,
            first_name,
            last_name,
            password,
            is_mentor: self.is_mentor,
            is_student: self.is_student,
        })
    }
}

/// Validated profile edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_mentor: Option<bool>,
    pub is_student: Option<bool>,
    pub bio: Option<String>,
}

/// Request for a profile edit
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_mentor: Option<bool>,
    pub is_student: Option<bool>,
    pub bio: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = check_username(&mut errors, self.username);
        let email = check_email(&mut errors, self.email);
        let first_name = optional_text(&mut errors, "first_name", self.first_name, NAME_MAX_LENGTH);
        let last_name = optional_text(&mut errors, "last_name", self.last_name, NAME_MAX_LENGTH);
        let bio = self.bio.map(|bio| bio.trim().to_string());

        errors.into_result(|| UserChanges {
            username,
            email,
            first_name,
            last_name,
            is_mentor: self.is_mentor,
            is_student: self.is_student,
            bio,
        })
    }
}

fn check_username(errors: &mut FieldErrors, username: Option<String>) -> String {
    let Some(username) = username else {
        errors.add("username", REQUIRED);
        return String::new();
    };

    let username = username.trim().to_string();
    if let Err(message) = validate_username(&username) {
        errors.add("username", message);
    }
    username
}

/// Email is optional on accounts, but a non-blank value must be valid
fn check_email(errors: &mut FieldErrors, email: Option<String>) -> Option<String> {
    let email = email?.trim().to_string();
    if !email.is_empty() {
        if let Err(message) = validate_email(&email) {
            errors.add("email", message);
        }
    }
    Some(email)
}

fn check_password(errors: &mut FieldErrors, field: &str, password: Option<String>) -> String {
    match password {
        None => {
            errors.add(field, REQUIRED);
            String::new()
        }
        Some(password) if password.trim().is_empty() => {
            errors.add(field, BLANK);
            password
        }
        Some(password) => password,
    }
}

/// Response for user operations; the password never leaves the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_mentor: bool,
    pub is_student: bool,
    pub bio: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_mentor: user.is_mentor,
            is_student: user.is_student,
            bio: user.bio,
        }
    }
}
