//! User model and related types

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Registered user, as exposed outward (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// User row including the stored argon2 hash
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// Register user request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterUser {
    pub name: String,
    #[validate(custom(function = "validate_email_format"))]
    pub email: String,
    /// Plaintext password, at least 8 characters
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Local part, `@`, and a dotted domain ending in an alphabetic TLD
fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
            .expect("email regex must compile")
    })
}

fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if email_re().is_match(email) {
        return Ok(());
    }
    let mut error = ValidationError::new("email");
    error.message = Some(Cow::Borrowed("invalid email format"));
    Err(error)
}

impl RegisterUser {
    /// True when any of the required fields is empty
    pub fn has_missing_fields(&self) -> bool {
        self.name.is_empty() || self.email.is_empty() || self.password.is_empty()
    }
}
