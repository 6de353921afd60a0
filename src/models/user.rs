//! User model
//!
//! This module defines the User record held by the user repository and the
//! request payload used to create or replace one.

use serde::{Deserialize, Serialize};

/// A single entry in the user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the repository
    pub id: i64,
    /// Display name (non-empty)
    pub name: String,
    /// Email address (non-empty, format is not checked)
    pub email: String,
}

impl User {
    /// Create a new User with the given id.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Returns `(name, email)` if both are present and not blank.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|s| !s.trim().is_empty())?;
        let email = self.email.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((name, email))
    }
}

/// Validated input for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}
