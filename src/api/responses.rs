//! Shared API request/response types

use serde::{Deserialize, Serialize};

use crate::services::IssuedToken;

/// Request body for `POST /login`
///
/// Missing fields are treated as empty strings and fail authentication.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: String,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            expires_at: issued.expires_at.to_rfc3339(),
            token: issued.token,
            token_type: "Bearer".to_string(),
        }
    }
}
