//! Authentication service
//!
//! Issues and verifies signed access tokens (HS256 JWT):
//! - `authenticate` checks a username/password pair against the
//!   `CredentialStore` and returns a token valid for the configured TTL
//! - `verify` checks a presented `Authorization` value and returns the claims
//!
//! No token state is kept; verification only needs the shared secret.

use crate::models::Claims;
use crate::services::credentials::CredentialStore;
use anyhow::Context;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

/// Default token lifetime in seconds (1 hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Login failed; unknown user and wrong password are not distinguished
    #[error("Invalid credentials")]
    Unauthorized,

    /// No token was presented
    #[error("Access denied, no token provided")]
    MissingToken,

    /// Token is malformed, not signed with our secret, or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// A freshly issued access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_seconds: i64,
}

impl AuthService {
    /// Create a new auth service signing with `secret`
    pub fn new(credentials: Arc<dyn CredentialStore>, secret: &str) -> Self {
        Self::with_token_ttl(credentials, secret, DEFAULT_TOKEN_TTL_SECONDS)
    }

    /// Create a new auth service with a custom token lifetime
    pub fn with_token_ttl(
        credentials: Arc<dyn CredentialStore>,
        secret: &str,
        token_ttl_seconds: i64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl_seconds,
        }
    }

    /// Check credentials and issue an access token
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if either field does not match
    /// - `InternalError` if the credential store or signing fails, or the
    ///   configured lifetime pushes the expiry out of range
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let valid = self
            .credentials
            .verify(username, password)
            .await
            .context("Failed to verify credentials")?;

        if !valid {
            tracing::warn!(username, "Login rejected");
            return Err(AuthError::Unauthorized);
        }

        let claims = Claims::new(username, Utc::now(), self.token_ttl_seconds).with_context(|| {
            format!("Token lifetime of {}s is out of range", self.token_ttl_seconds)
        })?;
        let expires_at = claims.expires_at().context("Token expiry is out of range")?;
        let token = self.sign(&claims)?;

        tracing::info!(username, %expires_at, "Access token issued");
        Ok(IssuedToken {
            token,
            claims,
            expires_at,
        })
    }

    /// Verify an `Authorization` header value
    ///
    /// A leading `Bearer ` is stripped if present, so a bare token is also
    /// accepted.
    ///
    /// # Errors
    ///
    /// - `MissingToken` if the value is absent or blank
    /// - `InvalidToken` if the signature does not verify or the token expired
    pub fn verify(&self, authorization: Option<&str>) -> Result<Claims, AuthError> {
        let token = authorization
            .map(|value| value.trim())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.verify_token(token)
    }

    /// Verify a bare token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .context("Failed to sign access token")?;
        Ok(token)
    }
}
