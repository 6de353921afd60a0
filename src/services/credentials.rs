//! Credential lookup
//!
//! The login flow asks a `CredentialStore` whether a username/password pair
//! is valid. The only implementation today is `StaticCredentialStore`, which
//! knows a single configured account and keeps its password as an Argon2id
//! hash (PHC string), never in plaintext.

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of truth for login credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns `true` only if `username` exists and `password` matches it.
    async fn verify(&self, username: &str, password: &str) -> Result<bool>;
}

/// A single preconfigured account.
pub struct StaticCredentialStore {
    username: String,
    password_hash: String,
}

impl StaticCredentialStore {
    /// Hash `password` and keep only the hash.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        Ok(Self {
            username: username.into(),
            password_hash: hash_password(password)?,
        })
    }

    /// Create a boxed store for use with dependency injection
    pub fn boxed(username: impl Into<String>, password: &str) -> Result<Arc<dyn CredentialStore>> {
        Ok(Arc::new(Self::new(username, password)?))
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        // Run the hash check for unknown users too, so both failures cost the same.
        let password_ok = verify_password(password, &self.password_hash)?;
        Ok(username == self.username && password_ok)
    }
}

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
        .context("Password hashing failed")?;

    Ok(password_hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))
        .context("Failed to parse password hash")?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Password verification failed: {}", e))
            .context("Password verification error"),
    }
}
