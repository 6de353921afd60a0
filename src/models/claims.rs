//! Access token claims

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a signed access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The principal the token was issued to
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Claims expiring `ttl_seconds` after `issued_at`.
    ///
    /// Returns `None` if the expiry falls outside the representable range.
    pub fn new(username: impl Into<String>, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(Duration::try_seconds(ttl_seconds)?)?;
        Some(Self {
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Expiry as a timestamp, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
