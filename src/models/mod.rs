//! Data models
//!
//! This module contains the data structures shared by the service layers:
//! - User records and the create/update payload
//! - Access token claims

mod claims;
mod user;

pub use claims::Claims;
pub use user::{User, UserFields, UserPayload};
