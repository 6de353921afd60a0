//! Services layer - Business logic
//!
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating with repositories and credential stores
//! - Handling validation and error cases

pub mod auth;
pub mod credentials;
pub mod user;

pub use auth::{AuthError, AuthService, IssuedToken};
pub use credentials::{CredentialStore, StaticCredentialStore};
pub use user::{UserService, UserServiceError};
