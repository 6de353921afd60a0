//! Repository layer
//!
//! Data access behind traits so the in-memory store can be replaced by a
//! persistent one without touching the services.

pub mod user;

pub use user::{InMemoryUserRepository, UserRepository};
