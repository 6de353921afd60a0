//! User repository
//!
//! Storage operations for users.
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for user data access
//! - `InMemoryUserRepository` keeping the collection in process memory

use crate::models::{User, UserFields};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Assign the next id and append a new user
    async fn create(&self, fields: UserFields) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Replace name and email of an existing user, `None` if absent
    async fn update(&self, id: i64, fields: UserFields) -> Result<Option<User>>;

    /// Remove a user, returns whether a record was removed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count total users
    async fn count(&self) -> Result<usize>;

    /// List all users in insertion order
    async fn list(&self) -> Result<Vec<User>>;
}

/// Collection and id counter, always mutated together under one guard.
#[derive(Debug)]
struct UserTable {
    users: Vec<User>,
    next_id: i64,
}

impl Default for UserTable {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory user repository.
///
/// Ids start at 1 and are never reused, even after the highest record is
/// deleted.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn UserRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, fields: UserFields) -> Result<User> {
        let mut table = self.table.write().await;
        let user = User::new(table.next_id, fields.name, fields.email);
        table.next_id += 1;
        table.users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, id: i64, fields: UserFields) -> Result<Option<User>> {
        let mut table = self.table.write().await;
        let Some(user) = table.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        *user = User::new(id, fields.name, fields.email);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.users.iter().position(|u| u.id == id) {
            Some(index) => {
                // `remove` keeps the remaining records in insertion order
                table.users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.users.len())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.table.read().await.users.clone())
    }
}
