//! User service
//!
//! Implements the business rules for the user collection:
//! - list / get
//! - create with presence checks on name and email
//! - update: existence is checked before the body is validated
//! - delete: a missing id is reported as `NotFound`

use crate::models::{User, UserFields, UserPayload};
use crate::repositories::UserRepository;
use anyhow::Context;
use std::sync::Arc;

const REQUIRED_FIELDS_MESSAGE: &str = "name and email are required";

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Validation error (missing or blank field)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No user with this id
    #[error("User not found: {0}")]
    NotFound(i64),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for managing the user collection
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service with the given repository
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// All users in insertion order
    pub async fn list(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self.user_repo.list().await.context("Failed to list users")?;
        Ok(users)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<User, UserServiceError> {
        self.user_repo
            .get_by_id(id)
            .await
            .context("Failed to get user by ID")?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Number of users currently stored
    pub async fn count(&self) -> Result<usize, UserServiceError> {
        let count = self.user_repo.count().await.context("Failed to count users")?;
        Ok(count)
    }

    /// Create a user
    ///
    /// # Errors
    ///
    /// - `ValidationError` if name or email is missing or blank; nothing is
    ///   stored in that case
    /// - `InternalError` for repository errors
    pub async fn create(&self, payload: UserPayload) -> Result<User, UserServiceError> {
        let fields = validate_payload(&payload)?;

        let user = self
            .user_repo
            .create(fields)
            .await
            .context("Failed to create user")?;

        tracing::info!(id = user.id, "User created");
        Ok(user)
    }

    /// Replace name and email of an existing user
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id, whatever the payload
    /// - `ValidationError` if name or email is missing or blank
    /// - `InternalError` for repository errors
    pub async fn update(&self, id: i64, payload: UserPayload) -> Result<User, UserServiceError> {
        self.get_by_id(id).await?;

        let fields = validate_payload(&payload)?;

        // A concurrent delete may land between the lookup and the write.
        let user = self
            .user_repo
            .update(id, fields)
            .await
            .context("Failed to update user")?
            .ok_or(UserServiceError::NotFound(id))?;

        tracing::info!(id, "User updated");
        Ok(user)
    }

    /// Delete a user
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id
    /// - `InternalError` for repository errors
    pub async fn delete(&self, id: i64) -> Result<(), UserServiceError> {
        let removed = self
            .user_repo
            .delete(id)
            .await
            .context("Failed to delete user")?;

        if !removed {
            return Err(UserServiceError::NotFound(id));
        }

        tracing::info!(id, "User deleted");
        Ok(())
    }
}

fn validate_payload(payload: &UserPayload) -> Result<UserFields, UserServiceError> {
    let (name, email) = payload
        .required_fields()
        .ok_or_else(|| UserServiceError::ValidationError(REQUIRED_FIELDS_MESSAGE.to_string()))?;

    Ok(UserFields {
        name: name.to_string(),
        email: email.to_string(),
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::repositories::InMemoryUserRepository;
    use proptest::prelude::*;

    /// Sequence of operations: `true` creates a user, `false` deletes the
    /// most recently created one.
    fn ops_strategy() -> impl Strategy<Value = Vec<bool>> {
        prop::collection::vec(prop::bool::weighted(0.7), 1..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn property_created_ids_strictly_increase(ops in ops_strategy()) {
            tokio_test::block_on(async move {
                let service = UserService::new(InMemoryUserRepository::boxed());
                let mut max_id = 0i64;
                let mut live: Vec<i64> = Vec::new();

                for create in ops {
                    if create {
                        let user = service
                            .create(UserPayload::new("User", "user@example.com"))
                            .await
                            .unwrap();
                        prop_assert!(user.id > max_id);
                        max_id = user.id;
                        live.push(user.id);
                    } else if let Some(id) = live.pop() {
                        service.delete(id).await.unwrap();
                    }
                }

                prop_assert_eq!(service.count().await.unwrap(), live.len());
                Ok(())
            })?;
        }

        #[test]
        fn property_invalid_create_leaves_collection_unchanged(
            existing in 0usize..10,
            name in prop::option::of("[a-z]{0,8}"),
        ) {
            tokio_test::block_on(async move {
                let service = UserService::new(InMemoryUserRepository::boxed());
                for _ in 0..existing {
                    service.create(UserPayload::new("User", "user@example.com")).await.unwrap();
                }

                let payload = UserPayload { name, email: None };
                let result = service.create(payload).await;

                prop_assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
                prop_assert_eq!(service.count().await.unwrap(), existing);
                Ok(())
            })?;
        }
    }
}
