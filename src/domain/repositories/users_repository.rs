use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::user::{User, validate},
};

/// Persistence contract for [`User`] entities.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Validate and insert a new entity, backfilling its id on success.
    async fn create(&self, user: &mut User) -> Result<(), DomainError>;

    /// Look up a user by primary key.
    async fn find_by_id(&self, id: i64) -> Result<User, DomainError>;

    /// Look up a user by its unique email.
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Validate and overwrite the stored row keyed by `user.id`.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}

pub(crate) fn check_id(id: i64) -> Result<(), RepositoryError> {
    if id <= 0 {
        return Err(RepositoryError::InvalidArgument(
            "valid positive ID is required to find a user",
        ));
    }
    Ok(())
}

pub(crate) fn check_email(email: &str) -> Result<(), RepositoryError> {
    if email.is_empty() {
        return Err(RepositoryError::InvalidArgument(
            "valid positive email is required to find a user",
        ));
    }
    Ok(())
}

/// In-memory [`UsersRepository`] for consumer tests and local development.
///
/// Mirrors the storage contract: ascending ids from 1, unique emails and
/// the same argument guards as the MySQL implementation.
#[derive(Clone)]
pub struct InMemoryUsersRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        validate(Some(&*user))?;

        let mut users = self.users.write().await;
        if users.values().any(|stored| stored.email == user.email) {
            return Err(RepositoryError::Database(format!(
                "Duplicate entry '{}' for key 'users.email'",
                user.email
            ))
            .into());
        }

        let id = users.keys().max().copied().unwrap_or(0) + 1;
        user.id = id;
        users.insert(id, user.clone());

        tracing::info!(user_id = id, "created user");
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
        check_id(id)?;

        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        check_email(email)?;

        let users = self.users.read().await;
        users
            .values()
            .find(|stored| stored.email == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound.into())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        validate(Some(user))?;

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| stored.id != user.id && stored.email == user.email)
        {
            return Err(RepositoryError::Database(format!(
                "Duplicate entry '{}' for key 'users.email'",
                user.email
            ))
            .into());
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                tracing::info!(user_id = user.id, "updated user");
                Ok(())
            }
            None => Err(RepositoryError::NotFound.into()),
        }
    }
}
