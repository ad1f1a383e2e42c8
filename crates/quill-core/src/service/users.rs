//! The users service: signup and credential resolution.

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, UserRepository};

pub struct UsersService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UsersService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create a user with a hashed credential. Duplicate usernames surface
    /// as [`DomainError::Duplicate`].
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        if new_user.username.trim().is_empty() {
            return Err(DomainError::Validation("`username` is required".to_string()));
        }
        if new_user.password.is_empty() {
            return Err(DomainError::Validation("`password` is required".to_string()));
        }

        let hash = self
            .passwords
            .hash(&new_user.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self.users.insert(User::new(new_user.username, hash)).await?;
        tracing::debug!(user_id = %user.id, username = %user.username, "created user");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_username(username).await?)
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Resolve a username/password pair to the user it identifies.
    /// Unknown usernames and wrong passwords are indistinguishable: both
    /// yield `None`.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        let valid = self
            .passwords
            .verify(password, &user.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(valid.then_some(user))
    }
}
