//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`], turning
//! absent records into not-found errors.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

pub(crate) fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .user_repo
            .insert(&draft)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        self.user_repo
            .replace(id, &draft)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .user_repo
            .delete(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "user deleted");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, Error> {
        self.user_repo
            .list(page)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
