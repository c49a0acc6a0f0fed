//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, replacing and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user. Fails with a conflict when the email is taken.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace username and email of user `id`.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Delete user `id` and its posts, returning the removed user.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;
}
