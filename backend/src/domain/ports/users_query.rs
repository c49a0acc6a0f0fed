//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read users without importing outbound
//! persistence concerns.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch user `id`, failing with not found when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// One page of users.
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, Error>;
}
