//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Storage port for user records.
///
/// Absence is reported as `Ok(None)`; only failures surface as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user, assigning its identifier and creation time.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Replace username and email of an existing user.
    async fn replace(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user together with the posts it owns, returning the removed record.
    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// One page of users in identifier order plus the total count.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError>;
}
