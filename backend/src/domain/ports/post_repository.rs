//! Port abstraction for post persistence adapters and their errors.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Post, PostDraft, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The referenced owner does not exist.
        MissingOwner { user_id: i32 } => "user {user_id} does not exist",
    }
}

/// Storage port for post records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Store a new post owned by `owner`.
    async fn insert(&self, owner: UserId, draft: &PostDraft) -> Result<Post, PostPersistenceError>;

    /// Replace title and content of an existing post. Ownership is unchanged.
    async fn replace(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError>;

    /// Remove a post, returning the removed record.
    async fn delete(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// One page of all posts in identifier order plus the total count.
    async fn list(&self, page: PageRequest) -> Result<Page<Post>, PostPersistenceError>;

    /// One page of the posts owned by `owner`.
    async fn list_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<Page<Post>, PostPersistenceError>;
}
