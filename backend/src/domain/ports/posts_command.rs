//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDraft, PostId, UserId};

/// Domain use-case port for creating, replacing and deleting posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post owned by `owner`, which must exist.
    async fn create_post(&self, owner: UserId, draft: PostDraft) -> Result<Post, Error>;

    /// Replace title and content of post `id`.
    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, Error>;

    /// Delete post `id`, returning the removed post.
    async fn delete_post(&self, id: PostId) -> Result<Post, Error>;
}
