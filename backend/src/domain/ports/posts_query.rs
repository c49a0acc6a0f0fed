//! Driving port for post reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Post, PostId, UserId};

/// Domain use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Fetch post `id`, failing with not found when absent.
    async fn get_post(&self, id: PostId) -> Result<Post, Error>;

    /// One page of all posts.
    async fn list_posts(&self, page: PageRequest) -> Result<Page<Post>, Error>;

    /// One page of the posts owned by `owner`; not found when the user is absent.
    async fn list_posts_by_owner(&self, owner: UserId, page: PageRequest)
    -> Result<Page<Post>, Error>;
}
