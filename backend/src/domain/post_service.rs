//! Post domain service.
//!
//! Posts always belong to an existing user, so the service consults the user
//! repository before creating posts or listing a user's posts.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{
    PostPersistenceError, PostRepository, PostsCommand, PostsQuery, UserRepository,
};
use crate::domain::user_service::{map_user_persistence_error, user_not_found};
use crate::domain::{Error, Post, PostDraft, PostId, UserId};

fn map_post_persistence_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostPersistenceError::MissingOwner { user_id } => user_not_found(UserId::new(user_id)),
    }
}

fn post_not_found(id: PostId) -> Error {
    Error::not_found(format!("post {id} not found"))
}

/// Post service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<P, U> {
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> PostService<P, U> {
    /// Create a service over the post and user repositories.
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            post_repo,
            user_repo,
        }
    }
}

impl<P, U> PostService<P, U>
where
    U: UserRepository,
{
    async fn ensure_user_exists(&self, owner: UserId) -> Result<(), Error> {
        self.user_repo
            .find_by_id(owner)
            .await
            .map_err(map_user_persistence_error)?
            .map(|_| ())
            .ok_or_else(|| user_not_found(owner))
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, owner: UserId, draft: PostDraft) -> Result<Post, Error> {
        self.ensure_user_exists(owner).await?;
        // The owner may vanish between the check and the insert; the
        // repository then reports `MissingOwner`.
        let post = self
            .post_repo
            .insert(owner, &draft)
            .await
            .map_err(map_post_persistence_error)?;
        info!(post_id = %post.id(), user_id = %owner, "post created");
        Ok(post)
    }

    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, Error> {
        self.post_repo
            .replace(id, &draft)
            .await
            .map_err(map_post_persistence_error)?
            .ok_or_else(|| post_not_found(id))
    }

    async fn delete_post(&self, id: PostId) -> Result<Post, Error> {
        let post = self
            .post_repo
            .delete(id)
            .await
            .map_err(map_post_persistence_error)?
            .ok_or_else(|| post_not_found(id))?;
        info!(post_id = %id, "post deleted");
        Ok(post)
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        self.post_repo
            .find_by_id(id)
            .await
            .map_err(map_post_persistence_error)?
            .ok_or_else(|| post_not_found(id))
    }

    async fn list_posts(&self, page: PageRequest) -> Result<Page<Post>, Error> {
        self.post_repo
            .list(page)
            .await
            .map_err(map_post_persistence_error)
    }

    async fn list_posts_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<Page<Post>, Error> {
        self.ensure_user_exists(owner).await?;
        self.post_repo
            .list_by_owner(owner, page)
            .await
            .map_err(map_post_persistence_error)
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
