//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    PostRepository, PostsCommand, PostsQuery, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{PostService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User mutations.
    pub users: Arc<dyn UsersCommand>,
    /// User reads.
    pub users_query: Arc<dyn UsersQuery>,
    /// Post mutations.
    pub posts: Arc<dyn PostsCommand>,
    /// Post reads, including per-owner listings.
    pub posts_query: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
        posts: Arc<dyn PostsCommand>,
        posts_query: Arc<dyn PostsQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            posts,
            posts_query,
        }
    }

    /// Wire the domain services over a pair of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let _state = HttpState::from_repositories(store.clone(), store);
    /// ```
    pub fn from_repositories<U, P>(users: Arc<U>, posts: Arc<P>) -> Self
    where
        U: UserRepository + 'static,
        P: PostRepository + 'static,
    {
        let user_service = Arc::new(UserService::new(users.clone()));
        let post_service = Arc::new(PostService::new(posts, users));
        Self::new(
            user_service.clone(),
            user_service,
            post_service.clone(),
            post_service,
        )
    }
}
