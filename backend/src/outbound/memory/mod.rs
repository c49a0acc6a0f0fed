//! In-process storage adapter.
//!
//! [`InMemoryStore`] implements both repository ports over a single mutex so
//! user deletion can cascade to posts atomically. It backs the server when no
//! database URL is configured, and the HTTP tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    PostPersistenceError, PostRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Post, PostDraft, PostId, User, UserDraft, UserId};

#[derive(Default)]
struct State {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_post_id: i32,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email().as_ref() == email && Some(user.id()) != except)
    }
}

/// Mutex-guarded users and posts with serial identifiers.
pub struct InMemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // No invariant spans a panic point, so a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn page_of<T: Clone>(page: PageRequest, items: Vec<&T>) -> Page<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let data = items[page.window(items.len())]
        .iter()
        .map(|item| (*item).clone())
        .collect();
    Page::new(page, total, data)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(&id.get()).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state.email_taken(draft.email().as_ref(), None) {
            return Err(UserPersistenceError::duplicate_email(draft.email().as_ref()));
        }
        state.last_user_id += 1;
        let user = User::new(
            UserId::new(state.last_user_id),
            draft.username().clone(),
            draft.email().clone(),
            self.clock.utc(),
        );
        state.users.insert(user.id().get(), user.clone());
        Ok(user)
    }

    async fn replace(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        let Some(created_at) = state.users.get(&id.get()).map(User::created_at) else {
            return Ok(None);
        };
        if state.email_taken(draft.email().as_ref(), Some(id)) {
            return Err(UserPersistenceError::duplicate_email(draft.email().as_ref()));
        }
        let user = User::new(
            id,
            draft.username().clone(),
            draft.email().clone(),
            created_at,
        );
        state.users.insert(id.get(), user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        let removed = state.users.remove(&id.get());
        if removed.is_some() {
            state.posts.retain(|_, post| post.user_id() != id);
        }
        Ok(removed)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let state = self.lock();
        Ok(page_of(page, state.users.values().collect()))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self.lock().posts.get(&id.get()).cloned())
    }

    async fn insert(&self, owner: UserId, draft: &PostDraft) -> Result<Post, PostPersistenceError> {
        let mut state = self.lock();
        if !state.users.contains_key(&owner.get()) {
            return Err(PostPersistenceError::missing_owner(owner.get()));
        }
        state.last_post_id += 1;
        let post = Post::new(
            PostId::new(state.last_post_id),
            draft.clone(),
            owner,
            self.clock.utc(),
        );
        state.posts.insert(post.id().get(), post.clone());
        Ok(post)
    }

    async fn replace(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state.posts.get(&id.get()) else {
            return Ok(None);
        };
        let post = Post::new(id, draft.clone(), existing.user_id(), existing.created_at());
        state.posts.insert(id.get(), post.clone());
        Ok(Some(post))
    }

    async fn delete(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self.lock().posts.remove(&id.get()))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Post>, PostPersistenceError> {
        let state = self.lock();
        Ok(page_of(page, state.posts.values().collect()))
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<Page<Post>, PostPersistenceError> {
        let state = self.lock();
        let owned = state
            .posts
            .values()
            .filter(|post| post.user_id() == owner)
            .collect();
        Ok(page_of(page, owned))
    }
}
