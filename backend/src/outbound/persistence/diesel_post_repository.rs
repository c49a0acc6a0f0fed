//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! The `posts.user_id` foreign key surfaces as
//! [`PostPersistenceError::MissingOwner`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, PostDraft, PostId, UserId};

use super::diesel_basic_error_mapping::{
    log_diesel_error, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_user_repository::count_to_total;
use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository using `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    map_basic_pool_error(error, PostPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> PostPersistenceError {
    map_basic_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

fn map_insert_error(error: DieselError, owner: UserId) -> PostPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            log_diesel_error(&error);
            PostPersistenceError::missing_owner(owner.get())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PostPersistenceError> {
    let id = row.id;
    Post::try_from_stored(row.id, row.title, row.content, row.user_id, row.created_at)
        .map_err(|err| PostPersistenceError::query(format!("stored post {id} is invalid: {err}")))
}

fn rows_to_page(
    page: PageRequest,
    total: i64,
    rows: Vec<PostRow>,
) -> Result<Page<Post>, PostPersistenceError> {
    let data = rows
        .into_iter()
        .map(row_to_post)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(page, count_to_total(total), data))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn insert(&self, owner: UserId, draft: &PostDraft) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostRow {
            title: draft.title().as_ref(),
            content: draft.content().as_ref(),
            user_id: owner.get(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, owner))?;

        row_to_post(row)
    }

    async fn replace(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostChangeset {
            title: draft.title().as_ref(),
            content: draft.content().as_ref(),
        };

        let row: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set(&changes)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = diesel::delete(posts::table.find(id.get()))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = posts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<PostRow> = posts::table
            .order(posts::id.asc())
            .offset(page.skip())
            .limit(page.limit())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_page(page, total, rows)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<Page<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = posts::table
            .filter(posts::user_id.eq(owner.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<PostRow> = posts::table
            .filter(posts::user_id.eq(owner.get()))
            .order(posts::id.asc())
            .offset(page.skip())
            .limit(page.limit())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_page(page, total, rows)
    }
}
