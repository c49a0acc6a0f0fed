//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each mutation is one `... RETURNING` statement committed on its own. The
//! `users.email` unique constraint surfaces as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::diesel_basic_error_mapping::{
    log_diesel_error, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository using `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Like [`map_diesel_error`] but reports unique violations against `email`.
fn map_write_error(error: DieselError, email: &str) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            log_diesel_error(&error);
            UserPersistenceError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from_stored(row.id, row.username, row.email, row.created_at)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id} is invalid: {err}")))
}

pub(super) fn count_to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            username: draft.username().as_ref(),
            email: draft.email().as_ref(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, new_row.email))?;

        row_to_user(row)
    }

    async fn replace(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserChangeset {
            username: draft.username().as_ref(),
            email: draft.email().as_ref(),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, changes.email))?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Owned posts go with the user through `ON DELETE CASCADE`.
        let row: Option<UserRow> = diesel::delete(users::table.find(id.get()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .offset(page.skip())
            .limit(page.limit())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let data = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(page, count_to_total(total), data))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn unique_violation_names_the_email() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(
            map_write_error(error, "ada@example.com"),
            UserPersistenceError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    fn other_write_failures_stay_generic() {
        assert_eq!(
            map_write_error(DieselError::NotFound, "ada@example.com"),
            UserPersistenceError::query("record not found")
        );
    }

    #[rstest]
    fn invalid_rows_become_query_errors() {
        let row = UserRow {
            id: 3,
            username: "x".into(),
            email: "ada@example.com".into(),
            created_at: Utc::now(),
        };
        let error = row_to_user(row).expect_err("username too short");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(42, 42)]
    fn counts_convert_to_totals(#[case] count: i64, #[case] expected: u64) {
        assert_eq!(count_to_total(count), expected);
    }
}
