//! Users API handlers.
//!
//! ```text
//! POST   /users        {"username":"ada","email":"ada@example.com","password":"Password123"}
//! GET    /users?skip=0&limit=10
//! GET    /users/{id}
//! PUT    /users/{id}
//! DELETE /users/{id}
//! GET    /users/{id}/posts?skip=0&limit=10
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, UserDraft, UserId, ValidationErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts::PostResponse;
use crate::inbound::http::schemas::{ErrorSchema, PostPageSchema, UserPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::page_request;

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "ada_lovelace", min_length = 3, max_length = 50)]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Write-only; never stored or returned.
    #[schema(example = "Password123", min_length = 8, max_length = 100, write_only)]
    pub password: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = ValidationErrors;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ada_lovelace")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.create_user(draft).await?;
    Ok(web::Json(user.into()))
}

/// List users in id order.
#[utoipa::path(
    get,
    path = "/users",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip", minimum = 0),
        ("limit" = Option<i64>, Query, description = "Page size", minimum = 1)
    ),
    responses(
        (status = 200, description = "Page of users", body = UserPageSchema),
        (status = 400, description = "Invalid pagination window", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<UserResponse>>> {
    let page = page_request(params.into_inner())?;
    let users = state.users_query.list_users(page).await?;
    Ok(web::Json(users.map(UserResponse::from)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users_query.get_user(UserId::new(*id)).await?;
    Ok(web::Json(user.into()))
}

/// Replace a user's username and email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.update_user(UserId::new(*id), draft).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user and every post it owns.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.delete_user(UserId::new(*id)).await?;
    Ok(web::Json(user.into()))
}

/// List the posts owned by one user.
#[utoipa::path(
    get,
    path = "/users/{id}/posts",
    params(
        ("id" = i32, Path, description = "User identifier"),
        ("skip" = Option<i64>, Query, description = "Records to skip", minimum = 0),
        ("limit" = Option<i64>, Query, description = "Page size", minimum = 1)
    ),
    responses(
        (status = 200, description = "Page of posts", body = PostPageSchema),
        (status = 400, description = "Invalid pagination window", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users", "posts"],
    operation_id = "listUserPosts"
)]
#[get("/users/{id}/posts")]
pub async fn list_user_posts(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<PostResponse>>> {
    let page = page_request(params.into_inner())?;
    let posts = state
        .posts_query
        .list_posts_by_owner(UserId::new(*id), page)
        .await?;
    Ok(web::Json(posts.map(PostResponse::from)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
