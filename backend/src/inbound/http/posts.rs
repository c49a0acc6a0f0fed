//! Posts API handlers.
//!
//! ```text
//! POST   /posts?user_id=1  {"title":"Hello world","content":"First post content."}
//! GET    /posts?skip=0&limit=10
//! GET    /posts/{id}
//! PUT    /posts/{id}
//! DELETE /posts/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Post, PostDraft, PostId, UserId, ValidationErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::page_request;

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Hello world", min_length = 5, max_length = 100)]
    pub title: String,
    #[schema(example = "First post content.", min_length = 10, max_length = 1000)]
    pub content: String,
}

impl TryFrom<PostRequest> for PostDraft {
    type Error = ValidationErrors;

    fn try_from(value: PostRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.title, &value.content)
    }
}

/// Owner selection for `POST /posts`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreatePostQuery {
    /// Identifier of the owning user.
    pub user_id: i32,
}

/// Post as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PostResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = "First post content.")]
    pub content: String,
    #[schema(example = 1)]
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().get(),
            title: post.title().as_ref().to_owned(),
            content: post.content().as_ref().to_owned(),
            user_id: post.user_id().get(),
            created_at: post.created_at(),
        }
    }
}

/// Create a post owned by `user_id`.
#[utoipa::path(
    post,
    path = "/posts",
    params(CreatePostQuery),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Created post", body = PostResponse),
        (status = 404, description = "Owner does not exist", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    query: web::Query<CreatePostQuery>,
    payload: web::Json<PostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let draft = PostDraft::try_from(payload.into_inner())?;
    let post = state
        .posts
        .create_post(UserId::new(query.user_id), draft)
        .await?;
    Ok(web::Json(post.into()))
}

/// List posts in id order.
#[utoipa::path(
    get,
    path = "/posts",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip", minimum = 0),
        ("limit" = Option<i64>, Query, description = "Page size", minimum = 1)
    ),
    responses(
        (status = 200, description = "Page of posts", body = PostPageSchema),
        (status = 400, description = "Invalid pagination window", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<PostResponse>>> {
    let page = page_request(params.into_inner())?;
    let posts = state.posts_query.list_posts(page).await?;
    Ok(web::Json(posts.map(PostResponse::from)))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<PostResponse>> {
    let post = state.posts_query.get_post(PostId::new(*id)).await?;
    Ok(web::Json(post.into()))
}

/// Replace a post's title and content.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<PostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let draft = PostDraft::try_from(payload.into_inner())?;
    let post = state.posts.update_post(PostId::new(*id), draft).await?;
    Ok(web::Json(post.into()))
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Deleted post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<PostResponse>> {
    let post = state.posts.delete_post(PostId::new(*id)).await?;
    Ok(web::Json(post.into()))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
