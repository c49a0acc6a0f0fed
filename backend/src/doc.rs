//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers that describe domain errors and page envelopes.
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::posts::{PostRequest, PostResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FieldErrorSchema, PostPageSchema, UserPageSchema,
};
use crate::inbound::http::users::{UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog backend API",
        description = "Users and the posts they own, with offset pagination and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_user_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        UserResponse,
        PostRequest,
        PostResponse,
        UserPageSchema,
        PostPageSchema,
        ErrorSchema,
        ErrorCodeSchema,
        FieldErrorSchema
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "posts", description = "Posts owned by users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
