//! Actix application assembly shared by the server binary and tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::posts::{create_post, delete_post, get_post, list_posts, update_post};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    create_user, delete_user, get_user, list_user_posts, list_users, update_user,
};
use crate::inbound::http::validation::{json_config, path_config, query_config};
use crate::middleware::Trace;

/// Build the application with every route, extractor configuration and the
/// tracing middleware.
///
/// Trailing slashes are trimmed before routing, so `/users/` and `/users`
/// reach the same handler. Swagger UI is served from `/docs` in debug builds.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::web;
/// use backend::build_app;
/// use backend::inbound::http::health::HealthState;
/// use backend::inbound::http::state::HttpState;
/// use backend::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::default());
/// let state = web::Data::new(HttpState::from_repositories(store.clone(), store));
/// let _app = build_app(state, web::Data::new(HealthState::new()));
/// ```
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .service(ready)
        .service(live)
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(list_user_posts)
        .service(create_post)
        .service(list_posts)
        .service(get_post)
        .service(update_post)
        .service(delete_post);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
