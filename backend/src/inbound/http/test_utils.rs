//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::{Value, json};

use crate::build_app;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Handler state over a fresh in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::default());
    web::Data::new(HttpState::from_repositories(store.clone(), store))
}

/// Full application over `state` with a ready health probe.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    build_app(state, health)
}

/// Valid user payload derived from `name`.
pub fn user_body(name: &str) -> Value {
    json!({
        "username": name,
        "email": format!("{name}@example.com"),
        "password": "Password123",
    })
}

/// Valid post payload titled `title`.
pub fn post_body(title: &str) -> Value {
    json!({ "title": title, "content": "Some post content here." })
}

/// Collect `(field, code)` pairs from an error body's `details.errors`.
pub fn field_errors(body: &Value) -> Vec<(String, String)> {
    body["details"]["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    (
                        error["field"].as_str().unwrap_or_default().to_owned(),
                        error["code"].as_str().unwrap_or_default().to_owned(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
