//! Builds handler state from the configured storage adapter.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{DieselPostRepository, DieselUserRepository};

use super::ServerConfig;

/// Diesel repositories when a pool is configured, otherwise one shared
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "wiring repositories");
            HttpState::from_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool.clone())),
            )
        }
        None => {
            info!(storage = "memory", "wiring repositories");
            let store = Arc::new(InMemoryStore::default());
            HttpState::from_repositories(store.clone(), store)
        }
    };
    web::Data::new(state)
}
