//! Backend entry-point: loads settings, prepares storage and serves the REST API.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::AppSettings;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, create_server, shutdown_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; serving from the in-memory store");
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(shutdown_on(shutdown_signal(), health_state, server.handle()));
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("blog").endpoint("/metrics").build() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "metrics disabled");
            None
        }
    }
}
