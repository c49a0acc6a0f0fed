//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOG_*` environment variables and config
//! files, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Runtime settings for the blog backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::BindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url).with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 4] = [
        "BLOG_BIND_ADDR",
        "BLOG_DATABASE_URL",
        "BLOG_POOL_MAX_SIZE",
        "BLOG_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("blog-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.run_migrations);
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOG_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "BLOG_DATABASE_URL",
                Some("postgres://blog@localhost/blog".to_owned()),
            ),
            ("BLOG_POOL_MAX_SIZE", Some("4".to_owned())),
            ("BLOG_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert!(!settings.run_migrations);
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://blog@localhost/blog");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    fn pool_size_defaults_when_only_url_is_set() {
        let _guard = lock_env([
            ("BLOG_BIND_ADDR", None),
            ("BLOG_DATABASE_URL", Some("postgres://localhost/blog".to_owned())),
            ("BLOG_POOL_MAX_SIZE", None),
            ("BLOG_RUN_MIGRATIONS", None),
        ]);

        let pool = load_from_empty_args().pool_config().expect("database configured");
        assert_eq!(pool.max_size(), DEFAULT_MAX_SIZE);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            pool_max_size: None,
            run_migrations: true,
        };
        let err = settings.bind_addr().expect_err("missing port");
        assert!(matches!(err, SettingsError::BindAddr { ref value, .. } if value == "localhost"));
    }
}
