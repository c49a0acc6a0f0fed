//! Embedded PostgreSQL databases carrying the blog schema.
//!
//! A template database is migrated once per migration set (named after a hash
//! of `migrations/`); each test then clones it into a throwaway database.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use backend::domain::ports::UserPersistenceError;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const TEMPLATE_NAME_PREFIX: &str = "blog_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn template_database_name() -> Result<String, UserPersistenceError> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(dir)
        .map_err(|err| UserPersistenceError::query(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, UserPersistenceError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| UserPersistenceError::query(format!("template check: {err:?}")))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| UserPersistenceError::query(format!("create template: {err:?}")))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }

    Ok(template_name)
}

/// Runs the embedded migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), UserPersistenceError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| UserPersistenceError::connection(format!("{err:?}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserPersistenceError::query(format!("migration: {err:?}")))?;
    Ok(())
}

/// Clones the migrated template into a fresh database dropped with the handle.
pub fn provision_blog_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, UserPersistenceError> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| UserPersistenceError::query(format!("create database: {err:?}")))
}
