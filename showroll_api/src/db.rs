use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, PoolError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

use crate::error::ApiError;

pub type Pool = diesel::r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migrations: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync>),
    #[error("database setup failed: {0}")]
    Setup(String),
}

/// Pragmas applied to every connection handed out by the pool. SQLite leaves
/// foreign key enforcement off unless asked per connection. The busy timeout
/// is set first so switching the journal mode waits out other connections.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ConnectionOptions
{
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; \
             PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/**
 * Establishes a connection pool for the SQLite database at `database_url`.
 *
 * Returns a r2d2 connection pool.
 */
pub fn create_pool(database_url: &str, max_size: u32) -> Result<Pool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let pool = Pool::builder()
        .test_on_check_out(true)
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: Duration::from_secs(5),
        }))
        .build(manager)?;

    tracing::debug!("connection pool ready for {database_url}");

    Ok(pool)
}

/// Applies any embedded migration that has not run against the database yet.
pub fn run_migrations(pool: &Pool) -> Result<(), DbError> {
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(DbError::Migration)?
        .len();

    tracing::info!("applied {applied} pending migration(s)");

    Ok(())
}

/// Runs `f` inside a single transaction on a pooled connection.
///
/// The work happens on the blocking thread pool. The transaction is committed
/// when `f` returns `Ok` and rolled back on every other exit path, so a
/// handler never leaves a partial write behind.
///
/// The write lock is taken up front (`BEGIN IMMEDIATE`). A deferred
/// transaction that reads and then writes cannot wait on the busy timeout
/// when another connection already holds the lock.
pub async fn transaction<T, F>(pool: &Pool, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, ApiError> + Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
        let mut pooled = pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.immediate_transaction(f)
    })
    .await?
}
