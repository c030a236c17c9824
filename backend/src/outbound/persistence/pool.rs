//! bb8-backed connection pool for the Diesel repositories.
//!
//! Repositories check connections out of a shared pool instead of opening
//! their own. Both building the pool and checking a connection out collapse
//! into [`PoolError`], which each repository translates into its own
//! connection error.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to build the pool or to check a connection out of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation}: {message}")]
pub struct PoolError {
    operation: &'static str,
    message: String,
}

impl PoolError {
    pub(crate) fn build(message: impl Into<String>) -> Self {
        Self {
            operation: "failed to build connection pool",
            message: message.into(),
        }
    }

    pub(crate) fn checkout(message: impl Into<String>) -> Self {
        Self {
            operation: "failed to get connection from pool",
            message: message.into(),
        }
    }
}

/// Pool sizing, resolved from the environment at startup.
///
/// `max_connections` caps the pool; a checkout waits up to
/// `checkout_timeout` before failing.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub checkout_timeout: Duration,
}

impl PoolConfig {
    /// Configuration with default sizing for the given database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from the configuration.
    ///
    /// # Errors
    /// Returns a build [`PoolError`] when the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns a checkout [`PoolError`] when no connection becomes available
    /// within `checkout_timeout`.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
