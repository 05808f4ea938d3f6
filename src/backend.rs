//! Seams to the external database access layer.
//!
//! This crate does not execute SQL or manage connections itself. It builds
//! a configuration and DSN, then hands them to an implementation of these
//! traits. The stock implementation lives in [`crate::connection`]; tests
//! substitute their own.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SqliteResult;

/// Read-only view of the registered backend drivers.
///
/// Driver auto-detection walks [`driver_names`](DriverRegistry::driver_names)
/// in the order the registry reports them.
pub trait DriverRegistry {
    /// Registration names of every available backend.
    fn driver_names(&self) -> Vec<String>;
}

/// Opens connections for a registered driver name.
///
/// This is the injectable replacement for a process-wide open function:
/// callers pass the opener into [`crate::connect`] explicitly, so there is
/// no global mutable state to swap out for tests.
#[async_trait]
pub trait SqliteOpener: DriverRegistry + Send + Sync {
    /// Open a connection against the named driver using the given DSN.
    async fn open(&self, driver_name: &str, dsn: &str) -> SqliteResult<Box<dyn SqliteHandle>>;
}

/// A live database connection obtained from a [`SqliteOpener`].
#[async_trait]
pub trait SqliteHandle: Send + Sync {
    /// Verify the connection is alive.
    async fn ping(&self) -> SqliteResult<()>;

    /// Execute a single statement.
    async fn execute(&self, sql: &str) -> SqliteResult<()>;

    /// Hand pool limit parameters to the access layer.
    async fn apply_limits(&self, limits: &PoolLimits) -> SqliteResult<()>;

    /// Close the connection.
    async fn close(&self) -> SqliteResult<()>;
}

impl std::fmt::Debug for dyn SqliteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn SqliteHandle")
    }
}

/// Connection pool limit parameters understood by the access layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolLimits {
    /// Maximum number of idle connections.
    pub max_idle_conns: usize,
    /// Maximum number of open connections.
    pub max_open_conns: usize,
    /// Maximum lifetime of a connection, `None` for unlimited.
    pub conn_max_lifetime: Option<Duration>,
    /// Maximum idle time of a connection, `None` for unlimited.
    pub conn_max_idle_time: Option<Duration>,
}

impl PoolLimits {
    /// Limits forcing a single persistent connection.
    ///
    /// SQLite allows one writer at a time; a pool of one idle, one open and
    /// unlimited lifetime avoids concurrent writers and reconnect churn.
    pub fn single_connection() -> Self {
        Self {
            max_idle_conns: 1,
            max_open_conns: 1,
            conn_max_lifetime: None,
            conn_max_idle_time: None,
        }
    }
}
