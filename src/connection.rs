//! Stock access layer backed by `tokio-rusqlite`.
//!
//! [`SqliteConnector`] registers the modernc-style name and interprets that
//! backend's `_pragma=name(value)` DSN grammar: the path part is opened
//! with `tokio_rusqlite::Connection` and each pragma parameter is replayed
//! as a `PRAGMA` statement right after the open.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use tracing::{debug, trace};

use crate::backend::{DriverRegistry, PoolLimits, SqliteHandle, SqliteOpener};
use crate::config::MEMORY_PATH;
use crate::error::{SqliteError, SqliteResult};
use crate::modes::DRIVER_NAME_MODERNC;

/// Split a modernc-style DSN into its path and the `PRAGMA` statements
/// encoded in its parameters. Parameters outside the `_pragma=name(value)`
/// shape are ignored.
fn parse_dsn(dsn: &str) -> (String, Vec<String>) {
    let (path, query) = match dsn.split_once('?') {
        Some((path, query)) => (path, query),
        None => (dsn, ""),
    };

    let mut pragmas = Vec::new();
    for param in query.split('&').filter(|p| !p.is_empty()) {
        let Some(value) = param.strip_prefix("_pragma=") else {
            trace!(param = %param, "ignoring unrecognized DSN parameter");
            continue;
        };
        let Some((name, rest)) = value.split_once('(') else {
            continue;
        };
        let Some(arg) = rest.strip_suffix(')') else {
            continue;
        };
        pragmas.push(format!("PRAGMA {name} = {arg};"));
    }

    (path.to_string(), pragmas)
}

/// Opener backed by `tokio-rusqlite`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteConnector;

impl SqliteConnector {
    /// Create a connector.
    pub fn new() -> Self {
        Self
    }
}

impl DriverRegistry for SqliteConnector {
    fn driver_names(&self) -> Vec<String> {
        vec![DRIVER_NAME_MODERNC.to_string()]
    }
}

#[async_trait]
impl SqliteOpener for SqliteConnector {
    async fn open(&self, driver_name: &str, dsn: &str) -> SqliteResult<Box<dyn SqliteHandle>> {
        if driver_name != DRIVER_NAME_MODERNC {
            return Err(SqliteError::connection(format!(
                "unknown driver name '{driver_name}'"
            )));
        }

        let (path, pragmas) = parse_dsn(dsn);
        debug!(path = %path, pragmas = pragmas.len(), "opening sqlite connection");

        let conn = if path == MEMORY_PATH {
            Connection::open_in_memory().await?
        } else {
            Connection::open(&path).await?
        };

        if !pragmas.is_empty() {
            let batch = pragmas.join("\n");
            conn.call(move |conn| {
                conn.execute_batch(&batch)?;
                Ok(())
            })
            .await?;
        }

        Ok(Box::new(SqliteConnection { conn }))
    }
}

/// A live connection handle over `tokio_rusqlite::Connection`.
pub struct SqliteConnection {
    conn: Connection,
}

impl SqliteConnection {
    /// The underlying `tokio-rusqlite` connection.
    pub fn inner(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl SqliteHandle for SqliteConnection {
    async fn ping(&self) -> SqliteResult<()> {
        self.conn
            .call(|conn| {
                conn.query_row("SELECT 1", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(SqliteError::from)
    }

    async fn execute(&self, sql: &str) -> SqliteResult<()> {
        let sql = sql.to_string();
        debug!(sql = %sql, "executing statement");

        self.conn
            .call(move |conn| {
                conn.execute_batch(&sql)?;
                Ok(())
            })
            .await
            .map_err(SqliteError::from)
    }

    async fn apply_limits(&self, limits: &PoolLimits) -> SqliteResult<()> {
        // The wrapper owns exactly one connection on a dedicated thread, so
        // single-connection limits already hold.
        trace!(?limits, "pool limits accepted");
        Ok(())
    }

    async fn close(&self) -> SqliteResult<()> {
        self.conn.clone().close().await.map_err(SqliteError::from)
    }
}
