//! Lifecycle helpers: connect, optimize, vacuum, shutdown.
//!
//! Every helper is a plain `async fn`; callers bound execution by wrapping
//! the future, e.g. with `tokio::time::timeout`. Nothing retries: the first
//! collaborator error is returned as-is.

use tracing::{debug, info};

use crate::backend::{PoolLimits, SqliteHandle, SqliteOpener};
use crate::config::Config;
use crate::error::SqliteResult;

/// Build the configuration, open and verify a connection, and apply the
/// post-open settings.
///
/// Steps, failing fast on the first error:
///
/// 1. [`Config::build`] (path validation, driver resolution, DSN);
/// 2. open via the opener, then `ping` to verify liveness;
/// 3. apply [`PoolLimits::single_connection`] unless limits were disabled;
/// 4. when a journal size limit is configured, run
///    `PRAGMA journal_size_limit = <bytes>;` — it cannot ride along in the
///    DSN in the general case.
///
/// A handle whose post-open step failed is not returned.
///
/// # Example
///
/// ```rust,ignore
/// use sqlite_conn::{connect, Config, SqliteConnector};
///
/// let opener = SqliteConnector::new();
/// let db = connect(&opener, Config::new().path("file:data.db")).await?;
/// ```
pub async fn connect(
    opener: &dyn SqliteOpener,
    config: Config,
) -> SqliteResult<Box<dyn SqliteHandle>> {
    let config = config.build(opener)?;
    let driver_name = config.driver_name.clone().unwrap_or_default();

    debug!(driver = %driver_name, dsn = %config.dsn, "connecting");
    let handle = opener.open(&driver_name, &config.dsn).await?;
    handle.ping().await?;

    if config.limit_connection {
        handle.apply_limits(&PoolLimits::single_connection()).await?;
    }

    if config.journal_size_limit > 0 {
        handle
            .execute(&format!(
                "PRAGMA journal_size_limit = {};",
                config.journal_size_limit
            ))
            .await?;
    }

    info!(path = %config.path, "sqlite connection established");
    Ok(handle)
}

/// Run `PRAGMA optimize;`.
///
/// Worth running every few hours on long-lived connections and before
/// closing; [`shutdown`] does the latter.
pub async fn optimize(handle: &dyn SqliteHandle) -> SqliteResult<()> {
    handle.execute("PRAGMA optimize;").await
}

/// Run `VACUUM;` to rebuild the database file and reclaim space.
///
/// Useful when auto-vacuum is off and the file should shrink.
pub async fn vacuum(handle: &dyn SqliteHandle) -> SqliteResult<()> {
    handle.execute("VACUUM;").await
}

/// Optimize, then close.
///
/// When the optimize step fails its error is returned and the close is
/// skipped; the handle should be considered unusable either way.
pub async fn shutdown(handle: &dyn SqliteHandle) -> SqliteResult<()> {
    optimize(handle).await?;
    handle.close().await
}
