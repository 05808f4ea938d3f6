//! SQLite connection configuration and lifecycle helpers.
//!
//! This crate builds and validates a connection configuration for SQLite,
//! compiles it into a backend-specific connection string (DSN), and wraps
//! the connection lifecycle in small helpers: [`connect`], [`optimize`],
//! [`vacuum`] and [`shutdown`]. SQL execution itself stays behind the
//! [`backend::SqliteOpener`] / [`backend::SqliteHandle`] seams; a stock
//! implementation backed by `tokio-rusqlite` is provided.
//!
//! # Features
//!
//! - Defaults tuned for embedded use: WAL journal, `synchronous=NORMAL`,
//!   foreign keys on, busy timeout 4000ms, single-connection pool limits
//! - Two DSN grammars, selected by driver: modernc-style
//!   (`_pragma=name(value)`) and mattn-style (`_timeout=`, `_fk=`, ...)
//! - Driver auto-detection from the registered backend names
//! - Injectable opener, no process-wide state to patch in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlite_conn::{connect, shutdown, Config, SqliteConnector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let opener = SqliteConnector::new();
//!     let db = connect(&opener, Config::new().path("file:data.db")).await?;
//!     db.execute("SELECT 1").await?;
//!     shutdown(db.as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod connect;
pub mod connection;
mod dsn;
pub mod error;
pub mod modes;

pub use backend::{DriverRegistry, PoolLimits, SqliteHandle, SqliteOpener};
pub use config::{Config, MEMORY_PATH};
pub use connect::{connect, optimize, shutdown, vacuum};
pub use connection::{SqliteConnection, SqliteConnector};
pub use error::{SqliteError, SqliteResult};
pub use modes::{
    AutoVacuumMode, DRIVER_NAME_MATTN, DRIVER_NAME_MODERNC, Driver, JournalMode, SyncMode,
};
