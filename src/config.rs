//! Connection configuration: defaults, options surface, path validation,
//! driver resolution and DSN compilation.

use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::debug;

use crate::backend::DriverRegistry;
use crate::dsn::{self, MattnDsn, ModerncDsn};
use crate::error::{SqliteError, SqliteResult};
use crate::modes::{
    AutoVacuumMode, DRIVER_NAME_MATTN, DRIVER_NAME_MODERNC, Driver, JournalMode, SyncMode,
};

/// Path literal for an in-memory database.
pub const MEMORY_PATH: &str = ":memory";

/// A file path must look like `file:<name>.<suffix>`. Any later dot in the
/// string satisfies the suffix rule, including one coming from a `..`
/// segment; the pattern does not canonicalize and is not a security check.
fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^file:.+\..+$").expect("valid path pattern"))
}

fn validate_path(path: &str) -> SqliteResult<()> {
    if path == MEMORY_PATH || path_pattern().is_match(path) {
        return Ok(());
    }
    Err(SqliteError::InvalidPath(path.to_string()))
}

/// Pick a driver from the registered backends.
///
/// The modernc-style name is checked before the mattn-style name, so when
/// both backends are registered the modernc-style one wins. This
/// preference order is a compatibility contract.
fn detect_driver<R: DriverRegistry + ?Sized>(registry: &R) -> SqliteResult<Driver> {
    let names = registry.driver_names();
    if names.iter().any(|n| n == DRIVER_NAME_MODERNC) {
        return Ok(Driver::Modernc);
    }
    if names.iter().any(|n| n == DRIVER_NAME_MATTN) {
        return Ok(Driver::Mattn);
    }
    Err(SqliteError::DriverDetection)
}

/// SQLite connection configuration.
///
/// Built with chained setters over a defaults baseline; later calls win
/// over earlier ones for the same field. [`Config::build`] validates the
/// path, resolves the driver and compiles the DSN. A `Config` is meant to
/// be created fresh per connection attempt.
///
/// # Example
///
/// ```rust,ignore
/// use sqlite_conn::{Config, Driver};
///
/// let config = Config::new()
///     .path("file:data.db")
///     .driver(Driver::Modernc);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Database path, `":memory"` or a `file:` URI.
    pub path: String,
    /// Backend driver, `None` until set or auto-detected.
    pub driver: Option<Driver>,
    /// Registration name handed to the opener, derived from the driver
    /// when not set explicitly.
    pub driver_name: Option<String>,
    /// Compiled connection string, filled in by [`Config::build`].
    pub dsn: String,
    /// Apply single-connection pool limits after opening.
    pub limit_connection: bool,

    /// `PRAGMA auto_vacuum`.
    pub auto_vacuum: AutoVacuumMode,
    /// `PRAGMA busy_timeout`, milliseconds, 0 leaves it unset.
    pub busy_timeout: u32,
    /// `PRAGMA case_sensitive_like`.
    pub case_sensitive_like: bool,
    /// `PRAGMA defer_foreign_keys`, only honored when foreign keys are on.
    pub defer_foreign_keys: bool,
    /// `PRAGMA foreign_keys`.
    pub foreign_keys: bool,
    /// `PRAGMA journal_mode`.
    pub journal_mode: JournalMode,
    /// `PRAGMA journal_size_limit`, bytes, 0 leaves it unset. Applied with
    /// a post-connect statement rather than through the DSN.
    pub journal_size_limit: u64,
    /// `PRAGMA synchronous`.
    pub sync_mode: SyncMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: String::new(),
            driver: None,
            driver_name: None,
            dsn: String::new(),
            limit_connection: true,

            auto_vacuum: AutoVacuumMode::Default,
            busy_timeout: 4000,
            case_sensitive_like: false,
            defer_foreign_keys: false,
            foreign_keys: true,
            journal_mode: JournalMode::Wal,
            journal_size_limit: 100_000_000,
            sync_mode: SyncMode::Normal,
        }
    }
}

impl Config {
    /// Create a configuration with the defaults baseline: single-connection
    /// limits on, busy timeout 4000ms, foreign keys on, WAL journal,
    /// journal size limit 100MB, synchronous NORMAL, in-memory path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database path.
    ///
    /// Either `":memory"` or `file:` URI with a dot-suffixed name, e.g.
    /// `"file:data/app.db"`. Validated on [`Config::build`].
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Force a specific backend driver instead of auto-detection.
    pub fn driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Override the registration name handed to the opener.
    ///
    /// Useful when the backend was re-registered under a different name,
    /// e.g. wrapped for tracing.
    pub fn driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }

    /// Skip applying the single-connection pool limits after opening.
    pub fn disable_limits(mut self) -> Self {
        self.limit_connection = false;
        self
    }

    /// Set the auto-vacuum mode. [`AutoVacuumMode::Default`] leaves the
    /// pragma unset.
    pub fn auto_vacuum(mut self, mode: AutoVacuumMode) -> Self {
        self.auto_vacuum = mode;
        self
    }

    /// Set the busy timeout in milliseconds. 0 leaves the pragma unset.
    pub fn busy_timeout(mut self, ms: u32) -> Self {
        self.busy_timeout = ms;
        self
    }

    /// Enable or disable case-sensitive `LIKE`.
    pub fn case_sensitive_like(mut self, enabled: bool) -> Self {
        self.case_sensitive_like = enabled;
        self
    }

    /// Enable or disable deferred foreign keys. Emitted only when foreign
    /// keys are enabled too.
    pub fn defer_foreign_keys(mut self, enabled: bool) -> Self {
        self.defer_foreign_keys = enabled;
        self
    }

    /// Enable or disable foreign key enforcement.
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Set the journal mode. [`JournalMode::Default`] leaves the pragma
    /// unset.
    pub fn journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    /// Set the journal size limit in bytes. 0 leaves it unset.
    pub fn journal_size_limit(mut self, bytes: u64) -> Self {
        self.journal_size_limit = bytes;
        self
    }

    /// Set the synchronous mode. [`SyncMode::Default`] leaves the pragma
    /// unset.
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }

    /// Validate the path, resolve the driver and compile the DSN.
    ///
    /// An empty path becomes `":memory"`. Without an explicit driver the
    /// registry is consulted; without an explicit driver name the resolved
    /// driver's fixed registration name is used. A driver outside the two
    /// known backends leaves the DSN empty without error.
    pub fn build<R: DriverRegistry + ?Sized>(mut self, registry: &R) -> SqliteResult<Self> {
        if self.path.is_empty() {
            self.path = MEMORY_PATH.to_string();
        }
        validate_path(&self.path)?;

        let driver = match self.driver.take() {
            Some(driver) => driver,
            None => detect_driver(registry)?,
        };

        if self.driver_name.is_none() {
            self.driver_name = driver.default_driver_name().map(str::to_string);
        }

        self.dsn = match &driver {
            Driver::Modernc => dsn::render(&self, &ModerncDsn),
            Driver::Mattn => dsn::render(&self, &MattnDsn),
            Driver::Other(name) => {
                debug!(driver = %name, "unknown driver, leaving DSN empty");
                String::new()
            }
        };
        self.driver = Some(driver);

        debug!(path = %self.path, dsn = %self.dsn, "configuration built");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct FixedRegistry(Vec<&'static str>);

    impl DriverRegistry for FixedRegistry {
        fn driver_names(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    fn empty_registry() -> FixedRegistry {
        FixedRegistry(vec![])
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert!(config.limit_connection);
        assert_eq!(config.busy_timeout, 4000);
        assert!(config.foreign_keys);
        assert_eq!(config.journal_mode, JournalMode::Wal);
        assert_eq!(config.journal_size_limit, 100_000_000);
        assert_eq!(config.sync_mode, SyncMode::Normal);
        assert_eq!(config.auto_vacuum, AutoVacuumMode::Default);
        assert!(!config.case_sensitive_like);
        assert!(!config.defer_foreign_keys);
    }

    #[test]
    fn test_build_default_path() {
        let config = Config::new()
            .driver(Driver::Modernc)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.path, ":memory");
    }

    #[test]
    fn test_build_invalid_path() {
        let err = Config::new()
            .path("invalid")
            .driver(Driver::Modernc)
            .build(&empty_registry())
            .unwrap_err();
        assert!(matches!(err, SqliteError::InvalidPath(p) if p == "invalid"));
    }

    #[test]
    fn test_validate_path_table() {
        let valid = [
            ":memory",
            "file:data.db",
            "file:/data.db",
            "file:../../../../data.db",
        ];
        for path in valid {
            assert!(validate_path(path).is_ok(), "expected '{path}' to be valid");
        }

        let invalid = [
            "invalid:/path",
            "invalid",
            "file",
            "file:",
            "file:/",
            "file:/data",
            "file:/data.",
            ":memory:",
        ];
        for path in invalid {
            assert!(validate_path(path).is_err(), "expected '{path}' to be invalid");
        }
    }

    #[test]
    fn test_build_derives_driver_names() {
        let config = Config::new()
            .driver(Driver::Modernc)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.driver_name.as_deref(), Some("sqlite"));

        let config = Config::new()
            .driver(Driver::Mattn)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.driver_name.as_deref(), Some("sqlite3"));
    }

    #[test]
    fn test_build_keeps_explicit_driver_name() {
        let config = Config::new()
            .driver(Driver::Modernc)
            .driver_name("traced-sqlite")
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.driver_name.as_deref(), Some("traced-sqlite"));
    }

    #[test]
    fn test_build_default_dsn_modernc() {
        let config = Config::new()
            .driver(Driver::Modernc)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(
            config.dsn,
            ":memory?_pragma=busy_timeout(4000)&_pragma=foreign_keys(1)\
             &_pragma=journal_mode(WAL)&_pragma=synchronous(NORMAL)"
        );
    }

    #[test]
    fn test_build_default_dsn_mattn() {
        let config = Config::new()
            .driver(Driver::Mattn)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.dsn, ":memory?_timeout=4000&_fk=true&_journal=WAL&_sync=1");
    }

    #[test]
    fn test_build_unknown_driver_leaves_dsn_empty() {
        let config = Config::new()
            .driver(Driver::Other("custom".into()))
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.dsn, "");
        assert_eq!(config.driver_name, None);
    }

    #[test]
    fn test_build_dsn_ignores_option_order() {
        let a = Config::new()
            .sync_mode(SyncMode::Full)
            .auto_vacuum(AutoVacuumMode::Full)
            .driver(Driver::Mattn)
            .build(&empty_registry())
            .unwrap();
        let b = Config::new()
            .driver(Driver::Mattn)
            .auto_vacuum(AutoVacuumMode::Full)
            .sync_mode(SyncMode::Full)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(a.dsn, b.dsn);
        assert!(a.dsn.find("_auto_vacuum").unwrap() < a.dsn.find("_sync").unwrap());
    }

    #[test]
    fn test_last_write_wins() {
        let config = Config::new()
            .busy_timeout(100)
            .busy_timeout(250)
            .driver(Driver::Mattn)
            .driver(Driver::Modernc)
            .build(&empty_registry())
            .unwrap();
        assert_eq!(config.busy_timeout, 250);
        assert_eq!(config.driver, Some(Driver::Modernc));
    }

    #[test]
    fn test_detect_driver_prefers_modernc() {
        let registry = FixedRegistry(vec!["sqlite3", "sqlite"]);
        assert_eq!(detect_driver(&registry).unwrap(), Driver::Modernc);
    }

    #[test]
    fn test_detect_driver_mattn_only() {
        let registry = FixedRegistry(vec!["postgres", "sqlite3"]);
        assert_eq!(detect_driver(&registry).unwrap(), Driver::Mattn);
    }

    #[test]
    fn test_detect_driver_none_registered() {
        let err = detect_driver(&FixedRegistry(vec!["postgres"])).unwrap_err();
        assert!(matches!(err, SqliteError::DriverDetection));
    }

    #[test]
    fn test_build_without_driver_uses_registry() {
        let config = Config::new()
            .build(&FixedRegistry(vec!["sqlite"]))
            .unwrap();
        assert_eq!(config.driver, Some(Driver::Modernc));

        let err = Config::new().build(&empty_registry()).unwrap_err();
        assert!(matches!(err, SqliteError::DriverDetection));
    }
}
