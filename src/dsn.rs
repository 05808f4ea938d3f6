//! DSN rendering for the two supported backend grammars.
//!
//! Both backends take a query-string-shaped DSN: the database path,
//! a `?`, then `&`-joined parameters. The parameter order is part of the
//! DSN contract and lives in one place, [`render`]; a [`DsnDialect`] only
//! decides how a single parameter is spelled.

use crate::config::Config;
use crate::modes::{AutoVacuumMode, SyncMode};

/// Per-parameter spelling for one backend grammar.
///
/// A method returning `Option` may refuse to emit its parameter even when
/// the setting is present, e.g. when the grammar needs a numeric code and
/// the value has none.
pub(crate) trait DsnDialect {
    fn auto_vacuum(&self, mode: &AutoVacuumMode) -> Option<String>;
    fn busy_timeout(&self, ms: u32) -> String;
    fn case_sensitive_like(&self) -> String;
    fn foreign_keys(&self) -> String;
    fn defer_foreign_keys(&self) -> String;
    fn journal_mode(&self, token: &str) -> String;
    fn synchronous(&self, mode: &SyncMode) -> Option<String>;
}

/// Render the DSN for a resolved configuration.
///
/// Field order is fixed: auto-vacuum, busy-timeout, case-sensitive-like,
/// foreign-keys (with deferred foreign keys directly after, and only when
/// foreign keys are enabled), journal-mode, synchronous. A setting left at
/// its unset value is skipped entirely.
pub(crate) fn render(config: &Config, dialect: &dyn DsnDialect) -> String {
    let mut params = Vec::new();

    if config.auto_vacuum != AutoVacuumMode::Default {
        if let Some(param) = dialect.auto_vacuum(&config.auto_vacuum) {
            params.push(param);
        }
    }
    if config.busy_timeout > 0 {
        params.push(dialect.busy_timeout(config.busy_timeout));
    }
    if config.case_sensitive_like {
        params.push(dialect.case_sensitive_like());
    }
    if config.foreign_keys {
        params.push(dialect.foreign_keys());
        if config.defer_foreign_keys {
            params.push(dialect.defer_foreign_keys());
        }
    }
    if let Some(token) = config.journal_mode.token() {
        params.push(dialect.journal_mode(token));
    }
    if config.sync_mode != SyncMode::Default {
        if let Some(param) = dialect.synchronous(&config.sync_mode) {
            params.push(param);
        }
    }

    if params.is_empty() {
        return config.path.clone();
    }
    format!("{}?{}", config.path, params.join("&"))
}

/// Grammar of the "modernc-style" backend: every parameter is a
/// `_pragma=name(value)` pair. Tokens are rendered literally, even when
/// unrecognized; boolean pragmas render as `1`.
pub(crate) struct ModerncDsn;

impl DsnDialect for ModerncDsn {
    fn auto_vacuum(&self, mode: &AutoVacuumMode) -> Option<String> {
        mode.token().map(|t| format!("_pragma=auto_vacuum({t})"))
    }

    fn busy_timeout(&self, ms: u32) -> String {
        format!("_pragma=busy_timeout({ms})")
    }

    fn case_sensitive_like(&self) -> String {
        "_pragma=case_sensitive_like(1)".to_string()
    }

    fn foreign_keys(&self) -> String {
        "_pragma=foreign_keys(1)".to_string()
    }

    fn defer_foreign_keys(&self) -> String {
        "_pragma=defer_foreign_keys(1)".to_string()
    }

    fn journal_mode(&self, token: &str) -> String {
        format!("_pragma=journal_mode({token})")
    }

    fn synchronous(&self, mode: &SyncMode) -> Option<String> {
        mode.token().map(|t| format!("_pragma=synchronous({t})"))
    }
}

/// Grammar of the "mattn-style" backend: one dedicated key per parameter,
/// with auto-vacuum and synchronous carried as numeric codes. A value
/// without a valid code drops its parameter from the DSN.
pub(crate) struct MattnDsn;

impl DsnDialect for MattnDsn {
    fn auto_vacuum(&self, mode: &AutoVacuumMode) -> Option<String> {
        mode.code().map(|c| format!("_auto_vacuum={c}"))
    }

    fn busy_timeout(&self, ms: u32) -> String {
        format!("_timeout={ms}")
    }

    fn case_sensitive_like(&self) -> String {
        "_case_sensitive_like=true".to_string()
    }

    fn foreign_keys(&self) -> String {
        "_fk=true".to_string()
    }

    fn defer_foreign_keys(&self) -> String {
        "defer_foreign_keys=true".to_string()
    }

    fn journal_mode(&self, token: &str) -> String {
        format!("_journal={token}")
    }

    fn synchronous(&self, mode: &SyncMode) -> Option<String> {
        mode.code().map(|c| format!("_sync={c}"))
    }
}
