//! Enumerated connection settings and driver identifiers.
//!
//! Each mode enum carries a `Default` member meaning "leave the pragma
//! unset and let the driver decide", plus a `Raw` member holding an
//! unrecognized token. A `Raw` value is rendered verbatim where the DSN
//! grammar takes string tokens and silently omitted where it requires a
//! numeric code.

/// Registration name of the "modernc-style" backend.
pub const DRIVER_NAME_MODERNC: &str = "sqlite";

/// Registration name of the "mattn-style" backend.
pub const DRIVER_NAME_MATTN: &str = "sqlite3";

/// Backend driver selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Driver {
    /// The "modernc-style" backend, registered as `"sqlite"`. Its DSN
    /// grammar uses `_pragma=name(value)` parameters.
    Modernc,
    /// The "mattn-style" backend, registered as `"sqlite3"`. Its DSN
    /// grammar uses one key per parameter (`_timeout=`, `_fk=`, ...).
    Mattn,
    /// An explicitly supplied, unrecognized backend. No DSN compiler runs
    /// for it; the DSN stays empty.
    Other(String),
}

impl Driver {
    /// The fixed registration name used to look the backend up, if known.
    pub fn default_driver_name(&self) -> Option<&'static str> {
        match self {
            Self::Modernc => Some(DRIVER_NAME_MODERNC),
            Self::Mattn => Some(DRIVER_NAME_MATTN),
            Self::Other(_) => None,
        }
    }
}

/// Auto-vacuum mode, `PRAGMA auto_vacuum`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutoVacuumMode {
    /// Leave the pragma unset.
    #[default]
    Default,
    /// No auto-vacuum.
    None,
    /// Reclaim space after every commit.
    Full,
    /// Track free pages, reclaim via `PRAGMA incremental_vacuum`.
    Incremental,
    /// Unrecognized token.
    Raw(String),
}

impl AutoVacuumMode {
    /// Parse a pragma token. Unknown tokens become [`AutoVacuumMode::Raw`];
    /// the empty string is the unset value.
    pub fn from_token(token: &str) -> Self {
        match token {
            "" => Self::Default,
            "NONE" => Self::None,
            "FULL" => Self::Full,
            "INCREMENTAL" => Self::Incremental,
            other => Self::Raw(other.to_string()),
        }
    }

    /// The literal pragma token, or `None` when unset.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::None => Some("NONE"),
            Self::Full => Some("FULL"),
            Self::Incremental => Some("INCREMENTAL"),
            Self::Raw(s) => Some(s),
        }
    }

    /// Numeric code used by the mattn-style DSN grammar. `None` means the
    /// parameter has no valid code and must be omitted.
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::None => Some(0),
            Self::Full => Some(1),
            Self::Incremental => Some(2),
            Self::Default | Self::Raw(_) => None,
        }
    }
}

/// Journal mode, `PRAGMA journal_mode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JournalMode {
    /// Leave the pragma unset.
    #[default]
    Default,
    /// Delete the journal after each transaction.
    Delete,
    /// Truncate the journal instead of deleting it.
    Truncate,
    /// Keep the journal file, zero the header on commit.
    Persist,
    /// Keep the journal in memory.
    Memory,
    /// Write-ahead logging.
    Wal,
    /// No journal.
    Off,
    /// Unrecognized token.
    Raw(String),
}

impl JournalMode {
    /// Parse a pragma token. Unknown tokens become [`JournalMode::Raw`];
    /// the empty string is the unset value.
    pub fn from_token(token: &str) -> Self {
        match token {
            "" => Self::Default,
            "DELETE" => Self::Delete,
            "TRUNCATE" => Self::Truncate,
            "PERSIST" => Self::Persist,
            "MEMORY" => Self::Memory,
            "WAL" => Self::Wal,
            "OFF" => Self::Off,
            other => Self::Raw(other.to_string()),
        }
    }

    /// The literal pragma token, or `None` when unset.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Delete => Some("DELETE"),
            Self::Truncate => Some("TRUNCATE"),
            Self::Persist => Some("PERSIST"),
            Self::Memory => Some("MEMORY"),
            Self::Wal => Some("WAL"),
            Self::Off => Some("OFF"),
            Self::Raw(s) => Some(s),
        }
    }
}

/// Synchronous mode, `PRAGMA synchronous`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Leave the pragma unset.
    #[default]
    Default,
    /// No syncing, fastest and unsafe.
    Off,
    /// Sync at the critical moments only.
    Normal,
    /// Sync on every write.
    Full,
    /// Like `Full`, plus syncing the directory on commit.
    Extra,
    /// Unrecognized token.
    Raw(String),
}

impl SyncMode {
    /// Parse a pragma token. Unknown tokens become [`SyncMode::Raw`]; the
    /// empty string is the unset value.
    pub fn from_token(token: &str) -> Self {
        match token {
            "" => Self::Default,
            "OFF" => Self::Off,
            "NORMAL" => Self::Normal,
            "FULL" => Self::Full,
            "EXTRA" => Self::Extra,
            other => Self::Raw(other.to_string()),
        }
    }

    /// The literal pragma token, or `None` when unset.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Off => Some("OFF"),
            Self::Normal => Some("NORMAL"),
            Self::Full => Some("FULL"),
            Self::Extra => Some("EXTRA"),
            Self::Raw(s) => Some(s),
        }
    }

    /// Numeric code used by the mattn-style DSN grammar. `None` means the
    /// parameter has no valid code and must be omitted.
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::Off => Some(0),
            Self::Normal => Some(1),
            Self::Full => Some(2),
            Self::Extra => Some(3),
            Self::Default | Self::Raw(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_vacuum_codes() {
        assert_eq!(AutoVacuumMode::None.code(), Some(0));
        assert_eq!(AutoVacuumMode::Full.code(), Some(1));
        assert_eq!(AutoVacuumMode::Incremental.code(), Some(2));
        assert_eq!(AutoVacuumMode::Default.code(), None);
        assert_eq!(AutoVacuumMode::Raw("invalid".into()).code(), None);
    }

    #[test]
    fn test_sync_codes() {
        assert_eq!(SyncMode::Off.code(), Some(0));
        assert_eq!(SyncMode::Normal.code(), Some(1));
        assert_eq!(SyncMode::Full.code(), Some(2));
        assert_eq!(SyncMode::Extra.code(), Some(3));
        assert_eq!(SyncMode::Default.code(), None);
        assert_eq!(SyncMode::Raw("invalid".into()).code(), None);
    }

    #[test]
    fn test_journal_tokens() {
        assert_eq!(JournalMode::Default.token(), None);
        assert_eq!(JournalMode::Wal.token(), Some("WAL"));
        assert_eq!(JournalMode::Delete.token(), Some("DELETE"));
        assert_eq!(JournalMode::Raw("weird".into()).token(), Some("weird"));
    }

    #[test]
    fn test_from_token_round_trip() {
        assert_eq!(AutoVacuumMode::from_token(""), AutoVacuumMode::Default);
        assert_eq!(AutoVacuumMode::from_token("FULL"), AutoVacuumMode::Full);
        assert_eq!(
            AutoVacuumMode::from_token("bogus"),
            AutoVacuumMode::Raw("bogus".into())
        );
        assert_eq!(JournalMode::from_token("WAL"), JournalMode::Wal);
        assert_eq!(SyncMode::from_token("EXTRA"), SyncMode::Extra);
        // Lowercase is not a recognized token, it survives as Raw.
        assert_eq!(SyncMode::from_token("normal"), SyncMode::Raw("normal".into()));
    }

    #[test]
    fn test_driver_names() {
        assert_eq!(Driver::Modernc.default_driver_name(), Some("sqlite"));
        assert_eq!(Driver::Mattn.default_driver_name(), Some("sqlite3"));
        assert_eq!(Driver::Other("custom".into()).default_driver_name(), None);
    }
}
