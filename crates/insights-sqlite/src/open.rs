use crate::error::{Result, StoreError};
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PATH: &str = "data/insights.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Where the store lives and how connections to it are opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig { path: PathBuf::from(DEFAULT_PATH), busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS }
    }
}

/// Handle shared by every lookup. Holds configuration only; each lookup
/// opens its own connection through [`Store::connect`].
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Store { config }
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Store::new(StoreConfig { path: path.as_ref().to_path_buf(), ..StoreConfig::default() })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open a read-only connection. It is closed when the returned [`Db`]
    /// is dropped.
    pub fn connect(&self) -> Result<Db> {
        let path = &self.config.path;
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|source| StoreError::Open { path: path.clone(), source })?;
        apply_pragmas(&conn, &self.config)?;
        tracing::trace!(path = %path.display(), "store connection opened");
        Ok(Db { conn })
    }
}

/// A live read-only connection.
pub struct Db {
    pub(crate) conn: Connection,
}

fn apply_pragmas(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    conn.pragma_update(None, "query_only", true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_bundled_store() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.path, PathBuf::from("data/insights.db"));
        assert_eq!(cfg.busy_timeout_ms, 5_000);
    }

    #[test]
    fn connections_reject_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        Connection::open(&path).unwrap().execute_batch("CREATE TABLE t (x INTEGER);").unwrap();

        let db = Store::at(&path).connect().unwrap();
        assert!(db.conn.execute("INSERT INTO t VALUES (1)", []).is_err());
    }
}
