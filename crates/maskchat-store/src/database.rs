//! Database connection and unit-of-work management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! the schema exists before any other operation.  Every repository call runs
//! inside exactly one [`Session`]: a transaction that is committed when the
//! call succeeds and rolled back when it returns early with an error or
//! unwinds.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database described by `config`.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let db_path = config.resolve_db_path()?;
        Self::open_with_timeout(&db_path, config.busy_timeout)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, StoreConfig::default().busy_timeout)
    }

    /// Open a private in-memory database (tests, scratch use).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn, StoreConfig::default().busy_timeout)
    }

    fn open_with_timeout(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::configure(conn, busy_timeout)
    }

    fn configure(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(busy_timeout)?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Begin a unit of work.
    ///
    /// Dropping the returned session without calling [`Session::commit`]
    /// rolls back everything written through it.
    pub fn open_session(&self) -> Result<Session<'_>> {
        let tx = self.conn.unchecked_transaction()?;
        Ok(Session { tx })
    }

    /// Run `f` inside one session, committing only if it returns `Ok`.
    pub fn with_session<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session<'_>) -> Result<T>,
    {
        let session = self.open_session()?;
        let value = f(&session)?;
        session.commit()?;
        Ok(value)
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path()).finish()
    }
}

/// A scoped transaction bound to one repository operation.
pub struct Session<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> Session<'conn> {
    /// Connection view of the open transaction.
    pub fn conn(&self) -> &Connection {
        &self.tx
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}
