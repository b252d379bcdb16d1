//! Schema set-up.
//!
//! Whichever way a [`Database`](crate::Database) is opened (file, config or
//! in-memory), it passes through [`run_migrations`] before the handle is
//! returned.  Each version is guarded by the `user_version` pragma and every
//! statement uses `IF NOT EXISTS`, so opening an existing store never
//! duplicates structure.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

const CURRENT_VERSION: u32 = 1;

/// Apply every schema version newer than the one recorded in `conn`.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking maskchat schema"
    );

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    tracing::info!(version = 1, "creating mask, dialogue and message tables");
    v001_initial::up(conn).map_err(|e| StoreError::Migration(format!("v001: {e}")))?;
    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn creates_three_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let tables = table_names(&conn);
        assert!(tables.contains(&"mask".to_string()));
        assert!(tables.contains(&"dialogue".to_string()));
        assert!(tables.contains(&"message".to_string()));

        let version: u32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn rerunning_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let before = table_names(&conn);

        run_migrations(&conn).unwrap();
        // Even with the version guard reset, the DDL itself is idempotent.
        conn.pragma_update(None, "user_version", 0).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(table_names(&conn), before);
    }

    #[test]
    fn mask_name_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute("INSERT INTO mask (mask_name) VALUES ('a')", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO mask (mask_name) VALUES ('a')", [])
            .unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
        ));
    }
}
