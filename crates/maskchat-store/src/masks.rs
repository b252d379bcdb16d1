//! CRUD operations for [`Mask`] records.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::models::{Mask, NewMask};
use crate::store::ChatStore;

impl ChatStore {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new mask.
    ///
    /// Fails with [`StoreError::DuplicateMask`] if the name is taken; nothing
    /// is written in that case.
    pub fn add_mask(&self, name: &str, describe: &str) -> Result<Mask> {
        let mask = NewMask::new(name, describe);
        mask.validate()?;

        self.database().with_session(|s| {
            s.conn()
                .execute(
                    "INSERT INTO mask (mask_name, mask_describe) VALUES (?1, ?2)",
                    params![mask.mask_name, mask.mask_describe],
                )
                .map_err(|e| match e {
                    rusqlite::Error::SqliteFailure(err, _)
                        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                    {
                        StoreError::DuplicateMask(mask.mask_name.clone())
                    }
                    other => StoreError::Sqlite(other),
                })?;

            let mask_id = s.conn().last_insert_rowid();
            tracing::debug!(mask_id, name = %mask.mask_name, "mask added");

            Ok(Mask {
                mask_id,
                mask_name: mask.mask_name.clone(),
                mask_describe: mask.mask_describe.clone(),
            })
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a mask by its unique name.
    pub fn get_mask(&self, name: &str) -> Result<Mask> {
        self.database().with_session(|s| {
            find_mask(s.conn(), name)?.ok_or_else(|| StoreError::MaskNotFound(name.to_string()))
        })
    }

    /// List all masks, ordered by id.
    pub fn list_masks(&self) -> Result<Vec<Mask>> {
        self.database().with_session(|s| list_masks(s.conn()))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a mask by name and return the removed record.
    ///
    /// Dialogues that referenced the mask keep existing; their `mask_id`
    /// becomes `NULL`.
    pub fn delete_mask(&self, name: &str) -> Result<Mask> {
        self.database().with_session(|s| {
            let mask = find_mask(s.conn(), name)?
                .ok_or_else(|| StoreError::MaskNotFound(name.to_string()))?;

            s.conn()
                .execute("DELETE FROM mask WHERE mask_id = ?1", params![mask.mask_id])?;
            tracing::debug!(mask_id = mask.mask_id, name, "mask deleted");

            Ok(mask)
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn find_mask(conn: &Connection, name: &str) -> Result<Option<Mask>> {
    let mask = conn
        .query_row(
            "SELECT mask_id, mask_name, mask_describe FROM mask WHERE mask_name = ?1",
            params![name],
            row_to_mask,
        )
        .optional()?;
    Ok(mask)
}

pub(crate) fn list_masks(conn: &Connection) -> Result<Vec<Mask>> {
    let mut stmt = conn.prepare(
        "SELECT mask_id, mask_name, mask_describe FROM mask ORDER BY mask_id ASC",
    )?;
    let rows = stmt.query_map([], row_to_mask)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(StoreError::Sqlite)
}

/// Map a `rusqlite::Row` to a [`Mask`].
fn row_to_mask(row: &rusqlite::Row<'_>) -> rusqlite::Result<Mask> {
    let describe: Option<String> = row.get(2)?;
    Ok(Mask {
        mask_id: row.get(0)?,
        mask_name: row.get(1)?,
        mask_describe: describe.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_MASK, MAX_MASK_DESCRIBE};

    #[test]
    fn add_then_get() {
        let store = ChatStore::open_in_memory().unwrap();
        let added = store.add_mask("Mask1", "test mask").unwrap();

        let fetched = store.get_mask("Mask1").unwrap();
        assert_eq!(fetched, added);
        assert_eq!(fetched.mask_describe, "test mask");
    }

    #[test]
    fn ids_increase_monotonically() {
        let store = ChatStore::open_in_memory().unwrap();
        let a = store.add_mask("a", "").unwrap();
        let b = store.add_mask("b", "").unwrap();
        assert!(b.mask_id > a.mask_id);

        let default = store.get_mask(DEFAULT_MASK).unwrap();
        assert!(a.mask_id > default.mask_id);
    }

    #[test]
    fn duplicate_name_is_rejected_without_write() {
        let store = ChatStore::open_in_memory().unwrap();
        store.add_mask("Mask1", "first").unwrap();

        let err = store.add_mask("Mask1", "second").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMask(ref n) if n == "Mask1"));

        assert_eq!(store.get_mask("Mask1").unwrap().mask_describe, "first");
        assert_eq!(store.list_masks().unwrap().len(), 2);
    }

    #[test]
    fn overlong_description_is_rejected() {
        let store = ChatStore::open_in_memory().unwrap();
        let err = store
            .add_mask("wordy", &"x".repeat(MAX_MASK_DESCRIBE + 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::FieldTooLong { field: "mask_describe", .. }));
        assert!(store.get_mask("wordy").unwrap_err().is_not_found());
    }

    #[test]
    fn get_missing_mask_is_not_found() {
        let store = ChatStore::open_in_memory().unwrap();
        let err = store.get_mask("ghost").unwrap_err();
        assert!(matches!(err, StoreError::MaskNotFound(ref n) if n == "ghost"));
    }

    #[test]
    fn delete_ghost_reports_not_found_and_writes_nothing() {
        let store = ChatStore::open_in_memory().unwrap();
        let before = store.list_masks().unwrap();

        let err = store.delete_mask("ghost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list_masks().unwrap(), before);
    }

    #[test]
    fn delete_existing_mask() {
        let store = ChatStore::open_in_memory().unwrap();
        let added = store.add_mask("short-lived", "").unwrap();

        let removed = store.delete_mask("short-lived").unwrap();
        assert_eq!(removed, added);
        assert!(store.get_mask("short-lived").unwrap_err().is_not_found());
    }

    #[test]
    fn deleting_a_referenced_mask_nulls_the_dialogue_reference() {
        let store = ChatStore::open_in_memory().unwrap();
        store.add_mask("M1", "").unwrap();
        store.create_dialogue("D1", "M1").unwrap();

        store.delete_mask("M1").unwrap();

        let dialogue = store.get_dialogue("D1").unwrap();
        assert_eq!(dialogue.mask_id, None);
    }
}
