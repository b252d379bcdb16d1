//! Dialogue creation and lookup.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::masks::find_mask;
use crate::models::{Dialogue, DEFAULT_MASK};
use crate::store::ChatStore;

/// Outcome of [`ChatStore::create_dialogue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueCreation {
    /// A new row was inserted.
    Created(Dialogue),
    /// A dialogue with that name already existed and was left unchanged.
    AlreadyExists(Dialogue),
}

impl DialogueCreation {
    pub fn dialogue(&self) -> &Dialogue {
        match self {
            DialogueCreation::Created(d) | DialogueCreation::AlreadyExists(d) => d,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, DialogueCreation::Created(_))
    }
}

impl ChatStore {
    /// Create the dialogue `name` if it does not exist yet.
    ///
    /// Preconditions: the `default` mask exists (guaranteed by
    /// [`ChatStore::initialize`] unless it was deleted since).
    ///
    /// Postconditions:
    /// - exactly one dialogue named `name` exists;
    /// - if it was created by this call, it references the mask named
    ///   `mask_name`, or the `default` mask when `mask_name` is empty or
    ///   unknown;
    /// - if it already existed, nothing was written and its original mask
    ///   binding is returned in [`DialogueCreation::AlreadyExists`].
    pub fn create_dialogue(&self, name: &str, mask_name: &str) -> Result<DialogueCreation> {
        self.database().with_session(|s| {
            let conn = s.conn();

            let requested = if mask_name.is_empty() {
                None
            } else {
                find_mask(conn, mask_name)?
            };
            let resolved = match requested {
                Some(mask) => Some(mask),
                None => find_mask(conn, DEFAULT_MASK)?,
            };

            if let Some(existing) = find_dialogue(conn, name)? {
                return Ok(DialogueCreation::AlreadyExists(existing));
            }

            // Only an insert needs a mask to bind to.
            let mask =
                resolved.ok_or_else(|| StoreError::MaskNotFound(DEFAULT_MASK.to_string()))?;
            let dialogue = Dialogue::new(name, mask.mask_id);
            dialogue.validate()?;
            conn.execute(
                "INSERT INTO dialogue (dialogue_name, mask_id) VALUES (?1, ?2)",
                params![dialogue.dialogue_name, dialogue.mask_id],
            )?;
            tracing::debug!(name, mask = %mask.mask_name, "dialogue created");

            Ok(DialogueCreation::Created(dialogue))
        })
    }

    /// Fetch a dialogue by name.
    pub fn get_dialogue(&self, name: &str) -> Result<Dialogue> {
        self.database().with_session(|s| {
            find_dialogue(s.conn(), name)?
                .ok_or_else(|| StoreError::DialogueNotFound(name.to_string()))
        })
    }

    /// List all dialogues, ordered by name.
    pub fn list_dialogues(&self) -> Result<Vec<Dialogue>> {
        self.database().with_session(|s| list_dialogues(s.conn()))
    }
}

pub(crate) fn find_dialogue(conn: &Connection, name: &str) -> Result<Option<Dialogue>> {
    let dialogue = conn
        .query_row(
            "SELECT dialogue_name, mask_id FROM dialogue WHERE dialogue_name = ?1",
            params![name],
            row_to_dialogue,
        )
        .optional()?;
    Ok(dialogue)
}

pub(crate) fn list_dialogues(conn: &Connection) -> Result<Vec<Dialogue>> {
    let mut stmt =
        conn.prepare("SELECT dialogue_name, mask_id FROM dialogue ORDER BY dialogue_name ASC")?;
    let rows = stmt.query_map([], row_to_dialogue)?;

    let mut dialogues = Vec::new();
    for row in rows {
        dialogues.push(row?);
    }
    Ok(dialogues)
}

fn row_to_dialogue(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dialogue> {
    Ok(Dialogue {
        dialogue_name: row.get(0)?,
        mask_id: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_DIALOGUE_NAME;

    fn default_id(store: &ChatStore) -> i64 {
        store.get_mask(DEFAULT_MASK).unwrap().mask_id
    }

    #[test]
    fn empty_mask_name_uses_default() {
        let store = ChatStore::open_in_memory().unwrap();
        let created = store.create_dialogue("D", "").unwrap();

        assert!(created.was_created());
        assert_eq!(created.dialogue().mask_id, Some(default_id(&store)));
    }

    #[test]
    fn unknown_mask_falls_back_to_default() {
        let store = ChatStore::open_in_memory().unwrap();
        store.create_dialogue("D", "NoSuchMask").unwrap();

        let dialogue = store.get_dialogue("D").unwrap();
        assert_eq!(dialogue.mask_id, Some(default_id(&store)));
    }

    #[test]
    fn named_mask_is_bound() {
        let store = ChatStore::open_in_memory().unwrap();
        let mask = store.add_mask("M1", "").unwrap();
        store.create_dialogue("D1", "M1").unwrap();

        assert_eq!(store.get_dialogue("D1").unwrap().mask_id, Some(mask.mask_id));
    }

    #[test]
    fn creating_twice_is_a_no_op() {
        let store = ChatStore::open_in_memory().unwrap();
        store.add_mask("M1", "").unwrap();

        let first = store.create_dialogue("D", "").unwrap();
        let second = store.create_dialogue("D", "M1").unwrap();

        assert!(!second.was_created());
        // The original binding is kept.
        assert_eq!(second.dialogue(), first.dialogue());

        let named_d = store
            .list_dialogues()
            .unwrap()
            .into_iter()
            .filter(|d| d.dialogue_name == "D")
            .count();
        assert_eq!(named_d, 1);
    }

    #[test]
    fn missing_default_mask_is_reported() {
        let store = ChatStore::open_in_memory().unwrap();
        store.delete_mask(DEFAULT_MASK).unwrap();

        let err = store.create_dialogue("D", "").unwrap_err();
        assert!(matches!(err, StoreError::MaskNotFound(ref n) if n == DEFAULT_MASK));
        assert!(store.get_dialogue("D").unwrap_err().is_not_found());
    }

    #[test]
    fn existing_dialogue_survives_missing_default_mask() {
        let store = ChatStore::open_in_memory().unwrap();
        let first = store.create_dialogue("D", "").unwrap();
        store.delete_mask(DEFAULT_MASK).unwrap();

        let again = store.create_dialogue("D", "").unwrap();
        assert!(!again.was_created());
        assert_eq!(again.dialogue().dialogue_name, "D");
        // The default mask's deletion nulled the binding.
        assert_eq!(again.dialogue().mask_id, None);
        assert_ne!(first.dialogue().mask_id, None);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let store = ChatStore::open_in_memory().unwrap();
        let name = "d".repeat(MAX_DIALOGUE_NAME + 1);
        let err = store.create_dialogue(&name, "").unwrap_err();
        assert!(matches!(err, StoreError::FieldTooLong { field: "dialogue_name", .. }));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let store = ChatStore::open_in_memory().unwrap();
        for name in ["beta", "alpha", "gamma"] {
            store.create_dialogue(name, "").unwrap();
        }
        let names: Vec<_> = store
            .list_dialogues()
            .unwrap()
            .into_iter()
            .map(|d| d.dialogue_name)
            .collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }
}
