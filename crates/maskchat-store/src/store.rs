//! The repository handle.
//!
//! [`ChatStore`] owns the [`Database`] and is the single entry point for every
//! mask, dialogue, message and report operation.  The operations themselves
//! live next to their entity (`masks.rs`, `dialogues.rs`, `messages.rs`,
//! `report.rs`); each one runs inside exactly one session.

use std::path::Path;

use rusqlite::params;

use crate::best_effort::BestEffort;
use crate::config::StoreConfig;
use crate::database::Database;
use crate::error::Result;
use crate::log_sink::LogSink;
use crate::models::{NewMask, DEFAULT_MASK};

/// Persistence layer for masks, dialogues and messages.
#[derive(Debug)]
pub struct ChatStore {
    db: Database,
    default_mask_describe: String,
}

impl ChatStore {
    /// Open the store described by `config` and run [`ChatStore::initialize`].
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let db = Database::new(config)?;
        Self::from_database(db, config.default_mask_describe.clone())
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        Self::from_database(Database::open_at(path)?, String::new())
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_database(Database::open_in_memory()?, String::new())
    }

    fn from_database(db: Database, default_mask_describe: String) -> Result<Self> {
        let store = Self {
            db,
            default_mask_describe,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Ensure the `default` mask exists.
    ///
    /// Safe to call any number of times: the schema is created idempotently
    /// when the database is opened and an existing `default` mask is left
    /// untouched.
    pub fn initialize(&self) -> Result<()> {
        let mask = NewMask::new(DEFAULT_MASK, self.default_mask_describe.as_str());
        mask.validate()?;

        self.db.with_session(|s| {
            let inserted = s.conn().execute(
                "INSERT OR IGNORE INTO mask (mask_name, mask_describe) VALUES (?1, ?2)",
                params![mask.mask_name, mask.mask_describe],
            )?;
            if inserted > 0 {
                tracing::debug!("seeded default mask");
            }
            Ok(())
        })
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// View of this store that logs failures to `sink` instead of returning them.
    pub fn best_effort<'a>(&'a self, sink: &'a dyn LogSink) -> BestEffort<'a> {
        BestEffort::new(self, sink)
    }
}
