//! Store configuration loaded from environment variables.
//!
//! All settings have defaults so the store can be opened with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{Result, StoreError};
use crate::models::MAX_MASK_DESCRIBE;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the SQLite data file.
    /// Env: `MASKCHAT_DB_PATH`
    /// Default: `None`, meaning `maskchat.db` in the platform data directory.
    pub db_path: Option<PathBuf>,

    /// How long a connection waits on a locked database before failing.
    /// Env: `MASKCHAT_BUSY_TIMEOUT_MS`
    /// Default: 5000 ms
    pub busy_timeout: Duration,

    /// Description stored on the seeded `default` mask.
    /// Env: `MASKCHAT_DEFAULT_MASK_DESCRIBE`
    /// Default: empty
    pub default_mask_describe: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout: Duration::from_millis(5000),
            default_mask_describe: String::new(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("MASKCHAT_DB_PATH") {
            if !path.is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("MASKCHAT_BUSY_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.busy_timeout = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid MASKCHAT_BUSY_TIMEOUT_MS, using default");
                }
            }
        }

        if let Some(describe) = lookup("MASKCHAT_DEFAULT_MASK_DESCRIBE") {
            let len = describe.chars().count();
            if len > MAX_MASK_DESCRIBE {
                tracing::warn!(
                    len,
                    max = MAX_MASK_DESCRIBE,
                    "MASKCHAT_DEFAULT_MASK_DESCRIBE too long, using default"
                );
            } else {
                config.default_mask_describe = describe;
            }
        }

        config
    }

    /// Resolve the data file path, creating the platform data directory when
    /// no explicit path is configured.
    ///
    /// - Linux:   `~/.local/share/maskchat/maskchat.db`
    /// - macOS:   `~/Library/Application Support/com.maskchat.maskchat/maskchat.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\maskchat\maskchat\data\maskchat.db`
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let project_dirs =
            ProjectDirs::from("com", "maskchat", "maskchat").ok_or(StoreError::NoDataDir)?;
        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("maskchat.db"))
    }
}
