use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite / SQLCipher error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A mask with this name already exists.
    #[error("Mask '{0}' already exists")]
    DuplicateMask(String),

    #[error("Mask '{0}' not found")]
    MaskNotFound(String),

    #[error("Dialogue '{0}' not found")]
    DialogueNotFound(String),

    #[error("Message with id {0} not found")]
    MessageNotFound(i64),

    /// A text field exceeds its declared column length.
    #[error("{field} is too long: {len} characters (max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A stored enum column holds an unknown name.
    #[error("Invalid {kind} value: {value}")]
    InvalidEnum { kind: &'static str, value: String },

    /// A `messages` report request without dialogue name or count.
    #[error("Missing parameters: expected `messages <dialogue> <count>`")]
    MissingParameters,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown format specifier: {0}")]
    UnknownSpecifier(String),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Chrono parsing error.
    #[error("Timestamp parse error: {0}")]
    ChronoParse(#[from] chrono::ParseError),
}

impl StoreError {
    /// `true` for lookup misses, which are reported rather than treated as faults.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::MaskNotFound(_)
                | StoreError::DialogueNotFound(_)
                | StoreError::MessageNotFound(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
