//! Error taxonomy for the storage layer.
//!
//! The boolean/optional repository API never lets these escape; they surface
//! only through the strict `try_*` methods and the storage manager itself.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or no connection could be handed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Insert rejected by the unique constraint on `roll_number`.
    #[error("a student with roll number {roll_number} already exists")]
    DuplicateRollNumber { roll_number: String },

    /// No row matched the roll number.
    #[error("no student with roll number {roll_number}")]
    NotFound { roll_number: String },

    #[error("sqlite error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Classify a failed insert. Unique violations become
    /// `DuplicateRollNumber`; anything else stays a storage error.
    pub fn from_insert(err: rusqlite::Error, roll_number: &str) -> Self {
        if is_unique_violation(&err) {
            StoreError::DuplicateRollNumber {
                roll_number: roll_number.to_string(),
            }
        } else {
            StoreError::Storage(err)
        }
    }

    /// Stable short code, handy for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "ERR_STORAGE_UNAVAILABLE",
            StoreError::DuplicateRollNumber { .. } => "ERR_DUPLICATE_ROLL_NUMBER",
            StoreError::NotFound { .. } => "ERR_NOT_FOUND",
            StoreError::Storage(_) => "ERR_STORAGE",
            StoreError::Config(_) => "ERR_CONFIG",
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
