use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid upsert: {0}")]
    InvalidUpsert(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// How the store reacts to a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// File busy, locked, or temporarily unopenable. Retried.
    Transient,
    /// Any other engine failure (bad SQL, constraint violation). Raised once.
    Statement,
    /// The file is damaged or not a database. Raised once, logged with context.
    Corruption,
}

impl ErrorClass {
    #[must_use]
    pub fn of(err: &rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen) => {
                ErrorClass::Transient
            }
            Some(ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase) => ErrorClass::Corruption,
            _ => ErrorClass::Statement,
        }
    }
}

impl StoreError {
    /// Classification of the underlying engine error, if there is one.
    #[must_use]
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            StoreError::SqliteError(err) => Some(ErrorClass::of(err)),
            _ => None,
        }
    }
}
