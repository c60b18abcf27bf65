//! Convenient imports for common functionality.

pub use crate::error::{ErrorClass, StoreError};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::schema::{ColumnPresence, MigrationReport};
pub use crate::sqlite::{
    CacheSizeSetting, DEFAULT_DB_FILENAME, SqliteOptions, SqliteOptionsBuilder, SqliteStore,
    StoreConfig, UpsertOutcome, db_filename,
};
pub use crate::types::RowValues;
