//! Serialized access to the Headphones library store.
//!
//! One [`SqliteStore`] owns the store file's only connection. Every statement runs
//! under a single lock, is retried while the file is busy, and is committed before the
//! lock is released. On top of that sit [`SqliteStore::upsert`] and the additive
//! schema pass in [`schema`].

pub mod error;
pub mod prelude;
pub mod results;
pub mod schema;
pub mod sqlite;
pub mod types;

pub use error::{ErrorClass, StoreError};
pub use results::{CustomDbRow, ResultSet};
pub use sqlite::{SqliteOptions, SqliteOptionsBuilder, SqliteStore, StoreConfig, UpsertOutcome};
pub use types::RowValues;
