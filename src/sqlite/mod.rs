// SQLite store - the single serialized connection and everything it runs
//
// - config: external settings, open options, and connection pragmas
// - params: parameter conversion between middleware and SQLite values
// - query: result extraction and building
// - connection: the serialized store (execute, select, upsert, ensure_schema)

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{
    CacheSizeSetting, DEFAULT_DB_FILENAME, SqliteOptions, SqliteOptionsBuilder, StoreConfig,
    db_filename,
};
pub use connection::{SqliteStore, UpsertOutcome};
pub use params::Params;
pub use query::build_result_set;
