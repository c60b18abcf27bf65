//! Schema lifecycle for the library store.
//!
//! There is no version table. Tables and indexes are created if absent, then every
//! column in [`COLUMN_SPECS`] is checked against the engine catalog and added when
//! missing. Running the procedure again is a no-op.

mod columns;
mod migrate;
mod tables;

pub use columns::{Backfill, COLUMN_SPECS, ColumnSpec, EXTRAS_SENTINEL};
pub use migrate::{ColumnPresence, MigrationReport, column_presence, ensure_schema};
pub use tables::{INDEXES, IndexSpec, TABLES, TableSpec};
