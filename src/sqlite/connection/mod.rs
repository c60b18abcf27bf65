mod core;
mod execute;
mod migrate;
mod upsert;

pub use core::SqliteStore;
pub use upsert::UpsertOutcome;
