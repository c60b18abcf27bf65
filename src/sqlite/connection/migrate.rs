use std::sync::Arc;

use super::SqliteStore;
use super::core::run_blocking;
use crate::error::StoreError;
use crate::schema::{MigrationReport, ensure_schema};

impl SqliteStore {
    /// Run the schema pass against this store's file while holding the store lock.
    ///
    /// Meant to be called once at startup, before other callers start issuing statements.
    ///
    /// # Errors
    /// Propagates any engine failure from the pass. The store runs with `journal_mode = OFF`,
    /// so the rollback that follows a failure is best effort: the file may keep part of the
    /// pass. Every step is existence-guarded, so rerunning after fixing the cause is safe.
    pub async fn ensure_schema(&self) -> Result<MigrationReport, StoreError> {
        run_blocking(Arc::clone(&self.conn), ensure_schema).await
    }
}
