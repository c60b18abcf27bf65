use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::sqlite::config::{SqliteOptions, SqliteOptionsBuilder, open_connection};

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// The one connection to a store file, shared by every caller in the process.
///
/// Cloning is cheap and every clone talks to the same connection. All work is
/// serialized behind a single mutex held for the whole call, retries included,
/// so readers and writers queue up identically.
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) conn: SharedSqliteConnection,
    pub(crate) opts: Arc<SqliteOptions>,
}

impl SqliteStore {
    #[must_use]
    pub fn builder(db_path: impl Into<std::path::PathBuf>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Open the store file and apply connection pragmas.
    ///
    /// # Errors
    /// Returns `StoreError::ConfigError` for invalid options, or the engine error if the file
    /// cannot be opened.
    pub async fn open(opts: SqliteOptions) -> Result<Self, StoreError> {
        opts.validate()?;
        let opts = Arc::new(opts);
        let open_opts = Arc::clone(&opts);
        let conn = tokio::task::spawn_blocking(move || open_connection(&open_opts))
            .await
            .map_err(|e| {
                StoreError::ConnectionError(format!("sqlite spawn_blocking join error: {e}"))
            })??;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            opts,
        })
    }

    #[must_use]
    pub fn options(&self) -> &SqliteOptions {
        &self.opts
    }

    /// Run synchronous `rusqlite` work while holding the store lock.
    ///
    /// The closure sees the raw connection; statements issued here bypass the retry loop.
    ///
    /// # Errors
    /// Propagates the closure's error, or `StoreError::ExecutionError` if the blocking task panics.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.opts.db_path)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, StoreError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, StoreError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| StoreError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
