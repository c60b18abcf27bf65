use std::sync::Arc;
use std::thread;

use rusqlite::types::Value;

use super::SqliteStore;
use super::core::run_blocking;
use crate::error::{ErrorClass, StoreError};
use crate::results::ResultSet;
use crate::sqlite::config::SqliteOptions;
use crate::sqlite::params::Params;
use crate::sqlite::query::build_result_set;
use crate::types::RowValues;

fn run_once(
    conn: &mut rusqlite::Connection,
    query: &str,
    params: &[Value],
) -> Result<ResultSet, StoreError> {
    let result = {
        let mut stmt = conn.prepare(query)?;
        build_result_set(&mut stmt, params)?
    };
    // A caller-opened transaction must not stay pending past this call.
    if !conn.is_autocommit() {
        conn.execute_batch("COMMIT")?;
    }
    Ok(result)
}

/// Execute one statement on an already-locked connection.
///
/// Contention is retried up to `opts.retry_attempts` times with `opts.retry_delay` between
/// attempts; exhausting the budget yields `Ok(None)`. A blank statement is a no-op.
pub(crate) fn execute_with_retry(
    conn: &mut rusqlite::Connection,
    opts: &SqliteOptions,
    query: &str,
    params: &[Value],
) -> Result<Option<ResultSet>, StoreError> {
    if query.trim().is_empty() {
        return Ok(None);
    }

    let mut attempt = 0;
    while attempt < opts.retry_attempts {
        match run_once(conn, query, params) {
            Ok(result) => return Ok(Some(result)),
            Err(err) => match err.class() {
                Some(ErrorClass::Transient) => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "Database Error");
                    thread::sleep(opts.retry_delay);
                }
                Some(ErrorClass::Corruption) => {
                    tracing::error!("Fatal Error executing {query} :: {err}");
                    return Err(err);
                }
                _ => {
                    tracing::error!(query, error = %err, "Database error");
                    return Err(err);
                }
            },
        }
    }

    tracing::warn!(
        query,
        attempts = opts.retry_attempts,
        "giving up on statement after repeated lock contention"
    );
    Ok(None)
}

impl SqliteStore {
    /// Execute a statement under the store lock and commit it.
    ///
    /// Returns `Ok(None)` when `query` is blank or when every retry hit lock contention;
    /// callers must treat that as "no result" rather than an error.
    ///
    /// # Errors
    /// Returns `StoreError::SqliteError` for statement and corruption failures. These are
    /// never retried.
    pub async fn execute(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<Option<ResultSet>, StoreError> {
        let converted = Params::convert(params).0;
        let sql_owned = query.to_owned();
        let opts = Arc::clone(&self.opts);
        run_blocking(Arc::clone(&self.conn), move |guard| {
            execute_with_retry(guard, &opts, &sql_owned, &converted)
        })
        .await
    }

    /// Run a query and return its rows.
    ///
    /// Never yields "no result": a blank statement, exhausted retries and an empty match
    /// all come back as an empty `ResultSet`.
    ///
    /// # Errors
    /// Same as [`SqliteStore::execute`].
    pub async fn select(&self, query: &str, params: &[RowValues]) -> Result<ResultSet, StoreError> {
        Ok(self.execute(query, params).await?.unwrap_or_default())
    }
}
