use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rusqlite::types::Value;

use super::SqliteStore;
use super::core::run_blocking;
use super::execute::execute_with_retry;
use crate::error::StoreError;
use crate::sqlite::config::SqliteOptions;
use crate::sqlite::params::row_value_to_sqlite_value;
use crate::types::RowValues;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// What an upsert ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The UPDATE matched this many existing rows; nothing was inserted.
    Updated(u64),
    /// No row matched the key, so one was inserted.
    Inserted,
    /// Lock contention outlasted the retry budget. Nothing was written.
    GaveUp,
}

/// Table and column names are spliced into SQL, so only plain identifiers are accepted.
pub(crate) fn check_identifier(name: &str) -> Result<(), StoreError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(name.to_owned()))
    }
}

/// The UPDATE and INSERT an upsert may run, with their bound values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpsertPlan {
    pub update_sql: String,
    pub insert_sql: String,
    /// Value columns then key columns; shared by both statements.
    pub params: Vec<Value>,
}

impl UpsertPlan {
    pub(crate) fn new(
        table: &str,
        values: &[(&str, RowValues)],
        keys: &[(&str, RowValues)],
    ) -> Result<Self, StoreError> {
        check_identifier(table)?;
        if values.is_empty() {
            return Err(StoreError::InvalidUpsert(format!(
                "no value columns given for {table}"
            )));
        }
        if keys.is_empty() {
            return Err(StoreError::InvalidUpsert(format!(
                "no key columns given for {table}"
            )));
        }

        let mut seen = HashSet::with_capacity(values.len() + keys.len());
        for (column, _) in values.iter().chain(keys) {
            check_identifier(column)?;
            if !seen.insert(column.to_ascii_lowercase()) {
                return Err(StoreError::InvalidUpsert(format!(
                    "column {column} appears more than once in upsert on {table}"
                )));
            }
        }

        let set_clause = values
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let where_clause = keys
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let columns = values
            .iter()
            .chain(keys)
            .map(|(column, _)| *column)
            .collect::<Vec<_>>();
        let placeholders = vec!["?"; columns.len()].join(", ");

        Ok(Self {
            update_sql: format!("UPDATE {table} SET {set_clause} WHERE {where_clause}"),
            insert_sql: format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            ),
            params: values
                .iter()
                .chain(keys)
                .map(|(_, value)| row_value_to_sqlite_value(value))
                .collect(),
        })
    }

    /// Run the plan on a connection the caller has already locked.
    pub(crate) fn run(
        &self,
        conn: &mut rusqlite::Connection,
        opts: &SqliteOptions,
    ) -> Result<UpsertOutcome, StoreError> {
        let before = total_changes(conn)?;
        // An UPDATE that never ran says nothing about whether the key exists.
        if execute_with_retry(conn, opts, &self.update_sql, &self.params)?.is_none() {
            return Ok(UpsertOutcome::GaveUp);
        }
        let after = total_changes(conn)?;
        if after != before {
            return Ok(UpsertOutcome::Updated(after.saturating_sub(before)));
        }
        match execute_with_retry(conn, opts, &self.insert_sql, &self.params)? {
            Some(_) => Ok(UpsertOutcome::Inserted),
            None => Ok(UpsertOutcome::GaveUp),
        }
    }
}

/// Rows changed on this connection since it was opened.
fn total_changes(conn: &rusqlite::Connection) -> Result<u64, StoreError> {
    let changes: i64 = conn.query_row("SELECT total_changes()", [], |row| row.get(0))?;
    Ok(u64::try_from(changes).unwrap_or_default())
}

impl SqliteStore {
    /// Update the row identified by `keys`, or insert it if no row matches.
    ///
    /// Both statements run inside one hold of the store lock, so no other caller can
    /// insert the same key in between. `values` and `keys` must name disjoint columns.
    /// The INSERT only follows an UPDATE that ran and matched nothing; if contention
    /// exhausts the retries the result is [`UpsertOutcome::GaveUp`].
    ///
    /// # Errors
    /// Returns `StoreError::InvalidUpsert`/`InvalidIdentifier` for malformed input, and the
    /// engine error if either statement fails.
    pub async fn upsert(
        &self,
        table: &str,
        values: &[(&str, RowValues)],
        keys: &[(&str, RowValues)],
    ) -> Result<UpsertOutcome, StoreError> {
        let plan = UpsertPlan::new(table, values, keys)?;
        let opts = Arc::clone(&self.opts);
        run_blocking(Arc::clone(&self.conn), move |guard| plan.run(guard, &opts)).await
    }
}
