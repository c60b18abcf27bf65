use rusqlite::{Connection, OptionalExtension, params};

use super::columns::{Backfill, COLUMN_SPECS, ColumnSpec, EXTRAS_SENTINEL};
use super::tables::{INDEXES, TABLES};
use crate::error::StoreError;
use crate::sqlite::params::row_value_to_sqlite_value;
use crate::sqlite::query::sqlite_extract_value_sync;

/// Whether a column exists on a table, according to the engine catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPresence {
    Present,
    Absent,
}

/// What a schema pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// `(table, column)` for each column added in this pass.
    pub added_columns: Vec<(&'static str, &'static str)>,
    /// Artists whose `Extras` were filled from the legacy flag.
    pub backfilled_artists: usize,
}

impl MigrationReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added_columns.is_empty() && self.backfilled_artists == 0
    }
}

/// Look a column up in the table's catalog entry.
///
/// # Errors
/// Returns `StoreError::ExecutionError` if the table itself does not exist, and the engine
/// error if the catalog cannot be read.
pub fn column_presence(
    conn: &Connection,
    table: &str,
    column: &str,
) -> Result<ColumnPresence, StoreError> {
    let table_exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            params![table],
            |row| row.get(0),
        )
        .optional()?;
    if table_exists.is_none() {
        return Err(StoreError::ExecutionError(format!("no such table: {table}")));
    }

    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE",
            params![table, column],
            |row| row.get(0),
        )
        .optional()?;
    Ok(if found.is_some() {
        ColumnPresence::Present
    } else {
        ColumnPresence::Absent
    })
}

fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    for table in TABLES {
        conn.execute_batch(&table.create_sql())?;
    }
    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<(), StoreError> {
    for index in INDEXES {
        conn.execute_batch(&index.create_sql())?;
    }
    Ok(())
}

fn run_backfill(conn: &Connection, backfill: Backfill) -> Result<usize, StoreError> {
    match backfill {
        Backfill::ExtrasFromIncludeExtras => {
            tracing::info!("Copying over current artist IncludeExtras information");
            let flagged = {
                let mut stmt = conn.prepare("SELECT ArtistID, IncludeExtras FROM artists")?;
                let mut rows = stmt.query([])?;
                let mut flagged = Vec::new();
                while let Some(row) = rows.next()? {
                    let artist_id = sqlite_extract_value_sync(row, 0)?;
                    if sqlite_extract_value_sync(row, 1)?.is_truthy() {
                        flagged.push(row_value_to_sqlite_value(&artist_id));
                    }
                }
                flagged
            };

            let mut update = conn.prepare("UPDATE artists SET Extras = ?1 WHERE ArtistID = ?2")?;
            for artist_id in &flagged {
                update.execute(params![EXTRAS_SENTINEL, artist_id])?;
            }
            Ok(flagged.len())
        }
    }
}

fn add_column(conn: &Connection, spec: &ColumnSpec) -> Result<usize, StoreError> {
    conn.execute_batch(&spec.alter_sql())?;
    tracing::info!(table = spec.table, column = spec.column, "added missing column");
    match spec.backfill {
        Some(backfill) => run_backfill(conn, backfill),
        None => Ok(0),
    }
}

/// Bring a store file up to the current schema.
///
/// Creates missing tables, adds every missing column from [`COLUMN_SPECS`] (running a
/// column's backfill only in the pass that adds it), then creates missing indexes.
/// Everything happens in one transaction committed at the end; any failure other
/// than an absent column aborts the pass. Without a rollback journal the abort cannot
/// undo statements already applied, so a failed pass may leave part of its work behind.
///
/// # Errors
/// Returns `StoreError` for any engine failure, including catalog lookups.
pub fn ensure_schema(conn: &mut Connection) -> Result<MigrationReport, StoreError> {
    let tx = conn.transaction()?;
    create_tables(&tx)?;

    let mut report = MigrationReport::default();
    for spec in COLUMN_SPECS {
        if column_presence(&tx, spec.table, spec.column)? == ColumnPresence::Absent {
            report.backfilled_artists += add_column(&tx, spec)?;
            report.added_columns.push((spec.table, spec.column));
        }
    }
    create_indexes(&tx)?;

    tx.commit()?;
    if !report.is_noop() {
        tracing::info!(
            added = report.added_columns.len(),
            backfilled = report.backfilled_artists,
            "schema migration complete"
        );
    }
    Ok(report)
}
