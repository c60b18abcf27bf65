use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;

use crate::types::RowValues;

/// A row from a database query result
///
/// Values keep the column order of the statement that produced them and can be
/// addressed either by position or by column name.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub rows: Vec<RowValues>,
    // Shared name -> index lookup, built once per result set
    #[doc(hidden)]
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

pub(crate) fn build_column_index(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    // First occurrence wins so `SELECT a.x, b.x` resolves "x" to the leftmost column.
    let mut cache = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        cache.entry(name.clone()).or_insert(i);
    }
    Arc::new(cache)
}

impl CustomDbRow {
    /// Create a new database row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let cache = build_column_index(&column_names);
        Self {
            column_names,
            rows,
            column_index_cache: cache,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter())
    }
}

impl Index<usize> for CustomDbRow {
    type Output = RowValues;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds; use [`CustomDbRow::get_by_index`] when it may be.
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl Index<&str> for CustomDbRow {
    type Output = RowValues;

    /// # Panics
    ///
    /// Panics if the row has no column named `column_name`; use [`CustomDbRow::get`] when
    /// the column may be missing.
    fn index(&self, column_name: &str) -> &Self::Output {
        match self.get(column_name) {
            Some(value) => value,
            None => panic!("no column named {column_name:?} in row"),
        }
    }
}
