#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use headphones_db::prelude::*;
use tempfile::TempDir;

/// A store file in its own temp directory; the directory lives as long as this value.
pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = db_filename(dir.path(), "test.db");
        Self { dir, path }
    }

    /// Store with fast retries so contention tests finish quickly.
    pub async fn open(&self) -> Result<SqliteStore, StoreError> {
        SqliteStore::builder(&self.path)
            .busy_timeout(Duration::from_millis(0))
            .retry_delay(Duration::from_millis(10))
            .build()
            .await
    }

    pub fn raw(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(&self.path).expect("open raw connection")
    }
}

pub fn text(value: &str) -> RowValues {
    RowValues::Text(value.to_owned())
}
