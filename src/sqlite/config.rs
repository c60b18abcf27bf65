use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::error::StoreError;
use crate::sqlite::connection::SqliteStore;

/// File name of the library store inside the data directory.
pub const DEFAULT_DB_FILENAME: &str = "headphones.db";
/// How long the engine waits on a file lock before reporting the database as locked.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(20);
/// Attempts per statement while the file is busy or cannot be opened.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;
/// Pause between contention retries.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Resolve a store file name against the data directory.
#[must_use]
pub fn db_filename(data_dir: impl AsRef<Path>, filename: &str) -> PathBuf {
    data_dir.as_ref().join(filename)
}

/// Cache size as it arrives from the application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CacheSizeSetting {
    Megabytes(i64),
    Text(String),
}

/// Settings owned by the host application that the store consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    #[serde(deserialize_with = "lenient_cache_size")]
    pub cache_size_mb: Option<CacheSizeSetting>,
}

/// Anything that is neither an integer nor a string reads as "not set".
fn lenient_cache_size<'de, D>(deserializer: D) -> Result<Option<CacheSizeSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Megabytes(i64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Megabytes(mb) => Some(CacheSizeSetting::Megabytes(mb)),
        Raw::Text(text) => Some(CacheSizeSetting::Text(text)),
        Raw::Other(_) => None,
    })
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cache_size_mb: None,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_size_mb: None,
        }
    }

    #[must_use]
    pub fn with_cache_size_mb(mut self, setting: CacheSizeSetting) -> Self {
        self.cache_size_mb = Some(setting);
        self
    }

    /// Page cache budget in KiB, or `None` to keep the engine default.
    ///
    /// Empty, non-numeric, zero and negative settings all fall back to the default.
    #[must_use]
    pub fn cache_size_kib(&self) -> Option<i64> {
        let megabytes = match self.cache_size_mb.as_ref()? {
            CacheSizeSetting::Megabytes(mb) => *mb,
            CacheSizeSetting::Text(text) => text.trim().parse::<i64>().ok()?,
        };
        if megabytes <= 0 {
            return None;
        }
        megabytes.checked_mul(1024)
    }
}

/// Options for opening a [`SqliteStore`].
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: PathBuf,
    pub busy_timeout: Duration,
    pub cache_size_kib: Option<i64>,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            cache_size_kib: None,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Options for `filename` inside the configured data directory.
    #[must_use]
    pub fn from_config(config: &StoreConfig, filename: &str) -> Self {
        let mut opts = Self::new(db_filename(&config.data_dir, filename));
        opts.cache_size_kib = config.cache_size_kib();
        opts
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.retry_attempts == 0 {
            return Err(StoreError::ConfigError(
                "retry_attempts must be at least 1".into(),
            ));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(StoreError::ConfigError("db_path is empty".into()));
        }
        if matches!(self.cache_size_kib, Some(kib) if kib <= 0) {
            return Err(StoreError::ConfigError(
                "cache_size_kib must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = busy_timeout;
        self
    }

    #[must_use]
    pub fn cache_size_kib(mut self, cache_size_kib: Option<i64>) -> Self {
        self.opts.cache_size_kib = cache_size_kib;
        self
    }

    #[must_use]
    pub fn retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.opts.retry_attempts = retry_attempts;
        self
    }

    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.opts.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the options are invalid or the file cannot be opened.
    pub async fn build(self) -> Result<SqliteStore, StoreError> {
        SqliteStore::open(self.finish()).await
    }
}

/// Open a raw connection with the store's pragmas applied.
pub(crate) fn open_connection(opts: &SqliteOptions) -> Result<rusqlite::Connection, StoreError> {
    let conn = rusqlite::Connection::open(&opts.db_path)?;
    conn.busy_timeout(opts.busy_timeout)?;
    // Last write may be lost on power failure; throughput matters more here.
    conn.execute_batch("PRAGMA synchronous = OFF")?;
    // No rollback journal: the store never rolls back.
    let journal_mode: String = conn.query_row("PRAGMA journal_mode = OFF", [], |row| row.get(0))?;
    if let Some(kib) = opts.cache_size_kib {
        // Negative cache_size means KiB rather than pages.
        conn.execute_batch(&format!("PRAGMA cache_size = -{kib}"))?;
    }
    tracing::debug!(
        path = %opts.db_path.display(),
        journal_mode = %journal_mode,
        cache_size_kib = ?opts.cache_size_kib,
        busy_timeout_ms = opts.busy_timeout.as_millis() as u64,
        "opened sqlite store"
    );
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_size_tolerates_missing_and_bad_settings() {
        let base = StoreConfig::new("/data");
        assert_eq!(base.cache_size_kib(), None);
        let empty = base
            .clone()
            .with_cache_size_mb(CacheSizeSetting::Text(String::new()));
        assert_eq!(empty.cache_size_kib(), None);
        let junk = base
            .clone()
            .with_cache_size_mb(CacheSizeSetting::Text("lots".into()));
        assert_eq!(junk.cache_size_kib(), None);
        let zero = base.clone().with_cache_size_mb(CacheSizeSetting::Megabytes(0));
        assert_eq!(zero.cache_size_kib(), None);
    }

    #[test]
    fn cache_size_converts_megabytes_to_kib() {
        let text = StoreConfig::new("/data").with_cache_size_mb(CacheSizeSetting::Text(" 64 ".into()));
        assert_eq!(text.cache_size_kib(), Some(64 * 1024));
        let num = StoreConfig::new("/data").with_cache_size_mb(CacheSizeSetting::Megabytes(2));
        assert_eq!(num.cache_size_kib(), Some(2048));
    }

    #[test]
    fn from_config_resolves_file_in_data_dir() {
        let cfg = StoreConfig::new("/var/lib/headphones");
        let opts = SqliteOptions::from_config(&cfg, DEFAULT_DB_FILENAME);
        assert_eq!(
            opts.db_path,
            PathBuf::from("/var/lib/headphones/headphones.db")
        );
        assert_eq!(opts.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(opts.busy_timeout, DEFAULT_BUSY_TIMEOUT);
    }

    #[test]
    fn zero_retry_attempts_is_rejected() {
        let opts = SqliteOptionsBuilder::new("x.db").retry_attempts(0).finish();
        assert!(matches!(opts.validate(), Err(StoreError::ConfigError(_))));
    }

    #[test]
    fn non_positive_cache_budget_is_rejected() {
        let opts = SqliteOptionsBuilder::new("x.db")
            .cache_size_kib(Some(-5))
            .finish();
        assert!(matches!(opts.validate(), Err(StoreError::ConfigError(_))));
    }
}
