mod common;

use common::TestDb;
use headphones_db::prelude::*;

#[test]
fn config_accepts_numbers_strings_and_absence() -> Result<(), serde_json::Error> {
    let numeric: StoreConfig =
        serde_json::from_str(r#"{"data_dir": "/srv/hp", "cache_size_mb": 32}"#)?;
    assert_eq!(numeric.cache_size_kib(), Some(32 * 1024));

    let textual: StoreConfig = serde_json::from_str(r#"{"cache_size_mb": "16"}"#)?;
    assert_eq!(textual.cache_size_kib(), Some(16 * 1024));
    assert_eq!(textual.data_dir, std::path::PathBuf::from("."));

    let empty: StoreConfig = serde_json::from_str(r#"{"cache_size_mb": ""}"#)?;
    assert_eq!(empty.cache_size_kib(), None);

    let absent: StoreConfig = serde_json::from_str("{}")?;
    assert_eq!(absent.cache_size_kib(), None);
    Ok(())
}

#[test]
fn unusable_cache_settings_fall_back_to_engine_default() -> Result<(), serde_json::Error> {
    for raw in [
        r#"{"cache_size_mb": 64.5}"#,
        r#"{"cache_size_mb": true}"#,
        r#"{"cache_size_mb": null}"#,
        r#"{"cache_size_mb": [1, 2]}"#,
        r#"{"cache_size_mb": -3}"#,
    ] {
        let config: StoreConfig = serde_json::from_str(raw)?;
        assert_eq!(config.cache_size_kib(), None, "{raw}");
    }

    let config: StoreConfig =
        serde_json::from_str(r#"{"data_dir": "/srv/hp", "cache_size_mb": false}"#)?;
    assert_eq!(config.data_dir, std::path::PathBuf::from("/srv/hp"));
    Ok(())
}

#[tokio::test]
async fn store_opens_from_application_config() -> Result<(), StoreError> {
    let db = TestDb::new();
    let config = StoreConfig::new(db.dir.path())
        .with_cache_size_mb(CacheSizeSetting::Text("not a number".into()));
    let opts = SqliteOptions::from_config(&config, DEFAULT_DB_FILENAME);
    assert_eq!(opts.db_path, db.dir.path().join("headphones.db"));
    assert_eq!(opts.cache_size_kib, None);

    let store = SqliteStore::open(opts).await?;
    store.ensure_schema().await?;
    assert!(db.dir.path().join("headphones.db").exists());
    Ok(())
}

#[tokio::test]
async fn zero_retry_budget_is_a_config_error() {
    let db = TestDb::new();
    let err = SqliteStore::builder(&db.path)
        .retry_attempts(0)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConfigError(_)));
}
