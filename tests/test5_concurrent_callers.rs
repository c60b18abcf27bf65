mod common;

use std::sync::Arc;

use common::{TestDb, text};
use headphones_db::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_with_distinct_keys_all_land() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new();
    let store = db.open().await?;
    store.ensure_schema().await?;

    let mut handles = Vec::new();
    for i in 0..64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .upsert(
                    "artists",
                    &[("ArtistName", text(&format!("artist-{i}"))), ("Status", text("Active"))],
                    &[("ArtistID", text(&format!("id-{i}")))],
                )
                .await
        }));
    }
    for h in handles {
        assert_eq!(h.await??, UpsertOutcome::Inserted);
    }

    let rows = store
        .select("SELECT ArtistID, COUNT(*) AS n FROM artists GROUP BY ArtistID", &[])
        .await?;
    assert_eq!(rows.len(), 64);
    assert!(rows.iter().all(|row| row["n"] == RowValues::Int(1)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_upserts_on_one_key_never_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new();
    let store = Arc::new(db.open().await?);
    store.ensure_schema().await?;

    let mut handles = Vec::new();
    for i in 0..32_i64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            // lastfmcloud has no UNIQUE constraint, so only the store lock prevents duplicates.
            store
                .upsert(
                    "lastfmcloud",
                    &[("Count", RowValues::Int(i))],
                    &[("ArtistName", text("Shared"))],
                )
                .await
        }));
    }
    let mut inserted = 0;
    for h in handles {
        if h.await?? == UpsertOutcome::Inserted {
            inserted += 1;
        }
    }
    assert_eq!(inserted, 1);

    let rows = store
        .select("SELECT COUNT(*) FROM lastfmcloud WHERE ArtistName = 'Shared'", &[])
        .await?;
    assert_eq!(rows.results[0][0], RowValues::Int(1));
    Ok(())
}
