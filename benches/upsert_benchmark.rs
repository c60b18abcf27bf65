//! Criterion measurement of upsert latency through the serialized store, split into
//! the insert path (fresh keys) and the update path (keys already present).

use std::hint::black_box;
use std::sync::LazyLock;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use headphones_db::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tempfile::TempDir;
use tokio::runtime::Runtime;

const KEYS: usize = 500;

// Dedicated runtime for the async store calls.
static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("create tokio runtime"));

/// Deterministically shuffled album ids so the update path does not walk the index in order.
fn shuffled_ids() -> Vec<String> {
    let mut ids: Vec<String> = (0..KEYS).map(|i| format!("rg-{i:05}")).collect();
    ids.shuffle(&mut StdRng::seed_from_u64(1_234_567_890));
    ids
}

fn open_store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TOKIO_RUNTIME.block_on(async {
        let store = SqliteStore::builder(db_filename(dir.path(), DEFAULT_DB_FILENAME))
            .build()
            .await
            .expect("open store");
        store.ensure_schema().await.expect("schema");
        store
    });
    (dir, store)
}

async fn upsert_all(store: &SqliteStore, ids: &[String], status: &str) {
    for id in ids {
        let outcome = store
            .upsert(
                "albums",
                &[("Status", RowValues::Text(status.to_owned()))],
                &[("AlbumID", RowValues::Text(id.clone()))],
            )
            .await
            .expect("upsert");
        black_box(outcome);
    }
}

fn bench_upsert(c: &mut Criterion) {
    let ids = shuffled_ids();
    let mut group = c.benchmark_group("upsert");
    group.throughput(Throughput::Elements(KEYS as u64));
    group.sample_size(10);

    group.bench_function("insert_path", |b| {
        b.iter_batched(
            open_store,
            |(_dir, store)| TOKIO_RUNTIME.block_on(upsert_all(&store, &ids, "Wanted")),
            BatchSize::PerIteration,
        );
    });

    let (_dir, store) = open_store();
    TOKIO_RUNTIME.block_on(upsert_all(&store, &ids, "Wanted"));
    group.bench_function("update_path", |b| {
        b.iter(|| TOKIO_RUNTIME.block_on(upsert_all(&store, &ids, "Downloaded")));
    });

    group.finish();
}

criterion_group!(benches, bench_upsert);
criterion_main!(benches);
