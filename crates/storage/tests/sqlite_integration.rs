use std::sync::Arc;

use storage::repository::KeyValueStore;
use storage::sqlite::SqliteRepository;
use storage::{PROGRESS_KEY, ProgressRecord, ProgressStore, Storage};
use vocab_core::model::{PoolMode, SessionState, WordIndex};

#[tokio::test]
async fn sqlite_kv_put_overwrites_and_removes() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.put("k", "first").await.unwrap();
    repo.put("k", "second").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("second"));

    repo.remove("k").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(row.0, 1);
}

#[tokio::test]
async fn sqlite_progress_round_trip() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("storage");
    let progress = storage.progress();

    let mut state = SessionState::fresh(5);
    state.take_queued(2);
    state.record_answer(false);
    state.mark_current_difficult();
    state.replace_pool(PoolMode::DifficultAndWrong, state.difficult_or_wrong());

    progress
        .save(&ProgressRecord::from_state(&state))
        .await
        .unwrap();

    let loaded = progress
        .load()
        .await
        .unwrap()
        .expect("record stored")
        .into_state(5);
    assert_eq!(loaded, state);
    assert_eq!(loaded.remaining(), &[WordIndex::new(2)]);
}

#[tokio::test]
async fn sqlite_progress_uses_fixed_key() {
    let repo = Arc::new(
        SqliteRepository::connect("sqlite:file:memdb_key?mode=memory&cache=shared")
            .await
            .expect("connect"),
    );
    repo.migrate().await.expect("migrate");

    let store = ProgressStore::new(repo.clone());
    store
        .save(&ProgressRecord::from_state(&SessionState::fresh(1)))
        .await
        .unwrap();

    let raw = repo.get(PROGRESS_KEY).await.unwrap().expect("raw value");
    assert!(raw.contains("remainingQueue"), "{raw}");
}
