use std::sync::Arc;

use async_trait::async_trait;
use services::{
    IntentOutcome, Notice, PickOutcome, QuizIntent, QuizLoopService, QuizSession, Randomness,
};
use storage::{InMemoryStore, KeyValueStore, PROGRESS_KEY, ProgressStore, Storage, StorageError};
use vocab_core::model::{Catalog, PoolMode, WordEntry, WordIndex};

fn catalog() -> Arc<Catalog> {
    let pairs = [
        ("apple", "elma"),
        ("house", "ev"),
        ("water", "su"),
        ("book", "kitap"),
        ("tree", "ağaç"),
        ("door", "kapı"),
    ];
    Arc::new(Catalog::new(
        pairs
            .iter()
            .map(|(foreign, native)| WordEntry::new(*foreign, *native).unwrap())
            .collect(),
    ))
}

fn wrong_position(session: &QuizSession) -> usize {
    session
        .question()
        .unwrap()
        .options()
        .iter()
        .position(|o| !o.is_correct())
        .unwrap()
}

/// Backend whose writes always fail.
#[derive(Default)]
struct FailingStore {
    inner: InMemoryStore,
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".to_owned()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".to_owned()))
    }
}

#[tokio::test]
async fn progress_survives_restart() {
    let storage = Storage::in_memory();
    let service = QuizLoopService::new(catalog(), storage.progress())
        .with_randomness(Randomness::Seeded(3));

    let mut session = service.start().await.unwrap().session;
    let missed = session.state().current().unwrap();
    let position = wrong_position(&session);
    service
        .dispatch(&mut session, QuizIntent::Answer(position))
        .await
        .unwrap();
    service
        .dispatch(&mut session, QuizIntent::MarkDifficult)
        .await
        .unwrap();
    service
        .dispatch(&mut session, QuizIntent::Next)
        .await
        .unwrap();

    let restarted = QuizLoopService::new(catalog(), storage.progress())
        .with_randomness(Randomness::Seeded(4));
    let state = restarted.load_state().await;
    assert_eq!(state.total_asked(), 1);
    assert_eq!(state.total_wrong(), 1);
    assert!(state.wrong().contains(&missed));
    assert!(state.difficult().contains(&missed));
    assert_eq!(state.ever_asked().len(), 2);
    assert_eq!(state.remaining_len(), 4);

    // The word shown at shutdown is not resumed; the cycle moves on.
    let session = restarted.start().await.unwrap().session;
    assert_eq!(session.state().remaining_len(), 3);
    assert_eq!(session.state().ever_asked().len(), 3);
}

#[tokio::test]
async fn corrupt_record_falls_back_to_fresh_state() {
    let kv = Arc::new(InMemoryStore::new());
    kv.put(PROGRESS_KEY, r#"{"remainingQueue": "nope", "difficultSet": [], "wrongSet": []}"#)
        .await
        .unwrap();
    let service = QuizLoopService::new(catalog(), ProgressStore::new(kv.clone()));

    let state = service.load_state().await;
    assert_eq!(state.total_asked(), 0);
    assert_eq!(state.remaining_len(), 6);
    assert_eq!(state.pool_mode(), PoolMode::Full);
}

async fn load_stored(json: &str) -> vocab_core::model::SessionState {
    let kv = Arc::new(InMemoryStore::new());
    kv.put(PROGRESS_KEY, json).await.unwrap();
    QuizLoopService::new(catalog(), ProgressStore::new(kv))
        .load_state()
        .await
}

#[tokio::test]
async fn inconsistent_counters_are_rebuilt() {
    let state = load_stored(
        r#"{"poolMode":"all","remainingQueue":[1],"difficultSet":[3],"wrongSet":[4],
            "totalAsked":5,"totalCorrect":1,"totalWrong":1,"currentIndex":null}"#,
    )
    .await;

    assert_eq!(state.total_asked(), 2);
    assert_eq!(state.remaining(), &[WordIndex::new(1)]);
    assert!(state.difficult().contains(&WordIndex::new(3)));
    assert!(state.wrong().contains(&WordIndex::new(4)));
}

#[tokio::test]
async fn unknown_pool_mode_keeps_flags() {
    let state = load_stored(
        r#"{"poolMode":"bogus","remainingQueue":[0,1],"difficultSet":[3],"wrongSet":[4],
            "totalAsked":1,"totalCorrect":0,"totalWrong":1}"#,
    )
    .await;

    assert_eq!(state.pool_mode(), PoolMode::Full);
    assert_eq!(state.remaining_len(), 2);
    assert_eq!(state.difficult_or_wrong(), vec![WordIndex::new(3), WordIndex::new(4)]);
    assert_eq!(state.total_asked(), 1);
}

#[tokio::test]
async fn mistyped_counters_keep_flags() {
    let state = load_stored(
        r#"{"remainingQueue":[0],"difficultSet":[2],"wrongSet":[5],
            "totalAsked":"1","totalCorrect":null,"totalWrong":1}"#,
    )
    .await;

    assert_eq!(state.total_asked(), 1);
    assert_eq!(state.total_correct(), 0);
    assert!(state.difficult().contains(&WordIndex::new(2)));
    assert!(state.wrong().contains(&WordIndex::new(5)));
}

#[tokio::test]
async fn bad_current_index_keeps_flags() {
    let state = load_stored(
        r#"{"remainingQueue":[0,1],"difficultSet":[1],"wrongSet":[],
            "currentIndex":"two"}"#,
    )
    .await;

    assert_eq!(state.current(), None);
    assert_eq!(state.remaining_len(), 2);
    assert!(state.difficult().contains(&WordIndex::new(1)));

    let state = load_stored(
        r#"{"remainingQueue":[0],"difficultSet":[1],"wrongSet":[],"currentIndex":42}"#,
    )
    .await;
    assert_eq!(state.current(), None);
    assert!(state.difficult().contains(&WordIndex::new(1)));
}

#[tokio::test]
async fn legacy_browser_record_loads() {
    let kv = Arc::new(InMemoryStore::new());
    kv.put(
        PROGRESS_KEY,
        r#"{"poolType":"hardWrong","remaining":[2,9],"answered":[0,1],"difficult":[1],
            "wrong":[0],"totalAsked":2,"totalCorrect":1,"totalWrong":1,"currentIndex":1}"#,
    )
    .await
    .unwrap();
    let service = QuizLoopService::new(catalog(), ProgressStore::new(kv));

    let state = service.load_state().await;
    assert_eq!(state.pool_mode(), PoolMode::DifficultAndWrong);
    assert_eq!(state.remaining(), &[WordIndex::new(2)]);
    assert_eq!(state.current(), Some(WordIndex::new(1)));
    assert_eq!(state.difficult_or_wrong(), vec![WordIndex::new(0), WordIndex::new(1)]);
}

#[tokio::test]
async fn write_failures_are_not_fatal() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(FailingStore::default());
    let service = QuizLoopService::new(catalog(), ProgressStore::new(kv))
        .with_randomness(Randomness::Seeded(8));

    let mut session = service.start().await.unwrap().session;
    let result = service
        .dispatch(&mut session, QuizIntent::DontKnow)
        .await
        .unwrap();

    assert!(matches!(result.outcome, IntentOutcome::Answered(_)));
    assert_eq!(session.state().total_wrong(), 1);
    assert!(service.clear().await.is_err());
}

#[tokio::test]
async fn difficult_wrong_cycle_refills_from_flags() {
    let storage = Storage::in_memory();
    let service = QuizLoopService::new(catalog(), storage.progress())
        .with_randomness(Randomness::Seeded(21));
    let mut session = service.start().await.unwrap().session;

    service
        .dispatch(&mut session, QuizIntent::MarkDifficult)
        .await
        .unwrap();
    let started = service
        .dispatch(&mut session, QuizIntent::StartDifficultWrong)
        .await
        .unwrap();
    assert_eq!(started.notice, Some(Notice::DifficultWrongStarted));
    assert_eq!(session.state().remaining_len(), 0);

    // Flags are never cleared, so the next cycle refills from the union.
    service
        .dispatch(&mut session, QuizIntent::DontKnow)
        .await
        .unwrap();
    let next = service
        .dispatch(&mut session, QuizIntent::Next)
        .await
        .unwrap();
    assert_eq!(next.notice, None);
    assert!(matches!(
        next.outcome,
        IntentOutcome::Presented(PickOutcome::Presented {
            refill: Some(_),
            ..
        })
    ));
    assert_eq!(session.state().pool_mode(), PoolMode::DifficultAndWrong);

    // Reset clears the flags and returns to the full pool.
    let reset = service
        .dispatch(&mut session, QuizIntent::Reset)
        .await
        .unwrap();
    assert_eq!(reset.notice, Some(Notice::ProgressReset));
    assert_eq!(session.state().pool_mode(), PoolMode::Full);
}

#[tokio::test]
async fn clear_removes_stored_record() {
    let storage = Storage::in_memory();
    let progress = storage.progress();
    let service = QuizLoopService::new(catalog(), progress.clone());
    service.start().await.unwrap();
    assert!(progress.load().await.unwrap().is_some());

    service.clear().await.unwrap();
    assert!(progress.load().await.unwrap().is_none());

    let overview = service.overview().await;
    assert_eq!(overview.counts.total_asked, 0);
    assert_eq!(overview.catalog_len, 6);
}
