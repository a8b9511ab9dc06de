use services::QuizIntent;
use storage::{ProgressRecord, Storage};
use vocab_core::model::SessionState;

use super::quiz::ResetStep;
use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_progress, test_catalog,
};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(6));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("quiz-term"), "missing prompt in {html}");
    assert_eq!(html.matches("class=\"quiz-option\"").count(), 4, "options in {html}");
    assert!(html.contains("I don't know"), "missing dont-know in {html}");
    assert!(html.contains("All words"), "missing mode label in {html}");
    assert!(html.contains("5 left"), "missing remaining label in {html}");
    assert!(html.contains("Asked: 0"), "missing stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_dont_know_reveals_answer() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(6));
    harness.rebuild();
    harness.drive_async().await;

    harness.quiz_handles.dispatch().call(QuizIntent::DontKnow);
    harness.drive();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("quiz-option--correct"), "missing reveal in {html}");
    assert!(html.contains("quiz-dont-know--chosen"), "missing choice in {html}");
    assert!(html.contains("Wrong: 1"), "missing stats in {html}");

    let stored = harness.progress.load().await.unwrap().unwrap();
    assert_eq!(stored.total_wrong, 1);
    assert_eq!(stored.wrong_set.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reset_requires_confirmation() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(6));
    harness.rebuild();
    harness.drive_async().await;

    harness.quiz_handles.dispatch().call(QuizIntent::DontKnow);
    harness.drive();
    harness.drive_async().await;
    let answered = harness.progress.load().await.unwrap().unwrap();
    assert_eq!(answered.total_wrong, 1);

    harness.quiz_handles.reset().call(ResetStep::Ask);
    harness.drive();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Reset all progress?"), "missing dialog in {html}");
    assert_eq!(harness.progress.load().await.unwrap().unwrap(), answered);

    harness.quiz_handles.reset().call(ResetStep::Cancel);
    harness.drive();
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Reset all progress?"), "dialog still open in {html}");
    assert!(html.contains("Wrong: 1"), "stats changed in {html}");
    assert_eq!(harness.progress.load().await.unwrap().unwrap(), answered);

    harness.quiz_handles.reset().call(ResetStep::Ask);
    harness.drive();
    harness.quiz_handles.reset().call(ResetStep::Confirm);
    harness.drive();
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Reset all progress?"), "dialog still open in {html}");
    assert!(html.contains("Progress reset."), "missing notice in {html}");
    let stored = harness.progress.load().await.unwrap().unwrap();
    assert_eq!(stored.total_asked, 0);
    assert!(stored.wrong_set.is_empty());
    assert_eq!(stored.ever_asked_set.len(), 1);
    assert_eq!(stored.remaining_queue.len(), 5);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_no_candidates_notice() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(6));
    harness.rebuild();
    harness.drive_async().await;

    harness
        .quiz_handles
        .dispatch()
        .call(QuizIntent::StartDifficultWrong);
    harness.drive();

    let html = harness.render();
    assert!(
        html.contains("No difficult or wrong words yet."),
        "missing notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_catalog_error() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(3));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("at least four words"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_empty_word_list_is_exhausted() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_catalog(0));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("No questions available."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_lists_flagged_words() {
    let catalog = test_catalog(6);
    let progress = Storage::in_memory().progress();

    let mut state = SessionState::fresh(catalog.len());
    state.take_queued(2);
    state.record_answer(false);
    state.take_queued(0);
    state.mark_current_difficult();
    state.record_answer(true);
    progress
        .save(&ProgressRecord::from_state(&state))
        .await
        .expect("save progress");

    let mut harness = setup_view_harness_with_progress(ViewKind::Progress, catalog, progress);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Asked: 2"), "missing asked in {html}");
    assert!(html.contains("Accuracy: 50%"), "missing accuracy in {html}");
    assert!(html.contains("water — su"), "missing wrong word in {html}");
    assert!(html.contains("apple — elma"), "missing difficult word in {html}");
    assert!(html.contains("Test words"), "missing word list label in {html}");
}
