use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};

use storage::{ProgressRecord, ProgressStore};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vocab_core::model::{Catalog, SessionState, WordIndex};

use super::progress::ProgressOverview;
use super::service::{AnswerReveal, PickOutcome, QuestionPhase, QuizSession};
use crate::error::{QuizError, QuizLoopError};
use crate::random::Randomness;

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// User intents the presentation layer forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    /// Pick the option at this position.
    Answer(usize),
    DontKnow,
    Next,
    MarkDifficult,
    StartDifficultWrong,
    StartFull,
    Reset,
}

/// User-facing message produced by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    DifficultWrongStarted,
    FullStarted,
    ProgressReset,
    NoCandidates,
    Exhausted,
    FellBackToFull,
}

impl Notice {
    /// Notice to show for a rejected intent, if any.
    #[must_use]
    pub fn from_error(err: &QuizError) -> Option<Self> {
        match err {
            QuizError::NoCandidates => Some(Self::NoCandidates),
            QuizError::CatalogTooSmall { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Answered(AnswerReveal),
    Marked { word: WordIndex },
    Presented(PickOutcome),
    /// Precondition not met; nothing changed.
    Ignored,
}

/// Record to persist after a state change.
///
/// Revisions increase with every pending commit handed out by one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit {
    pub record: ProgressRecord,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentResult {
    pub outcome: IntentOutcome,
    pub notice: Option<Notice>,
    pub commit: Option<PendingCommit>,
}

impl IntentResult {
    fn ignored() -> Self {
        Self {
            outcome: IntentOutcome::Ignored,
            notice: None,
            commit: None,
        }
    }
}

/// A freshly started quiz.
#[derive(Debug)]
pub struct StartedQuiz {
    pub session: QuizSession,
    pub notice: Option<Notice>,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Orchestrates loading, intent handling and progress commits.
pub struct QuizLoopService {
    catalog: Arc<Catalog>,
    progress: ProgressStore,
    randomness: Randomness,
    next_revision: AtomicU64,
    last_committed: Mutex<u64>,
    latest_pending: std::sync::Mutex<Option<PendingCommit>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, progress: ProgressStore) -> Self {
        Self {
            catalog,
            progress,
            randomness: Randomness::default(),
            next_revision: AtomicU64::new(1),
            last_committed: Mutex::new(0),
            latest_pending: std::sync::Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_randomness(mut self, randomness: Randomness) -> Self {
        self.randomness = randomness;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Stored progress, or fresh state when nothing usable is stored.
    ///
    /// Read failures and records without the required arrays are logged and
    /// replaced by fresh state.
    pub async fn load_state(&self) -> SessionState {
        let len = self.catalog.len();
        match self.progress.load().await {
            Ok(Some(record)) => {
                let state = record.into_state(len);
                debug!(
                    total_asked = state.total_asked(),
                    remaining = state.remaining_len(),
                    "progress loaded"
                );
                state
            }
            Ok(None) => {
                info!(words = len, "no stored progress, starting fresh");
                SessionState::fresh(len)
            }
            Err(err) => {
                warn!(error = %err, "failed to read progress, starting fresh");
                SessionState::fresh(len)
            }
        }
    }

    /// Load progress, present the first question and persist.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CatalogTooSmall` for a catalog of 1 to 3 words.
    pub async fn start(&self) -> Result<StartedQuiz, QuizError> {
        self.flush_pending().await;
        let state = self.load_state().await;
        let mut session =
            QuizSession::new(Arc::clone(&self.catalog), state, self.randomness.source())?;

        let outcome = session.pick_next();
        let notice = pick_notice(outcome);
        let pending = self.pending(&session);
        self.commit(pending).await;

        info!(
            pool_mode = %session.state().pool_mode(),
            remaining = session.state().remaining_len(),
            "quiz started"
        );
        Ok(StartedQuiz { session, notice })
    }

    /// Apply one intent to `session`.
    ///
    /// The returned `PendingCommit` must be handed to `commit` to persist the
    /// change.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCandidates` for `StartDifficultWrong` when no word
    /// is flagged difficult or wrong. The session is unchanged in that case.
    pub fn apply(
        &self,
        session: &mut QuizSession,
        intent: QuizIntent,
    ) -> Result<IntentResult, QuizError> {
        debug!(?intent, "applying intent");
        let (outcome, notice) = match intent {
            QuizIntent::Answer(position) => match session.submit_answer(position) {
                Some(reveal) => (IntentOutcome::Answered(reveal), None),
                None => return Ok(IntentResult::ignored()),
            },
            QuizIntent::DontKnow => match session.submit_dont_know() {
                Some(reveal) => (IntentOutcome::Answered(reveal), None),
                None => return Ok(IntentResult::ignored()),
            },
            QuizIntent::Next => {
                let answered = session
                    .question()
                    .is_some_and(|q| q.phase() == QuestionPhase::Answered);
                if !answered {
                    return Ok(IntentResult::ignored());
                }
                let outcome = session.pick_next();
                (IntentOutcome::Presented(outcome), pick_notice(outcome))
            }
            QuizIntent::MarkDifficult => {
                let Some(word) = session.state().current() else {
                    return Ok(IntentResult::ignored());
                };
                session.mark_current_difficult();
                (IntentOutcome::Marked { word }, None)
            }
            QuizIntent::StartDifficultWrong => {
                session.select_difficult_wrong_pool()?;
                info!(
                    words = session.state().remaining_len(),
                    "difficult + wrong test started"
                );
                let outcome = session.pick_next();
                (
                    IntentOutcome::Presented(outcome),
                    pick_notice(outcome).or(Some(Notice::DifficultWrongStarted)),
                )
            }
            QuizIntent::StartFull => {
                session.select_full_pool();
                info!(words = session.state().remaining_len(), "full test started");
                let outcome = session.pick_next();
                (
                    IntentOutcome::Presented(outcome),
                    pick_notice(outcome).or(Some(Notice::FullStarted)),
                )
            }
            QuizIntent::Reset => {
                session.reset_all();
                info!("progress reset");
                let outcome = session.pick_next();
                (
                    IntentOutcome::Presented(outcome),
                    pick_notice(outcome).or(Some(Notice::ProgressReset)),
                )
            }
        };

        Ok(IntentResult {
            outcome,
            notice,
            commit: Some(self.pending(session)),
        })
    }

    /// Persist a pending commit.
    ///
    /// Commits older than the last one written are skipped. Write failures are
    /// logged; the in-memory session stays authoritative.
    pub async fn commit(&self, pending: PendingCommit) {
        let mut last = self.last_committed.lock().await;
        if pending.revision <= *last {
            debug!(
                revision = pending.revision,
                last = *last,
                "skipping stale progress commit"
            );
            return;
        }

        match self.progress.save(&pending.record).await {
            Ok(()) => *last = pending.revision,
            Err(err) => warn!(
                error = %err,
                revision = pending.revision,
                "failed to persist progress"
            ),
        }
    }

    /// `apply` followed by an awaited `commit`.
    ///
    /// # Errors
    ///
    /// Same as `apply`.
    pub async fn dispatch(
        &self,
        session: &mut QuizSession,
        intent: QuizIntent,
    ) -> Result<IntentResult, QuizError> {
        let result = self.apply(session, intent)?;
        if let Some(pending) = result.commit.clone() {
            self.commit(pending).await;
        }
        Ok(result)
    }

    /// Counters and flagged-word lists of the stored progress.
    pub async fn overview(&self) -> ProgressOverview {
        self.flush_pending().await;
        let state = self.load_state().await;
        ProgressOverview::build(&state, &self.catalog)
    }

    /// Delete the stored progress record.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Storage` when the backend cannot be written.
    pub async fn clear(&self) -> Result<(), QuizLoopError> {
        let mut last = self.last_committed.lock().await;
        self.progress.clear().await?;
        // Commits handed out before the clear must not bring the record back.
        let issued = self.next_revision.load(Ordering::Relaxed).saturating_sub(1);
        *last = (*last).max(issued);
        info!(key = self.progress.key(), "stored progress cleared");
        Ok(())
    }

    /// Write the newest handed-out commit if a spawned `commit` has not yet.
    async fn flush_pending(&self) {
        let latest = self
            .latest_pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(pending) = latest {
            self.commit(pending).await;
        }
    }

    fn pending(&self, session: &QuizSession) -> PendingCommit {
        let pending = PendingCommit {
            record: ProgressRecord::from_state(session.state()),
            revision: self.next_revision.fetch_add(1, Ordering::Relaxed),
        };
        let mut latest = self
            .latest_pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if latest
            .as_ref()
            .is_none_or(|held| held.revision < pending.revision)
        {
            *latest = Some(pending.clone());
        }
        pending
    }
}

fn pick_notice(outcome: PickOutcome) -> Option<Notice> {
    match outcome {
        PickOutcome::Exhausted => Some(Notice::Exhausted),
        PickOutcome::Presented {
            refill: Some(refill),
            ..
        } if refill.fell_back => Some(Notice::FellBackToFull),
        PickOutcome::Presented { .. } => None,
    }
}
