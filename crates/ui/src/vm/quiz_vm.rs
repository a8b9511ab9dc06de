use services::{
    IntentOutcome, Notice, OptionStatus, PendingCommit, QuizError, QuizIntent, QuizLoopService,
    QuizSession, QuizSnapshot,
};
use tracing::warn;
use vocab_core::model::PoolMode;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionButtonVm {
    pub label: String,
    pub class: &'static str,
}

/// Display strings for one render of the quiz screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub prompt: Option<String>,
    pub options: Vec<OptionButtonVm>,
    pub dont_know_class: &'static str,
    pub accepts_answer: bool,
    pub can_advance: bool,
    pub can_mark: bool,
    pub difficult_active: bool,
    pub exhausted: bool,
    pub stats_label: String,
    pub mode_label: &'static str,
    pub remaining_label: String,
    pub notice: Option<&'static str>,
}

pub struct QuizVm {
    session: QuizSession,
    notice: Option<Notice>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession, notice: Option<Notice>) -> Self {
        Self { session, notice }
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        map_quiz_screen(&self.snapshot(), self.notice)
    }

    /// Apply `intent` and return the commit to persist, if any.
    ///
    /// Ignored intents keep the previous notice on screen.
    pub fn apply(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Option<PendingCommit> {
        match quiz_loop.apply(&mut self.session, intent) {
            Ok(result) => {
                if result.outcome != IntentOutcome::Ignored {
                    self.notice = result.notice;
                }
                result.commit
            }
            Err(err) => {
                self.notice = Notice::from_error(&err);
                None
            }
        }
    }
}

/// # Errors
///
/// Returns `ViewError::CatalogTooSmall` when the word list cannot build options.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    match quiz_loop.start().await {
        Ok(started) => Ok(QuizVm::new(started.session, started.notice)),
        Err(err @ QuizError::CatalogTooSmall { .. }) => {
            warn!(error = %err, "quiz cannot start");
            Err(ViewError::CatalogTooSmall)
        }
        Err(err) => {
            warn!(error = %err, "quiz cannot start");
            Err(ViewError::Unknown)
        }
    }
}

#[must_use]
pub fn map_quiz_screen(snapshot: &QuizSnapshot, notice: Option<Notice>) -> QuizScreenVm {
    let progress = snapshot.progress;
    QuizScreenVm {
        prompt: snapshot.prompt.clone(),
        options: snapshot
            .options
            .iter()
            .map(|option| OptionButtonVm {
                label: option.label.clone(),
                class: option_class(option.status),
            })
            .collect(),
        dont_know_class: dont_know_class(snapshot.dont_know),
        accepts_answer: snapshot.accepts_answer(),
        can_advance: snapshot.can_advance,
        can_mark: snapshot.phase.is_some(),
        difficult_active: snapshot.current_is_difficult,
        exhausted: snapshot.exhausted,
        stats_label: format!(
            "Asked: {} · Correct: {} · Wrong: {}",
            progress.total_asked, progress.total_correct, progress.total_wrong
        ),
        mode_label: mode_label(snapshot.pool_mode()),
        remaining_label: format!("{} left", progress.remaining),
        notice: notice.map(notice_message),
    }
}

#[must_use]
pub fn mode_label(mode: PoolMode) -> &'static str {
    match mode {
        PoolMode::Full => "All words",
        PoolMode::DifficultAndWrong => "Difficult + wrong only",
    }
}

#[must_use]
pub fn notice_message(notice: Notice) -> &'static str {
    match notice {
        Notice::DifficultWrongStarted => "Difficult + wrong test started.",
        Notice::FullStarted => "Full test started.",
        Notice::ProgressReset => "Progress reset.",
        Notice::NoCandidates => "No difficult or wrong words yet.",
        Notice::Exhausted => "No questions available. Start a test to continue.",
        Notice::FellBackToFull => "No difficult or wrong words left. Back to all words.",
    }
}

fn option_class(status: OptionStatus) -> &'static str {
    match status {
        OptionStatus::Pending => "quiz-option",
        OptionStatus::Correct => "quiz-option quiz-option--correct",
        OptionStatus::Wrong => "quiz-option quiz-option--wrong",
        OptionStatus::Neutral => "quiz-option quiz-option--neutral",
    }
}

fn dont_know_class(status: OptionStatus) -> &'static str {
    match status {
        OptionStatus::Wrong => "quiz-dont-know quiz-dont-know--chosen",
        _ => "quiz-dont-know",
    }
}
