use std::fmt;
use std::sync::Arc;

use tracing::debug;
use vocab_core::model::{Catalog, SessionState, WordIndex};

use super::options::{AnswerOption, OPTION_COUNT, build_options};
use super::pool::{self, PoolRefill};
use super::progress::QuizProgress;
use crate::error::QuizError;
use crate::random::RandomSource;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// What the learner picked for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerChoice {
    /// Position in the shuffled option list.
    Option(usize),
    DontKnow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    Unanswered,
    Answered,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    word: WordIndex,
    prompt: String,
    options: Vec<AnswerOption>,
    choice: Option<AnswerChoice>,
}

impl Question {
    #[must_use]
    pub fn word(&self) -> WordIndex {
        self.word
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn choice(&self) -> Option<AnswerChoice> {
        self.choice
    }

    #[must_use]
    pub fn phase(&self) -> QuestionPhase {
        if self.choice.is_some() {
            QuestionPhase::Answered
        } else {
            QuestionPhase::Unanswered
        }
    }

    fn correct_positions(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct())
            .map(|(position, _)| position)
            .collect()
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of drawing the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Presented {
        word: WordIndex,
        refill: Option<PoolRefill>,
    },
    /// Both the active pool and its fallback are empty.
    Exhausted,
}

/// Evaluation of a submitted answer, with correctness revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReveal {
    pub word: WordIndex,
    pub choice: AnswerChoice,
    pub correct: bool,
    pub correct_positions: Vec<usize>,
    pub options: Vec<AnswerOption>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Quiz state machine over one learner's `SessionState`.
///
/// Per question: no question → `pick_next` → unanswered → answer or
/// don't-know → answered → `pick_next` → ...
pub struct QuizSession {
    catalog: Arc<Catalog>,
    state: SessionState,
    question: Option<Question>,
    exhausted: bool,
    random: Box<dyn RandomSource>,
}

impl QuizSession {
    /// Wrap `state` for the given catalog.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CatalogTooSmall` for a catalog with 1 to 3 words:
    /// too few for four distinct options. An empty catalog is accepted and
    /// leaves the session exhausted.
    pub fn new(
        catalog: Arc<Catalog>,
        state: SessionState,
        random: Box<dyn RandomSource>,
    ) -> Result<Self, QuizError> {
        let len = catalog.len();
        if len > 0 && len < OPTION_COUNT {
            return Err(QuizError::CatalogTooSmall { len });
        }

        Ok(Self {
            catalog,
            state,
            question: None,
            exhausted: false,
            random,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// True once a draw found both the pool and its fallback empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::from_state(&self.state)
    }

    /// Start a new cycle over every word. Counters and sets are kept.
    pub fn select_full_pool(&mut self) {
        pool::select_full_pool(&mut self.state, &self.catalog);
        self.clear_question();
    }

    /// Start a new cycle over the difficult and wrong words.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCandidates` (state unchanged) when both sets are empty.
    pub fn select_difficult_wrong_pool(&mut self) -> Result<(), QuizError> {
        pool::select_difficult_wrong_pool(&mut self.state)?;
        self.clear_question();
        Ok(())
    }

    /// Refill the queue when it is empty. See `pool::refill_if_exhausted`.
    pub fn refill_if_exhausted(&mut self) -> Option<PoolRefill> {
        pool::refill_if_exhausted(&mut self.state, &self.catalog)
    }

    /// Draw the next question uniformly from the queue, without replacement.
    pub fn pick_next(&mut self) -> PickOutcome {
        let refill = self.refill_if_exhausted();

        let len = self.state.remaining_len();
        if len == 0 {
            self.state.clear_current();
            self.question = None;
            self.exhausted = true;
            return PickOutcome::Exhausted;
        }

        let position = self.random.index_below(len);
        let Some(word) = self.state.take_queued(position) else {
            self.exhausted = true;
            return PickOutcome::Exhausted;
        };

        let prompt = self
            .catalog
            .get(word)
            .map(|entry| entry.foreign().to_owned())
            .unwrap_or_default();
        let options = build_options(&self.catalog, word, self.random.as_mut());

        debug!(word = word.value(), remaining = len - 1, "presenting question");
        self.question = Some(Question {
            word,
            prompt,
            options,
            choice: None,
        });
        self.exhausted = false;

        PickOutcome::Presented { word, refill }
    }

    /// Score the option at `position`.
    ///
    /// Returns `None` (ignored) without an unanswered question or for an
    /// out-of-range position.
    pub fn submit_answer(&mut self, position: usize) -> Option<AnswerReveal> {
        let question = self.question.as_ref()?;
        if question.choice.is_some() {
            return None;
        }
        let correct = question.options.get(position)?.is_correct();
        self.settle(AnswerChoice::Option(position), correct)
    }

    /// Count the current question as wrong without choosing an option.
    pub fn submit_dont_know(&mut self) -> Option<AnswerReveal> {
        match &self.question {
            Some(question) if question.choice.is_none() => {
                self.settle(AnswerChoice::DontKnow, false)
            }
            _ => None,
        }
    }

    /// Flag the current word as difficult. Returns `false` without a current word.
    pub fn mark_current_difficult(&mut self) -> bool {
        self.state.mark_current_difficult()
    }

    /// Whether the word on screen is flagged difficult.
    #[must_use]
    pub fn current_is_difficult(&self) -> bool {
        self.state
            .current()
            .is_some_and(|word| self.state.is_difficult(word))
    }

    /// Throw away all progress and start over on the full pool.
    pub fn reset_all(&mut self) {
        self.state = SessionState::fresh(self.catalog.len());
        self.clear_question();
    }

    fn settle(&mut self, choice: AnswerChoice, correct: bool) -> Option<AnswerReveal> {
        if !self.state.record_answer(correct) {
            return None;
        }
        let question = self.question.as_mut()?;
        question.choice = Some(choice);

        debug!(word = question.word.value(), correct, "answer recorded");
        Some(AnswerReveal {
            word: question.word,
            choice,
            correct,
            correct_positions: question.correct_positions(),
            options: question.options.clone(),
        })
    }

    fn clear_question(&mut self) {
        self.question = None;
        self.exhausted = false;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("catalog_len", &self.catalog.len())
            .field("pool_mode", &self.state.pool_mode())
            .field("remaining", &self.state.remaining_len())
            .field("current", &self.state.current())
            .field("question_phase", &self.question.as_ref().map(Question::phase))
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
