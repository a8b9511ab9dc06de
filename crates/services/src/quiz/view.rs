use vocab_core::model::PoolMode;

use super::progress::QuizProgress;
use super::service::{AnswerChoice, QuestionPhase, QuizSession};

/// Display status of one answer choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    /// Question not answered yet.
    Pending,
    /// The correct translation, revealed after answering.
    Correct,
    /// The learner's wrong pick.
    Wrong,
    /// Any other option once the answer is revealed.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub status: OptionStatus,
}

/// Everything the presentation needs to render the quiz screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub prompt: Option<String>,
    pub options: Vec<OptionView>,
    pub dont_know: OptionStatus,
    pub phase: Option<QuestionPhase>,
    pub progress: QuizProgress,
    pub current_is_difficult: bool,
    pub can_advance: bool,
    pub exhausted: bool,
}

impl QuizSnapshot {
    #[must_use]
    pub fn pool_mode(&self) -> PoolMode {
        self.progress.pool_mode
    }

    /// Whether answer buttons accept input.
    #[must_use]
    pub fn accepts_answer(&self) -> bool {
        self.phase == Some(QuestionPhase::Unanswered)
    }
}

impl QuizSession {
    /// Render-ready view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let question = self.question();
        let choice = question.and_then(|q| q.choice());

        let options = question
            .map(|q| {
                q.options()
                    .iter()
                    .enumerate()
                    .map(|(position, option)| OptionView {
                        label: option.label().to_owned(),
                        status: match choice {
                            None => OptionStatus::Pending,
                            Some(_) if option.is_correct() => OptionStatus::Correct,
                            Some(AnswerChoice::Option(picked)) if picked == position => {
                                OptionStatus::Wrong
                            }
                            Some(_) => OptionStatus::Neutral,
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        let dont_know = match choice {
            None => OptionStatus::Pending,
            Some(AnswerChoice::DontKnow) => OptionStatus::Wrong,
            Some(AnswerChoice::Option(_)) => OptionStatus::Neutral,
        };

        QuizSnapshot {
            prompt: question.map(|q| q.prompt().to_owned()),
            options,
            dont_know,
            phase: question.map(|q| q.phase()),
            progress: self.progress(),
            current_is_difficult: self.current_is_difficult(),
            can_advance: choice.is_some(),
            exhausted: self.is_exhausted(),
        }
    }
}
