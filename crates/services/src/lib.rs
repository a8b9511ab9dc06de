#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod random;

pub use error::{QuizError, QuizLoopError};
pub use random::{RandomSource, Randomness, ScriptedRandom, SeededRandom, ThreadRandom};

pub use quiz::{
    AnswerChoice, AnswerOption, AnswerReveal, IntentOutcome, IntentResult, Notice, OptionStatus,
    OptionView, PendingCommit, PickOutcome, PoolRefill, ProgressOverview, QuizIntent,
    QuizLoopService, QuizProgress, QuizSession, QuizSnapshot, StartedQuiz, WordSummary,
};
