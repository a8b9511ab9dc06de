mod options;
mod pool;
mod progress;
mod service;
mod view;
mod workflow;

pub use options::{AnswerOption, OPTION_COUNT, build_options};
pub use pool::PoolRefill;
pub use progress::{ProgressOverview, QuizProgress, WordSummary};
pub use service::{AnswerChoice, AnswerReveal, PickOutcome, Question, QuestionPhase, QuizSession};
pub use view::{OptionStatus, OptionView, QuizSnapshot};
pub use workflow::{
    IntentOutcome, IntentResult, Notice, PendingCommit, QuizIntent, QuizLoopService, StartedQuiz,
};
