mod progress_vm;
mod quiz_vm;

pub use progress_vm::{ProgressVm, map_progress};
pub use quiz_vm::{
    OptionButtonVm, QuizScreenVm, QuizVm, map_quiz_screen, mode_label, notice_message, start_quiz,
};
