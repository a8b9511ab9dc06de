use std::sync::Arc;

use services::QuizLoopService;

pub trait UiApp: Send + Sync {
    /// Label for the loaded word list, shown in the sidebar footer.
    fn word_list_label(&self) -> String;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    word_list_label: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            word_list_label: app.word_list_label(),
            quiz_loop: app.quiz_loop(),
        }
    }

    #[must_use]
    pub fn word_list_label(&self) -> &str {
        &self.word_list_label
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
