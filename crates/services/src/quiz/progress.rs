use vocab_core::model::{Catalog, PoolMode, SessionState, WordIndex};

/// Lifetime counters derived from a `SessionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub pool_mode: PoolMode,
    pub remaining: usize,
    pub total_asked: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
    pub ever_asked: usize,
    pub difficult: usize,
    pub wrong: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            pool_mode: state.pool_mode(),
            remaining: state.remaining_len(),
            total_asked: state.total_asked(),
            total_correct: state.total_correct(),
            total_wrong: state.total_wrong(),
            ever_asked: state.ever_asked().len(),
            difficult: state.difficult().len(),
            wrong: state.wrong().len(),
        }
    }

    /// Share of correct answers in percent, rounded down. `None` before the first answer.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.total_asked == 0 {
            return None;
        }
        let percent = u64::from(self.total_correct) * 100 / u64::from(self.total_asked);
        u32::try_from(percent).ok()
    }
}

/// A flagged word as shown in progress lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSummary {
    pub word: WordIndex,
    pub foreign: String,
    pub native: String,
}

/// Counters plus the difficult and wrong word lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOverview {
    pub counts: QuizProgress,
    pub catalog_len: usize,
    pub difficult: Vec<WordSummary>,
    pub wrong: Vec<WordSummary>,
}

impl ProgressOverview {
    #[must_use]
    pub fn build(state: &SessionState, catalog: &Catalog) -> Self {
        Self {
            counts: QuizProgress::from_state(state),
            catalog_len: catalog.len(),
            difficult: summarize(state.difficult().iter().copied(), catalog),
            wrong: summarize(state.wrong().iter().copied(), catalog),
        }
    }
}

fn summarize(words: impl Iterator<Item = WordIndex>, catalog: &Catalog) -> Vec<WordSummary> {
    words
        .filter_map(|word| {
            catalog.get(word).map(|entry| WordSummary {
                word,
                foreign: entry.foreign().to_owned(),
                native: entry.native().to_owned(),
            })
        })
        .collect()
}
