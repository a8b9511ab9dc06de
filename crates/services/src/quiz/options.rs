use std::collections::BTreeSet;

use vocab_core::model::{Catalog, WordIndex};

use crate::random::{RandomSource, shuffle};

/// Number of answer choices shown per question.
pub const OPTION_COUNT: usize = 4;

/// One answer choice. The correctness flag is for evaluation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    word: WordIndex,
    label: String,
    correct: bool,
}

impl AnswerOption {
    /// Catalog word whose translation this option shows.
    #[must_use]
    pub fn word(&self) -> WordIndex {
        self.word
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

/// Build the shuffled answer choices for `correct`.
///
/// Distractors are drawn by rejection sampling over the whole catalog until
/// three distinct indices other than `correct` are found.
///
/// The catalog must hold at least `OPTION_COUNT` entries and contain
/// `correct`; `QuizSession` guarantees both. With fewer entries the returned
/// list is shorter instead of looping forever.
pub fn build_options(
    catalog: &Catalog,
    correct: WordIndex,
    random: &mut dyn RandomSource,
) -> Vec<AnswerOption> {
    let mut options = Vec::with_capacity(OPTION_COUNT);
    let Some(entry) = catalog.get(correct) else {
        return options;
    };

    options.push(AnswerOption {
        word: correct,
        label: entry.native().to_owned(),
        correct: true,
    });

    let wanted = OPTION_COUNT.min(catalog.len());
    let mut used = BTreeSet::from([correct]);
    while options.len() < wanted {
        let candidate = WordIndex::new(random.index_below(catalog.len()));
        if !used.insert(candidate) {
            continue;
        }
        if let Some(entry) = catalog.get(candidate) {
            options.push(AnswerOption {
                word: candidate,
                label: entry.native().to_owned(),
                correct: false,
            });
        }
    }

    shuffle(&mut options, random);
    options
}
