use services::{ProgressOverview, WordSummary};

/// Display strings for the progress page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub asked_label: String,
    pub correct_label: String,
    pub wrong_label: String,
    pub accuracy_label: String,
    pub seen_label: String,
    pub difficult: Vec<String>,
    pub wrong: Vec<String>,
}

#[must_use]
pub fn map_progress(overview: &ProgressOverview) -> ProgressVm {
    let counts = overview.counts;
    let accuracy_label = counts
        .accuracy_percent()
        .map_or_else(|| "Accuracy: --".to_string(), |pct| format!("Accuracy: {pct}%"));

    ProgressVm {
        asked_label: format!("Asked: {}", counts.total_asked),
        correct_label: format!("Correct: {}", counts.total_correct),
        wrong_label: format!("Wrong: {}", counts.total_wrong),
        accuracy_label,
        seen_label: format!("Seen {} of {} words", counts.ever_asked, overview.catalog_len),
        difficult: overview.difficult.iter().map(word_line).collect(),
        wrong: overview.wrong.iter().map(word_line).collect(),
    }
}

fn word_line(word: &WordSummary) -> String {
    format!("{} — {}", word.foreign, word.native)
}
