use std::collections::BTreeSet;

use crate::model::ids::WordIndex;
use crate::model::pool::PoolMode;

/// Persisted field values used to rehydrate a `SessionState`.
///
/// Storage adapters fill this from whatever shape they keep on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStateDraft {
    pub pool_mode: PoolMode,
    pub remaining: Vec<WordIndex>,
    pub ever_asked: Vec<WordIndex>,
    pub difficult: Vec<WordIndex>,
    pub wrong: Vec<WordIndex>,
    pub total_asked: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
    pub current: Option<WordIndex>,
}

/// Progress aggregate for one learner.
///
/// Invariants held by every constructor and mutator:
/// - `total_asked == total_correct + total_wrong`
/// - `remaining` holds unique indices and never contains `current`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pool_mode: PoolMode,
    remaining: Vec<WordIndex>,
    ever_asked: BTreeSet<WordIndex>,
    difficult: BTreeSet<WordIndex>,
    wrong: BTreeSet<WordIndex>,
    total_asked: u32,
    total_correct: u32,
    total_wrong: u32,
    current: Option<WordIndex>,
}

impl SessionState {
    /// First-run state: full pool, every index queued, counters at zero.
    #[must_use]
    pub fn fresh(catalog_len: usize) -> Self {
        Self {
            pool_mode: PoolMode::Full,
            remaining: (0..catalog_len).map(WordIndex::new).collect(),
            ever_asked: BTreeSet::new(),
            difficult: BTreeSet::new(),
            wrong: BTreeSet::new(),
            total_asked: 0,
            total_correct: 0,
            total_wrong: 0,
            current: None,
        }
    }

    /// Rehydrate from persisted values against a catalog of `catalog_len` words.
    ///
    /// Indices outside the catalog and duplicates are dropped. A queued
    /// `current` is removed from the queue. `total_asked` is rebuilt from the
    /// correct and wrong counters.
    #[must_use]
    pub fn from_persisted(draft: SessionStateDraft, catalog_len: usize) -> Self {
        let total_asked = draft.total_correct.saturating_add(draft.total_wrong);

        let valid = |idx: &WordIndex| idx.value() < catalog_len;
        let current = draft.current.filter(valid);

        let mut seen = BTreeSet::new();
        let remaining = draft
            .remaining
            .into_iter()
            .filter(|idx| valid(idx) && Some(*idx) != current && seen.insert(*idx))
            .collect();

        Self {
            pool_mode: draft.pool_mode,
            remaining,
            ever_asked: draft.ever_asked.into_iter().filter(valid).collect(),
            difficult: draft.difficult.into_iter().filter(valid).collect(),
            wrong: draft.wrong.into_iter().filter(valid).collect(),
            total_asked,
            total_correct: draft.total_correct,
            total_wrong: draft.total_wrong,
            current,
        }
    }

    #[must_use]
    pub fn pool_mode(&self) -> PoolMode {
        self.pool_mode
    }

    #[must_use]
    pub fn remaining(&self) -> &[WordIndex] {
        &self.remaining
    }

    #[must_use]
    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn ever_asked(&self) -> &BTreeSet<WordIndex> {
        &self.ever_asked
    }

    #[must_use]
    pub fn difficult(&self) -> &BTreeSet<WordIndex> {
        &self.difficult
    }

    #[must_use]
    pub fn wrong(&self) -> &BTreeSet<WordIndex> {
        &self.wrong
    }

    #[must_use]
    pub fn total_asked(&self) -> u32 {
        self.total_asked
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_wrong(&self) -> u32 {
        self.total_wrong
    }

    #[must_use]
    pub fn current(&self) -> Option<WordIndex> {
        self.current
    }

    #[must_use]
    pub fn is_difficult(&self, index: WordIndex) -> bool {
        self.difficult.contains(&index)
    }

    /// Union of difficult and wrong indices, ascending.
    #[must_use]
    pub fn difficult_or_wrong(&self) -> Vec<WordIndex> {
        self.difficult.union(&self.wrong).copied().collect()
    }

    /// Replace the active pool. Duplicates are dropped and `current` is cleared.
    pub fn replace_pool(&mut self, mode: PoolMode, indices: impl IntoIterator<Item = WordIndex>) {
        let mut seen = BTreeSet::new();
        self.pool_mode = mode;
        self.remaining = indices.into_iter().filter(|idx| seen.insert(*idx)).collect();
        self.current = None;
    }

    /// Remove the queued index at `position` and make it current.
    ///
    /// Returns `None` when `position` is out of range.
    pub fn take_queued(&mut self, position: usize) -> Option<WordIndex> {
        if position >= self.remaining.len() {
            return None;
        }
        let index = self.remaining.remove(position);
        self.current = Some(index);
        self.ever_asked.insert(index);
        Some(index)
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Count an answer for the current index.
    ///
    /// Returns `false` (and changes nothing) when there is no current index.
    pub fn record_answer(&mut self, correct: bool) -> bool {
        let Some(index) = self.current else {
            return false;
        };

        self.total_asked = self.total_asked.saturating_add(1);
        if correct {
            self.total_correct = self.total_correct.saturating_add(1);
        } else {
            self.total_wrong = self.total_wrong.saturating_add(1);
            self.wrong.insert(index);
        }
        true
    }

    /// Flag the current index as difficult.
    ///
    /// Returns `false` when there is no current index.
    pub fn mark_current_difficult(&mut self) -> bool {
        match self.current {
            Some(index) => {
                self.difficult.insert(index);
                true
            }
            None => false,
        }
    }

    /// Values to hand to a storage adapter.
    #[must_use]
    pub fn to_draft(&self) -> SessionStateDraft {
        SessionStateDraft {
            pool_mode: self.pool_mode,
            remaining: self.remaining.clone(),
            ever_asked: self.ever_asked.iter().copied().collect(),
            difficult: self.difficult.iter().copied().collect(),
            wrong: self.wrong.iter().copied().collect(),
            total_asked: self.total_asked,
            total_correct: self.total_correct,
            total_wrong: self.total_wrong,
            current: self.current,
        }
    }
}
