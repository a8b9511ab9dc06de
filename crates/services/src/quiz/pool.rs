use vocab_core::model::{Catalog, PoolMode, SessionState};

use crate::error::QuizError;

/// Report of an automatic queue refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRefill {
    /// Pool mode after the refill.
    pub mode: PoolMode,
    /// True when the difficult/wrong pool was empty and the full pool took over.
    pub fell_back: bool,
}

pub(crate) fn select_full_pool(state: &mut SessionState, catalog: &Catalog) {
    state.replace_pool(PoolMode::Full, catalog.indices());
}

/// Switch to the union of difficult and wrong words.
///
/// Leaves `state` untouched when the union is empty.
pub(crate) fn select_difficult_wrong_pool(state: &mut SessionState) -> Result<(), QuizError> {
    let candidates = state.difficult_or_wrong();
    if candidates.is_empty() {
        return Err(QuizError::NoCandidates);
    }
    state.replace_pool(PoolMode::DifficultAndWrong, candidates);
    Ok(())
}

/// Refill an empty queue according to the active pool mode.
///
/// Returns `None` when the queue still had entries. The refill clears the
/// current index; the caller draws the next one right after.
pub(crate) fn refill_if_exhausted(
    state: &mut SessionState,
    catalog: &Catalog,
) -> Option<PoolRefill> {
    if state.remaining_len() > 0 {
        return None;
    }

    let fell_back = match state.pool_mode() {
        PoolMode::DifficultAndWrong => {
            if select_difficult_wrong_pool(state).is_err() {
                select_full_pool(state, catalog);
                true
            } else {
                false
            }
        }
        PoolMode::Full => {
            select_full_pool(state, catalog);
            false
        }
    };

    Some(PoolRefill {
        mode: state.pool_mode(),
        fell_back,
    })
}
