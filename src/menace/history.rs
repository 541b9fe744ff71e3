//! Per-episode record of the agent's own decisions

use smallvec::SmallVec;

use crate::tictactoe::BOARD_CELLS;

/// One decision: the state key the agent saw and the move it drew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state_key: String,
    pub position: usize,
}

/// Decisions made during the in-progress episode, in play order.
///
/// Storage is inline for a full board's worth of moves, so recording never
/// allocates for the entry list itself.
#[derive(Debug, Clone, Default)]
pub struct EpisodeHistory {
    entries: SmallVec<[HistoryEntry; BOARD_CELLS]>,
}

impl EpisodeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state_key: String, position: usize) {
        debug_assert!(
            self.entries.len() < BOARD_CELLS,
            "a single game cannot produce more than {BOARD_CELLS} decisions"
        );
        self.entries.push(HistoryEntry {
            state_key,
            position,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
