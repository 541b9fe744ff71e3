//! Matchbox implementation for MENACE

use rand::Rng;
use smallvec::SmallVec;

use crate::tictactoe::BOARD_CELLS;

/// Beads for one board state: a weight per move that was legal when the box was filled.
///
/// Entries are kept in ascending move order so sampling is reproducible for a
/// given seed. A box never gains moves after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchbox {
    beads: SmallVec<[(usize, u32); BOARD_CELLS]>,
}

impl Matchbox {
    /// Create a box holding `initial_weight` beads for every move in `valid_moves`.
    pub fn new(valid_moves: &[usize], initial_weight: u32) -> Self {
        let mut beads: SmallVec<[(usize, u32); BOARD_CELLS]> = valid_moves
            .iter()
            .map(|&pos| (pos, initial_weight))
            .collect();
        beads.sort_unstable_by_key(|&(pos, _)| pos);
        beads.dedup_by_key(|(pos, _)| *pos);

        Matchbox { beads }
    }

    /// Get the bead count for a specific position
    pub fn bead_count(&self, position: usize) -> Option<u32> {
        self.beads
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|&(_, count)| count)
    }

    /// Get an iterator over all position-bead pairs, in position order
    pub fn all_beads(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.beads.iter().copied()
    }

    /// Moves this box was initialised with
    pub fn moves(&self) -> impl Iterator<Item = usize> + '_ {
        self.beads.iter().map(|&(pos, _)| pos)
    }

    /// Get total bead count
    pub fn total_beads(&self) -> u64 {
        self.beads.iter().map(|&(_, count)| count as u64).sum()
    }

    /// True when no bead is left for any move
    pub fn is_empty(&self) -> bool {
        self.beads.iter().all(|&(_, count)| count == 0)
    }

    /// Draw a move with probability proportional to its bead count.
    ///
    /// Uses a binary search over cumulative counts. Returns `None` for an
    /// empty box.
    pub fn sample_move(&self, rng: &mut impl Rng) -> Option<usize> {
        let mut cumulative: SmallVec<[u64; BOARD_CELLS]> = SmallVec::new();
        let mut running = 0u64;
        for &(_, count) in &self.beads {
            running += count as u64;
            cumulative.push(running);
        }

        if running == 0 {
            return None;
        }

        let ticket = rng.random_range(0..running);
        let idx = cumulative.partition_point(|&edge| edge <= ticket);
        self.beads.get(idx).map(|&(pos, _)| pos)
    }

    /// Add (`delta > 0`) or remove (`delta < 0`) beads for `position`.
    ///
    /// Removal stops at zero. Unknown positions are ignored.
    pub fn reinforce(&mut self, position: usize, delta: i16) {
        if let Some((_, count)) = self.beads.iter_mut().find(|(pos, _)| *pos == position) {
            if delta > 0 {
                *count = count.saturating_add(delta.unsigned_abs() as u32);
            } else {
                *count = count.saturating_sub(delta.unsigned_abs() as u32);
            }
        }
    }
}
