//! MENACE agent that learns Tic-Tac-Toe by adjusting matchbox beads.

use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{
    history::EpisodeHistory,
    matchbox::Matchbox,
    reinforcement::{Outcome, ReinforcementValues},
};
use crate::{Result, ports::Policy, tictactoe::GameState};

/// Bead count given to every legal move of a newly seen state
pub const DEFAULT_INITIAL_WEIGHT: u32 = 10;

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// MENACE learning agent
///
/// Memory maps a state key to a [`Matchbox`]. Boxes are created lazily the
/// first time a state is seen. Every decision of the current game is kept in
/// an [`EpisodeHistory`] until [`MenaceAgent::reinforce`] consumes it.
pub struct MenaceAgent {
    memory: HashMap<String, Matchbox>,
    history: EpisodeHistory,
    initial_weight: u32,
    reinforcement: ReinforcementValues,
    rng: StdRng,
    rng_seed: Option<u64>,
    games_trained: usize,
    fallback_moves: usize,
}

impl std::fmt::Debug for MenaceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("states_seen", &self.memory.len())
            .field("initial_weight", &self.initial_weight)
            .field("reinforcement", &self.reinforcement)
            .field("games_trained", &self.games_trained)
            .finish()
    }
}

impl MenaceAgent {
    /// Create an agent with the classic schedule and ten beads per move.
    pub fn new() -> Self {
        Self {
            memory: HashMap::new(),
            history: EpisodeHistory::new(),
            initial_weight: DEFAULT_INITIAL_WEIGHT,
            reinforcement: ReinforcementValues::default(),
            rng: build_rng(None),
            rng_seed: None,
            games_trained: 0,
            fallback_moves: 0,
        }
    }

    /// Create an agent that fills new boxes with `initial_weight` beads per move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] when `initial_weight` is zero.
    pub fn with_initial_weight(initial_weight: u32) -> Result<Self> {
        if initial_weight == 0 {
            return Err(crate::Error::config("initial weight must be positive"));
        }
        Ok(Self {
            initial_weight,
            ..Self::new()
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(Some(seed));
        self
    }

    pub fn with_reinforcement(mut self, reinforcement: ReinforcementValues) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    /// Replace the random number generator. `None` draws a fresh seed from the OS.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = build_rng(seed);
        self.rng_seed = seed;
    }

    /// Draw a move for `state`, opening a matchbox for it if necessary.
    ///
    /// A box with no beads left does not resign: the agent picks uniformly
    /// among the free cells and records nothing, so the box stays empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] on a full board.
    pub fn select_move(&mut self, state: &GameState) -> Result<usize> {
        let available = state.available_moves();
        if available.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        let key = state.state_key();
        let initial_weight = self.initial_weight;
        let matchbox = self
            .memory
            .entry(key.clone())
            .or_insert_with(|| Matchbox::new(&available, initial_weight));

        match matchbox.sample_move(&mut self.rng) {
            Some(position) => {
                self.history.record(key, position);
                Ok(position)
            }
            None => {
                log::warn!("matchbox for state '{key}' is empty; playing uniformly at random");
                self.fallback_moves += 1;
                available
                    .choose(&mut self.rng)
                    .copied()
                    .ok_or(crate::Error::NoValidMoves)
            }
        }
    }

    /// Forget any decisions left over from an episode that never finished.
    pub(crate) fn begin_episode(&mut self) {
        self.history.clear();
    }

    /// Apply the outcome's bead adjustment to every recorded decision, then
    /// forget the episode.
    ///
    /// Every move gets the same adjustment regardless of when it was played.
    pub fn reinforce(&mut self, outcome: Outcome) {
        let delta = self.reinforcement.delta(outcome);
        for entry in self.history.iter() {
            if let Some(matchbox) = self.memory.get_mut(&entry.state_key) {
                matchbox.reinforce(entry.position, delta);
            }
        }
        log::debug!(
            "reinforced {} decisions with {delta:+} after a {outcome}",
            self.history.len()
        );
        self.history.clear();
        self.games_trained += 1;
    }

    /// Matchbox for a state key, if the agent has seen that state
    pub fn matchbox(&self, key: &str) -> Option<&Matchbox> {
        self.memory.get(key)
    }

    /// Bead count for a move in a state, if both are known
    pub fn weight(&self, key: &str, position: usize) -> Option<u32> {
        self.memory.get(key)?.bead_count(position)
    }

    /// Number of distinct states with a matchbox
    pub fn states_seen(&self) -> usize {
        self.memory.len()
    }

    /// Iterate over every (state key, matchbox) pair
    pub fn matchboxes(&self) -> impl Iterator<Item = (&str, &Matchbox)> + '_ {
        self.memory.iter().map(|(key, matchbox)| (key.as_str(), matchbox))
    }

    /// Decisions recorded for the in-progress game
    pub fn history(&self) -> &EpisodeHistory {
        &self.history
    }

    pub fn games_trained(&self) -> usize {
        self.games_trained
    }

    /// How many moves were played uniformly because their box was empty
    pub fn fallback_moves(&self) -> usize {
        self.fallback_moves
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        let mut total_beads = 0u64;
        let mut empty_matchboxes = 0usize;
        let mut entropies = Vec::with_capacity(self.memory.len());

        for matchbox in self.memory.values() {
            let beads = matchbox.total_beads();
            total_beads += beads;
            if beads == 0 {
                empty_matchboxes += 1;
            } else {
                entropies.push(crate::utils::entropy_from_weights(
                    matchbox.all_beads().map(|(_, count)| count as f64),
                ));
            }
        }

        let avg_entropy = if entropies.is_empty() {
            0.0
        } else {
            entropies.iter().sum::<f64>() / entropies.len() as f64
        };

        AgentStats {
            total_matchboxes: self.memory.len(),
            empty_matchboxes,
            total_beads,
            avg_entropy,
        }
    }

    /// Forget everything learned. The random number generator is rewound
    /// to its seed when one was given.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.history.clear();
        self.games_trained = 0;
        self.fallback_moves = 0;
        self.rng = build_rng(self.rng_seed);
    }
}

impl Default for MenaceAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for MenaceAgent {
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        MenaceAgent::select_move(self, state)
    }

    fn name(&self) -> &str {
        "MENACE"
    }
}

/// Snapshot of what the agent has learned so far
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AgentStats {
    pub total_matchboxes: usize,
    pub empty_matchboxes: usize,
    pub total_beads: u64,
    pub avg_entropy: f64,
}
