//! Non-learning opponents

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{Result, ports::Policy, tictactoe::GameState};

/// Uniformly random player over the free cells
#[derive(Debug, Clone)]
pub struct UniformRandomPolicy {
    name: String,
    rng: StdRng,
}

impl UniformRandomPolicy {
    /// Create a new random policy
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    /// Create a new random policy with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Random".to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for UniformRandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for UniformRandomPolicy {
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        let moves = state.available_moves();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Mark;

    #[test]
    fn random_policy_only_picks_free_cells() {
        let mut policy = UniformRandomPolicy::with_seed(17);
        let mut state = GameState::new();
        state.apply_move(0, Mark::X);
        state.apply_move(4, Mark::O);
        state.apply_move(8, Mark::X);
        for _ in 0..200 {
            let pos = policy.select_move(&state).unwrap();
            assert!(state.available_moves().contains(&pos));
        }
    }

    #[test]
    fn random_policy_covers_every_free_cell() {
        let mut policy = UniformRandomPolicy::with_seed(3);
        let state = GameState::new();
        let mut seen = [0usize; 9];
        for _ in 0..9_000 {
            seen[policy.select_move(&state).unwrap()] += 1;
        }
        assert!(seen.iter().all(|&count| (800..1200).contains(&count)), "{seen:?}");
    }

    #[test]
    fn random_policy_errors_on_full_board() {
        let mut policy = UniformRandomPolicy::with_seed(1);
        let state = GameState::from_key("XOXXOOOXX").unwrap();
        assert!(matches!(
            policy.select_move(&state),
            Err(crate::Error::NoValidMoves)
        ));
    }
}
