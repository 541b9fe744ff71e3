//! Common test utilities for the sandbox test suite.

#![allow(dead_code)]

use std::collections::HashMap;

use menace_sandbox::{
    MenaceAgent, Policy, Result,
    tictactoe::{Episode, EpisodeRunner, GameState, Mark},
};

/// Plays a fixed list of positions, in order.
pub struct ScriptedPolicy {
    moves: Vec<usize>,
    next: usize,
}

impl ScriptedPolicy {
    pub fn new(moves: &[usize]) -> Self {
        Self {
            moves: moves.to_vec(),
            next: 0,
        }
    }
}

impl Policy for ScriptedPolicy {
    fn select_move(&mut self, _state: &GameState) -> Result<usize> {
        let position = self.moves[self.next];
        self.next += 1;
        Ok(position)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

/// Bead counts of every matchbox, keyed by state.
pub fn snapshot(agent: &MenaceAgent) -> HashMap<String, Vec<(usize, u32)>> {
    agent
        .matchboxes()
        .map(|(key, matchbox)| (key.to_string(), matchbox.all_beads().collect()))
        .collect()
}

/// Play one game from an empty board with X moving first.
pub fn play(x: &mut dyn Policy, o: &mut dyn Policy) -> Result<Episode> {
    let mut state = GameState::new();
    EpisodeRunner::new(Mark::X).run(&mut state, x, o)
}
