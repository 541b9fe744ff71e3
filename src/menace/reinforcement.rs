//! Outcome vocabulary and the fixed MENACE reinforcement schedule

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{EpisodeState, Mark};

/// Result of a finished game from the learning agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Translate a terminal episode state for the agent playing `agent`.
    ///
    /// Returns `None` while the episode is still in progress.
    pub fn for_mark(terminal: EpisodeState, agent: Mark) -> Option<Outcome> {
        match terminal {
            EpisodeState::InProgress => None,
            EpisodeState::Drawn => Some(Outcome::Draw),
            EpisodeState::WonBy(winner) if winner == agent => Some(Outcome::Win),
            EpisodeState::WonBy(_) => Some(Outcome::Loss),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// MENACE reinforcement values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: i16,
    pub draw: i16,
    pub loss: i16,
}

impl ReinforcementValues {
    /// Signed bead adjustment applied to every move of a game with this outcome
    pub fn delta(&self, outcome: Outcome) -> i16 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        }
    }
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: 3,
            draw: 1,
            loss: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule() {
        let values = ReinforcementValues::default();
        assert_eq!(values.delta(Outcome::Win), 3);
        assert_eq!(values.delta(Outcome::Draw), 1);
        assert_eq!(values.delta(Outcome::Loss), -1);
    }

    #[test]
    fn outcome_is_relative_to_agent() {
        let won_by_x = EpisodeState::WonBy(Mark::X);
        assert_eq!(Outcome::for_mark(won_by_x, Mark::X), Some(Outcome::Win));
        assert_eq!(Outcome::for_mark(won_by_x, Mark::O), Some(Outcome::Loss));
        assert_eq!(
            Outcome::for_mark(EpisodeState::Drawn, Mark::O),
            Some(Outcome::Draw)
        );
        assert_eq!(Outcome::for_mark(EpisodeState::InProgress, Mark::X), None);
    }

    #[test]
    fn outcome_serializes_lowercase() {
        let json = serde_json::to_string(&Outcome::Loss).unwrap();
        assert_eq!(json, "\"loss\"");
    }
}
