//! MENACE learning system
//!
//! A matchbox per board state, beads per legal move, and a fixed
//! win/draw/loss bead schedule applied to every move of a finished game.

pub mod agent;
pub mod history;
pub mod matchbox;
pub mod reinforcement;

pub use agent::{AgentStats, DEFAULT_INITIAL_WEIGHT, MenaceAgent};
pub use history::{EpisodeHistory, HistoryEntry};
pub use matchbox::Matchbox;
pub use reinforcement::{Outcome, ReinforcementValues};
