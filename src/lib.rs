//! MENACE (Matchbox Educable Noughts And Crosses Engine) sandbox
//!
//! This crate provides:
//! - A Tic-Tac-Toe environment with incremental win detection
//! - The MENACE matchbox learner and a uniform-random opponent
//! - An episode runner and a block-averaged training loop with observers
//! - Epsilon-greedy multi-armed bandit exercises built on the same loop

pub mod bandit;
pub mod cli;
pub mod error;
pub mod menace;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod utils;

pub use error::{Error, Result};
pub use menace::{MenaceAgent, Outcome, ReinforcementValues};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult, UniformRandomPolicy};
pub use ports::{Observer, Policy};
pub use tictactoe::{EpisodeRunner, EpisodeState, GameState, Mark};
