//! Multi-armed bandit exercises
//!
//! The same select / reward / update loop as MENACE, over a fixed action set
//! with no board state: a stationary two-armed Bernoulli bandit, a
//! random-walk 10-armed bandit, and epsilon-greedy agents with sample-average
//! or constant step-size updates.

pub mod agent;
pub mod environment;
pub mod experiment;

pub use agent::{BanditLearner, EpsilonGreedyAgent, StepSize, TieBreak};
pub use environment::{BinaryBandit, NonStationaryBandit};
pub use experiment::{
    BinaryExperimentResult, LearningCurves, NonStationaryComparison, NonStationaryConfig,
    random_walk_trace, run_binary_experiment, run_nonstationary_comparison,
};
