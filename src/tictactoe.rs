//! Tic-Tac-Toe environment

pub mod board;
pub mod episode;
pub mod lines;

pub use board::{BOARD_CELLS, Cell, GameState, Mark};
pub use episode::{Episode, EpisodeRunner, EpisodeState};
pub use lines::{LineAnalyzer, WINNING_LINES};
