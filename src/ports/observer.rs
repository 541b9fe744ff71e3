//! Observer port - watching a training run without coupling to its output
//!
//! Training emits per-episode outcomes and per-block win rates through this
//! trait; how they are rendered or stored is the observer's business.

use crate::{
    Result,
    menace::Outcome,
    tictactoe::{GameState, Mark},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - for each move in the game
///    - `on_game_end(game_num, outcome)`
///    - `on_block_end(block_num, win_rate)` - after every full block
/// 3. `on_training_end()` - once
///
/// Game and block numbers are 1-based.
///
/// # Examples
///
/// ```no_run
/// use menace_sandbox::{menace::Outcome, ports::Observer};
///
/// struct CountWins {
///     wins: usize,
/// }
///
/// impl Observer for CountWins {
///     fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> menace_sandbox::Result<()> {
///         if outcome == Outcome::Win {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied; `state` already contains it.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &GameState,
        _mark: Mark,
        _position: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once reinforcement for the game has been applied.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    fn on_block_end(&mut self, _block_num: usize, _win_rate: f64) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
