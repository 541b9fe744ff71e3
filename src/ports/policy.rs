//! Policy port - anything that can choose a move can play

use crate::{Result, tictactoe::GameState};

/// Policy trait - the single boundary between the episode runner and players
///
/// The learning agent, the uniform-random opponent and any future
/// human or solver player all implement this trait.
///
/// # Examples
///
/// ```
/// use menace_sandbox::{Result, ports::Policy, tictactoe::GameState};
///
/// struct FirstFree;
///
/// impl Policy for FirstFree {
///     fn select_move(&mut self, state: &GameState) -> Result<usize> {
///         state
///             .available_moves()
///             .first()
///             .copied()
///             .ok_or(menace_sandbox::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Select a position (0-8) for the current board.
    ///
    /// A well-behaved policy only returns entries of
    /// [`GameState::available_moves`]; the runner treats anything else as a
    /// contract violation.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available.
    fn select_move(&mut self, state: &GameState) -> Result<usize>;

    /// Name used in diagnostics and error reports.
    fn name(&self) -> &str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        (**self).select_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
