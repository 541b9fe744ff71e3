//! Driving a single game between two policies

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{BOARD_CELLS, GameState, Mark};
use crate::{Result, ports::Policy};

/// Where an episode stands after the latest tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeState {
    InProgress,
    WonBy(Mark),
    Drawn,
}

impl EpisodeState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EpisodeState::InProgress)
    }
}

/// A finished episode: the terminal state and every position played, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub terminal: EpisodeState,
    pub first_mark: Mark,
    pub moves: SmallVec<[usize; BOARD_CELLS]>,
}

impl Episode {
    /// Mark that played the `step`-th move (0-based).
    pub fn mark_at(&self, step: usize) -> Mark {
        if step % 2 == 0 {
            self.first_mark
        } else {
            self.first_mark.opponent()
        }
    }
}

/// Turn-by-turn state machine over a shared [`GameState`].
///
/// The runner does not reset the board; hand it a fresh one.
#[derive(Debug, Clone)]
pub struct EpisodeRunner {
    first_mark: Mark,
    to_move: Mark,
    status: EpisodeState,
    moves: SmallVec<[usize; BOARD_CELLS]>,
}

impl EpisodeRunner {
    pub fn new(first_mark: Mark) -> Self {
        Self {
            first_mark,
            to_move: first_mark,
            status: EpisodeState::InProgress,
            moves: SmallVec::new(),
        }
    }

    pub fn status(&self) -> EpisodeState {
        self.status
    }

    /// Ask `policy` for a move for the active mark and apply it.
    ///
    /// Ticking a finished episode is a no-op that returns the terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMoveAttempted`] if the policy picks a
    /// cell that is not empty. The episode cannot continue after that.
    pub fn tick(&mut self, state: &mut GameState, policy: &mut dyn Policy) -> Result<EpisodeState> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let mark = self.to_move;
        let position = policy.select_move(state)?;

        if !state.apply_move(position, mark) {
            return Err(crate::Error::IllegalMoveAttempted {
                policy: policy.name().to_string(),
                position,
                state: state.state_key(),
            });
        }
        self.moves.push(position);

        self.status = if let Some(winner) = state.winning_mark() {
            EpisodeState::WonBy(winner)
        } else if state.is_terminal() {
            EpisodeState::Drawn
        } else {
            self.to_move = mark.opponent();
            EpisodeState::InProgress
        };

        Ok(self.status)
    }

    /// Play to completion. `x` moves for [`Mark::X`], `o` for [`Mark::O`].
    pub fn run(
        self,
        state: &mut GameState,
        x: &mut dyn Policy,
        o: &mut dyn Policy,
    ) -> Result<Episode> {
        self.run_observed(state, x, o, |_, _, _, _| Ok(()))
    }

    /// Like [`EpisodeRunner::run`], calling `on_move(step, state, mark, position)`
    /// after every applied move.
    pub fn run_observed<F>(
        mut self,
        state: &mut GameState,
        x: &mut dyn Policy,
        o: &mut dyn Policy,
        mut on_move: F,
    ) -> Result<Episode>
    where
        F: FnMut(usize, &GameState, Mark, usize) -> Result<()>,
    {
        while !self.status.is_terminal() {
            let mark = self.to_move;
            let policy: &mut dyn Policy = match mark {
                Mark::X => &mut *x,
                Mark::O => &mut *o,
            };
            self.tick(state, policy)?;

            let step = self.moves.len() - 1;
            on_move(step, state, mark, self.moves[step])?;
        }

        Ok(Episode {
            terminal: self.status,
            first_mark: self.first_mark,
            moves: self.moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays a fixed script of positions, regardless of the board.
    struct Scripted {
        moves: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        fn new(moves: &[usize]) -> Self {
            Self {
                moves: moves.to_vec(),
                next: 0,
            }
        }
    }

    impl Policy for Scripted {
        fn select_move(&mut self, _state: &GameState) -> Result<usize> {
            let position = self.moves[self.next];
            self.next += 1;
            Ok(position)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn x_wins_top_row() {
        let mut state = GameState::new();
        let mut x = Scripted::new(&[0, 1, 2]);
        let mut o = Scripted::new(&[3, 4]);
        let episode = EpisodeRunner::new(Mark::X)
            .run(&mut state, &mut x, &mut o)
            .unwrap();
        assert_eq!(episode.terminal, EpisodeState::WonBy(Mark::X));
        assert_eq!(episode.moves.as_slice(), &[0, 3, 1, 4, 2]);
    }

    #[test]
    fn full_board_without_line_is_drawn() {
        let mut state = GameState::new();
        let mut x = Scripted::new(&[0, 2, 3, 7, 8]);
        let mut o = Scripted::new(&[1, 4, 5, 6]);
        let episode = EpisodeRunner::new(Mark::X)
            .run(&mut state, &mut x, &mut o)
            .unwrap();
        assert_eq!(episode.terminal, EpisodeState::Drawn);
        assert_eq!(episode.moves.len(), 9);
    }

    #[test]
    fn o_can_open() {
        let mut state = GameState::new();
        let mut x = Scripted::new(&[0, 1]);
        let mut o = Scripted::new(&[6, 7, 8]);
        let episode = EpisodeRunner::new(Mark::O)
            .run(&mut state, &mut x, &mut o)
            .unwrap();
        assert_eq!(episode.terminal, EpisodeState::WonBy(Mark::O));
        assert_eq!(episode.mark_at(0), Mark::O);
        assert_eq!(episode.mark_at(1), Mark::X);
    }

    #[test]
    fn illegal_move_is_fatal() {
        let mut state = GameState::new();
        let mut x = Scripted::new(&[4, 0]);
        let mut o = Scripted::new(&[4]);
        let err = EpisodeRunner::new(Mark::X)
            .run(&mut state, &mut x, &mut o)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::IllegalMoveAttempted { position: 4, .. }
        ));
        assert_eq!(state.occupied_count(), 1);
    }

    #[test]
    fn tick_after_terminal_is_noop() {
        let mut state = GameState::new();
        let mut runner = EpisodeRunner::new(Mark::X);
        let mut x = Scripted::new(&[0, 1, 2]);
        let mut o = Scripted::new(&[3, 4]);
        for _ in 0..3 {
            runner.tick(&mut state, &mut x).unwrap();
            if runner.status().is_terminal() {
                break;
            }
            runner.tick(&mut state, &mut o).unwrap();
        }
        assert_eq!(runner.status(), EpisodeState::WonBy(Mark::X));
        let mut never = Scripted::new(&[]);
        assert_eq!(
            runner.tick(&mut state, &mut never).unwrap(),
            EpisodeState::WonBy(Mark::X)
        );
    }
}
