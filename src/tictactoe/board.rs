//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used in state keys. Empty cells are a single space.
    pub fn key_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Character used when rendering the board for humans.
    pub fn display_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_key_char(c: char) -> Option<Cell> {
        match c {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A mark placed by one of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Mutable 3x3 game board plus the mark that completed a line, if any.
///
/// Cell `i` sits at row `i / 3`, column `i % 3`:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
///
/// Cells are only written through [`GameState::apply_move`], and a written
/// cell stays fixed until [`GameState::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    cells: [Cell; BOARD_CELLS],
    winning_mark: Option<Mark>,
}

impl GameState {
    /// Create an empty board with no winner.
    pub fn new() -> Self {
        GameState {
            cells: [Cell::Empty; BOARD_CELLS],
            winning_mark: None,
        }
    }

    /// Rebuild a board from a key produced by [`GameState::state_key`].
    ///
    /// The winning mark is recovered by scanning every line, so a key whose
    /// board contains a completed line round-trips with its winner set.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not exactly nine characters, contains a
    /// character other than space/`X`/`O`, or shows both marks with a line.
    pub fn from_key(key: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = key.chars().collect();
        if chars.len() != BOARD_CELLS {
            return Err(crate::Error::InvalidBoardKey {
                key: key.to_string(),
                reason: format!("expected {BOARD_CELLS} cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_key_char(c).ok_or_else(|| crate::Error::InvalidBoardKey {
                key: key.to_string(),
                reason: format!("invalid character '{c}' at position {i}"),
            })?;
        }

        let x_wins = LineAnalyzer::has_won(&cells, Mark::X);
        let o_wins = LineAnalyzer::has_won(&cells, Mark::O);
        let winning_mark = match (x_wins, o_wins) {
            (true, true) => {
                return Err(crate::Error::InvalidBoardKey {
                    key: key.to_string(),
                    reason: "both marks cannot have winning lines".to_string(),
                });
            }
            (true, false) => Some(Mark::X),
            (false, true) => Some(Mark::O),
            (false, false) => None,
        };

        Ok(GameState {
            cells,
            winning_mark,
        })
    }

    /// All nine cells in index order
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Indices of the cells that are still empty, in ascending order.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// True when no empty cell remains, whether or not anyone has won.
    pub fn is_terminal(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// True when the game cannot continue: a line was completed or the board is full.
    pub fn is_over(&self) -> bool {
        self.winning_mark.is_some() || self.is_terminal()
    }

    /// Mark that completed a line, if any.
    pub fn winning_mark(&self) -> Option<Mark> {
        self.winning_mark
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Place `mark` at `index`.
    ///
    /// Returns `false` without touching the board when the cell is occupied or
    /// the index is off the board. On success the winning mark is recorded if
    /// this move completed a line; the return value is `true` either way.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        match self.cells.get(index) {
            Some(Cell::Empty) => {}
            _ => return false,
        }

        self.cells[index] = mark.to_cell();
        if self.winner_check(index, mark) {
            self.winning_mark = Some(mark);
        }
        true
    }

    /// Checked variant of [`GameState::apply_move`] for callers that want a reason.
    pub fn try_apply_move(&mut self, index: usize, mark: Mark) -> Result<(), crate::Error> {
        if index >= BOARD_CELLS {
            return Err(crate::Error::InvalidPosition { position: index });
        }
        if self.apply_move(index, mark) {
            Ok(())
        } else {
            Err(crate::Error::InvalidMove { position: index })
        }
    }

    /// Does `mark` own a full line through `index`?
    ///
    /// Only the row and column through `index` are inspected, plus both
    /// diagonals when `index` is even. Odd cells never lie on a diagonal.
    pub fn winner_check(&self, index: usize, mark: Mark) -> bool {
        if index >= BOARD_CELLS {
            return false;
        }
        let target = mark.to_cell();
        let owns = |cells: [usize; 3]| cells.iter().all(|&i| self.cells[i] == target);

        let row = index / 3 * 3;
        if owns([row, row + 1, row + 2]) {
            return true;
        }

        let col = index % 3;
        if owns([col, col + 3, col + 6]) {
            return true;
        }

        if index % 2 == 0 {
            return owns([0, 4, 8]) || owns([2, 4, 6]);
        }

        false
    }

    /// Clear every cell and forget the winner.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_CELLS];
        self.winning_mark = None;
    }

    /// The nine cells concatenated in index order: space, `X` or `O`.
    pub fn state_key(&self) -> String {
        self.cells.iter().map(|c| c.key_char()).collect()
    }

    /// Winner by full scan of all lines, independent of the recorded winning mark.
    pub fn winner(&self) -> Option<Mark> {
        if LineAnalyzer::has_won(&self.cells, Mark::X) {
            Some(Mark::X)
        } else if LineAnalyzer::has_won(&self.cells, Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].display_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
