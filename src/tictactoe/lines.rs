//! Winning line analysis for Tic-Tac-Toe

use super::{BOARD_CELLS, Cell, Mark};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Full-scan line checks, used wherever no "last move" is known.
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a mark owns three in a row anywhere on the board
    pub fn has_won(cells: &[Cell; BOARD_CELLS], mark: Mark) -> bool {
        let target = mark.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Check every line passing through `index`, diagonals included unconditionally.
    pub fn has_won_through(cells: &[Cell; BOARD_CELLS], index: usize, mark: Mark) -> bool {
        let target = mark.to_cell();
        WINNING_LINES
            .iter()
            .filter(|line| line.contains(&index))
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Mark::X));
        assert!(!LineAnalyzer::has_won(&cells, Mark::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Mark::O));
        assert!(!LineAnalyzer::has_won(&cells, Mark::X));
    }

    #[test]
    fn test_has_won_through_ignores_unrelated_lines() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[4] = Cell::X;
        cells[8] = Cell::X;

        assert!(LineAnalyzer::has_won_through(&cells, 4, Mark::X));
        assert!(!LineAnalyzer::has_won_through(&cells, 1, Mark::X));
    }

    #[test]
    fn odd_cells_lie_on_no_diagonal() {
        for index in [1, 3, 5, 7] {
            assert!(!WINNING_LINES[6].contains(&index));
            assert!(!WINNING_LINES[7].contains(&index));
        }
    }
}
