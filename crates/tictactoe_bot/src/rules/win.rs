//! Line evaluation: winner detection and one-move-to-win detection.

use crate::types::{Board, Cell, Symbol};
use tracing::instrument;

/// Three board indices that win when they hold the same symbol.
pub type Line = [usize; 3];

/// The 8 winning lines in scan order: rows, then columns, then diagonals.
///
/// The order is the tie-break whenever more than one line qualifies.
pub const LINES: [Line; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the symbol filling the first complete line, `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Symbol> {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Some(Cell::Marked(symbol)) = cell
            && cell == board.get(b)
            && cell == board.get(c)
        {
            return Some(symbol);
        }
    }
    None
}

/// Tally of a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LineTally {
    marks: usize,
    empties: usize,
    last_empty: Option<usize>,
}

impl LineTally {
    /// Counts `symbol` marks and empty cells on `line`, starting from zero.
    fn scan(board: &Board, line: Line, symbol: Symbol) -> Self {
        let mut tally = Self::default();
        for index in line {
            match board.get(index) {
                Some(Cell::Marked(s)) if s == symbol => tally.marks += 1,
                Some(Cell::Empty) => {
                    tally.empties += 1;
                    tally.last_empty = Some(index);
                }
                _ => {}
            }
        }
        tally
    }
}

/// Finds the cell that would complete a line for `symbol`.
///
/// A line qualifies when it holds exactly two `symbol` marks and exactly one
/// empty cell. Lines are scanned in [`LINES`] order and the first match wins.
#[instrument]
pub fn completing_cell(board: &Board, symbol: Symbol) -> Option<usize> {
    LINES.iter().find_map(|&line| {
        let tally = LineTally::scan(board, line, symbol);
        if tally.marks == 2 && tally.empties == 1 {
            tally.last_empty
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        layout.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        assert_eq!(check_winner(&board("XXX OO_ ___")), Some(Symbol::X));
    }

    #[test]
    fn test_winner_every_line() {
        for line in LINES {
            let mut cells = [Cell::Empty; 9];
            for index in line {
                cells[index] = Cell::Marked(Symbol::O);
            }
            assert_eq!(check_winner(&Board::from_cells(cells)), Some(Symbol::O));
        }
    }

    #[test]
    fn test_winner_diagonal() {
        assert_eq!(check_winner(&board("O_X _OX __O")), Some(Symbol::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(check_winner(&board("XX_ ___ ___")), None);
        assert_eq!(check_winner(&board("XOX ___ ___")), None);
    }

    #[test]
    fn test_completing_cell_finds_gap() {
        assert_eq!(completing_cell(&board("XX_ ___ ___"), Symbol::X), Some(2));
        assert_eq!(completing_cell(&board("X__ ___ X__"), Symbol::X), Some(3));
        assert_eq!(completing_cell(&board("__O _O_ ___"), Symbol::O), Some(6));
    }

    #[test]
    fn test_completing_cell_ignores_blocked_lines() {
        assert_eq!(completing_cell(&board("XXO ___ ___"), Symbol::X), None);
        assert_eq!(completing_cell(&board("XX_ ___ ___"), Symbol::O), None);
    }

    #[test]
    fn test_completing_cell_counts_restart_per_line() {
        // One X on each of the first two rows must not add up to a threat.
        assert_eq!(completing_cell(&board("X__ X__ ___"), Symbol::X), Some(6));
        assert_eq!(completing_cell(&board("X__ _X_ __O"), Symbol::X), None);
    }

    #[test]
    fn test_completing_cell_prefers_scan_order() {
        // Row 0 and column 0 both complete for X; the row is scanned first.
        assert_eq!(completing_cell(&board("_XX X__ X__"), Symbol::X), Some(0));
        // Row 1, column 0 and the main diagonal all complete; row 1 wins.
        assert_eq!(completing_cell(&board("O__ OO_ ___"), Symbol::O), Some(5));
    }
}
