//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Mark placed by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Symbol {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Symbol {
    /// Returns the complementary symbol.
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a participant's mark.
    Marked(Symbol),
}

impl Cell {
    /// Returns the symbol in this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Marked(symbol) => Some(symbol),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order (0-8). The board only ever gains marks;
/// the sole way back to empty cells is building a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from an explicit cell layout.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Counts the cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Marked(symbol))
            .count()
    }

    /// Places `symbol` on an empty in-range cell.
    ///
    /// Returns false and leaves the board untouched otherwise.
    pub(crate) fn mark(&mut self, index: usize, symbol: Symbol) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.is_empty() => {
                *cell = Cell::Marked(symbol);
                true
            }
            _ => false,
        }
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based key so the grid doubles as a keypad legend.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Marked(symbol) => symbol.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error returned when a board layout string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Layout did not contain exactly nine cells.
    #[display("expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Layout contained a character that is not a cell.
    #[display("unexpected cell character {:?}", _0)]
    BadCell(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses a compact layout such as `"XX_ O__ ___"`.
    ///
    /// `X`/`O` are marks, `_`, `.` or `-` are empty; whitespace and `|` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let cell = match c.to_ascii_uppercase() {
                'X' => Cell::Marked(Symbol::X),
                'O' => Cell::Marked(Symbol::O),
                '_' | '.' | '-' => Cell::Empty,
                other => return Err(BoardParseError::BadCell(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}
