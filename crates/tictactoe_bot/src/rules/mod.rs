//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Both the game state and the
//! robot's move engine evaluate lines through this module, so line order and
//! counting live in exactly one place.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Line, check_winner, completing_cell};
