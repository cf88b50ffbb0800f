//! Keyboard handling.

use crossterm::event::KeyCode;
use tictactoe_bot::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Assign symbols and begin.
    Start,
    /// Mark the cell under the cursor.
    PlaceAtCursor,
    /// Mark a specific cell.
    Place(Position),
    /// Move the cursor.
    MoveCursor(KeyCode),
    /// Throw the game away.
    Restart,
    /// Leave the program.
    Quit,
}

/// Maps a key to an action.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            Position::from_key_or_label(&c.to_string()).map(Action::Place)
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::MoveCursor(key))
        }
        _ => None,
    }
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
