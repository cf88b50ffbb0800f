//! Key handling and robot replies without a terminal.

use crossterm::event::KeyCode;
use std::time::Duration;
use tictactoe_bot::{Cell, MoveEngine, Phase, Position};
use tictactoe_bot_tui::input::Action;
use tictactoe_bot_tui::{App, Flow};

const DELAY: Duration = Duration::from_millis(300);

fn marks(app: &App) -> usize {
    app.snapshot()
        .board
        .cells()
        .iter()
        .filter(|cell| **cell != Cell::Empty)
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_start_move_and_robot_reply() {
    let (mut app, mut ready_rx) = App::new(MoveEngine::seeded(1), DELAY);
    assert_eq!(app.snapshot().status, "Choose your symbol to start");

    // Moves before start are ignored.
    assert_eq!(app.handle_action(Action::Place(Position::Center)), Flow::Continue);
    assert_eq!(marks(&app), 0);

    app.handle_action(Action::Start);
    let human = app.snapshot().human_symbol.unwrap();
    assert_eq!(app.snapshot().status, format!("Playing as: {}", human));

    app.handle_action(Action::PlaceAtCursor);
    assert_eq!(
        app.snapshot().board.get(Position::Center.to_index()),
        Some(Cell::Marked(human))
    );
    assert!(app.is_thinking());
    assert_eq!(app.message(), "Robot is thinking...");

    let ready = ready_rx.recv().await.unwrap();
    app.handle_ready(ready);
    assert_eq!(marks(&app), 2);
    assert!(app.message().starts_with("Robot played"));
    assert!(app.message().contains("opening corner"));
}

#[tokio::test(start_paused = true)]
async fn test_restart_while_thinking_drops_reply() {
    let (mut app, mut ready_rx) = App::new(MoveEngine::seeded(2), DELAY);
    app.handle_action(Action::Start);
    app.handle_action(Action::Place(Position::TopLeft));
    app.handle_action(Action::Restart);

    assert_eq!(app.snapshot().phase, Phase::AwaitingSymbolChoice);
    let waited = tokio::time::timeout(DELAY * 4, ready_rx.recv()).await;
    assert!(waited.is_err());
    assert_eq!(marks(&app), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cursor_and_quit() {
    let (mut app, _ready_rx) = App::new(MoveEngine::seeded(3), DELAY);
    assert_eq!(app.cursor(), Position::Center);
    app.handle_action(Action::MoveCursor(KeyCode::Up));
    app.handle_action(Action::MoveCursor(KeyCode::Left));
    assert_eq!(app.cursor(), Position::TopLeft);
    assert_eq!(app.handle_action(Action::Quit), Flow::Quit);
}
