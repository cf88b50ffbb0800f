//! Turn sequencing and cancellation of the robot's delayed reply.

use std::time::Duration;
use tictactoe_bot::{
    Cell, GameSession, Heuristic, MoveEngine, MoveError, OpponentReady, Phase, SessionEvent,
};
use tokio::sync::mpsc;

const DELAY: Duration = Duration::from_millis(300);

fn session(seed: u64) -> (GameSession, mpsc::UnboundedReceiver<OpponentReady>) {
    GameSession::new(MoveEngine::seeded(seed), DELAY)
}

fn marks(session: &GameSession) -> usize {
    session
        .state()
        .board()
        .cells()
        .iter()
        .filter(|cell| **cell != Cell::Empty)
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_robot_replies_once_after_delay() {
    let (mut session, mut ready_rx) = session(1);
    session.start_game().unwrap();
    session.human_move(4).unwrap();
    assert!(session.is_opponent_thinking());
    assert_eq!(marks(&session), 1);

    tokio::time::sleep(DELAY / 2).await;
    assert!(ready_rx.try_recv().is_err());

    let ready = ready_rx.recv().await.unwrap();
    let decision = session.on_opponent_ready(ready).unwrap();
    assert_eq!(decision.heuristic, Heuristic::Opening);
    assert_eq!(marks(&session), 2);
    assert_eq!(session.state().round(), 1);

    // Replaying the same signal must not produce a second robot move.
    assert_eq!(session.on_opponent_ready(ready), None);
    assert_eq!(marks(&session), 2);
}

#[tokio::test(start_paused = true)]
async fn test_second_human_click_waits_for_robot() {
    let (mut session, _ready_rx) = session(2);
    session.start_game().unwrap();
    session.human_move(4).unwrap();
    assert_eq!(session.human_move(0), Err(MoveError::NotYourTurn));
    assert_eq!(marks(&session), 1);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_pending_reply() {
    let (mut session, mut ready_rx) = session(3);
    session.start_game().unwrap();
    session.human_move(4).unwrap();
    let stale_epoch = session.epoch();

    session.restart();
    assert!(!session.is_opponent_thinking());
    assert_eq!(session.state().phase(), Phase::AwaitingSymbolChoice);

    let waited = tokio::time::timeout(DELAY * 4, ready_rx.recv()).await;
    assert!(waited.is_err(), "cancelled turn still fired");

    // Even a signal that slipped out before the abort is ignored.
    assert_eq!(
        session.on_opponent_ready(OpponentReady { epoch: stale_epoch }),
        None
    );
    assert_eq!(marks(&session), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stale_signal_after_restart_and_new_move_is_ignored() {
    let (mut session, mut ready_rx) = session(4);
    session.start_game().unwrap();
    session.human_move(0).unwrap();
    let stale_epoch = session.epoch();

    session.restart();
    session.start_game().unwrap();
    session.human_move(8).unwrap();

    assert_eq!(
        session.on_opponent_ready(OpponentReady { epoch: stale_epoch }),
        None
    );
    assert_eq!(marks(&session), 1);

    let ready = ready_rx.recv().await.unwrap();
    assert_eq!(ready.epoch, session.epoch());
    assert!(session.on_opponent_ready(ready).is_some());
    assert_eq!(marks(&session), 2);
}

#[tokio::test(start_paused = true)]
async fn test_human_win_suppresses_reply() {
    let (mut session, mut ready_rx) = session(5);
    session.start_game().unwrap();

    // Drive the game with immediate robot turns until the human can finish a line
    // or the game ends; then check no reply is scheduled once it is over.
    while !session.state().phase().is_terminal() {
        let board = *session.state().board();
        let human = session.state().human_symbol().unwrap();
        let index = tictactoe_bot::rules::completing_cell(&board, human)
            .or_else(|| board.empty_cells().first().copied())
            .unwrap();
        session.human_move(index).unwrap();
        if session.state().phase().is_terminal() {
            break;
        }
        let ready = ready_rx.recv().await.unwrap();
        session.on_opponent_ready(ready).unwrap();
    }

    assert!(!session.is_opponent_thinking());
    let waited = tokio::time::timeout(DELAY * 4, ready_rx.recv()).await;
    assert!(waited.is_err());
    assert!(session.play_opponent().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_events_follow_the_game() {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (session, mut ready_rx) = session(6);
    let mut session = session.with_events(events_tx);

    let human = session.start_game().unwrap();
    session.human_move(4).unwrap();
    let ready = ready_rx.recv().await.unwrap();
    let decision = session.on_opponent_ready(ready).unwrap();
    session.restart();

    let mut events = Vec::new();
    while let Ok(event) = events_rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            SessionEvent::Started { human },
            SessionEvent::HumanMoved { index: 4 },
            SessionEvent::OpponentThinking,
            SessionEvent::OpponentMoved(decision),
            SessionEvent::Restarted,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_start_twice_keeps_symbols() {
    let (mut session, _ready_rx) = session(7);
    let human = session.start_game().unwrap();
    assert_eq!(session.start_game(), Err(MoveError::AlreadyStarted));
    assert_eq!(session.state().human_symbol(), Some(human));
    assert_eq!(session.state().opponent_symbol(), Some(human.other()));
}
