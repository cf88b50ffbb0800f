//! Application state and logic.

use crate::input::{Action, move_cursor};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tictactoe_bot::{
    GameSession, MoveEngine, OpponentReady, Phase, Position, SessionEvent, Snapshot,
};
use tokio::sync::mpsc;
use tracing::debug;

const START_HINT: &str = "Press 's' to start, 'q' to quit.";
const END_HINT: &str = "Press 'r' to play again or 'q' to quit.";

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the program.
    Quit,
}

/// Main application state.
pub struct App<R = StdRng> {
    session: GameSession<R>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    cursor: Position,
    message: String,
}

impl<R: Rng> App<R> {
    /// Creates the app and the channel on which robot turns become due.
    pub fn new(
        engine: MoveEngine<R>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<OpponentReady>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (session, ready_rx) = GameSession::new(engine, delay);
        let app = Self {
            session: session.with_events(events_tx),
            events_rx,
            cursor: Position::Center,
            message: START_HINT.to_string(),
        };
        (app, ready_rx)
    }

    /// Board and status to render.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Latest message for the player.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The robot's reply is pending.
    pub fn is_thinking(&self) -> bool {
        self.session.is_opponent_thinking()
    }

    /// Applies a key action.
    pub fn handle_action(&mut self, action: Action) -> Flow {
        debug!(?action, "Handling action");
        match action {
            Action::Quit => return Flow::Quit,
            Action::Start => {
                if let Err(error) = self.session.start_game() {
                    debug!(%error, "Start ignored");
                }
            }
            Action::Restart => self.session.restart(),
            Action::MoveCursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::PlaceAtCursor => self.place(self.cursor),
            Action::Place(position) => {
                self.cursor = position;
                self.place(position);
            }
        }
        self.drain_events();
        Flow::Continue
    }

    /// Plays the robot's turn when its delay has elapsed.
    pub fn handle_ready(&mut self, ready: OpponentReady) {
        self.session.on_opponent_ready(ready);
        self.drain_events();
    }

    fn place(&mut self, position: Position) {
        if let Err(error) = self.session.human_move(position.to_index()) {
            debug!(%error, %position, "Move ignored");
            if self.session.state().phase() == Phase::Playing {
                self.message = format!("Can't play {}: {}", position, error);
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: SessionEvent) {
        let human = self.session.state().human_symbol();
        self.message = match event {
            SessionEvent::Started { human } => format!("You are {}. Your move.", human),
            SessionEvent::HumanMoved { index } => match Position::from_index(index) {
                Some(position) => format!("You played {}", position),
                None => format!("You played cell {}", index),
            },
            SessionEvent::OpponentThinking => "Robot is thinking...".to_string(),
            SessionEvent::OpponentMoved(decision) => match Position::from_index(decision.index) {
                Some(position) => format!("Robot played {} ({})", position, decision.heuristic),
                None => format!("Robot played cell {}", decision.index),
            },
            SessionEvent::Finished(Phase::Won(winner)) if Some(winner) == human => {
                format!("You win! {}", END_HINT)
            }
            SessionEvent::Finished(Phase::Won(_)) => format!("Robot wins! {}", END_HINT),
            SessionEvent::Finished(_) => format!("Draw! {}", END_HINT),
            SessionEvent::Restarted => START_HINT.to_string(),
        };
    }
}
