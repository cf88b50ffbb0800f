//! A running game: state, robot and the robot's pending turn.
//!
//! The session is what a front end talks to. It applies human moves, schedules
//! the robot's reply after the thinking delay and drops replies that no longer
//! match the board.

use crate::engine::{Decision, MoveEngine};
use crate::phases::Phase;
use crate::scheduler::{OpponentReady, OpponentScheduler};
use crate::state::{GameState, MoveError, Snapshot};
use crate::types::Symbol;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Notifications for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Symbols were assigned.
    Started {
        /// The human's symbol.
        human: Symbol,
    },
    /// The human placed a mark.
    HumanMoved {
        /// Board index.
        index: usize,
    },
    /// The robot is thinking about its reply.
    OpponentThinking,
    /// The robot placed a mark.
    OpponentMoved(Decision),
    /// The game reached a terminal phase.
    Finished(Phase),
    /// The game was thrown away and a fresh one created.
    Restarted,
}

/// One human-vs-robot game session.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    state: GameState,
    engine: MoveEngine<R>,
    scheduler: OpponentScheduler,
    epoch: u64,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl<R: Rng> GameSession<R> {
    /// Creates a session and the channel on which robot turns become due.
    ///
    /// Feed every [`OpponentReady`] from the receiver back into
    /// [`on_opponent_ready`](Self::on_opponent_ready).
    pub fn new(
        engine: MoveEngine<R>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<OpponentReady>) {
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();
        let session = Self {
            state: GameState::new(),
            engine,
            scheduler: OpponentScheduler::new(delay, ready_tx),
            epoch: 0,
            events: None,
        };
        (session, ready_rx)
    }

    /// Sends [`SessionEvent`]s to `events_tx`.
    pub fn with_events(mut self, events_tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(events_tx);
        self
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Board version; changes on every applied move, start and restart.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// A robot reply is scheduled and still due.
    pub fn is_opponent_thinking(&self) -> bool {
        self.scheduler.is_pending() && self.state.awaits_opponent()
    }

    /// Assigns symbols at random.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<Symbol, MoveError> {
        let human = self.state.start_game(self.engine.rng_mut())?;
        self.epoch += 1;
        self.emit(SessionEvent::Started { human });
        Ok(human)
    }

    /// Applies a human move and schedules the robot's reply.
    ///
    /// A move that ends the game schedules nothing.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn human_move(&mut self, index: usize) -> Result<(), MoveError> {
        self.state.apply_human_move(index)?;
        self.epoch += 1;
        self.emit(SessionEvent::HumanMoved { index });

        if self.state.awaits_opponent() {
            self.scheduler.schedule(self.epoch);
            self.emit(SessionEvent::OpponentThinking);
        } else {
            self.finish();
        }
        Ok(())
    }

    /// Plays the robot's turn if `ready` still refers to the current board.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn on_opponent_ready(&mut self, ready: OpponentReady) -> Option<Decision> {
        if ready.epoch != self.epoch {
            debug!(stale = ready.epoch, "Discarding robot turn for an outdated board");
            return None;
        }
        self.play_opponent()
    }

    /// Plays the robot's turn immediately, skipping the thinking delay.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn play_opponent(&mut self) -> Option<Decision> {
        if !self.state.awaits_opponent() {
            debug!(phase = %self.state.phase(), "Robot is not due to move");
            return None;
        }
        self.scheduler.cancel();

        let (opponent, human) = (self.state.opponent_symbol()?, self.state.human_symbol()?);
        let decision = self.engine.decide(
            self.state.board(),
            opponent,
            human,
            self.state.round(),
        )?;

        if let Err(error) = self.state.apply_opponent_move(decision.index) {
            warn!(%error, index = decision.index, "Robot move rejected");
            return None;
        }
        self.epoch += 1;
        info!(index = decision.index, heuristic = %decision.heuristic, "Robot moved");
        self.emit(SessionEvent::OpponentMoved(decision));
        self.finish();
        Some(decision)
    }

    /// Throws the game away, cancelling any pending robot turn.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.scheduler.cancel();
        self.state.restart();
        self.epoch += 1;
        self.emit(SessionEvent::Restarted);
    }

    fn finish(&self) {
        let phase = self.state.phase();
        if phase.is_terminal() {
            info!(%phase, "Game over");
            self.emit(SessionEvent::Finished(phase));
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }
}
