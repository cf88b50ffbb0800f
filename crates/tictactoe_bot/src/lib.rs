//! Tic-tac-toe against a heuristic robot.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Cell`], [`Symbol`], [`Position`]
//! - **Rules**: line scanning shared by the state and the robot ([`rules`])
//! - **State**: [`GameState`] with its [`Phase`] state machine
//! - **Engine**: [`MoveEngine`], the robot's one-move-lookahead heuristic
//! - **Session**: [`GameSession`], which delays the robot's reply through a
//!   cancelable [`OpponentScheduler`]
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tictactoe_bot::{GameSession, MoveEngine};
//!
//! # async fn example() {
//! let (mut session, mut ready_rx) = GameSession::new(MoveEngine::from_entropy(), Duration::from_millis(300));
//! session.start_game().ok();
//! session.human_move(4).ok();
//! if let Some(ready) = ready_rx.recv().await {
//!     session.on_opponent_ready(ready);
//! }
//! println!("{}", session.state().board().display());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod phases;
mod position;
pub mod rules;
mod scheduler;
mod session;
mod state;
mod types;

pub use engine::{Decision, Heuristic, MoveEngine};
pub use phases::{Phase, PhaseEvent};
pub use position::Position;
pub use scheduler::{DEFAULT_THINK_DELAY, OpponentReady, OpponentScheduler};
pub use session::{GameSession, SessionEvent};
pub use state::{GameState, MoveError, Snapshot, Status};
pub use types::{Board, BoardParseError, CELL_COUNT, Cell, Symbol};
