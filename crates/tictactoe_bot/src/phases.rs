//! Turn state machine for a single game.
//!
//! ```text
//! AwaitingSymbolChoice --SymbolsChosen--> Playing --MoveApplied--> Won | Drawn
//!          ^                                                          |
//!          +------------------------- Restart -----------------------+
//! ```

use crate::types::Symbol;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Symbols not yet assigned; the board is empty.
    #[default]
    AwaitingSymbolChoice,
    /// Moves are being made.
    Playing,
    /// A line was completed by the given symbol.
    Won(Symbol),
    /// The board filled up with no completed line.
    Drawn,
}

/// Something that happened to the game which may move it to another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Both participants received their symbols.
    SymbolsChosen,
    /// A mark was placed and the board re-evaluated.
    MoveApplied {
        /// Latched winner after the move, if any.
        winner: Option<Symbol>,
        /// Whether every cell is now marked.
        full: bool,
    },
    /// The game was thrown away.
    Restart,
}

impl Phase {
    /// Computes the phase that follows `event`.
    ///
    /// Events that make no sense for the current phase leave it unchanged;
    /// terminal phases only leave through [`PhaseEvent::Restart`].
    #[instrument]
    pub fn transition(self, event: PhaseEvent) -> Phase {
        match (self, event) {
            (_, PhaseEvent::Restart) => Phase::AwaitingSymbolChoice,
            (Phase::AwaitingSymbolChoice, PhaseEvent::SymbolsChosen) => Phase::Playing,
            (Phase::Playing, PhaseEvent::MoveApplied { winner: Some(symbol), .. }) => {
                Phase::Won(symbol)
            }
            (Phase::Playing, PhaseEvent::MoveApplied { winner: None, full: true }) => Phase::Drawn,
            (phase, _) => phase,
        }
    }

    /// True for `Won` and `Drawn`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Drawn)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Symbol> {
        match self {
            Phase::Won(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingSymbolChoice => write!(f, "Awaiting symbol choice"),
            Phase::Playing => write!(f, "Playing"),
            Phase::Won(symbol) => write!(f, "Won by {}", symbol),
            Phase::Drawn => write!(f, "Drawn"),
        }
    }
}
