//! Game state for one human-vs-robot game.

use crate::phases::{Phase, PhaseEvent};
use crate::rules;
use crate::types::{Board, CELL_COUNT, Symbol};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a mutation was refused.
///
/// Whenever one of these is returned the state has not been touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Symbols have not been assigned yet.
    #[display("Game has not started")]
    NotStarted,

    /// Symbols were already assigned.
    #[display("Game has already started")]
    AlreadyStarted,

    /// Index outside 0-8.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(usize),

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// A winner is latched or the board is full.
    #[display("Game is already over")]
    GameOver,

    /// The other participant is due to move.
    #[display("It's not this participant's turn")]
    NotYourTurn,
}

impl std::error::Error for MoveError {}

/// Status line shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Symbols not assigned yet.
    ChooseSymbol,
    /// A line was completed.
    Winner(Symbol),
    /// Board full without a line.
    Draw,
    /// Game under way; carries the human's symbol.
    Playing(Symbol),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::ChooseSymbol => write!(f, "Choose your symbol to start"),
            Status::Winner(symbol) => write!(f, "Winner: {}", symbol),
            Status::Draw => write!(f, "It's a draw!"),
            Status::Playing(symbol) => write!(f, "Playing as: {}", symbol),
        }
    }
}

/// Read-only view of a game handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The board.
    pub board: Board,
    /// Latched winner.
    pub winner: Option<Symbol>,
    /// Board full without a winner.
    pub is_draw: bool,
    /// The human's symbol, once assigned.
    pub human_symbol: Option<Symbol>,
    /// The robot's symbol, once assigned.
    pub opponent_symbol: Option<Symbol>,
    /// Robot moves made so far.
    pub round: u32,
    /// Current phase.
    pub phase: Phase,
    /// Rendered status line.
    pub status: String,
}

/// Complete state of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    human_symbol: Option<Symbol>,
    opponent_symbol: Option<Symbol>,
    winner: Option<Symbol>,
    round: u32,
    phase: Phase,
}

impl GameState {
    /// Creates an unstarted game with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the human's symbol.
    pub fn human_symbol(&self) -> Option<Symbol> {
        self.human_symbol
    }

    /// Returns the robot's symbol.
    pub fn opponent_symbol(&self) -> Option<Symbol> {
        self.opponent_symbol
    }

    /// Returns the latched winner.
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    /// Number of robot moves made so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Assigns symbols: the human gets `X` or `O` with equal probability and the
    /// robot gets the other one.
    ///
    /// Returns the human's symbol. Only the first call has any effect.
    #[instrument(skip(self, rng))]
    pub fn start_game<R: Rng>(&mut self, rng: &mut R) -> Result<Symbol, MoveError> {
        if self.human_symbol.is_some() || self.opponent_symbol.is_some() {
            debug!("Ignoring repeated start");
            return Err(MoveError::AlreadyStarted);
        }
        let human = if rng.random_bool(0.5) {
            Symbol::X
        } else {
            Symbol::O
        };
        self.human_symbol = Some(human);
        self.opponent_symbol = Some(human.other());
        self.phase = self.phase.transition(PhaseEvent::SymbolsChosen);
        info!(human = %human, opponent = %human.other(), "Symbols assigned");
        Ok(human)
    }

    /// Places the human's mark at `index`.
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<(), MoveError> {
        let symbol = self.human_symbol.ok_or(MoveError::NotStarted)?;
        self.check_move(index)?;
        if !self.is_human_turn() {
            return Err(MoveError::NotYourTurn);
        }
        self.place(index, symbol)
    }

    /// Places the robot's mark at `index` and counts the round.
    #[instrument(skip(self))]
    pub fn apply_opponent_move(&mut self, index: usize) -> Result<(), MoveError> {
        let symbol = self.opponent_symbol.ok_or(MoveError::NotStarted)?;
        self.check_move(index)?;
        if !self.awaits_opponent() {
            return Err(MoveError::NotYourTurn);
        }
        self.place(index, symbol)?;
        self.round += 1;
        Ok(())
    }

    fn check_move(&self, index: usize) -> Result<(), MoveError> {
        if self.winner.is_some() || self.phase.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index >= CELL_COUNT {
            return Err(MoveError::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::CellOccupied(index));
        }
        Ok(())
    }

    fn place(&mut self, index: usize, symbol: Symbol) -> Result<(), MoveError> {
        if !self.board.mark(index, symbol) {
            return Err(MoveError::CellOccupied(index));
        }
        debug!(index, symbol = %symbol, "Mark placed");
        let winner = self.evaluate_winner();
        let full = rules::is_full(&self.board);
        self.phase = self.phase.transition(PhaseEvent::MoveApplied { winner, full });
        Ok(())
    }

    /// Scans the lines and latches the first winner found.
    ///
    /// Once a winner is latched it is returned unchanged until restart.
    #[instrument(skip(self))]
    pub fn evaluate_winner(&mut self) -> Option<Symbol> {
        if self.winner.is_none() {
            self.winner = rules::check_winner(&self.board);
            if let Some(winner) = self.winner {
                info!(winner = %winner, "Winner latched");
            }
        }
        self.winner
    }

    /// All cells marked and no winner.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && rules::is_full(&self.board)
    }

    /// The human has not placed more marks than the robot.
    ///
    /// Together with [`awaits_opponent`](Self::awaits_opponent) this enforces
    /// strict alternation starting with the human.
    pub fn is_human_turn(&self) -> bool {
        self.phase == Phase::Playing && self.opponent_count() >= self.human_count()
    }

    /// The human is a mark ahead and the game is still live.
    pub fn awaits_opponent(&self) -> bool {
        self.phase == Phase::Playing && self.human_count() > self.opponent_count()
    }

    fn human_count(&self) -> usize {
        self.human_symbol.map_or(0, |s| self.board.count(s))
    }

    fn opponent_count(&self) -> usize {
        self.opponent_symbol.map_or(0, |s| self.board.count(s))
    }

    /// Discards this game in favour of a fresh one.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting game");
        *self = Self::new();
    }

    /// Status line for the current state.
    pub fn status(&self) -> Status {
        match (self.human_symbol, self.winner) {
            (None, _) => Status::ChooseSymbol,
            (Some(_), Some(winner)) => Status::Winner(winner),
            (Some(_), None) if self.is_draw() => Status::Draw,
            (Some(human), None) => Status::Playing(human),
        }
    }

    /// Copies out everything the presentation layer renders.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            winner: self.winner,
            is_draw: self.is_draw(),
            human_symbol: self.human_symbol,
            opponent_symbol: self.opponent_symbol,
            round: self.round,
            phase: self.phase,
            status: self.status().to_string(),
        }
    }
}
