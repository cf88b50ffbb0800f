//! Move selection for the robot opponent.
//!
//! The robot looks exactly one move ahead. In priority order it:
//!
//! 1. gives up if the board is full,
//! 2. takes a random free corner on its first move,
//! 3. completes one of its own lines,
//! 4. blocks a line the human is about to complete,
//! 5. otherwise picks a random free cell.
//!
//! Forks and longer traps are not detected, so the robot can be beaten.

use crate::position::Position;
use crate::rules;
use crate::types::{Board, Symbol};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Rule that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Heuristic {
    /// First robot move, random free corner.
    #[display("opening corner")]
    Opening,
    /// Completes a robot line.
    #[display("win")]
    Win,
    /// Stops a human line.
    #[display("block")]
    Block,
    /// Nothing better to do.
    #[display("random")]
    Random,
}

/// A chosen cell together with the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Board index (0-8).
    pub index: usize,
    /// Rule that fired.
    pub heuristic: Heuristic,
}

/// Heuristic move picker with an injectable random source.
#[derive(Debug, Clone)]
pub struct MoveEngine<R = StdRng> {
    rng: R,
}

impl MoveEngine<StdRng> {
    /// Engine seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine with reproducible choices.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MoveEngine<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> MoveEngine<R> {
    /// Engine drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Random source shared with the rest of the session.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Picks the robot's next cell, or `None` when the board is full.
    pub fn select_opponent_move(
        &mut self,
        board: &Board,
        opponent: Symbol,
        human: Symbol,
        round: u32,
    ) -> Option<usize> {
        self.decide(board, opponent, human, round)
            .map(|decision| decision.index)
    }

    /// Like [`select_opponent_move`](Self::select_opponent_move) but also
    /// reports which rule fired.
    #[instrument(skip(self, board), fields(board = %board.display()))]
    pub fn decide(
        &mut self,
        board: &Board,
        opponent: Symbol,
        human: Symbol,
        round: u32,
    ) -> Option<Decision> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            debug!("No free cell");
            return None;
        }

        let decision = self
            .opening(board, round)
            .or_else(|| {
                rules::completing_cell(board, opponent).map(|index| Decision {
                    index,
                    heuristic: Heuristic::Win,
                })
            })
            .or_else(|| {
                rules::completing_cell(board, human).map(|index| Decision {
                    index,
                    heuristic: Heuristic::Block,
                })
            })
            .or_else(|| {
                self.pick(&empty).map(|index| Decision {
                    index,
                    heuristic: Heuristic::Random,
                })
            });

        if let Some(decision) = decision {
            debug!(index = decision.index, heuristic = %decision.heuristic, "Robot chose cell");
        }
        decision
    }

    fn opening(&mut self, board: &Board, round: u32) -> Option<Decision> {
        if round >= 1 {
            return None;
        }
        let corners: Vec<usize> = Position::CORNERS
            .iter()
            .map(|pos| pos.to_index())
            .filter(|&index| board.is_empty(index))
            .collect();
        self.pick(&corners).map(|index| Decision {
            index,
            heuristic: Heuristic::Opening,
        })
    }

    fn pick(&mut self, cells: &[usize]) -> Option<usize> {
        if cells.is_empty() {
            return None;
        }
        Some(cells[self.rng.random_range(0..cells.len())])
    }
}
