//! Headless games between the robot and a random mover.
//!
//! Useful for eyeballing how often the heuristic wins, and for checking that
//! whole games run to completion without the terminal UI.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tictactoe_bot::{GameState, MoveEngine, Phase};
use tracing::{debug, info, instrument};

/// Aggregate outcome of a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: u32,
    /// Games the random mover won.
    pub human_wins: u32,
    /// Games the robot won.
    pub robot_wins: u32,
    /// Drawn games.
    pub draws: u32,
    /// How many robot moves each heuristic produced.
    pub heuristics: BTreeMap<String, u32>,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games:       {}", self.games)?;
        writeln!(f, "Robot wins:  {}", self.robot_wins)?;
        writeln!(f, "Human wins:  {}", self.human_wins)?;
        writeln!(f, "Draws:       {}", self.draws)?;
        write!(f, "Robot moves:")?;
        for (heuristic, count) in &self.heuristics {
            write!(f, " {}={}", heuristic, count)?;
        }
        Ok(())
    }
}

/// Plays `games` games: a uniformly random human stand-in against `engine`.
///
/// The stand-in draws from `human_rng`; symbols are drawn from the engine's
/// random source, as in an interactive session.
#[instrument(skip(engine, human_rng))]
pub fn simulate<R: Rng, H: Rng>(
    games: u32,
    engine: &mut MoveEngine<R>,
    human_rng: &mut H,
) -> SimulationReport {
    let mut report = SimulationReport {
        games,
        ..SimulationReport::default()
    };

    for game in 0..games {
        let mut state = GameState::new();
        let Ok(human) = state.start_game(engine.rng_mut()) else {
            continue;
        };
        let robot = human.other();

        while !state.phase().is_terminal() {
            let free = state.board().empty_cells();
            let index = free[human_rng.random_range(0..free.len())];
            if let Err(error) = state.apply_human_move(index) {
                debug!(%error, "Human move rejected");
                break;
            }
            if !state.awaits_opponent() {
                continue;
            }
            let Some(decision) = engine.decide(state.board(), robot, human, state.round()) else {
                break;
            };
            *report
                .heuristics
                .entry(decision.heuristic.to_string())
                .or_default() += 1;
            if let Err(error) = state.apply_opponent_move(decision.index) {
                debug!(%error, "Robot move rejected");
                break;
            }
        }

        match state.phase() {
            Phase::Won(winner) if winner == human => report.human_wins += 1,
            Phase::Won(_) => report.robot_wins += 1,
            _ => report.draws += 1,
        }
        debug!(game, phase = %state.phase(), "Game finished");
    }

    info!(
        robot_wins = report.robot_wins,
        human_wins = report.human_wins,
        draws = report.draws,
        "Simulation complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_game_is_counted() {
        let mut engine = MoveEngine::seeded(1);
        let mut human = StdRng::seed_from_u64(2);
        let report = simulate(200, &mut engine, &mut human);
        assert_eq!(report.games, 200);
        assert_eq!(report.human_wins + report.robot_wins + report.draws, 200);
        assert!(report.heuristics.contains_key("opening corner"));
    }

    #[test]
    fn test_robot_beats_random_mover_more_often_than_not() {
        let mut engine = MoveEngine::seeded(3);
        let mut human = StdRng::seed_from_u64(4);
        let report = simulate(500, &mut engine, &mut human);
        assert!(report.robot_wins > report.human_wins, "{report}");
    }

    #[test]
    fn test_same_seeds_same_report() {
        let run = || {
            simulate(
                50,
                &mut MoveEngine::seeded(5),
                &mut StdRng::seed_from_u64(6),
            )
        };
        assert_eq!(run(), run());
    }
}
