//! Command-line interface for tictactoe_bot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against a heuristic robot
#[derive(Parser, Debug)]
#[command(name = "tictactoe_bot")]
#[command(about = "Play tic-tac-toe against a corner-loving robot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible games (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Robot thinking time in milliseconds (overrides config)
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Pit the robot against a random mover and report the results
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// The selected command, `play` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::parse_from(["tictactoe_bot"]);
        assert_eq!(cli.command(), Command::Play);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_simulate_with_globals() {
        let cli = Cli::parse_from([
            "tictactoe_bot",
            "simulate",
            "--games",
            "10",
            "--json",
            "--seed",
            "5",
        ]);
        assert_eq!(cli.command(), Command::Simulate { games: 10, json: true });
        assert_eq!(cli.seed, Some(5));
    }
}
