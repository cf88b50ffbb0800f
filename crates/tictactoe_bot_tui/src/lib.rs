//! Terminal front end for tictactoe_bot.
//!
//! The binary wires these modules together; they are exposed as a library so
//! the event handling can be exercised without a terminal.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod simulate;
pub mod ui;

pub use app::{App, Flow};
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use simulate::{SimulationReport, simulate};
