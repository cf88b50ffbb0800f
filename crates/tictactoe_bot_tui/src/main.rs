//! tictactoe_bot - play tic-tac-toe against a heuristic robot.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tictactoe_bot::{MoveEngine, OpponentReady};
use tictactoe_bot_tui::{App, AppConfig, Cli, Command, Flow, input, logging, simulate, ui};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.seed, cli.delay_ms);

    match cli.command() {
        Command::Play => run_play(&config).await,
        Command::Simulate { games, json } => run_simulate(&config, games, json),
    }
}

fn engine_for(config: &AppConfig) -> MoveEngine {
    match config.seed() {
        Some(seed) => MoveEngine::seeded(*seed),
        None => MoveEngine::from_entropy(),
    }
}

/// Run the headless simulation
#[instrument(skip(config))]
fn run_simulate(config: &AppConfig, games: u32, json: bool) -> Result<()> {
    logging::init_stderr(config.log_filter());

    let mut engine = engine_for(config);
    let mut human_rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };
    let report = simulate(games, &mut engine, &mut human_rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Run the interactive terminal game
async fn run_play(config: &AppConfig) -> Result<()> {
    logging::init_file(config.log_file(), config.log_filter())?;
    info!(delay_ms = config.delay_ms(), seed = ?config.seed(), "Starting tictactoe_bot");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (app, mut ready_rx) = App::new(engine_for(config), config.delay());
    let res = run_app(&mut terminal, app, &mut ready_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    ready_rx: &mut mpsc::UnboundedReceiver<OpponentReady>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Robot turns whose thinking delay has elapsed
        while let Ok(ready) = ready_rx.try_recv() {
            app.handle_ready(ready);
        }

        // Keyboard input
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = input::action_for(key.code)
            && app.handle_action(action) == Flow::Quit
        {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
