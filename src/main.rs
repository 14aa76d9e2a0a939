//! connect_four - terminal front end
//!
//! Plays connect four with each seat bound to a human at the keyboard or
//! an agent served by a remote move oracle.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use strictly_connect_four::{
    AiCoordinator, AppConfig, GameEvent, HttpOracle, ORACLE_URL_ENV, Orchestrator, Roster,
    SearchLimits, Seats,
};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?
        .with_oracle_url_override(std::env::var(ORACLE_URL_ENV).ok())
        .with_oracle_url_override(cli.oracle_url);

    match cli.command {
        Command::Agents => run_agents(config).await,
        Command::Ping => run_ping(config).await,
        Command::Play {
            seat_one,
            seat_two,
            max_time_ms,
            max_depth,
        } => {
            let defaults = *config.limits();
            let limits = SearchLimits {
                max_time_ms: max_time_ms.unwrap_or(defaults.max_time_ms),
                max_depth: max_depth.unwrap_or(defaults.max_depth),
            };
            run_play(config.with_limits(limits), Seats::new(seat_one, seat_two)).await
        }
    }
}

fn connect(config: &AppConfig) -> Result<HttpOracle> {
    config.validate()?;
    HttpOracle::new(config.oracle().base_url()).context("Invalid oracle URL")
}

/// Print the oracle's roster
async fn run_agents(config: AppConfig) -> Result<()> {
    let oracle = connect(&config)?;
    let roster = Roster::load(&oracle).await?;
    for agent in roster.agents() {
        println!("{}", agent);
    }
    Ok(())
}

/// Check the oracle answers
async fn run_ping(config: AppConfig) -> Result<()> {
    let oracle = connect(&config)?;
    let message = oracle.ping().await?;
    println!("{} answered: {}", oracle.base_url(), message);
    Ok(())
}

/// Play one game in the terminal
#[instrument(skip_all, fields(one = %seats.one(), two = %seats.two()))]
async fn run_play(config: AppConfig, seats: Seats) -> Result<()> {
    let oracle = Arc::new(connect(&config)?);

    let roster = if seats.agents().next().is_some() {
        match Roster::load(oracle.as_ref()).await {
            Ok(roster) => roster,
            Err(e) => {
                warn!(error = %e, "Could not load oracle roster");
                Roster::empty()
            }
        }
    } else {
        Roster::empty()
    };

    let ai = AiCoordinator::new(oracle, *config.limits());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let orchestrator = Orchestrator::new(ai, roster, seats.clone(), event_tx)?;
    let game = tokio::spawn(orchestrator.run(command_rx));

    tokio::spawn(input::forward(
        BufReader::new(tokio::io::stdin()),
        seats,
        command_tx.clone(),
    ));

    while let Some(event) = event_rx.recv().await {
        match event {
            GameEvent::GameStarted { seats } => {
                println!("New game: seat one {}, seat two {}", seats.one(), seats.two());
            }
            GameEvent::AgentThinking { seat, agent } => {
                println!("{} ({}) is thinking...", seat, agent);
            }
            GameEvent::MoveMade { placement } => println!("{}", placement),
            GameEvent::StateChanged(board) => println!("{}", board.display()),
            GameEvent::Rejected(e) => println!("Rejected: {}", e),
            GameEvent::OracleFailed(e) => {
                println!("Oracle failed: {}. Type `retry` or `new`.", e);
            }
            GameEvent::GameOver { outcome } => {
                println!("{}", outcome);
                let _ = command_tx.send(strictly_connect_four::Command::Quit);
            }
        }
    }

    let turn = game.await??;
    info!(outcome = %turn.outcome(), "Game closed");
    Ok(())
}

mod input {
    use strictly_connect_four::{Command, Seats};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt};
    use tokio::sync::mpsc;
    use tracing::debug;

    /// Forwards parsed lines to the orchestrator. When a human holds a
    /// seat, end of input counts as `quit` so a closed stdin never leaves
    /// the game waiting on a move nobody can type. Agent-only games play
    /// on until they finish.
    pub async fn forward(
        reader: impl AsyncBufRead + Unpin,
        seats: Seats,
        commands: mpsc::UnboundedSender<Command>,
    ) {
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse(&line, &seats) {
                Some(command) => {
                    if commands.send(command).is_err() {
                        return;
                    }
                }
                None => eprintln!("Commands: 0-6 to drop, new, retry, quit"),
            }
        }
        let has_human = seats.agents().count() < 2;
        debug!(has_human, "Input closed");
        if has_human {
            let _ = commands.send(Command::Quit);
        }
    }

    /// Maps a line of terminal input to a command. `new` restarts with
    /// the same seats.
    pub fn parse(line: &str, seats: &Seats) -> Option<Command> {
        let line = line.trim();
        if let Ok(column) = line.parse::<usize>() {
            return Some(Command::Drop(column));
        }
        match line.to_ascii_lowercase().as_str() {
            "new" => Some(Command::NewGame(seats.clone())),
            "retry" => Some(Command::Retry),
            "quit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }

}
