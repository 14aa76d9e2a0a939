//! Command-line interface for connect_four.

use clap::{Parser, Subcommand};
use strictly_connect_four::Controller;

/// Connect four against remote move oracles
#[derive(Parser, Debug)]
#[command(name = "connect_four")]
#[command(about = "Connect four with human and oracle-backed seats", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "connect_four.toml")]
    pub config: std::path::PathBuf,

    /// Oracle base URL (overrides config and CONNECT_FOUR_ORACLE_URL)
    #[arg(long)]
    pub oracle_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the agents the oracle can play as
    Agents,

    /// Check that the oracle is up
    Ping,

    /// Play a game in the terminal
    Play {
        /// Controller of seat one: `human` or an agent name
        #[arg(long, default_value = "human")]
        seat_one: Controller,

        /// Controller of seat two: `human` or an agent name
        #[arg(long, default_value = "human")]
        seat_two: Controller,

        /// Search time hint forwarded to the oracle (0 = no limit)
        #[arg(long)]
        max_time_ms: Option<u64>,

        /// Search depth hint forwarded to the oracle
        #[arg(long)]
        max_depth: Option<u32>,
    },
}
