//! Command-line interface for tictoe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tictoe - terminal tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictoe")]
#[command(about = "Terminal tic-tac-toe with a scripted computer opponent")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config file (defaults are used if missing)
        #[arg(short, long, default_value = "tictoe.toml")]
        config: PathBuf,

        /// Seed for the coin toss and computer moves
        #[arg(long)]
        seed: Option<u64>,

        /// File that receives the log output
        #[arg(long, default_value = "tictoe.log")]
        log_file: PathBuf,
    },

    /// Print the default configuration as TOML
    Config,
}
