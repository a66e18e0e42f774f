//! Tictoe binary.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tictoe::{Cli, Command, FlowController, GameConfig, GameRng};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            seed,
            log_file,
        } => run_play(config, seed, log_file).await,
        Command::Config => print_default_config(),
    }
}

/// Logs to a file so output doesn't interfere with the terminal UI.
fn init_logging(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn print_default_config() -> Result<()> {
    print!("{}", GameConfig::default().to_toml()?);
    Ok(())
}

/// Runs the terminal game.
#[instrument(skip_all, fields(config = %config_path.display()))]
async fn run_play(config_path: PathBuf, seed: Option<u64>, log_file: PathBuf) -> Result<()> {
    init_logging(&log_file)?;
    info!("Starting tictoe");

    let config = GameConfig::load_or_default(&config_path)?.with_seed(seed);
    let rng = match config.seed() {
        Some(seed) => GameRng::new(*seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), "RNG ready");

    let mut flow = FlowController::new(config, rng);

    let mut terminal = enter_terminal()?;
    let res = flow.run(&mut terminal).await;
    leave_terminal()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Switches to raw mode and the alternate screen.
///
/// If a step after raw mode fails, the terminal is put back before the error
/// is returned.
fn enter_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    undo_on_error(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        leave_terminal,
    )
}

/// Leaves the alternate screen and raw mode, showing the cursor again.
fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Runs `step`; if it fails, runs `undo` and returns the original error.
fn undo_on_error<T>(
    step: impl FnOnce() -> Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    step().inspect_err(|_| {
        if let Err(e) = undo() {
            error!(error = %e, "Failed to restore terminal");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_runs_undo() {
        let undone = Cell::new(false);
        let res: Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("no terminal")),
            || {
                undone.set(true);
                Ok(())
            },
        );
        assert_eq!(res.unwrap_err().to_string(), "no terminal");
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_skips_undo() {
        let undone = Cell::new(false);
        let res = undo_on_error(
            || Ok(7),
            || {
                undone.set(true);
                Ok(())
            },
        );
        assert_eq!(res.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn test_failed_undo_keeps_setup_error() {
        let res: Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("alternate screen refused")),
            || Err(io::Error::other("still raw")),
        );
        assert_eq!(res.unwrap_err().to_string(), "alternate screen refused");
    }
}
