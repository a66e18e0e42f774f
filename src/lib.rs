//! Tictoe - terminal tic-tac-toe.
//!
//! The rules and the computer opponent live in `tictoe_engine`; this crate
//! adds the round controller, the screen flow and the terminal front end.
//!
//! # Architecture
//!
//! - **Session**: a [`Round`] owns the board, the two seats and the pacing
//!   timers for computer moves and end-of-round pauses
//! - **Flow**: a [`FlowController`] moves between [`Screen`]s on
//!   [`ScreenTransition`]s
//! - **Config**: [`GameConfig`] loaded from TOML
//!
//! # Example
//!
//! ```
//! use tictoe::{ActiveScreen, FlowController, GameConfig, GameRng};
//!
//! let flow = FlowController::new(GameConfig::default(), GameRng::new(7));
//! assert!(matches!(flow.screen(), Some(ActiveScreen::Welcome(_))));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod flow;
mod session;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Round control
pub use session::{GameMode, Outcome, Round, RoundError, RoundTick, RoundTiming};

// Crate-level exports - Screen flow
pub use flow::{
    ActiveScreen, BoardScreen, FlowController, LoadingScreen, ModeSelectionScreen,
    PlayerSetupScreen, ResultChoice, ResultScreen, Screen, ScreenTransition, SetupField,
    TossPhase, TossScreen, WelcomeScreen, digit_cell, move_cursor,
};

// Crate-level exports - Engine types
pub use tictoe_engine::{
    Board, Cell, EngineError, GameResult, GameRng, Line, Mark, MoveError, Player, Players, Seat,
    SetupError, apply_move, evaluate, select_computer_move,
};
