//! Screen trait and transition type for the flow state machine.

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tictoe_engine::{GameRng, Players, Seat};

use crate::session::{GameMode, Outcome};

/// The result of handling an input event or a timer tick on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::tick`] to
/// drive the [`FlowController`](crate::FlowController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Back to the welcome screen, discarding players.
    GoToWelcome,
    /// Show the loading screen.
    GoToLoading,
    /// Choose between computer and human opponents.
    GoToModeSelection,
    /// Enter player names and marks for the chosen mode.
    GoToPlayerSetup {
        /// Mode picked on the previous screen.
        mode: GameMode,
    },
    /// Toss a coin to decide who moves first.
    GoToToss {
        /// Both seated players.
        players: Players,
        /// Mode of play.
        mode: GameMode,
    },
    /// Start a round.
    GoToBoard {
        /// Both seated players.
        players: Players,
        /// Mode of play.
        mode: GameMode,
        /// Seat that won the toss.
        first: Seat,
    },
    /// Show the outcome of the finished round.
    GoToResult {
        /// Winner or draw.
        outcome: Outcome,
    },
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen in the flow.
///
/// Each screen owns its state, renders it, and reacts to keys and time.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key press.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition;

    /// Advances timers. Most screens have none.
    fn tick(&mut self, _now: Instant, _rng: &mut GameRng) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
