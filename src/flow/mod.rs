//! Screen flow: the presentation state machine around a round.
//!
//! `Welcome → Loading → ModeSelection → PlayerSetup → Toss → Board → Result`,
//! driven by [`FlowController`]. Screens never call each other; they return a
//! [`ScreenTransition`] and the controller builds the next screen.

mod controller;
mod input;
mod screen;
mod screens;
mod widgets;

pub use controller::{ActiveScreen, FlowController};
pub use input::{digit_cell, move_cursor};
pub use screen::{Screen, ScreenTransition};
pub use screens::{
    BoardScreen, LoadingScreen, ModeSelectionScreen, PlayerSetupScreen, ResultChoice, ResultScreen,
    SetupField, TossPhase, TossScreen, WelcomeScreen,
};
