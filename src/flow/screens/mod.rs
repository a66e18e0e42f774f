//! Individual screens of the flow.

mod board;
mod loading;
mod mode_select;
mod player_setup;
mod result;
mod toss;
mod welcome;

pub use board::BoardScreen;
pub use loading::LoadingScreen;
pub use mode_select::ModeSelectionScreen;
pub use player_setup::{PlayerSetupScreen, SetupField};
pub use result::{ResultChoice, ResultScreen};
pub use toss::{TossPhase, TossScreen};
pub use welcome::WelcomeScreen;
