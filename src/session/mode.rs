//! Game mode chosen on the mode selection screen.

use tictoe_engine::Seat;
use tracing::instrument;

/// Who the first player faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
pub enum GameMode {
    /// Against the scripted computer opponent.
    #[default]
    #[strum(to_string = "vs Computer")]
    Computer,
    /// Two people sharing the keyboard.
    #[strum(to_string = "vs Human")]
    Human,
}

impl GameMode {
    /// Short description shown under the option.
    #[instrument]
    pub fn description(self) -> &'static str {
        match self {
            Self::Computer => "Challenge the computer",
            Self::Human => "Play with a friend",
        }
    }

    /// Seat played by the computer in this mode.
    ///
    /// Setup always seats the computer second.
    #[instrument]
    pub fn computer_seat(self) -> Option<Seat> {
        match self {
            Self::Computer => Some(Seat::Second),
            Self::Human => None,
        }
    }
}
