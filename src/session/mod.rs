//! Round control: turn pointer, computer pacing and results.
//!
//! The engine only answers questions about a board. This module owns
//! everything around it: whose turn it is, when the computer plays, when a
//! finished round hands over to the result screen, and cancelling stale
//! computer moves on reset.

mod mode;
mod round;

pub use mode::GameMode;
pub use round::{Outcome, Round, RoundError, RoundTick, RoundTiming};
