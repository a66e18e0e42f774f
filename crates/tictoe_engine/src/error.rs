//! Error types for the engine.

use crate::types::Mark;

/// A move the engine refuses to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is not on the board.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),
}

impl std::error::Error for MoveError {}

/// Errors raised by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// Move rejected by the board contract.
    #[display("Invalid move: {}", _0)]
    #[from]
    InvalidMove(MoveError),

    /// Precondition the caller should never violate.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}

/// Errors building the two players of a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Display name was empty after trimming.
    #[display("Player name cannot be blank")]
    BlankName,

    /// Both players were given the same mark.
    #[display("Both players cannot use mark {}", _0)]
    DuplicateMark(Mark),
}

impl std::error::Error for SetupError {}
