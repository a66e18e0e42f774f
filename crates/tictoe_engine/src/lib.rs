//! Tic-tac-toe engine.
//!
//! Pure, synchronous functions over a 3x3 [`Board`]:
//!
//! - [`apply_move`] places a mark, rejecting out-of-range or occupied cells
//! - [`evaluate`] reports [`GameResult::InProgress`], a win with its line, or a draw
//! - [`select_computer_move`] picks the computer's cell with a one-ply heuristic
//!
//! Turn order, pacing and presentation belong to the caller. Random
//! tie-breaks take any `rand::Rng`, so tests can pin them with a seed.
//!
//! # Example
//!
//! ```
//! use tictoe_engine::{
//!     Board, GameResult, GameRng, Mark, apply_move, evaluate, select_computer_move,
//! };
//!
//! let board = apply_move(&Board::new(), 0, Mark::X)?;
//! let mut rng = GameRng::new(7);
//! let reply = select_computer_move(&board, Mark::O, Mark::X, &mut rng)?;
//! assert_eq!(reply, 4);
//! assert_eq!(evaluate(&board), GameResult::InProgress);
//! # Ok::<(), tictoe_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod computer;
mod error;
mod players;
mod rng;
mod rules;
mod types;

pub use computer::{ComputerMove, MoveRule, choose_computer_move, select_computer_move};
pub use error::{EngineError, MoveError, SetupError};
pub use players::{Player, Players, Seat};
pub use rng::GameRng;
pub use rules::{GameResult, LINES, Line, apply_move, check_winner, evaluate, is_draw, winning_line};
pub use types::{Board, CELL_COUNT, CENTER, CORNERS, Cell, Mark};
