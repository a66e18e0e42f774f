//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]: applying a move and evaluating the
//! position. Turn order lives with the caller.

pub mod draw;
pub mod lines;
pub mod win;

pub use draw::is_draw;
pub use lines::{LINES, Line};
pub use win::{check_winner, winning_line};

use crate::error::MoveError;
use crate::types::{Board, CELL_COUNT, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Evaluation of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// No line completed and at least one empty cell.
    InProgress,
    /// A line holds three equal marks.
    Won {
        /// The winning mark.
        mark: Mark,
        /// First completed line in table order.
        line: Line,
    },
    /// Board full with no completed line.
    Draw,
}

impl GameResult {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Returns the winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameResult::Won { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

/// Places `mark` at `index`, returning the new board.
///
/// # Errors
///
/// `MoveError::OutOfRange` for `index >= 9`, `MoveError::Occupied` when the
/// cell already holds a mark. The input board is never modified.
#[instrument(skip(board), fields(filled = board.filled()))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    if index >= CELL_COUNT {
        return Err(MoveError::OutOfRange(index));
    }
    if !board.is_empty(index) {
        return Err(MoveError::Occupied(index));
    }

    let mut next = *board;
    next.put(index, mark);
    debug!(index, %mark, "Move applied");
    Ok(next)
}

/// Evaluates the board: first winning line in table order, then draw.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((mark, line)) = winning_line(board) {
        return GameResult::Won { mark, line };
    }
    if board.is_full() {
        return GameResult::Draw;
    }
    GameResult::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_apply_move_sets_only_target() {
        let board = Board::new();
        let next = apply_move(&board, 4, Mark::X).unwrap();
        assert_eq!(next.get(4), Some(Cell::Occupied(Mark::X)));
        assert_eq!(next.filled(), 1);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let board = apply_move(&Board::new(), 4, Mark::X).unwrap();
        let err = apply_move(&board, 4, Mark::O).unwrap_err();
        assert_eq!(err, MoveError::Occupied(4));
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        assert_eq!(
            apply_move(&Board::new(), 9, Mark::X),
            Err(MoveError::OutOfRange(9))
        );
    }

    #[test]
    fn test_evaluate_in_progress() {
        let board: Board = "XO_ ___ ___".parse().unwrap();
        assert_eq!(evaluate(&board), GameResult::InProgress);
    }

    #[test]
    fn test_evaluate_prefers_table_order() {
        // Row 0 and column 0 both complete; the row comes first in the table.
        let board: Board = "XXX XOO XOO".parse().unwrap();
        assert_eq!(
            evaluate(&board),
            GameResult::Won {
                mark: Mark::X,
                line: Line([0, 1, 2])
            }
        );
    }

    #[test]
    fn test_evaluate_win_on_full_board_is_not_draw() {
        let board: Board = "XOX OXO OXX".parse().unwrap();
        assert_eq!(evaluate(&board).winner(), Some(Mark::X));
    }
}
