//! Computer opponent: one-ply lookahead with a fixed rule priority.
//!
//! Rules are tried in order and the first one with a candidate decides:
//! win now, block the opponent, take the center, take a random corner,
//! take a random remaining cell. Only one move is ever looked ahead.

use crate::error::EngineError;
use crate::rules::{apply_move, evaluate};
use crate::types::{Board, CENTER, CORNERS, Mark};
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Which rule produced the computer's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum MoveRule {
    /// Completes a line for the computer.
    WinNow,
    /// Stops the opponent completing a line.
    Block,
    /// Takes the center cell.
    Center,
    /// Random empty corner.
    Corner,
    /// Random empty cell.
    Any,
}

/// A chosen cell and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ComputerMove {
    index: usize,
    rule: MoveRule,
}

/// First empty cell (ascending) where `mark` would complete a line.
fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    board.empty_cells().find(|&index| {
        apply_move(board, index, mark).is_ok_and(|next| evaluate(&next).winner() == Some(mark))
    })
}

/// Chooses the computer's move and reports which rule fired.
///
/// # Errors
///
/// `EngineError::InvariantViolation` when the board has no empty cell or
/// both marks are the same.
#[instrument(skip(board, rng), fields(filled = board.filled()))]
pub fn choose_computer_move<R: Rng + ?Sized>(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Result<ComputerMove, EngineError> {
    if computer == opponent {
        return Err(EngineError::InvariantViolation(format!(
            "computer and opponent share mark {}",
            computer
        )));
    }

    let empty: Vec<usize> = board.empty_cells().collect();
    if empty.is_empty() {
        return Err(EngineError::InvariantViolation(
            "no empty cell for the computer to play".to_string(),
        ));
    }

    let chosen = if let Some(index) = completing_cell(board, computer) {
        ComputerMove {
            index,
            rule: MoveRule::WinNow,
        }
    } else if let Some(index) = completing_cell(board, opponent) {
        ComputerMove {
            index,
            rule: MoveRule::Block,
        }
    } else if board.is_empty(CENTER) {
        ComputerMove {
            index: CENTER,
            rule: MoveRule::Center,
        }
    } else {
        let corners: Vec<usize> = CORNERS
            .iter()
            .copied()
            .filter(|&i| board.is_empty(i))
            .collect();
        match corners.choose(rng) {
            Some(&index) => ComputerMove {
                index,
                rule: MoveRule::Corner,
            },
            None => {
                // Non-empty, checked above.
                let index = empty[rng.gen_range(0..empty.len())];
                ComputerMove {
                    index,
                    rule: MoveRule::Any,
                }
            }
        }
    };

    debug!(index = chosen.index, rule = %chosen.rule, "Computer chose cell");
    Ok(chosen)
}

/// Returns the cell index the computer plays.
///
/// See [`choose_computer_move`] for the rule order and errors.
pub fn select_computer_move<R: Rng + ?Sized>(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Result<usize, EngineError> {
    choose_computer_move(board, computer, opponent, rng).map(|m| m.index)
}
