//! Win detection logic for tic-tac-toe.

use super::lines::{LINES, Line};
use crate::types::{Board, Cell, Mark};
use tracing::instrument;

/// Returns the first completed line in table order and its mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, Line)> {
    let cells = board.cells();
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        match cells[a] {
            Cell::Occupied(mark) if cells[a] == cells[b] && cells[a] == cells[c] => {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}

/// Returns the winning mark, if any.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        assert_eq!(winning_line(&board), Some((Mark::X, Line([0, 1, 2]))));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "XXO _OX O__".parse().unwrap();
        assert_eq!(winning_line(&board), Some((Mark::O, Line([2, 4, 6]))));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_ ___ ___".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XOX ___ ___".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
