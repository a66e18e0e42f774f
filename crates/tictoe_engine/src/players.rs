//! Players and seats.
//!
//! A game always has exactly two players held in a two-slot array. The turn
//! pointer is a [`Seat`], flipped with [`Seat::other`], so two players may
//! share a display name without confusing whose turn it is.

use crate::error::SetupError;
use crate::types::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A named participant with an assigned mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Display name, trimmed and non-empty.
    display_name: String,
    /// Mark placed by this player.
    mark: Mark,
}

impl Player {
    /// Creates a player, trimming the name.
    ///
    /// # Errors
    ///
    /// `SetupError::BlankName` if nothing is left after trimming.
    #[instrument(skip(display_name))]
    pub fn new(display_name: impl AsRef<str>, mark: Mark) -> Result<Self, SetupError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SetupError::BlankName);
        }
        Ok(Self {
            display_name: trimmed.to_string(),
            mark,
        })
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.mark)
    }
}

/// Slot in the two-player array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Seat {
    /// Slot 0.
    First,
    /// Slot 1.
    Second,
}

impl Seat {
    /// The other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Array index of this seat.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// The two players of a game, with disjoint marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    seats: [Player; 2],
}

impl Players {
    /// Seats `first` and `second`.
    ///
    /// # Errors
    ///
    /// `SetupError::DuplicateMark` when both players share a mark.
    #[instrument(skip_all, fields(first = %first, second = %second))]
    pub fn new(first: Player, second: Player) -> Result<Self, SetupError> {
        if first.mark == second.mark {
            return Err(SetupError::DuplicateMark(first.mark));
        }
        Ok(Self {
            seats: [first, second],
        })
    }

    /// Player in the given seat.
    pub fn get(&self, seat: Seat) -> &Player {
        &self.seats[seat.index()]
    }

    /// Seat of the player using `mark`.
    pub fn seat_of(&self, mark: Mark) -> Seat {
        if self.seats[0].mark == mark {
            Seat::First
        } else {
            Seat::Second
        }
    }

    /// Player using `mark`.
    pub fn by_mark(&self, mark: Mark) -> &Player {
        self.get(self.seat_of(mark))
    }

    /// Both players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let player = Player::new("  Ada  ", Mark::X).unwrap();
        assert_eq!(player.display_name(), "Ada");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(Player::new("   ", Mark::X), Err(SetupError::BlankName));
    }

    #[test]
    fn test_duplicate_marks_rejected() {
        let a = Player::new("Ada", Mark::O).unwrap();
        let b = Player::new("Bob", Mark::O).unwrap();
        let err = Players::new(a, b).unwrap_err();
        assert_eq!(err, SetupError::DuplicateMark(Mark::O));
    }

    #[test]
    fn test_same_names_resolved_by_seat() {
        let a = Player::new("Sam", Mark::X).unwrap();
        let b = Player::new("Sam", Mark::O).unwrap();
        let players = Players::new(a, b).unwrap();
        assert_eq!(*players.get(Seat::First).mark(), Mark::X);
        assert_eq!(*players.get(Seat::First.other()).mark(), Mark::O);
        assert_eq!(players.seat_of(Mark::O), Seat::Second);
    }
}
