//! A single round of play between two seated players.

use std::time::{Duration, Instant};

use derive_getters::Getters;
use derive_new::new;
use rand::Rng;
use tictoe_engine::{
    Board, EngineError, GameResult, Line, MoveError, Player, Players, Seat, apply_move, evaluate,
    select_computer_move,
};
use tracing::{debug, info, instrument};

/// Delays the round applies between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct RoundTiming {
    /// Pause before the computer plays.
    computer_delay: Duration,
    /// How long a winning line stays highlighted.
    win_highlight: Duration,
    /// Pause after a draw.
    draw_delay: Duration,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(500),
            Duration::from_millis(2000),
            Duration::from_millis(500),
        )
    }
}

/// Final result of a round, resolved to player records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// This player completed a line.
    Winner(Player),
    /// Board filled with no line.
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player.display_name()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// What happened during a [`Round::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundTick {
    /// Nothing was due.
    Idle,
    /// The computer's scheduled move was applied.
    ComputerMoved {
        /// Cell the computer played.
        index: usize,
        /// Evaluation after the move.
        result: GameResult,
    },
    /// The end-of-round pause elapsed. Reported once.
    Finished(Outcome),
}

/// Errors from driving a round.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum RoundError {
    /// The computer is to move.
    #[display("Wait for the computer to move")]
    NotYourTurn,

    /// The round already has a result.
    #[display("The round is over")]
    RoundOver,

    /// The result is still being shown.
    #[display("Wait for the result before resetting")]
    ResultPending,

    /// Rejected by the board.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// Engine precondition failed.
    #[display("{}", _0)]
    #[from]
    Engine(EngineError),
}

impl std::error::Error for RoundError {}

/// One round: a board, two seated players and a turn pointer.
#[derive(Debug, Clone, Getters)]
pub struct Round {
    board: Board,
    players: Players,
    computer: Option<Seat>,
    turn: Seat,
    result: GameResult,
    #[getter(skip)]
    timing: RoundTiming,
    /// When the scheduled computer move is due.
    #[getter(skip)]
    pending: Option<Instant>,
    #[getter(skip)]
    finish_at: Option<Instant>,
}

impl Round {
    /// Starts a round with `first` to move.
    ///
    /// `computer` names the seat played by the computer, if any.
    #[instrument(skip(players, timing, now))]
    pub fn new(
        players: Players,
        computer: Option<Seat>,
        first: Seat,
        timing: RoundTiming,
        now: Instant,
    ) -> Self {
        info!(to_move = %players.get(first), "Starting round");
        let mut round = Self {
            board: Board::new(),
            players,
            computer,
            turn: first,
            result: GameResult::InProgress,
            timing,
            pending: None,
            finish_at: None,
        };
        round.schedule_computer(now);
        round
    }

    /// Player whose turn it is.
    pub fn to_move(&self) -> &Player {
        self.players.get(self.turn)
    }

    /// True while the computer holds the turn.
    pub fn is_computer_turn(&self) -> bool {
        !self.result.is_terminal() && self.computer == Some(self.turn)
    }

    /// True while a computer move is scheduled.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// True until the end-of-round pause has elapsed.
    pub fn is_result_pending(&self) -> bool {
        self.finish_at.is_some()
    }

    /// Winning line to highlight, if the round was won.
    pub fn winning_line(&self) -> Option<Line> {
        match self.result {
            GameResult::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Outcome once the board reaches a terminal result.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.result {
            GameResult::InProgress => None,
            GameResult::Won { mark, .. } => {
                Some(Outcome::Winner(self.players.by_mark(mark).clone()))
            }
            GameResult::Draw => Some(Outcome::Draw),
        }
    }

    /// Plays a human move at `index` for the player to move.
    ///
    /// # Errors
    ///
    /// `NotYourTurn` while the computer is to move, `RoundOver` after a
    /// result, `Move` when the board rejects the cell.
    #[instrument(skip(self, now), fields(turn = ?self.turn))]
    pub fn play(&mut self, index: usize, now: Instant) -> Result<GameResult, RoundError> {
        if self.result.is_terminal() {
            return Err(RoundError::RoundOver);
        }
        if self.is_computer_turn() {
            return Err(RoundError::NotYourTurn);
        }
        self.commit(index, now)
    }

    /// Advances timers: applies a due computer move or reports the end.
    #[instrument(skip(self, now, rng))]
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        rng: &mut R,
    ) -> Result<RoundTick, RoundError> {
        if let Some(due) = self.pending
            && now >= due
        {
            self.pending = None;
            let mark = *self.players.get(self.turn).mark();
            let opponent = *self.players.get(self.turn.other()).mark();
            let index = select_computer_move(&self.board, mark, opponent, rng)?;
            let result = self.commit(index, now)?;
            return Ok(RoundTick::ComputerMoved { index, result });
        }

        if let Some(at) = self.finish_at
            && now >= at
        {
            self.finish_at = None;
            if let Some(outcome) = self.outcome() {
                info!(%outcome, "Round finished");
                return Ok(RoundTick::Finished(outcome));
            }
        }

        Ok(RoundTick::Idle)
    }

    /// Clears the board and hands the turn back to the first seat.
    ///
    /// Any scheduled computer move is cancelled, so it can never land on the
    /// fresh board.
    ///
    /// # Errors
    ///
    /// `ResultPending` while a finished round is still being shown.
    #[instrument(skip(self, now))]
    pub fn reset(&mut self, now: Instant) -> Result<(), RoundError> {
        if self.finish_at.is_some() {
            return Err(RoundError::ResultPending);
        }
        if let Some(due) = self.pending.take() {
            debug!(?due, "Cancelled pending computer move");
        }
        self.board = Board::new();
        self.turn = Seat::First;
        self.result = GameResult::InProgress;
        info!(to_move = %self.to_move(), "Round reset");
        self.schedule_computer(now);
        Ok(())
    }

    /// Applies the move for the seat to move and updates turn and timers.
    fn commit(&mut self, index: usize, now: Instant) -> Result<GameResult, RoundError> {
        let mark = *self.players.get(self.turn).mark();
        self.board = apply_move(&self.board, index, mark)?;
        self.result = evaluate(&self.board);
        debug!(index, %mark, result = ?self.result, "Move committed");

        match self.result {
            GameResult::InProgress => {
                self.turn = self.turn.other();
                self.schedule_computer(now);
            }
            GameResult::Won { .. } => {
                self.finish_at = Some(now + self.timing.win_highlight);
            }
            GameResult::Draw => {
                self.finish_at = Some(now + self.timing.draw_delay);
            }
        }
        Ok(self.result)
    }

    fn schedule_computer(&mut self, now: Instant) {
        if self.is_computer_turn() {
            let due = now + self.timing.computer_delay;
            debug!(?due, "Scheduling computer move");
            self.pending = Some(due);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictoe_engine::{Cell, GameRng, Mark};

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn vs_computer(first: Seat, now: Instant) -> Round {
        let players = Players::new(
            Player::new("Ada", Mark::X).unwrap(),
            Player::new("Computer", Mark::O).unwrap(),
        )
        .unwrap();
        Round::new(
            players,
            Some(Seat::Second),
            first,
            RoundTiming::default(),
            now,
        )
    }

    fn two_humans(now: Instant) -> Round {
        let players = Players::new(
            Player::new("Sam", Mark::X).unwrap(),
            Player::new("Sam", Mark::O).unwrap(),
        )
        .unwrap();
        Round::new(players, None, Seat::First, RoundTiming::default(), now)
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let mut round = vs_computer(Seat::First, t0);

        assert_eq!(round.play(0, t0), Ok(GameResult::InProgress));
        assert!(round.is_thinking());
        assert_eq!(round.tick(at(t0, 499), &mut rng), Ok(RoundTick::Idle));

        let tick = round.tick(at(t0, 500), &mut rng).unwrap();
        assert_eq!(
            tick,
            RoundTick::ComputerMoved {
                index: 4,
                result: GameResult::InProgress
            }
        );
        assert_eq!(*round.turn(), Seat::First);
        assert!(!round.is_thinking());
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let t0 = Instant::now();
        let mut round = vs_computer(Seat::Second, t0);
        assert_eq!(round.play(0, t0), Err(RoundError::NotYourTurn));
    }

    #[test]
    fn test_refused_human_move_leaves_computer_move_scheduled() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let mut round = vs_computer(Seat::Second, t0);
        assert_eq!(round.play(4, at(t0, 100)), Err(RoundError::NotYourTurn));
        assert!(round.is_thinking());
        assert_eq!(round.board().filled(), 0);

        let tick = round.tick(at(t0, 500), &mut rng).unwrap();
        assert_eq!(
            tick,
            RoundTick::ComputerMoved {
                index: 4,
                result: GameResult::InProgress
            }
        );
        assert_eq!(round.board().get(4), Some(Cell::Occupied(Mark::O)));
        assert_eq!(*round.turn(), Seat::First);
        assert!(!round.is_thinking());
    }

    #[test]
    fn test_occupied_cell_rejected_without_turn_change() {
        let t0 = Instant::now();
        let mut round = two_humans(t0);
        round.play(4, t0).unwrap();
        assert_eq!(
            round.play(4, t0),
            Err(RoundError::Move(MoveError::Occupied(4)))
        );
        assert_eq!(*round.turn(), Seat::Second);
    }

    #[test]
    fn test_reset_cancels_pending_computer_move() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let mut round = vs_computer(Seat::Second, t0);
        assert!(round.is_thinking());

        round.reset(at(t0, 300)).unwrap();
        assert!(!round.is_thinking());
        assert_eq!(round.tick(at(t0, 600), &mut rng), Ok(RoundTick::Idle));
        assert_eq!(round.board().filled(), 0);
        assert_eq!(*round.turn(), Seat::First);
    }

    #[test]
    fn test_reset_reschedules_from_reset_time() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let players = Players::new(
            Player::new("Computer", Mark::X).unwrap(),
            Player::new("Ada", Mark::O).unwrap(),
        )
        .unwrap();
        let mut round = Round::new(
            players,
            Some(Seat::First),
            Seat::First,
            RoundTiming::default(),
            t0,
        );

        round.reset(at(t0, 300)).unwrap();
        // The first deadline passes without a move.
        assert_eq!(round.tick(at(t0, 500), &mut rng), Ok(RoundTick::Idle));
        assert_eq!(round.board().filled(), 0);
        assert!(matches!(
            round.tick(at(t0, 800), &mut rng),
            Ok(RoundTick::ComputerMoved { index: 4, .. })
        ));
    }

    #[test]
    fn test_win_is_highlighted_then_finished() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let mut round = two_humans(t0);
        for index in [0, 3, 1, 4] {
            round.play(index, t0).unwrap();
        }
        let result = round.play(2, t0).unwrap();
        assert_eq!(result.winner(), Some(Mark::X));
        assert_eq!(round.winning_line(), Some(Line([0, 1, 2])));

        assert_eq!(round.reset(at(t0, 100)), Err(RoundError::ResultPending));
        assert_eq!(round.play(8, t0), Err(RoundError::RoundOver));
        assert_eq!(round.tick(at(t0, 1999), &mut rng), Ok(RoundTick::Idle));

        match round.tick(at(t0, 2000), &mut rng).unwrap() {
            RoundTick::Finished(Outcome::Winner(player)) => {
                assert_eq!(*player.mark(), Mark::X);
            }
            other => panic!("expected a winner, got {:?}", other),
        }
        assert_eq!(round.tick(at(t0, 3000), &mut rng), Ok(RoundTick::Idle));
    }

    #[test]
    fn test_draw_finishes_after_delay() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(1);
        let mut round = two_humans(t0);
        for index in [0, 1, 2, 4, 3, 5, 7, 6] {
            assert_eq!(round.play(index, t0), Ok(GameResult::InProgress));
        }
        assert_eq!(round.play(8, t0), Ok(GameResult::Draw));
        assert_eq!(round.tick(at(t0, 499), &mut rng), Ok(RoundTick::Idle));
        assert_eq!(
            round.tick(at(t0, 500), &mut rng),
            Ok(RoundTick::Finished(Outcome::Draw))
        );
    }

    #[test]
    fn test_computer_wins_when_it_can() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(5);
        let mut round = vs_computer(Seat::First, t0);
        round.play(0, t0).unwrap();
        round.tick(at(t0, 500), &mut rng).unwrap();
        round.play(1, at(t0, 600)).unwrap();
        // Computer must block the top row at 2.
        assert_eq!(
            round.tick(at(t0, 1100), &mut rng),
            Ok(RoundTick::ComputerMoved {
                index: 2,
                result: GameResult::InProgress
            })
        );
        round.play(3, at(t0, 1200)).unwrap();
        // O holds 2 and 4; 6 completes the anti-diagonal.
        let tick = round.tick(at(t0, 1700), &mut rng).unwrap();
        assert!(matches!(
            tick,
            RoundTick::ComputerMoved {
                index: 6,
                result: GameResult::Won { mark: Mark::O, .. }
            }
        ));
        assert_eq!(
            round.outcome().map(|o| o.to_string()),
            Some("Computer wins".to_string())
        );
        assert!(!round.is_thinking());
        assert_eq!(round.play(8, at(t0, 1800)), Err(RoundError::RoundOver));
        assert!(matches!(
            round.tick(at(t0, 3700), &mut rng),
            Ok(RoundTick::Finished(_))
        ));
        assert_eq!(round.tick(at(t0, 5000), &mut rng), Ok(RoundTick::Idle));
        assert_eq!(round.board().filled(), 6);
    }
}
