//! Board screen: plays one [`Round`] and hands its outcome to the result screen.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictoe_engine::{CENTER, Cell, GameResult, GameRng, MoveError};
use tracing::{debug, error, instrument};

use crate::flow::input::{digit_cell, move_cursor};
use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;
use crate::session::{GameMode, Round, RoundError, RoundTick};

/// An in-progress round plus cursor and status line.
#[derive(Debug, Clone, Getters)]
pub struct BoardScreen {
    round: Round,
    mode: GameMode,
    cursor: usize,
    status: String,
}

impl BoardScreen {
    /// Wraps a freshly started round.
    #[instrument(skip(round))]
    pub fn new(round: Round, mode: GameMode) -> Self {
        Self {
            round,
            mode,
            cursor: CENTER,
            status: String::new(),
        }
    }

    fn play(&mut self, index: usize, now: Instant) {
        self.cursor = index;
        match self.round.play(index, now) {
            Ok(result) => {
                self.status = match result {
                    GameResult::InProgress => String::new(),
                    _ => self.result_status(),
                };
            }
            Err(e) => {
                debug!(index, error = %e, "Move rejected");
                self.status = rejection_message(&e);
            }
        }
    }

    fn result_status(&self) -> String {
        match self.round.outcome() {
            Some(outcome) => format!("{}!", outcome),
            None => String::new(),
        }
    }

    fn turn_line(&self) -> Line<'static> {
        if self.round.result().is_terminal() {
            return Line::from(Span::styled(
                self.result_status(),
                widgets::bold(Color::Green),
            ));
        }
        let player = self.round.to_move();
        let mut spans = vec![
            Span::raw("Current turn: "),
            Span::styled(player.to_string(), widgets::mark_style(*player.mark())),
        ];
        if self.round.is_thinking() {
            spans.push(Span::styled(
                "  thinking...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        Line::from(spans)
    }

    fn draw_board(&self, frame: &mut Frame, area: Rect) {
        let board_area = widgets::center_rect(area, 40, 11);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(board_area);

        for row in 0..3 {
            self.draw_row(frame, rows[row * 2], row);
            if row < 2 {
                frame.render_widget(
                    Paragraph::new("─".repeat(board_area.width as usize))
                        .style(Style::default().fg(Color::DarkGray)),
                    rows[row * 2 + 1],
                );
            }
        }
    }

    fn draw_row(&self, frame: &mut Frame, area: Rect, row: usize) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
            ])
            .split(area);

        for col in 0..3 {
            self.draw_cell(frame, cols[col * 2], row * 3 + col);
            if col < 2 {
                frame.render_widget(
                    Paragraph::new("│").style(Style::default().fg(Color::DarkGray)),
                    cols[col * 2 + 1],
                );
            }
        }
    }

    fn draw_cell(&self, frame: &mut Frame, area: Rect, index: usize) {
        let (symbol, mut style) = match self.round.board().get(index) {
            Some(Cell::Occupied(mark)) => (format!(" {} ", mark), widgets::mark_style(mark)),
            _ => (
                format!(" {} ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let on_winning_line = self
            .round
            .winning_line()
            .is_some_and(|line| line.contains(index));
        if on_winning_line {
            style = style
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::SLOW_BLINK);
        } else if index == self.cursor && !self.round.result().is_terminal() {
            style = style.bg(Color::White).fg(Color::Black);
        }

        let cell = Paragraph::new(Line::from(Span::styled(symbol, style)));
        frame.render_widget(cell.alignment(Alignment::Center), area);
    }
}

/// Status text for a refused move, with cells numbered 1-9 like the keys.
fn rejection_message(error: &RoundError) -> String {
    match error {
        RoundError::Move(MoveError::Occupied(index)) => {
            format!("Cell {} is already occupied", index + 1)
        }
        RoundError::Move(MoveError::OutOfRange(index)) => {
            format!("Cell {} is out of range (must be 1-9)", index + 1)
        }
        other => other.to_string(),
    }
}

impl Screen for BoardScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = format!("Tic Tac Toe - {}", self.mode);
        frame.render_widget(widgets::title(&title), chunks[0]);

        frame.render_widget(
            Paragraph::new(self.turn_line())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );

        self.draw_board(frame, chunks[2]);

        frame.render_widget(
            Paragraph::new(self.status.as_str())
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[3],
        );

        frame.render_widget(
            widgets::help("1-9 or ←↑↓→ + Enter: Place | r: Reset | q: Quit"),
            chunks[4],
        );
    }

    #[instrument(skip(self, key, now))]
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition {
        if let Some(index) = digit_cell(key.code) {
            self.play(index, now);
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.play(self.cursor, now);
                ScreenTransition::Stay
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.status = match self.round.reset(now) {
                    Ok(()) => "Board reset".to_string(),
                    Err(e) => e.to_string(),
                };
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, now: Instant, rng: &mut GameRng) -> ScreenTransition {
        match self.round.tick(now, rng) {
            Ok(RoundTick::Idle) => ScreenTransition::Stay,
            Ok(RoundTick::ComputerMoved { index, result }) => {
                self.status = match result {
                    GameResult::InProgress => format!("Computer played {}", index + 1),
                    _ => self.result_status(),
                };
                ScreenTransition::Stay
            }
            Ok(RoundTick::Finished(outcome)) => ScreenTransition::GoToResult { outcome },
            Err(e) => {
                error!(error = %e, "Round tick failed");
                self.status = e.to_string();
                ScreenTransition::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Outcome, RoundTiming};
    use std::time::Duration;
    use tictoe_engine::{Mark, Player, Players, Seat};

    fn humans(now: Instant) -> BoardScreen {
        let players = Players::new(
            Player::new("Ada", Mark::X).unwrap(),
            Player::new("Bob", Mark::O).unwrap(),
        )
        .unwrap();
        let round = Round::new(players, None, Seat::First, RoundTiming::default(), now);
        BoardScreen::new(round, GameMode::Human)
    }

    #[test]
    fn test_digits_place_marks() {
        let t0 = Instant::now();
        let mut screen = humans(t0);
        screen.handle_key(KeyCode::Char('1').into(), t0);
        screen.handle_key(KeyCode::Char('5').into(), t0);
        assert_eq!(screen.round().board().get(0), Some(Cell::Occupied(Mark::X)));
        assert_eq!(screen.round().board().get(4), Some(Cell::Occupied(Mark::O)));
    }

    #[test]
    fn test_occupied_cell_sets_status() {
        let t0 = Instant::now();
        let mut screen = humans(t0);
        screen.handle_key(KeyCode::Char('5').into(), t0);
        screen.handle_key(KeyCode::Char('5').into(), t0);
        assert_eq!(screen.status(), "Cell 5 is already occupied");
        assert_eq!(*screen.round().turn(), Seat::Second);
    }

    #[test]
    fn test_occupied_status_uses_key_numbering() {
        let t0 = Instant::now();
        let mut screen = humans(t0);
        screen.handle_key(KeyCode::Char('9').into(), t0);
        screen.handle_key(KeyCode::Char('9').into(), t0);
        assert_eq!(screen.status(), "Cell 9 is already occupied");
        screen.handle_key(KeyCode::Char('1').into(), t0);
        screen.handle_key(KeyCode::Char('1').into(), t0);
        assert_eq!(screen.status(), "Cell 1 is already occupied");
    }

    #[test]
    fn test_rejection_message_numbers_from_one() {
        let occupied = RoundError::Move(MoveError::Occupied(0));
        assert_eq!(rejection_message(&occupied), "Cell 1 is already occupied");
        let out_of_range = RoundError::Move(MoveError::OutOfRange(9));
        assert_eq!(
            rejection_message(&out_of_range),
            "Cell 10 is out of range (must be 1-9)"
        );
        assert_eq!(
            rejection_message(&RoundError::RoundOver),
            "The round is over"
        );
    }

    #[test]
    fn test_cursor_and_enter() {
        let t0 = Instant::now();
        let mut screen = humans(t0);
        screen.handle_key(KeyCode::Up.into(), t0);
        screen.handle_key(KeyCode::Left.into(), t0);
        screen.handle_key(KeyCode::Enter.into(), t0);
        assert_eq!(screen.round().board().get(0), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_win_goes_to_result_after_highlight() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(3);
        let mut screen = humans(t0);
        for key in ['1', '4', '2', '5', '3'] {
            screen.handle_key(KeyCode::Char(key).into(), t0);
        }
        assert_eq!(screen.status(), "Ada wins!");
        assert_eq!(
            screen.tick(t0 + Duration::from_millis(1000), &mut rng),
            ScreenTransition::Stay
        );
        match screen.tick(t0 + Duration::from_millis(2000), &mut rng) {
            ScreenTransition::GoToResult {
                outcome: Outcome::Winner(player),
            } => assert_eq!(player.display_name(), "Ada"),
            other => panic!("expected result, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_clears_board() {
        let t0 = Instant::now();
        let mut screen = humans(t0);
        screen.handle_key(KeyCode::Char('1').into(), t0);
        screen.handle_key(KeyCode::Char('r').into(), t0);
        assert_eq!(screen.round().board().filled(), 0);
        assert_eq!(*screen.round().turn(), Seat::First);
    }
}
