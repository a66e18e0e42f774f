//! Player setup: names and marks for both seats.
//!
//! In computer mode only the first player is entered; the computer takes the
//! second seat with the other mark.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictoe_engine::{Mark, Player, Players, SetupError};
use tracing::{info, instrument, warn};

use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;
use crate::session::GameMode;

const HELP: &str = "Tab: Next field | ←→/Space: Switch symbol | Enter: Start | Esc: Back";

/// Field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    /// First player's name.
    FirstName,
    /// First player's mark; the second player gets the other one.
    Mark,
    /// Second player's name (human mode only).
    SecondName,
}

/// Form state for seating two players.
#[derive(Debug, Clone, Getters)]
pub struct PlayerSetupScreen {
    mode: GameMode,
    computer_name: String,
    first_name: String,
    second_name: String,
    first_mark: Mark,
    focus: SetupField,
    error: Option<String>,
}

impl PlayerSetupScreen {
    /// Creates an empty form for `mode`.
    #[instrument(skip(computer_name))]
    pub fn new(mode: GameMode, computer_name: impl Into<String>) -> Self {
        Self {
            mode,
            computer_name: computer_name.into(),
            first_name: String::new(),
            second_name: String::new(),
            first_mark: Mark::X,
            focus: SetupField::FirstName,
            error: None,
        }
    }

    fn fields(&self) -> &'static [SetupField] {
        match self.mode {
            GameMode::Computer => &[SetupField::FirstName, SetupField::Mark],
            GameMode::Human => &[
                SetupField::FirstName,
                SetupField::Mark,
                SetupField::SecondName,
            ],
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn focused_name(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::FirstName => Some(&mut self.first_name),
            SetupField::SecondName => Some(&mut self.second_name),
            SetupField::Mark => None,
        }
    }

    /// Seats the players described by the form.
    ///
    /// # Errors
    ///
    /// `SetupError::BlankName` when a required name is blank.
    #[instrument(skip(self))]
    pub fn players(&self) -> Result<Players, SetupError> {
        let first = Player::new(&self.first_name, self.first_mark)?;
        let second_name = match self.mode {
            GameMode::Computer => &self.computer_name,
            GameMode::Human => &self.second_name,
        };
        let second = Player::new(second_name, self.first_mark.opponent())?;
        Players::new(first, second)
    }

    fn submit(&mut self) -> ScreenTransition {
        match self.players() {
            Ok(players) => {
                info!(mode = %self.mode, "Players seated");
                ScreenTransition::GoToToss {
                    players,
                    mode: self.mode,
                }
            }
            Err(e) => {
                warn!(error = %e, "Player setup rejected");
                self.error = Some(match self.mode {
                    GameMode::Computer => "Please enter your name".to_string(),
                    GameMode::Human => "Please enter both player names".to_string(),
                });
                ScreenTransition::Stay
            }
        }
    }

    fn name_box<'a>(&self, label: &'a str, value: &'a str, field: SetupField) -> Paragraph<'a> {
        let style = if self.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Paragraph::new(value)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(label))
    }
}

impl Screen for PlayerSetupScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Player Setup"), title);

        let form = widgets::center_rect(body, 50, 11);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(form);

        let first_label = match self.mode {
            GameMode::Computer => "Your name",
            GameMode::Human => "Player 1 name",
        };
        frame.render_widget(
            self.name_box(first_label, &self.first_name, SetupField::FirstName),
            rows[0],
        );

        let mark_style = if self.focus == SetupField::Mark {
            widgets::bold(Color::Yellow)
        } else {
            Style::default()
        };
        let marks = Line::from(vec![
            Span::styled(
                format!("[ {} ]", self.first_mark),
                widgets::mark_style(self.first_mark),
            ),
            Span::styled(
                format!("   other player: {}", self.first_mark.opponent()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(marks).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose your symbol")
                    .border_style(mark_style),
            ),
            rows[1],
        );

        match self.mode {
            GameMode::Human => frame.render_widget(
                self.name_box("Player 2 name", &self.second_name, SetupField::SecondName),
                rows[2],
            ),
            GameMode::Computer => {
                let opponent = format!("{} ({})", self.computer_name, self.first_mark.opponent());
                frame.render_widget(
                    Paragraph::new(opponent)
                        .style(Style::default().fg(Color::DarkGray))
                        .block(Block::default().borders(Borders::ALL).title("Opponent")),
                    rows[2],
                );
            }
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                rows[3],
            );
        }

        frame.render_widget(widgets::help(HELP), help);
    }

    #[instrument(skip(self, key, _now))]
    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => ScreenTransition::GoToModeSelection,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                ScreenTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                ScreenTransition::Stay
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focus == SetupField::Mark =>
            {
                self.first_mark = self.first_mark.opponent();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                if let Some(name) = self.focused_name() {
                    name.push(c);
                    self.error = None;
                }
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                if let Some(name) = self.focused_name() {
                    name.pop();
                }
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictoe_engine::Seat;

    fn type_text(screen: &mut PlayerSetupScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c).into(), Instant::now());
        }
    }

    #[test]
    fn test_blank_name_shows_error() {
        let mut screen = PlayerSetupScreen::new(GameMode::Computer, "Computer");
        type_text(&mut screen, "   ");
        assert_eq!(
            screen.handle_key(KeyCode::Enter.into(), Instant::now()),
            ScreenTransition::Stay
        );
        assert!(screen.error().is_some());
    }

    #[test]
    fn test_computer_takes_opposite_mark() {
        let mut screen = PlayerSetupScreen::new(GameMode::Computer, "Computer");
        type_text(&mut screen, " Ada ");
        screen.handle_key(KeyCode::Tab.into(), Instant::now());
        screen.handle_key(KeyCode::Right.into(), Instant::now());
        assert_eq!(*screen.first_mark(), Mark::O);

        let transition = screen.handle_key(KeyCode::Enter.into(), Instant::now());
        let ScreenTransition::GoToToss { players, mode } = transition else {
            panic!("expected toss, got {:?}", transition);
        };
        assert_eq!(mode, GameMode::Computer);
        assert_eq!(players.get(Seat::First).display_name(), "Ada");
        assert_eq!(*players.get(Seat::First).mark(), Mark::O);
        assert_eq!(players.get(Seat::Second).display_name(), "Computer");
        assert_eq!(*players.get(Seat::Second).mark(), Mark::X);
    }

    #[test]
    fn test_human_mode_needs_second_name() {
        let mut screen = PlayerSetupScreen::new(GameMode::Human, "Computer");
        type_text(&mut screen, "Ada");
        assert_eq!(
            screen.handle_key(KeyCode::Enter.into(), Instant::now()),
            ScreenTransition::Stay
        );

        screen.handle_key(KeyCode::Tab.into(), Instant::now());
        screen.handle_key(KeyCode::Tab.into(), Instant::now());
        assert_eq!(*screen.focus(), SetupField::SecondName);
        type_text(&mut screen, "Bob");
        assert!(matches!(
            screen.handle_key(KeyCode::Enter.into(), Instant::now()),
            ScreenTransition::GoToToss { .. }
        ));
    }

    #[test]
    fn test_q_is_typed_into_names() {
        let mut screen = PlayerSetupScreen::new(GameMode::Computer, "Computer");
        type_text(&mut screen, "quinn");
        screen.handle_key(KeyCode::Backspace.into(), Instant::now());
        assert_eq!(screen.first_name(), "quin");
    }
}
