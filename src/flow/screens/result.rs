//! Result screen: winner or draw, then play again or start over.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{info, instrument};

use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;
use crate::session::Outcome;

const HELP: &str = "←→: Choose | Enter: Confirm | p: Play again | n: New game | q: Quit";

/// Buttons on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ResultChoice {
    /// Same session, pick a mode again.
    #[strum(to_string = "Play Again")]
    PlayAgain,
    /// Back to the welcome screen with no players.
    #[strum(to_string = "New Game")]
    NewGame,
}

impl ResultChoice {
    fn toggle(self) -> Self {
        match self {
            Self::PlayAgain => Self::NewGame,
            Self::NewGame => Self::PlayAgain,
        }
    }

    fn transition(self) -> ScreenTransition {
        info!(choice = %self, "Result choice made");
        match self {
            Self::PlayAgain => ScreenTransition::GoToModeSelection,
            Self::NewGame => ScreenTransition::GoToWelcome,
        }
    }
}

/// Final outcome and the selected button.
#[derive(Debug, Clone, Getters)]
pub struct ResultScreen {
    outcome: Outcome,
    selected: ResultChoice,
}

impl ResultScreen {
    /// Shows `outcome` with "Play Again" selected.
    #[instrument]
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            selected: ResultChoice::PlayAgain,
        }
    }

    fn button(&self, choice: ResultChoice) -> Span<'static> {
        let style = if self.selected == choice {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Span::styled(format!("  {}  ", choice), style)
    }
}

impl Screen for ResultScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Game Over"), title);

        let headline = match &self.outcome {
            Outcome::Winner(player) => vec![
                Line::from(Span::styled(
                    "Congratulations!",
                    widgets::bold(Color::Green),
                )),
                Line::from(Span::styled(
                    format!("{} wins!", player),
                    widgets::mark_style(*player.mark()),
                )),
            ],
            Outcome::Draw => vec![
                Line::from(Span::styled(
                    "It's a draw!",
                    widgets::bold(Color::Cyan),
                )),
                Line::from("Nobody completed a line."),
            ],
        };
        let mut lines = headline;
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            self.button(ResultChoice::PlayAgain),
            Span::raw("   "),
            self.button(ResultChoice::NewGame),
        ]));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            widgets::center_rect(body, 50, 6),
        );

        frame.render_widget(widgets::help(HELP), help);
    }

    #[instrument(skip(self, key, _now))]
    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = self.selected.toggle();
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.selected.transition(),
            KeyCode::Char('p') | KeyCode::Char('P') => ResultChoice::PlayAgain.transition(),
            KeyCode::Char('n') | KeyCode::Char('N') => ResultChoice::NewGame.transition(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
