//! Welcome screen: title card shown on start and after "New Game".

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
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

/// Stateless welcome card.
#[derive(Debug, Default, Clone, Copy)]
pub struct WelcomeScreen;

impl WelcomeScreen {
    /// Creates the welcome screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for WelcomeScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Tic Tac Toe"), title);

        let lines = vec![
            Line::from(Span::styled(
                " X | O | X ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " O | X | O ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Three in a row wins."),
        ];
        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, widgets::center_rect(body, 40, 8));

        frame.render_widget(widgets::help("Enter: Start | q: Quit"), help);
    }

    #[instrument(skip(self, key, _now))]
    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                info!("Starting from welcome screen");
                ScreenTransition::GoToLoading
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_starts_loading() {
        let mut screen = WelcomeScreen::new();
        let now = Instant::now();
        assert_eq!(
            screen.handle_key(KeyCode::Enter.into(), now),
            ScreenTransition::GoToLoading
        );
        assert_eq!(
            screen.handle_key(KeyCode::Char('x').into(), now),
            ScreenTransition::Stay
        );
        assert_eq!(
            screen.handle_key(KeyCode::Char('q').into(), now),
            ScreenTransition::Quit
        );
    }
}
