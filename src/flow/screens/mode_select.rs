//! Mode selection: play the computer or another human.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;
use crate::session::GameMode;

/// Menu of [`GameMode`]s.
#[derive(Debug)]
pub struct ModeSelectionScreen {
    modes: Vec<GameMode>,
    list_state: ListState,
}

impl Default for ModeSelectionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeSelectionScreen {
    /// Creates the menu with the first mode selected.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing ModeSelectionScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            modes: GameMode::iter().collect(),
            list_state,
        }
    }

    /// Currently highlighted mode.
    pub fn selected(&self) -> GameMode {
        let idx = self.list_state.selected().unwrap_or(0);
        self.modes[idx.min(self.modes.len() - 1)]
    }

    fn select_previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.modes.len() - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.modes.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

impl Screen for ModeSelectionScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Choose Game Mode"), title);

        let items: Vec<ListItem> = self
            .modes
            .iter()
            .map(|mode| {
                let label = format!("{:<14} {}", mode.to_string(), mode.description());
                ListItem::new(label)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Mode"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, widgets::center_rect(body, 60, 4), &mut list_state);

        frame.render_widget(
            widgets::help("↑↓: Navigate | Enter: Select | q: Quit"),
            help,
        );
    }

    #[instrument(skip(self, key, _now))]
    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let mode = self.selected();
                info!(%mode, "Mode selected");
                ScreenTransition::GoToPlayerSetup { mode }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
