//! Coin toss: decides which seat moves first.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictoe_engine::{GameRng, Players, Seat};
use tracing::{debug, info, instrument};

use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;
use crate::session::GameMode;

const COIN_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Where the toss is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossPhase {
    /// Waiting for the flip to start automatically.
    Waiting {
        /// When the flip starts.
        until: Instant,
    },
    /// Coin in the air.
    Flipping {
        /// When the coin lands.
        until: Instant,
    },
    /// Landed; this seat moves first.
    Landed(Seat),
}

/// Coin toss state.
#[derive(Debug, Clone, Getters)]
pub struct TossScreen {
    players: Players,
    mode: GameMode,
    phase: TossPhase,
    #[getter(skip)]
    flip: Duration,
    #[getter(skip)]
    frame: usize,
}

impl TossScreen {
    /// Schedules the flip to start `start_delay` after `now`.
    #[instrument(skip(players, now))]
    pub fn new(
        players: Players,
        mode: GameMode,
        start_delay: Duration,
        flip: Duration,
        now: Instant,
    ) -> Self {
        Self {
            players,
            mode,
            phase: TossPhase::Waiting {
                until: now + start_delay,
            },
            flip,
            frame: 0,
        }
    }

    fn start_flip(&mut self, now: Instant) {
        debug!("Coin flipping");
        self.phase = TossPhase::Flipping {
            until: now + self.flip,
        };
    }
}

impl Screen for TossScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Coin Toss"), title);

        let area = widgets::center_rect(body, 50, 9);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(5)])
            .split(area);

        let names: Vec<Span> = self
            .players
            .iter()
            .enumerate()
            .flat_map(|(i, player)| {
                let sep = if i == 0 { "" } else { "  vs  " };
                [
                    Span::raw(sep),
                    Span::styled(player.to_string(), widgets::mark_style(*player.mark())),
                ]
            })
            .collect();
        let heading = vec![
            Line::from(names),
            Line::from(""),
            Line::from("Who goes first?"),
        ];
        frame.render_widget(
            Paragraph::new(heading).alignment(Alignment::Center),
            rows[0],
        );

        let coin = match self.phase {
            TossPhase::Waiting { .. } => Line::from("Get ready..."),
            TossPhase::Flipping { .. } => {
                let face = COIN_FRAMES[self.frame % COIN_FRAMES.len()];
                Line::from(Span::styled(
                    format!("{}  Flipping...", face),
                    Style::default().fg(Color::Yellow),
                ))
            }
            TossPhase::Landed(seat) => {
                let player = self.players.get(seat);
                Line::from(Span::styled(
                    format!("{} goes first!", player.display_name()),
                    widgets::mark_style(*player.mark()).add_modifier(Modifier::UNDERLINED),
                ))
            }
        };
        frame.render_widget(
            Paragraph::new(coin)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            rows[1],
        );

        let help_text = match self.phase {
            TossPhase::Landed(_) => "Enter: Start game | q: Quit",
            _ => "Enter: Flip now | q: Quit",
        };
        frame.render_widget(widgets::help(help_text), help);
    }

    #[instrument(skip(self, key, now))]
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => match self.phase {
                TossPhase::Waiting { .. } => {
                    self.start_flip(now);
                    ScreenTransition::Stay
                }
                TossPhase::Flipping { .. } => ScreenTransition::Stay,
                TossPhase::Landed(first) => ScreenTransition::GoToBoard {
                    players: self.players.clone(),
                    mode: self.mode,
                    first,
                },
            },
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, now: Instant, rng: &mut GameRng) -> ScreenTransition {
        match self.phase {
            TossPhase::Waiting { until } if now >= until => self.start_flip(now),
            TossPhase::Flipping { until } => {
                self.frame = self.frame.wrapping_add(1);
                if now >= until {
                    let seat = rng.toss();
                    info!(first = %self.players.get(seat), "Toss landed");
                    self.phase = TossPhase::Landed(seat);
                }
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictoe_engine::{Mark, Player};

    fn players() -> Players {
        Players::new(
            Player::new("Ada", Mark::X).unwrap(),
            Player::new("Bob", Mark::O).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_toss_starts_flips_and_lands() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(11);
        let mut screen = TossScreen::new(
            players(),
            GameMode::Human,
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            t0,
        );

        screen.tick(t0 + Duration::from_millis(999), &mut rng);
        assert!(matches!(screen.phase(), TossPhase::Waiting { .. }));
        // Not landed yet, so Enter starts nothing new.
        screen.tick(t0 + Duration::from_millis(1000), &mut rng);
        assert!(matches!(screen.phase(), TossPhase::Flipping { .. }));
        assert_eq!(
            screen.handle_key(KeyCode::Enter.into(), t0),
            ScreenTransition::Stay
        );

        screen.tick(t0 + Duration::from_millis(3000), &mut rng);
        let TossPhase::Landed(first) = *screen.phase() else {
            panic!("coin should have landed");
        };
        assert_eq!(
            screen.handle_key(KeyCode::Enter.into(), t0),
            ScreenTransition::GoToBoard {
                players: players(),
                mode: GameMode::Human,
                first,
            }
        );
    }

    #[test]
    fn test_same_seed_same_toss() {
        let land = |seed| {
            let t0 = Instant::now();
            let mut rng = GameRng::new(seed);
            let mut screen = TossScreen::new(
                players(),
                GameMode::Human,
                Duration::ZERO,
                Duration::ZERO,
                t0,
            );
            screen.tick(t0, &mut rng);
            screen.tick(t0, &mut rng);
            *screen.phase()
        };
        assert_eq!(land(42), land(42));
    }
}
