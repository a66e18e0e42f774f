//! Loading screen: a progress bar that fills in 2% steps, then moves on.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};
use tictoe_engine::GameRng;
use tracing::{debug, instrument};

use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::widgets;

const STEP_PERCENT: u64 = 2;
const SETTLE: Duration = Duration::from_millis(500);

/// Progress bar state.
#[derive(Debug, Clone, Getters)]
pub struct LoadingScreen {
    #[getter(skip)]
    started: Instant,
    #[getter(skip)]
    step: Duration,
    /// Percent complete, 0-100.
    progress: u16,
    #[getter(skip)]
    done_at: Option<Instant>,
}

impl LoadingScreen {
    /// Starts filling at `now`, one step every `step`.
    #[instrument(skip(now))]
    pub fn new(step: Duration, now: Instant) -> Self {
        Self {
            started: now,
            step: step.max(Duration::from_millis(1)),
            progress: 0,
            done_at: None,
        }
    }
}

impl Screen for LoadingScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let [title, body, help] = widgets::page(frame.area());
        frame.render_widget(widgets::title("Loading"), title);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Setting up the board");
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(self.progress);
        frame.render_widget(gauge, widgets::center_rect(body, 50, 3));

        frame.render_widget(widgets::help("q: Quit"), help);
    }

    #[instrument(skip(self, key, _now))]
    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, now: Instant, _rng: &mut GameRng) -> ScreenTransition {
        if let Some(at) = self.done_at {
            if now >= at {
                debug!("Loading complete");
                return ScreenTransition::GoToModeSelection;
            }
            return ScreenTransition::Stay;
        }

        let elapsed = now.saturating_duration_since(self.started).as_millis();
        let steps = elapsed / self.step.as_millis();
        let percent = (steps as u64).saturating_mul(STEP_PERCENT).min(100);
        self.progress = percent as u16;
        if self.progress == 100 {
            self.done_at = Some(now + SETTLE);
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_then_settles() {
        let t0 = Instant::now();
        let mut rng = GameRng::new(0);
        let mut screen = LoadingScreen::new(Duration::from_millis(50), t0);

        screen.tick(t0 + Duration::from_millis(500), &mut rng);
        assert_eq!(*screen.progress(), 20);

        let full = t0 + Duration::from_millis(2500);
        assert_eq!(screen.tick(full, &mut rng), ScreenTransition::Stay);
        assert_eq!(*screen.progress(), 100);
        assert_eq!(
            screen.tick(full + Duration::from_millis(499), &mut rng),
            ScreenTransition::Stay
        );
        assert_eq!(
            screen.tick(full + Duration::from_millis(500), &mut rng),
            ScreenTransition::GoToModeSelection
        );
    }
}
