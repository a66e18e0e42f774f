//! Flow controller: the state machine driving the screens.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use tictoe_engine::GameRng;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::config::GameConfig;
use crate::flow::screen::{Screen, ScreenTransition};
use crate::flow::screens::{
    BoardScreen, LoadingScreen, ModeSelectionScreen, PlayerSetupScreen, ResultScreen, TossScreen,
    WelcomeScreen,
};
use crate::session::Round;

/// Active screen in the flow state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Title card.
    Welcome(WelcomeScreen),
    /// Progress bar.
    Loading(LoadingScreen),
    /// Computer or human opponent.
    ModeSelection(ModeSelectionScreen),
    /// Names and marks.
    PlayerSetup(PlayerSetupScreen),
    /// Who goes first.
    Toss(TossScreen),
    /// The round itself.
    Board(Box<BoardScreen>),
    /// Winner or draw.
    Result(ResultScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Welcome(s) => s,
            Self::Loading(s) => s,
            Self::ModeSelection(s) => s,
            Self::PlayerSetup(s) => s,
            Self::Toss(s) => s,
            Self::Board(s) => s.as_ref(),
            Self::Result(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Welcome(s) => s,
            Self::Loading(s) => s,
            Self::ModeSelection(s) => s,
            Self::PlayerSetup(s) => s,
            Self::Toss(s) => s,
            Self::Board(s) => s.as_mut(),
            Self::Result(s) => s,
        }
    }

    /// Short name for logs and tests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome(_) => "welcome",
            Self::Loading(_) => "loading",
            Self::ModeSelection(_) => "mode_selection",
            Self::PlayerSetup(_) => "player_setup",
            Self::Toss(_) => "toss",
            Self::Board(_) => "board",
            Self::Result(_) => "result",
        }
    }
}

/// Controller that drives the screen flow.
///
/// Call [`FlowController::run`] to start the event loop, or drive it by hand
/// with [`FlowController::key`] and [`FlowController::tick`].
#[derive(Debug, Getters)]
pub struct FlowController {
    config: GameConfig,
    rng: GameRng,
    screen: Option<ActiveScreen>,
}

impl FlowController {
    /// Creates a controller showing the welcome screen.
    #[instrument(skip(config, rng), fields(seed = rng.seed()))]
    pub fn new(config: GameConfig, rng: GameRng) -> Self {
        info!("Creating FlowController");
        Self {
            config,
            rng,
            screen: Some(ActiveScreen::Welcome(WelcomeScreen::new())),
        }
    }

    /// False once a screen has asked to quit.
    pub fn is_running(&self) -> bool {
        self.screen.is_some()
    }

    /// Renders the active screen.
    pub fn render(&self, frame: &mut Frame) {
        if let Some(screen) = &self.screen {
            screen.as_screen().render(frame);
        }
    }

    /// Feeds a key press to the active screen.
    #[instrument(skip(self, key, now), fields(code = ?key.code))]
    pub fn key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(mut screen) = self.screen.take() {
            let transition = screen.as_screen_mut().handle_key(key, now);
            self.screen = self.apply_transition(transition, screen, now);
        }
    }

    /// Advances the active screen's timers.
    pub fn tick(&mut self, now: Instant) {
        if let Some(mut screen) = self.screen.take() {
            let transition = screen.as_screen_mut().tick(now, &mut self.rng);
            self.screen = self.apply_transition(transition, screen, now);
        }
    }

    /// Runs the event loop until a screen quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting flow event loop");

        while self.is_running() {
            terminal.draw(|f| self.render(f))?;

            // Short poll keeps timers ticking between key presses.
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                self.key(key, Instant::now());
            }

            self.tick(Instant::now());
            sleep(Duration::from_millis(10)).await;
        }

        info!("Flow quitting");
        Ok(())
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current, now), fields(from = current.name()))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
        now: Instant,
    ) -> Option<ActiveScreen> {
        if transition == ScreenTransition::Stay {
            return Some(current);
        }
        debug!(transition = ?transition, "Applying screen transition");
        let next = match transition {
            ScreenTransition::Stay => current,
            ScreenTransition::GoToWelcome => ActiveScreen::Welcome(WelcomeScreen::new()),
            ScreenTransition::GoToLoading => ActiveScreen::Loading(LoadingScreen::new(
                Duration::from_millis(*self.config.loading_step_ms()),
                now,
            )),
            ScreenTransition::GoToModeSelection => {
                ActiveScreen::ModeSelection(ModeSelectionScreen::new())
            }
            ScreenTransition::GoToPlayerSetup { mode } => ActiveScreen::PlayerSetup(
                PlayerSetupScreen::new(mode, self.config.computer_name().clone()),
            ),
            ScreenTransition::GoToToss { players, mode } => ActiveScreen::Toss(TossScreen::new(
                players,
                mode,
                Duration::from_millis(*self.config.toss_start_ms()),
                Duration::from_millis(*self.config.toss_flip_ms()),
                now,
            )),
            ScreenTransition::GoToBoard {
                players,
                mode,
                first,
            } => {
                let round = Round::new(
                    players,
                    mode.computer_seat(),
                    first,
                    self.config.round_timing(),
                    now,
                );
                ActiveScreen::Board(Box::new(BoardScreen::new(round, mode)))
            }
            ScreenTransition::GoToResult { outcome } => {
                ActiveScreen::Result(ResultScreen::new(outcome))
            }
            ScreenTransition::Quit => return None,
        };
        info!(to = next.name(), "Navigated");
        Some(next)
    }
}
