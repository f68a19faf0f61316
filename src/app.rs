use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::catalog::Difficulty;
use crate::runtime::Countdown;
use crate::session::Phase;
use crate::typing::TypingTest;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// What the event loop should do after handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub typing: TypingTest,
    pub countdown: Countdown,
}

impl App {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_typing(TypingTest::new(difficulty))
    }

    pub fn with_typing(typing: TypingTest) -> Self {
        Self {
            typing,
            countdown: Countdown::new(COUNTDOWN_PERIOD),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.quit()
            }
            KeyCode::Tab => self.select(self.typing.difficulty().next()),
            KeyCode::BackTab => self.select(self.typing.difficulty().previous()),
            KeyCode::Backspace => {
                let mut text = self.typing.session().typed_input.clone();
                if text.pop().is_some() {
                    self.typing.submit_input(&text);
                }
            }
            KeyCode::Enter | KeyCode::Char('r') if self.typing.phase() == Phase::Completed => {
                info!(difficulty = %self.typing.difficulty(), "restarting session");
                self.typing.restart();
            }
            KeyCode::Char(c) => {
                let mut text = self.typing.session().typed_input.clone();
                text.push(c);
                self.typing.submit_input(&text);
            }
            _ => {}
        }

        self.sync_countdown(now);
        Control::Continue
    }

    /// Deliver every countdown second that has elapsed by `now`.
    pub fn advance_countdown(&mut self, now: Instant) {
        self.sync_countdown(now);
        while let Some(epoch) = self.countdown.poll(now) {
            self.typing.tick_for(epoch);
            self.sync_countdown(now);
        }
    }

    fn select(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "switching difficulty");
        self.typing.select_difficulty(difficulty);
    }

    fn quit(&mut self) -> Control {
        self.countdown.cancel();
        Control::Quit
    }

    fn sync_countdown(&mut self, now: Instant) {
        let running = self.typing.phase() == Phase::Running;
        self.countdown.sync(self.typing.epoch(), running, now);
    }
}
