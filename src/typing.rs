use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::{Catalog, Difficulty};
use crate::clock::{Clock, SystemClock};
use crate::session::{CharStatus, Phase, SessionState};
use crate::util::{accuracy_percent, mismatch_positions, word_count, words_per_minute};

/// How a session reached completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    ExactMatch,
    Timeout,
}

/// Owns the current typing session and applies every state transition to it.
///
/// Each new session (initial, restart, difficulty change) gets a fresh epoch so
/// that countdown ticks scheduled for an older session can be told apart.
#[derive(Debug)]
pub struct TypingTest {
    catalog: Catalog,
    clock: Box<dyn Clock>,
    rng: StdRng,
    epoch: u64,
    state: SessionState,
}

impl TypingTest {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_parts(
            Catalog::builtin(),
            difficulty,
            Box::new(SystemClock),
            StdRng::from_entropy(),
        )
    }

    pub fn with_parts(
        catalog: Catalog,
        difficulty: Difficulty,
        clock: Box<dyn Clock>,
        mut rng: StdRng,
    ) -> Self {
        let state = fresh_session(&catalog, difficulty, &mut rng);
        Self {
            catalog,
            clock,
            rng,
            epoch: 0,
            state,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.selected_difficulty
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        debug!(%difficulty, "difficulty selected");
        self.replace_session(difficulty);
    }

    pub fn restart(&mut self) {
        self.replace_session(self.state.selected_difficulty);
    }

    /// Apply the full current contents of the input field.
    pub fn submit_input(&mut self, text: &str) {
        if self.state.is_completed {
            return;
        }

        if self.state.started_at_millis.is_none() {
            self.state.started_at_millis = Some(self.clock.now_millis());
            debug!(epoch = self.epoch, "session started");
        }

        self.state.typed_input = text.to_string();
        self.state.mismatch_positions = mismatch_positions(text, &self.state.active_sentence);

        if self.state.typed_input == self.state.active_sentence {
            self.complete(Completion::ExactMatch);
        }
    }

    /// One elapsed second of countdown. Returns whether it was applied.
    pub fn tick(&mut self) -> bool {
        if self.phase() != Phase::Running || self.state.remaining_seconds == 0 {
            return false;
        }

        self.state.remaining_seconds -= 1;
        if self.state.remaining_seconds == 0 {
            self.complete(Completion::Timeout);
        }
        true
    }

    /// Tick on behalf of the session with the given epoch; stale ticks are dropped.
    pub fn tick_for(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            debug!(stale = epoch, current = self.epoch, "ignoring stale tick");
            return false;
        }
        self.tick()
    }

    /// Words per minute over the completed session, 0 when it never started or finished.
    pub fn speed_wpm(&self) -> u32 {
        match (self.state.started_at_millis, self.state.completed_at_millis) {
            (Some(started), Some(completed)) => {
                words_per_minute(word_count(&self.state.typed_input), completed - started)
            }
            _ => 0,
        }
    }

    pub fn classify(&self) -> Vec<(char, CharStatus)> {
        self.state.classify()
    }

    fn complete(&mut self, how: Completion) {
        self.state.completed_at_millis = Some(self.clock.now_millis());
        self.state.is_completed = true;
        self.state.accuracy_percent =
            accuracy_percent(&self.state.typed_input, &self.state.active_sentence);

        info!(
            epoch = self.epoch,
            ?how,
            wpm = self.speed_wpm(),
            accuracy = self.state.accuracy_percent,
            "session completed"
        );
    }

    fn replace_session(&mut self, difficulty: Difficulty) {
        self.epoch += 1;
        self.state = fresh_session(&self.catalog, difficulty, &mut self.rng);
    }
}

fn fresh_session(catalog: &Catalog, difficulty: Difficulty, rng: &mut StdRng) -> SessionState {
    let tier = catalog.tier(difficulty);
    let sentence = tier.sentences.choose(rng).cloned().unwrap_or_default();
    SessionState::new(difficulty, sentence, tier.time_limit_secs)
}
