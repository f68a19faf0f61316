use std::collections::BTreeSet;

use crate::catalog::Difficulty;

/// Where a session sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// How a sentence character should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    /// The character the user should type next
    Next,
    Untyped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub selected_difficulty: Difficulty,
    pub active_sentence: String,
    pub typed_input: String,
    pub mismatch_positions: BTreeSet<usize>,
    pub started_at_millis: Option<i64>,
    pub completed_at_millis: Option<i64>,
    pub is_completed: bool,
    pub remaining_seconds: u32,
    pub accuracy_percent: u8,
}

impl SessionState {
    pub fn new(difficulty: Difficulty, sentence: String, time_limit_secs: u32) -> Self {
        Self {
            selected_difficulty: difficulty,
            active_sentence: sentence,
            typed_input: String::new(),
            mismatch_positions: BTreeSet::new(),
            started_at_millis: None,
            completed_at_millis: None,
            is_completed: false,
            remaining_seconds: time_limit_secs,
            accuracy_percent: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_completed {
            Phase::Completed
        } else if self.started_at_millis.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// Per-character styling of the active sentence, derived from the typed text.
    pub fn classify(&self) -> Vec<(char, CharStatus)> {
        let typed: Vec<char> = self.typed_input.chars().collect();

        self.active_sentence
            .chars()
            .enumerate()
            .map(|(idx, expected)| {
                let status = match typed.get(idx) {
                    Some(&c) if c == expected => CharStatus::Correct,
                    Some(_) => CharStatus::Incorrect,
                    None if idx == typed.len() => CharStatus::Next,
                    None => CharStatus::Untyped,
                };
                (expected, status)
            })
            .collect()
    }
}
