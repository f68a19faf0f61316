use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Difficulty levels offered by the selector
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in selector order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// Sentence pool and countdown length for one difficulty level
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub sentences: Vec<String>,
    pub time_limit_secs: u32,
}

impl Tier {
    pub fn new<S: Into<String>>(sentences: impl IntoIterator<Item = S>, time_limit_secs: u32) -> Self {
        Self {
            sentences: sentences.into_iter().map(Into::into).collect(),
            time_limit_secs,
        }
    }

    fn validate(&self, difficulty: Difficulty) -> Result<()> {
        if self.sentences.is_empty() {
            return Err(Error::EmptyTier(difficulty));
        }
        if self.sentences.iter().any(|s| s.is_empty()) {
            return Err(Error::EmptySentence(difficulty));
        }
        if self.time_limit_secs == 0 {
            return Err(Error::ZeroTimeLimit(difficulty));
        }
        Ok(())
    }
}

const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

const EASY_SENTENCES: [&str; 2] = [
    "This is an easy sentence for typing practice.",
    "Typing is fun and easy when you practice rgit egularly.",
];

const MEDIUM_SENTENCES: [&str; 2] = [
    "Medium-level @ sentences are % a good challenge > for typing practice.",
    "Typing accurately + and quickly O takes practice & and dedication.",
];

const HARD_SENTENCES: [&str; 2] = [
    "(Hard senten!ces test *your t-yping skil[ls to the limit.",
    "Improving%% you#r typing spe^ed is a rew@arding exp()erience.",
];

/// Read-only lookup from difficulty to its tier
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    easy: Tier,
    medium: Tier,
    hard: Tier,
}

impl Catalog {
    /// Build a catalog, rejecting tiers that could not host a session.
    pub fn new(easy: Tier, medium: Tier, hard: Tier) -> Result<Self> {
        easy.validate(Difficulty::Easy)?;
        medium.validate(Difficulty::Medium)?;
        hard.validate(Difficulty::Hard)?;
        Ok(Self { easy, medium, hard })
    }

    /// The hardcoded practice sentences shipped with the app
    pub fn builtin() -> Self {
        Self {
            easy: Tier::new(EASY_SENTENCES, DEFAULT_TIME_LIMIT_SECS),
            medium: Tier::new(MEDIUM_SENTENCES, DEFAULT_TIME_LIMIT_SECS),
            hard: Tier::new(HARD_SENTENCES, DEFAULT_TIME_LIMIT_SECS),
        }
    }

    pub fn tier(&self, difficulty: Difficulty) -> &Tier {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
