//! Score, lives and life-regain bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::{HITS_PER_LIFE, MAX_LIVES};

/// Per-run scoring state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    score: u32,
    lives: u8,
    max_lives: u8,
    /// Set once lives drop below max; cleared when they are back at max
    has_lost_life: bool,
    /// Matches since the last miss or life gain
    hits_since_last_life_loss: u8,
    hits_per_life: u8,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(MAX_LIVES, HITS_PER_LIFE)
    }
}

impl ScoreState {
    pub fn new(max_lives: u8, hits_per_life: u8) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
            has_lost_life: false,
            hits_since_last_life_loss: 0,
            hits_per_life: hits_per_life.max(1),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    pub fn has_lost_life(&self) -> bool {
        self.has_lost_life
    }

    pub fn hits_since_last_life_loss(&self) -> u8 {
        self.hits_since_last_life_loss
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Count a match; returns true if it earned a life back
    pub fn record_match(&mut self) -> bool {
        self.score = self.score.saturating_add(1);

        if !(self.has_lost_life && self.lives < self.max_lives) {
            return false;
        }
        self.hits_since_last_life_loss += 1;
        if self.hits_since_last_life_loss >= self.hits_per_life {
            self.gain_life();
            return true;
        }
        false
    }

    fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(self.max_lives);
        self.hits_since_last_life_loss = 0;
        if self.lives >= self.max_lives {
            self.has_lost_life = false;
        }
    }

    /// Count a miss; returns true if the run is over
    pub fn record_miss(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.has_lost_life = true;
        self.hits_since_last_life_loss = 0;
        self.is_out_of_lives()
    }
}
