//! Difficulty progression
//!
//! Pure functions of (score, elapsed ms) over the tuning table. Nothing here
//! holds run state, so the same manager can be shared across runs.

use serde::{Deserialize, Serialize};

use crate::tuning::{Threshold, Tuning};

/// Color count used when no threshold row applies
pub const DEFAULT_COLOR_COUNT: usize = 4;

/// Maps score and elapsed time to color count, orb speed and spawn cadence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyManager {
    tuning: Tuning,
}

impl DifficultyManager {
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Highest row whose score is at or below `score`
    fn reached(&self, score: u32) -> Option<&Threshold> {
        self.tuning.thresholds.iter().rev().find(|t| score >= t.score)
    }

    /// Number of active colors at `score`
    pub fn color_count(&self, score: u32) -> usize {
        self.reached(score)
            .map(|t| t.color_count)
            .unwrap_or(DEFAULT_COLOR_COUNT)
    }

    /// Threshold row in effect at `score`
    ///
    /// Falls back to the first row if the table starts above `score`.
    pub fn current_threshold(&self, score: u32) -> Threshold {
        self.reached(score)
            .or_else(|| self.tuning.thresholds.first())
            .copied()
            .unwrap_or(Threshold::new(0, DEFAULT_COLOR_COUNT, 1.0))
    }

    pub fn in_learning_phase(&self, score: u32) -> bool {
        score < self.tuning.learning_phase_score
    }

    /// Orb speed in px per tick for an orb spawned now
    pub fn speed(&self, score: u32, elapsed_ms: f32) -> f32 {
        let t = &self.tuning;
        if self.in_learning_phase(score) {
            return t.base_speed;
        }

        let past_learning = (score - t.learning_phase_score) as f32;
        let raw = t.base_speed
            + past_learning * t.speed_per_point
            + elapsed_ms.max(0.0) / t.speed_time_divisor_ms;
        let multiplier = self.current_threshold(score).speed_multiplier;
        (raw * multiplier).min(t.max_speed)
    }

    /// Milliseconds between spawns
    pub fn spawn_interval(&self, score: u32, elapsed_ms: f32) -> f32 {
        let t = &self.tuning;
        if self.in_learning_phase(score) {
            return t.base_spawn_interval_ms;
        }

        let past_learning = (score - t.learning_phase_score) as f32;
        let reduction = (1.0
            - past_learning * t.interval_reduction_per_point
            - elapsed_ms.max(0.0) * t.interval_reduction_per_ms)
            .max(t.min_interval_factor);
        (t.base_spawn_interval_ms * reduction).max(t.min_spawn_interval_ms)
    }
}
