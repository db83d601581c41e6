//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so it can be tweaked from a
//! JSON file without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::color::CANONICAL_COLORS;

/// One row of the progression table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Minimum score for this row to apply
    pub score: u32,
    /// Number of canonical colors orbs may spawn with
    pub color_count: usize,
    /// Multiplier applied to the raw orb speed
    pub speed_multiplier: f32,
}

impl Threshold {
    pub const fn new(score: u32, color_count: usize, speed_multiplier: f32) -> Self {
        Self {
            score,
            color_count,
            speed_multiplier,
        }
    }
}

/// Default progression: all four colors throughout, speed ramps to 2x by 75
pub const DEFAULT_THRESHOLDS: [Threshold; 8] = [
    Threshold::new(0, 4, 1.0),
    Threshold::new(5, 4, 1.05),
    Threshold::new(10, 4, 1.12),
    Threshold::new(18, 4, 1.25),
    Threshold::new(28, 4, 1.4),
    Threshold::new(40, 4, 1.6),
    Threshold::new(55, 4, 1.8),
    Threshold::new(75, 4, 2.0),
];

/// Reasons a tuning file is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("threshold table is empty")]
    NoThresholds,
    #[error("threshold scores must be strictly ascending (row {index})")]
    UnorderedThresholds { index: usize },
    #[error("threshold row {index} has color count {count}, expected 1..=4")]
    BadColorCount { index: usize, count: usize },
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be in (0, 1]")]
    FactorOutOfRange { field: &'static str },
    #[error("threshold row {index} has speed multiplier below 1.0")]
    SlowMultiplier { index: usize },
    #[error("speed multipliers must not decrease (row {index})")]
    DecreasingMultiplier { index: usize },
    #[error("{min} must not exceed {base}")]
    MinAboveBase {
        min: &'static str,
        base: &'static str,
    },
}

/// Balance knobs for difficulty and gameplay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scores below this stay at base speed and base spawn interval
    pub learning_phase_score: u32,
    /// Orb speed during the learning phase (px per tick)
    pub base_speed: f32,
    /// Hard ceiling on orb speed (px per tick)
    pub max_speed: f32,
    /// Speed added per point past the learning phase
    pub speed_per_point: f32,
    /// Elapsed milliseconds per extra px/tick of speed
    pub speed_time_divisor_ms: f32,
    /// Spawn interval during the learning phase (ms)
    pub base_spawn_interval_ms: f32,
    /// Spawn interval floor (ms)
    pub min_spawn_interval_ms: f32,
    /// Fraction of the base interval removed per point past the learning phase
    pub interval_reduction_per_point: f32,
    /// Fraction of the base interval removed per elapsed millisecond
    pub interval_reduction_per_ms: f32,
    /// Smallest allowed reduction factor
    pub min_interval_factor: f32,
    /// Progression table, ascending by score
    pub thresholds: Vec<Threshold>,

    pub max_lives: u8,
    pub hits_per_life: u8,
    pub collision_radius: f32,
    pub expiry_margin: f32,
    pub spawn_offset: f32,
    pub spawn_edge_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            learning_phase_score: 5,
            base_speed: 5.0,
            max_speed: 25.0,
            speed_per_point: 0.1,
            speed_time_divisor_ms: 30_000.0,
            base_spawn_interval_ms: 4500.0,
            min_spawn_interval_ms: 1500.0,
            interval_reduction_per_point: 0.01,
            interval_reduction_per_ms: 0.00006,
            min_interval_factor: 0.35,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),

            max_lives: MAX_LIVES,
            hits_per_life: HITS_PER_LIFE,
            collision_radius: COLLISION_RADIUS,
            expiry_margin: EXPIRY_MARGIN,
            spawn_offset: SPAWN_OFFSET,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check the invariants the difficulty functions rely on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.thresholds.is_empty() {
            return Err(TuningError::NoThresholds);
        }
        for (index, pair) in self.thresholds.windows(2).enumerate() {
            if pair[1].score <= pair[0].score {
                return Err(TuningError::UnorderedThresholds { index: index + 1 });
            }
            if pair[1].speed_multiplier < pair[0].speed_multiplier {
                return Err(TuningError::DecreasingMultiplier { index: index + 1 });
            }
        }
        for (index, row) in self.thresholds.iter().enumerate() {
            if row.color_count == 0 || row.color_count > CANONICAL_COLORS.len() {
                return Err(TuningError::BadColorCount {
                    index,
                    count: row.color_count,
                });
            }
            if row.speed_multiplier.is_nan() || row.speed_multiplier < 1.0 {
                return Err(TuningError::SlowMultiplier { index });
            }
        }

        let positive = [
            ("base_speed", self.base_speed),
            ("max_speed", self.max_speed),
            ("speed_time_divisor_ms", self.speed_time_divisor_ms),
            ("base_spawn_interval_ms", self.base_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("collision_radius", self.collision_radius),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        let non_negative = [
            ("speed_per_point", self.speed_per_point),
            ("interval_reduction_per_point", self.interval_reduction_per_point),
            ("interval_reduction_per_ms", self.interval_reduction_per_ms),
            ("expiry_margin", self.expiry_margin),
            ("spawn_offset", self.spawn_offset),
            ("spawn_edge_margin", self.spawn_edge_margin),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { field });
            }
        }
        let factor = self.min_interval_factor;
        if factor.is_nan() || factor <= 0.0 || factor > 1.0 {
            return Err(TuningError::FactorOutOfRange {
                field: "min_interval_factor",
            });
        }
        if self.max_lives == 0 {
            return Err(TuningError::NonPositive { field: "max_lives" });
        }
        if self.hits_per_life == 0 {
            return Err(TuningError::NonPositive {
                field: "hits_per_life",
            });
        }

        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            return Err(TuningError::MinAboveBase {
                min: "min_spawn_interval_ms",
                base: "base_spawn_interval_ms",
            });
        }
        if self.base_speed > self.max_speed {
            return Err(TuningError::MinAboveBase {
                min: "base_speed",
                base: "max_speed",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_lives": 5 }"#).unwrap();
        assert_eq!(tuning.max_lives, 5);
        assert_eq!(tuning.base_spawn_interval_ms, 4500.0);
        assert_eq!(tuning.thresholds.len(), 8);
    }

    #[test]
    fn test_json_round_trip_preserves_table() {
        let tuning = Tuning::default();
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = Tuning::from_json(r#"{ "thresholds": [] }"#).unwrap_err();
        assert!(matches!(err, TuningError::NoThresholds));
    }

    #[test]
    fn test_rejects_unordered_table() {
        let json = r#"{ "thresholds": [
            { "score": 0, "color_count": 2, "speed_multiplier": 1.0 },
            { "score": 10, "color_count": 3, "speed_multiplier": 1.2 },
            { "score": 10, "color_count": 4, "speed_multiplier": 1.4 }
        ] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::UnorderedThresholds { index: 2 }));
    }

    #[test]
    fn test_rejects_bad_color_count() {
        let json = r#"{ "thresholds": [
            { "score": 0, "color_count": 5, "speed_multiplier": 1.0 }
        ] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::BadColorCount { index: 0, count: 5 }));
    }

    #[test]
    fn test_rejects_min_interval_above_base() {
        let err = Tuning::from_json(r#"{ "min_spawn_interval_ms": 9000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::MinAboveBase { .. }));
    }

    #[test]
    fn test_rejects_negative_ramp() {
        let err = Tuning::from_json(r#"{ "speed_per_point": -0.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative {
                field: "speed_per_point"
            }
        ));

        let err = Tuning::from_json(r#"{ "interval_reduction_per_ms": -0.001 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative {
                field: "interval_reduction_per_ms"
            }
        ));
    }

    #[test]
    fn test_rejects_negative_spawn_offset() {
        let err = Tuning::from_json(r#"{ "spawn_offset": -10 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { .. }));
    }

    #[test]
    fn test_rejects_interval_factor_out_of_range() {
        for factor in ["3.0", "0", "-0.2"] {
            let json = format!(r#"{{ "min_interval_factor": {} }}"#, factor);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(matches!(err, TuningError::FactorOutOfRange { .. }));
        }
        assert!(Tuning::from_json(r#"{ "min_interval_factor": 1.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_slowing_multiplier() {
        let json = r#"{ "thresholds": [
            { "score": 0, "color_count": 4, "speed_multiplier": 0.5 }
        ] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::SlowMultiplier { index: 0 }));
    }

    #[test]
    fn test_rejects_decreasing_multipliers() {
        let json = r#"{ "thresholds": [
            { "score": 0, "color_count": 4, "speed_multiplier": 1.5 },
            { "score": 10, "color_count": 4, "speed_multiplier": 1.2 }
        ] }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::DecreasingMultiplier { index: 1 }));
    }

    #[test]
    fn test_accepted_tuning_keeps_curve_monotonic() {
        let json = r#"{ "speed_per_point": 0.5, "min_interval_factor": 0.9 }"#;
        let d = crate::sim::DifficultyManager::new(Tuning::from_json(json).unwrap());
        assert!(d.speed(20, 0.0) >= d.speed(5, 0.0));
        assert!(d.spawn_interval(20, 0.0) <= 4500.0);
        assert!(d.spawn_interval(20, 0.0) >= 1500.0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json").unwrap_err(),
            TuningError::Parse(_)
        ));
    }
}
