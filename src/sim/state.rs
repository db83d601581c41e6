//! Game state and core simulation types
//!
//! Everything a run needs lives here, serializable so a run can be replayed
//! or inspected.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Color, ColorState};
use super::difficulty::DifficultyManager;
use super::orb::{FieldBounds, OrbField};
use super::score::ScoreState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Orbs spawning and moving
    Playing,
    /// Out of lives; ticks are ignored
    GameOver,
}

/// Something presentation code may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player pressed a color key (fires on reselection too)
    ColorChanged(Color),
    OrbSpawned { id: u32, color: Color },
    OrbExpired { id: u32 },
    /// Orb matched the avatar color
    Match { color: Color, score: u32 },
    /// Orb hit the avatar in the wrong color
    Miss { color: Color, lives: u8 },
    LifeGained { lives: u8 },
    /// Emitted once, on the tick that takes the last life
    RunEnded { final_score: u32 },
}

/// Screen geometry supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Distance of the avatar above the bottom edge
    pub avatar_bottom_offset: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            avatar_bottom_offset: AVATAR_BOTTOM_OFFSET,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Avatar position: centered horizontally, near the bottom
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.avatar_bottom_offset)
    }

    /// Orbs farther than this from the anchor are discarded
    pub fn expiry_distance(&self, margin: f32) -> f32 {
        self.width + self.height + margin
    }

    /// Horizontal spawn band, collapsed to the center on narrow screens
    pub fn spawn_band(&self, edge_margin: f32) -> (f32, f32) {
        let lo = edge_margin;
        let hi = self.width - edge_margin;
        if hi > lo {
            (lo, hi)
        } else {
            let mid = self.width / 2.0;
            (mid, mid)
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn position and color draws
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Milliseconds since the run started, from the frame clock
    pub elapsed_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub viewport: Viewport,
    pub colors: ColorState,
    pub score: ScoreState,
    pub orbs: OrbField,
    pub difficulty: DifficultyManager,
    /// Events produced since the last drain (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let score = ScoreState::new(tuning.max_lives, tuning.hits_per_life);
        let difficulty = DifficultyManager::new(tuning);

        let mut colors = ColorState::new();
        colors.set_active_colors(difficulty.color_count(0));

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            elapsed_ms: 0.0,
            time_ticks: 0,
            viewport,
            colors,
            score,
            orbs: OrbField::new(),
            difficulty,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Geometry for collision and expiry checks this tick
    pub fn field_bounds(&self) -> FieldBounds {
        let tuning = self.difficulty.tuning();
        FieldBounds {
            anchor: self.viewport.anchor(),
            collision_radius: tuning.collision_radius,
            expiry_distance: self.viewport.expiry_distance(tuning.expiry_margin),
        }
    }

    /// Update screen geometry (window resize)
    ///
    /// Orbs already in flight keep their velocity.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
