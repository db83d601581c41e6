//! Color Shift Dash - A color-matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, orbs, scoring, game state)
//! - `session`: Run lifecycle around the simulation (high score, listeners)
//! - `platform`: Browser/native platform abstraction
//! - `highscores`: Single high-score persistence
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreRecord, HighScoreStore, MemoryStore};
pub use session::{GameListener, Session};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference viewport (16:9)
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 576.0;
    /// Avatar sits this far above the bottom edge, centered horizontally
    pub const AVATAR_BOTTOM_OFFSET: f32 = 100.0;

    /// Contact distance between orb and avatar centers (core 35 + orb 15, less 5 tolerance)
    pub const COLLISION_RADIUS: f32 = 45.0;
    /// Extra slack past width + height before a stray orb is discarded
    pub const EXPIRY_MARGIN: f32 = 200.0;

    /// Orbs spawn this far above the top edge
    pub const SPAWN_OFFSET: f32 = 100.0;
    /// Horizontal inset of the spawn band from either side
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;

    /// Lives at the start of a run (and the cap)
    pub const MAX_LIVES: u8 = 3;
    /// Matches needed after a miss to earn a life back
    pub const HITS_PER_LIFE: u8 = 5;

    /// Nominal frame duration in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame delta fed to the simulation (tab switches, stalls)
    pub const MAX_FRAME_MS: f32 = 100.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit direction from `from` toward `to`, scaled to `speed`
///
/// Returns zero when the points coincide.
#[inline]
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}
