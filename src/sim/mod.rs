//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame clock supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (by orb ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod color;
pub mod difficulty;
pub mod orb;
pub mod resolve;
pub mod score;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use color::{CANONICAL_COLORS, Color, ColorKey, ColorState};
pub use difficulty::DifficultyManager;
pub use orb::{FieldBounds, Orb, OrbExit, OrbFate, OrbField};
pub use resolve::{Resolution, resolve};
pub use score::ScoreState;
pub use state::{GameEvent, GamePhase, GameState, Viewport};
pub use tick::{TickInput, tick};
