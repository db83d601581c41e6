//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//!
//! High-score storage lives in `highscores`.

pub mod input;
pub mod time;

pub use input::{KeyEdges, ScreenCommand, key_to_color_key, screen_command};
pub use time::FrameClock;
