//! Match resolution: an orb reached the avatar, was it the right color?

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorState};
use super::difficulty::DifficultyManager;
use super::score::ScoreState;

/// Result of resolving one collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Match {
        color: Color,
        score: u32,
        life_gained: bool,
    },
    Miss {
        color: Color,
        lives: u8,
        run_over: bool,
    },
}

/// Resolve a collided orb against the selected color
///
/// A match scores, refreshes the active colors for the new score and may
/// earn a life back. A miss costs a life.
pub fn resolve(
    orb_color: Color,
    colors: &mut ColorState,
    score: &mut ScoreState,
    difficulty: &DifficultyManager,
) -> Resolution {
    if colors.is_match(orb_color) {
        let life_gained = score.record_match();
        colors.set_active_colors(difficulty.color_count(score.score()));
        Resolution::Match {
            color: orb_color,
            score: score.score(),
            life_gained,
        }
    } else {
        let run_over = score.record_miss();
        Resolution::Miss {
            color: orb_color,
            lives: score.lives(),
            run_over,
        }
    }
}
