//! Idle/demo player
//!
//! Watches the orb closest to the avatar and switches to its color. A slip
//! rate makes it pick a wrong color now and then so demo runs end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::{CANONICAL_COLORS, Color};
use super::orb::Orb;
use super::state::GameState;
use super::tick::TickInput;

/// Automatic color picker
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Chance (0-1) of deliberately choosing a wrong color per decision
    slip_rate: f32,
    /// Orb id the last decision was made for
    last_target: Option<u32>,
}

impl Autopilot {
    pub fn new(seed: u64, slip_rate: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            slip_rate: slip_rate.clamp(0.0, 1.0),
            last_target: None,
        }
    }

    /// Never slips
    pub fn perfect() -> Self {
        Self::new(0, 0.0)
    }

    /// Decide this tick's input
    ///
    /// Only presses a key when the nearest orb changes, like a player would.
    pub fn input(&mut self, state: &GameState) -> TickInput {
        let Some(target) = nearest_orb(state) else {
            return TickInput::default();
        };

        if self.last_target == Some(target.id) {
            return TickInput::default();
        }
        self.last_target = Some(target.id);

        let color = if self.slip_rate > 0.0 && self.rng.random::<f32>() < self.slip_rate {
            self.wrong_color(target.color)
        } else {
            target.color
        };

        if color == state.colors.current() {
            return TickInput::default();
        }
        TickInput::press(color.key())
    }

    fn wrong_color(&mut self, avoid: Color) -> Color {
        let choices: Vec<Color> = CANONICAL_COLORS
            .iter()
            .copied()
            .filter(|c| *c != avoid)
            .collect();
        choices[self.rng.random_range(0..choices.len())]
    }
}

/// Orb closest to the avatar
fn nearest_orb(state: &GameState) -> Option<&Orb> {
    let anchor = state.viewport.anchor();
    state.orbs.orbs().iter().min_by(|a, b| {
        a.pos
            .distance_squared(anchor)
            .total_cmp(&b.pos.distance_squared(anchor))
    })
}
