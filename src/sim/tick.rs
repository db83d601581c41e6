//! Per-frame simulation tick
//!
//! Order within a tick: color input, spawn decision, orb advance, then match
//! resolution for every orb that reached the avatar.

use glam::Vec2;
use rand::Rng;

use super::color::ColorKey;
use super::orb::OrbFate;
use super::resolve::{Resolution, resolve};
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Color keys pressed since the last tick, in press order
    pub presses: Vec<ColorKey>,
}

impl TickInput {
    pub fn press(key: ColorKey) -> Self {
        Self { presses: vec![key] }
    }
}

/// Advance the game by one frame
///
/// `dt_ms` feeds the elapsed-time clock that drives spawn cadence and speed
/// ramp; orbs move one step per call regardless of `dt_ms`.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms.max(0.0);

    for &key in &input.presses {
        let color = state.colors.select(key);
        state.events.push(GameEvent::ColorChanged(color));
    }

    try_spawn(state);

    let bounds = state.field_bounds();
    let exits = state.orbs.advance(&bounds);
    for exit in exits {
        // The run ends on the miss that takes the last life
        if state.phase == GamePhase::GameOver {
            break;
        }
        match exit.fate {
            OrbFate::Expired => state.events.push(GameEvent::OrbExpired { id: exit.id }),
            OrbFate::Collided => {
                let resolution = resolve(
                    exit.color,
                    &mut state.colors,
                    &mut state.score,
                    &state.difficulty,
                );
                apply_resolution(state, resolution);
            }
        }
    }
}

/// Spawn one orb if the spawn interval has elapsed
fn try_spawn(state: &mut GameState) {
    let score = state.score.score();
    let now = state.elapsed_ms;
    let interval = state.difficulty.spawn_interval(score, now);
    if !state.orbs.spawn_due(now, interval) {
        return;
    }

    state
        .colors
        .set_active_colors(state.difficulty.color_count(score));
    let Some(color) = state.colors.random_active(&mut state.rng) else {
        log::warn!("No active colors at score {}, skipping spawn", score);
        return;
    };

    let tuning = state.difficulty.tuning();
    let (lo, hi) = state.viewport.spawn_band(tuning.spawn_edge_margin);
    let x = if hi > lo {
        state.rng.random_range(lo..=hi)
    } else {
        lo
    };
    let pos = Vec2::new(x, -tuning.spawn_offset);
    let speed = state.difficulty.speed(score, now);
    let anchor = state.viewport.anchor();

    let orb = state.orbs.spawn(now, pos, anchor, color, speed);
    log::debug!(
        "Spawned orb {} ({}) at x={:.0}, speed {:.2}, next in {:.0} ms",
        orb.id,
        color.name(),
        x,
        speed,
        interval
    );
    let id = orb.id;
    state.events.push(GameEvent::OrbSpawned { id, color });
}

fn apply_resolution(state: &mut GameState, resolution: Resolution) {
    match resolution {
        Resolution::Match {
            color,
            score,
            life_gained,
        } => {
            state.events.push(GameEvent::Match { color, score });
            if life_gained {
                let lives = state.score.lives();
                log::info!("Life regained ({} lives)", lives);
                state.events.push(GameEvent::LifeGained { lives });
            }
        }
        Resolution::Miss {
            color,
            lives,
            run_over,
        } => {
            state.events.push(GameEvent::Miss { color, lives });
            if run_over {
                let final_score = state.score.score();
                log::info!("Run over: score {} after {} ticks", final_score, state.time_ticks);
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::RunEnded { final_score });
            }
        }
    }
}
