//! Keyboard input mapping
//!
//! Browsers deliver `keydown` with auto-repeat; the game only wants the edge
//! of each press, queued until the next tick consumes it.

use crate::sim::{ColorKey, TickInput};

/// Map a `KeyboardEvent.key` value to a color key
///
/// Arrow keys are the canonical bindings; WASD mirrors them. Anything else
/// is ignored.
pub fn key_to_color_key(key: &str) -> Option<ColorKey> {
    match key {
        "ArrowUp" | "Up" | "w" | "W" => Some(ColorKey::Up),
        "ArrowRight" | "Right" | "d" | "D" => Some(ColorKey::Right),
        "ArrowDown" | "Down" | "s" | "S" => Some(ColorKey::Down),
        "ArrowLeft" | "Left" | "a" | "A" => Some(ColorKey::Left),
        _ => None,
    }
}

/// Keys handled on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Start a new run
    Restart,
    /// Leave the game-over screen for the menu
    Menu,
    /// Forget the stored high score
    ResetHighScore,
}

/// Map a `KeyboardEvent.key` value to a game-over screen command
pub fn screen_command(key: &str) -> Option<ScreenCommand> {
    match key {
        " " | "Enter" => Some(ScreenCommand::Restart),
        "Escape" | "Esc" => Some(ScreenCommand::Menu),
        "r" | "R" => Some(ScreenCommand::ResetHighScore),
        _ => None,
    }
}

/// Collects "just pressed" edges between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyEdges {
    held: [bool; 4],
    pending: Vec<ColorKey>,
}

fn slot(key: ColorKey) -> usize {
    match key {
        ColorKey::Up => 0,
        ColorKey::Right => 1,
        ColorKey::Down => 2,
        ColorKey::Left => 3,
    }
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key going down; returns true for any color key
    ///
    /// Auto-repeats of a held key are consumed without queueing a press.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(color_key) = key_to_color_key(key) else {
            return false;
        };
        let held = &mut self.held[slot(color_key)];
        if !*held {
            *held = true;
            self.pending.push(color_key);
        }
        true
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(color_key) = key_to_color_key(key) {
            self.held[slot(color_key)] = false;
        }
    }

    /// Forget held keys (window lost focus)
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    /// Hand queued presses to the next tick
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            presses: std::mem::take(&mut self.pending),
        }
    }
}
