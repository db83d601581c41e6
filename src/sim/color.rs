//! Color catalog and the player's color state
//!
//! Four canonical colors, each bound to one arrow direction. The player may
//! select any of them at any time; the active prefix only decides which
//! colors new orbs can spawn with.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// One of the four selectable colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

/// Canonical ordering; active colors are always a prefix of this
pub const CANONICAL_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

impl Color {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
        }
    }

    /// 24-bit RGB value used by renderers
    pub fn rgb(&self) -> u32 {
        match self {
            Color::Red => 0xff0000,
            Color::Blue => 0x0080ff,
            Color::Yellow => 0xffd700,
            Color::Green => 0x00ff00,
        }
    }

    /// Direction key that selects this color
    pub fn key(&self) -> ColorKey {
        match self {
            Color::Red => ColorKey::Up,
            Color::Blue => ColorKey::Right,
            Color::Yellow => ColorKey::Down,
            Color::Green => ColorKey::Left,
        }
    }
}

/// Logical direction input bound to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorKey {
    Up,
    Right,
    Down,
    Left,
}

impl ColorKey {
    /// Color bound to this key
    pub fn color(&self) -> Color {
        match self {
            ColorKey::Up => Color::Red,
            ColorKey::Right => Color::Blue,
            ColorKey::Down => Color::Yellow,
            ColorKey::Left => Color::Green,
        }
    }

    /// Parse a logical key name ("UP", "right", ...); unknown names yield None
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "UP" => Some(ColorKey::Up),
            "RIGHT" => Some(ColorKey::Right),
            "DOWN" => Some(ColorKey::Down),
            "LEFT" => Some(ColorKey::Left),
            _ => None,
        }
    }
}

/// Selected color plus the spawnable prefix of the canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorState {
    current: Color,
    active_count: usize,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            current: Color::Red,
            active_count: CANONICAL_COLORS.len(),
        }
    }
}

impl ColorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected color
    pub fn current(&self) -> Color {
        self.current
    }

    /// Colors new orbs may spawn with
    pub fn active(&self) -> &[Color] {
        &CANONICAL_COLORS[..self.active_count]
    }

    /// Keep the first `count` canonical colors active
    ///
    /// If the selected color drops out of the active set it snaps to the
    /// first active color.
    pub fn set_active_colors(&mut self, count: usize) {
        self.active_count = count.min(CANONICAL_COLORS.len());
        let active = self.active();
        if let Some(&first) = active.first() {
            if !active.contains(&self.current) {
                self.current = first;
            }
        }
    }

    /// Select the color bound to `key`
    ///
    /// Selection is never restricted by the active set. Every press counts as
    /// a change, reselecting the current color included.
    pub fn select(&mut self, key: ColorKey) -> Color {
        self.current = key.color();
        self.current
    }

    /// Select by logical key name; returns false for unmapped names
    pub fn select_named(&mut self, name: &str) -> bool {
        match ColorKey::from_str(name) {
            Some(key) => {
                self.select(key);
                true
            }
            None => false,
        }
    }

    /// Uniform draw from the active colors (None if the set is empty)
    pub fn random_active<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Color> {
        self.active().choose(rng).copied()
    }

    pub fn is_match(&self, color: Color) -> bool {
        color == self.current
    }
}
