//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage on the web, or
//! read from a JSON file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Viewport;
use crate::tuning::{Tuning, TuningError};

/// Reasons a settings document is rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Logical viewport width
    pub width: f32,
    /// Logical viewport height
    pub height: f32,
    /// Avatar distance above the bottom edge
    pub avatar_bottom_offset: f32,

    // === Runs ===
    /// Fixed seed for reproducible runs (random per run when unset)
    pub seed: Option<u64>,
    /// Slip rate for the demo autopilot (0.0 - 1.0)
    pub autopilot_slip_rate: f32,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            avatar_bottom_offset: AVATAR_BOTTOM_OFFSET,

            seed: None,
            autopilot_slip_rate: 0.08,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Screen geometry for the simulation
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
            avatar_bottom_offset: self.avatar_bottom_offset,
        }
    }

    /// Parse settings JSON; the embedded tuning is validated
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "color_shift_dash_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native); missing or bad files give defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
