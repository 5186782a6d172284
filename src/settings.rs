//! Simulation settings
//!
//! The one shared tuning record read by the pipeline every frame. Writes that
//! need side effects (speed rescale) go through `World` setters; this type is
//! plain data plus JSON persistence for the headless runner.
//!
//! Preconditions, not checked at runtime: `body_radius > 0`,
//! `arena_half_extent > 0`, `body_speed >= 0`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HALF_EXTENT, BODY_RADIUS, BODY_SPEED, MIN_CELL_SIZE};

/// Errors loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arena and body tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Walls sit at ±this on both axes
    pub arena_half_extent: f32,
    /// Radius shared by every body
    pub body_radius: f32,
    /// Speed every body travels at
    pub body_speed: f32,
    /// Whether the renderer should draw bodies at all
    pub bodies_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_half_extent: ARENA_HALF_EXTENT,
            body_radius: BODY_RADIUS,
            body_speed: BODY_SPEED,
            bodies_visible: true,
        }
    }
}

impl Settings {
    /// Distance at which two bodies touch
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.body_radius * 2.0
    }

    /// Spatial hash cell size: one body diameter, never below `MIN_CELL_SIZE`
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.contact_distance().max(MIN_CELL_SIZE)
    }

    /// Range body centers may be spawned in, per axis
    ///
    /// `None` when the arena is too small to hold a single body.
    pub fn spawn_range(&self) -> Option<(f32, f32)> {
        let lo = -self.arena_half_extent + self.body_radius;
        let hi = self.arena_half_extent - self.body_radius;
        (lo <= hi).then_some((lo, hi))
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
