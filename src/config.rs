//! Runtime configuration.
//!
//! Read from the JSON file named by `ORRERY_CONFIG`, or `orrery.json` in the
//! working directory. Every field has a default, so a partial file works:
//!
//! ```json
//! {
//!   "startup_preset": "star_wars",
//!   "orbit": { "time_scale": 1.0 },
//!   "focus": { "transition_seconds": 0.8 }
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};
use crate::focus::FocusSettings;
use crate::generators::{SystemRecipe, get_preset};
use crate::integrator::OrbitSettings;

pub const CONFIG_ENV: &str = "ORRERY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "orrery.json";

/// Startup value that selects a random system.
pub const RANDOM_PRESET: &str = "random";

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub orbit: OrbitSettings,
    pub focus: FocusSettings,
    /// JSON file holding saved systems.
    pub store_path: PathBuf,
    /// Preset id or `"random"`.
    pub startup_preset: String,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitSettings::default(),
            focus: FocusSettings::default(),
            store_path: PathBuf::from("orrery_saves.json"),
            startup_preset: "real".to_string(),
        }
    }
}

impl OrreryConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| OrreryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break focus framing or the orbit tick.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<()> {
            Err(OrreryError::InvalidConfig { field, reason })
        };

        let focus = &self.focus;
        let finite = [
            ("focus.transition_seconds", focus.transition_seconds),
            ("focus.distance_factor", focus.distance_factor),
            ("focus.min_distance", focus.min_distance),
            ("focus.max_distance", focus.max_distance),
            ("focus.elevation", focus.elevation),
            ("focus.highlight_intensity", focus.highlight_intensity),
            ("orbit.time_scale", self.orbit.time_scale),
            ("orbit.spin_per_frame", self.orbit.spin_per_frame),
            ("orbit.focused_spin_bonus", self.orbit.focused_spin_bonus),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }
        if focus.overview_position.iter().any(|v| !v.is_finite()) {
            return invalid("focus.overview_position", "must be finite");
        }
        if focus.transition_seconds < 0.0 {
            return invalid("focus.transition_seconds", "must not be negative");
        }
        if focus.min_distance > focus.max_distance {
            return invalid("focus.min_distance", "must not exceed focus.max_distance");
        }
        Ok(())
    }

    /// Load the configured file, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_or_default() -> Self {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Ignoring configuration {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// The system generated at startup.
    pub fn startup_recipe(&self) -> Result<SystemRecipe> {
        if self.startup_preset == RANDOM_PRESET {
            return Ok(SystemRecipe::Random);
        }
        get_preset(&self.startup_preset)
            .map(SystemRecipe::Curated)
            .ok_or_else(|| OrreryError::UnknownPreset(self.startup_preset.clone()))
    }
}
