//! Run settings
//!
//! Loaded from an optional JSON file; anything missing keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::DEFAULT_PARSE_SEED;

/// Headless run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds simulated per tick
    pub dt: f32,
    /// Tick budget per level attempt before giving up
    pub max_ticks: u64,
    /// Attempts per level before the run ends
    pub max_attempts: u32,
    /// Player walking speed (tiles/s)
    pub player_speed: f32,
    /// Seed for coin phases
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            // Two minutes of play at 60 Hz
            max_ticks: 2 * 60 * 60,
            max_attempts: 3,
            player_speed: PLAYER_SPEED,
            seed: DEFAULT_PARSE_SEED,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the tick loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0 && self.dt <= MAX_TICK) {
            return Err(Error::invalid(format!(
                "dt must be in (0, {MAX_TICK}] seconds, got {}",
                self.dt
            )));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(Error::invalid(format!(
                "player_speed must be finite and non-negative, got {}",
                self.player_speed
            )));
        }
        Ok(())
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or malformed
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
