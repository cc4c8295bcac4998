//! Runtime settings
//!
//! Everything about a run that is not game balance: arena size, frame
//! pacing, seed, and tick limit. Loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, FPS};
use crate::error::{Error, Result, read_json, write_json};
use crate::sim::Arena;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena size in pixels
    pub width: f32,
    pub height: f32,
    /// Frames (and ticks) per second
    pub fps: u32,
    /// Run seed; taken from the clock when absent
    pub seed: Option<u64>,
    /// Stop after this many simulated ticks
    pub max_ticks: Option<u64>,
    /// Let the built-in autopilot play
    pub autopilot: bool,
    /// Pace frames against the wall clock instead of running flat out
    pub realtime: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            fps: FPS,
            seed: None,
            max_ticks: Some(60 * 60),
            autopilot: true,
            realtime: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Settings = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(Error::InvalidSettings("arena size must be finite".to_string()));
        }
        if self.fps == 0 {
            return Err(Error::InvalidSettings("fps must be at least 1".to_string()));
        }
        self.tuning.validate()?;

        let fits = self.arena().max_blob_radius();
        if fits < self.tuning.min_radius || fits < self.tuning.player_start_radius {
            return Err(Error::InvalidSettings(format!(
                "{}x{} arena is too small for the configured blob sizes",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.width, self.height)
    }

    /// Seed from settings, or from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }
}
