//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a run can be rebalanced
//! from a JSON file without recompiling. Defaults come from `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Speed at radius 0 (pixels per tick)
    pub base_movement_speed: f32,
    /// `speed = base - falloff * ln(1 + radius)`
    pub speed_falloff: f32,
    /// Vision radius of an enemy with radius 0
    pub base_vision_radius: f32,
    /// Extra vision per unit of spawn radius
    pub vision_per_radius: f32,
    /// Smallest spawn radius
    pub min_radius: f32,
    /// Mean of the exponential spawn-radius draw at session start
    pub initial_expected_radius: f32,
    /// Added to the mean on every spawn once the seed population is reached
    pub expected_radius_growth: f32,
    /// Enemies spawned at session start
    pub initial_enemy_count: u32,
    pub player_start_radius: f32,
    /// Respawn timer range (ticks, inclusive)
    pub respawn_min_ticks: u32,
    pub respawn_max_ticks: u32,
    /// Bound on the Gaussian size-comparison jitter
    pub jitter_limit: f32,
    /// Bound on the uniform heading perturbation (radians)
    pub heading_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_movement_speed: BASE_MOVEMENT_SPEED,
            speed_falloff: SPEED_FALLOFF,
            base_vision_radius: BASE_VISION_RADIUS,
            vision_per_radius: VISION_PER_RADIUS,
            min_radius: MIN_RADIUS,
            initial_expected_radius: INITIAL_EXPECTED_RADIUS,
            expected_radius_growth: EXPECTED_RADIUS_GROWTH,
            initial_enemy_count: INITIAL_ENEMY_COUNT,
            player_start_radius: PLAYER_START_RADIUS,
            respawn_min_ticks: RESPAWN_MIN_TICKS,
            respawn_max_ticks: RESPAWN_MAX_TICKS,
            jitter_limit: JITTER_LIMIT,
            heading_jitter: HEADING_JITTER,
        }
    }
}

impl Tuning {
    /// Movement speed for a blob of the given radius
    #[inline]
    pub fn movement_speed(&self, radius: f32) -> f32 {
        self.base_movement_speed - self.speed_falloff * radius.ln_1p()
    }

    /// Vision radius for an enemy spawned with the given radius
    #[inline]
    pub fn vision_radius(&self, radius: f32) -> f32 {
        self.base_vision_radius + self.vision_per_radius * radius
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("base_movement_speed", self.base_movement_speed),
            ("min_radius", self.min_radius),
            ("initial_expected_radius", self.initial_expected_radius),
            ("player_start_radius", self.player_start_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("speed_falloff", self.speed_falloff),
            ("base_vision_radius", self.base_vision_radius),
            ("vision_per_radius", self.vision_per_radius),
            ("expected_radius_growth", self.expected_radius_growth),
            ("jitter_limit", self.jitter_limit),
            ("heading_jitter", self.heading_jitter),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        if self.respawn_min_ticks == 0 {
            return Err(Error::InvalidSettings(
                "respawn_min_ticks must be at least 1".to_string(),
            ));
        }
        if self.respawn_min_ticks > self.respawn_max_ticks {
            return Err(Error::InvalidSettings(format!(
                "respawn range {}..={} is empty",
                self.respawn_min_ticks, self.respawn_max_ticks
            )));
        }
        Ok(())
    }
}
