//! Blob Eat Blob - an agent growth arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (blobs, perception, population, tick)
//! - `renderer`: Drawing seam plus a mesh-building canvas
//! - `app`: Fixed-timestep driver
//! - `tuning`: Data-driven game balance
//! - `settings`: Runtime configuration

pub mod app;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the original fullscreen game
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (one tick per frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1920.0;
    pub const ARENA_HEIGHT: f32 = 1080.0;

    /// Movement speed at radius 0 (pixels per tick)
    pub const BASE_MOVEMENT_SPEED: f32 = 4.0;
    /// Speed lost per unit of ln(1 + radius)
    pub const SPEED_FALLOFF: f32 = 0.7;

    /// Enemy perception
    pub const BASE_VISION_RADIUS: f32 = 35.0;
    pub const VISION_PER_RADIUS: f32 = 5.0;

    /// Enemy sizing
    pub const MIN_RADIUS: f32 = 3.0;
    pub const INITIAL_EXPECTED_RADIUS: f32 = 7.0;
    pub const EXPECTED_RADIUS_GROWTH: f32 = 0.05;
    pub const INITIAL_ENEMY_COUNT: u32 = 120;

    /// Player starts in the arena center with this radius
    pub const PLAYER_START_RADIUS: f32 = 15.0;

    /// Respawn timer range in ticks (inclusive)
    pub const RESPAWN_MIN_TICKS: u32 = 5;
    pub const RESPAWN_MAX_TICKS: u32 = 25;

    /// Approach/evade jitter is clamped to +/- this
    pub const JITTER_LIMIT: f32 = 2.0;
    /// Heading perturbation bound (radians)
    pub const HEADING_JITTER: f32 = std::f32::consts::FRAC_PI_4;
}

/// Clamp `val` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics when `min > max`; the lower bound
/// wins, which keeps oversized blobs pinned to the top-left edge.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    min.max(val.min(max))
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Bearing from `from` to `to` in radians
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a bearing
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Inverted bounds: lower bound wins
        assert_eq!(clamp(3.0, 8.0, 2.0), 8.0);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_angle_to() {
        let a = angle_to(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((a - PI / 2.0).abs() < 1e-6);
        let b = angle_to(Vec2::ZERO, Vec2::new(-10.0, 0.0));
        assert!((b.abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_heading_is_unit() {
        for i in 0..16 {
            let h = heading(i as f32 * 0.4);
            assert!((h.length() - 1.0).abs() < 1e-5);
        }
    }
}
