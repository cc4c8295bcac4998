//! Blob bodies and the two kinds of blob built on them
//!
//! A `Blob` is the shared circular body (position, radius, speed, color).
//! The player and the autonomous enemies each wrap one and add their own
//! way of moving it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{angle_to, clamp, distance, heading};

/// Cosmetic RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BACKGROUND: Color = Color::rgb(230, 255, 230);
    pub const SCORE_TEXT: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random enemy tint (kept away from very dark and washed-out shades)
    pub fn random_enemy<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(75..=255),
            g: rng.random_range(25..=200),
            b: rng.random_range(25..=230),
        }
    }

    /// Normalized RGBA for vertex buffers
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Shared circular body
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Center in screen coordinates (y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick, derived from radius
    pub movement_speed: f32,
    pub color: Color,
}

impl Blob {
    pub fn new(pos: Vec2, radius: f32, color: Color, tuning: &Tuning) -> Self {
        debug_assert!(radius > 0.0, "blob radius must be positive, got {radius}");
        Self {
            pos,
            radius,
            movement_speed: tuning.movement_speed(radius),
            color,
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    /// Absorb another body of radius `other_radius`.
    ///
    /// Areas add, so the new radius is `sqrt(r² + r_other²)`. The eaten
    /// body is removed by the caller.
    pub fn grow(&mut self, other_radius: f32, tuning: &Tuning) {
        self.radius = (self.radius * self.radius + other_radius * other_radius).sqrt();
        self.movement_speed = tuning.movement_speed(self.radius);
        debug_assert!(self.radius > 0.0);
    }

    /// Absorb `other`
    #[inline]
    pub fn eat(&mut self, other: &Blob, tuning: &Tuning) {
        self.grow(other.radius, tuning);
    }

    #[inline]
    pub fn distance_to(&self, other: &Blob) -> f32 {
        distance(self.pos, other.pos)
    }

    /// Circle overlap against a raw circle; tangent circles count
    #[inline]
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        self.radius + radius >= distance(self.pos, pos)
    }

    #[inline]
    pub fn is_colliding(&self, other: &Blob) -> bool {
        self.overlaps(other.pos, other.radius)
    }

    /// Keep the whole circle inside `[0, width] x [0, height]`
    pub fn clamp_to_bounds(&mut self, width: f32, height: f32) {
        self.pos.x = clamp(self.pos.x, self.radius, width - self.radius);
        self.pos.y = clamp(self.pos.y, self.radius, height - self.radius);
    }
}

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// The keyboard-controlled blob
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Blob,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, tuning: &Tuning) -> Self {
        Self {
            body: Blob::new(pos, radius, Color::BLACK, tuning),
        }
    }

    /// Move one step along every held axis.
    ///
    /// Axes are independent, so a diagonal moves `sqrt(2)` times faster
    /// than a straight line. Opposite keys cancel.
    pub fn apply_input(&mut self, keys: MoveKeys) {
        let speed = self.body.movement_speed;
        if keys.up {
            self.body.pos.y -= speed;
        }
        if keys.down {
            self.body.pos.y += speed;
        }
        if keys.left {
            self.body.pos.x -= speed;
        }
        if keys.right {
            self.body.pos.x += speed;
        }
    }
}

/// An autonomous blob
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Unique while alive; never reused within a session
    pub id: u32,
    pub body: Blob,
    /// Fixed at spawn from the spawn radius
    pub vision_radius: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Color, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Blob::new(pos, radius, color, tuning),
            vision_radius: tuning.vision_radius(radius),
        }
    }

    pub fn move_towards<R: Rng + ?Sized>(&mut self, target: Vec2, rng: &mut R, spread: f32) {
        self.move_with_randomness(target, true, rng, spread);
    }

    pub fn move_away_from<R: Rng + ?Sized>(&mut self, target: Vec2, rng: &mut R, spread: f32) {
        self.move_with_randomness(target, false, rng, spread);
    }

    /// Step `movement_speed` along the bearing to (or away from) `target`,
    /// perturbed uniformly by up to `spread` radians either way.
    fn move_with_randomness<R: Rng + ?Sized>(
        &mut self,
        target: Vec2,
        towards: bool,
        rng: &mut R,
        spread: f32,
    ) {
        let bearing = if towards {
            angle_to(self.body.pos, target)
        } else {
            angle_to(target, self.body.pos)
        };
        let perturbation = if spread > 0.0 {
            rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        self.body.pos += heading(bearing + perturbation) * self.body.movement_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_PI_4;

    fn blob(x: f32, y: f32, r: f32) -> Blob {
        Blob::new(Vec2::new(x, y), r, Color::BLACK, &Tuning::default())
    }

    #[test]
    fn test_grow_conserves_area() {
        let tuning = Tuning::default();
        let mut a = blob(100.0, 100.0, 10.0);
        let b = blob(105.0, 100.0, 5.0);
        let before = a.area() + b.area();
        a.eat(&b, &tuning);
        assert!((a.radius - 125.0f32.sqrt()).abs() < 1e-4);
        assert!((a.area() - before).abs() < 1e-2);
        assert!((a.movement_speed - tuning.movement_speed(a.radius)).abs() < 1e-6);
    }

    #[test]
    fn test_collision_is_inclusive() {
        let a = blob(0.0, 0.0, 10.0);
        let b = blob(15.0, 0.0, 5.0);
        assert!(a.is_colliding(&b));
        let c = blob(15.1, 0.0, 5.0);
        assert!(!a.is_colliding(&c));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let mut a = blob(-50.0, 2000.0, 20.0);
        a.clamp_to_bounds(1920.0, 1080.0);
        assert_eq!(a.pos, Vec2::new(20.0, 1060.0));

        let mut inside = blob(500.0, 500.0, 20.0);
        inside.clamp_to_bounds(1920.0, 1080.0);
        assert_eq!(inside.pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_player_diagonal_is_unnormalized() {
        let mut player = Player::new(Vec2::new(500.0, 500.0), 15.0, &Tuning::default());
        let speed = player.body.movement_speed;
        player.apply_input(MoveKeys {
            up: true,
            right: true,
            ..Default::default()
        });
        assert!((player.body.pos.x - (500.0 + speed)).abs() < 1e-4);
        assert!((player.body.pos.y - (500.0 - speed)).abs() < 1e-4);
        let travelled = player.body.pos.distance(Vec2::new(500.0, 500.0));
        assert!((travelled - speed * 2.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_player_opposite_keys_cancel() {
        let mut player = Player::new(Vec2::new(500.0, 500.0), 15.0, &Tuning::default());
        player.apply_input(MoveKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        });
        assert!(player.body.pos.distance(Vec2::new(500.0, 500.0)) < 1e-4);
    }

    #[test]
    fn test_enemy_step_stays_within_cone() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let mut e = Enemy::new(1, Vec2::new(100.0, 100.0), 5.0, Color::BLACK, &tuning);
            let target = Vec2::new(200.0, 100.0);
            e.move_towards(target, &mut rng, FRAC_PI_4);
            let step = e.body.pos - Vec2::new(100.0, 100.0);
            assert!((step.length() - e.body.movement_speed).abs() < 1e-4);
            // Within 45 degrees of +x
            assert!(step.x >= step.y.abs() - 1e-4);
        }
    }

    #[test]
    fn test_enemy_moves_away() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut e = Enemy::new(1, Vec2::new(100.0, 100.0), 5.0, Color::BLACK, &tuning);
        e.move_away_from(Vec2::new(200.0, 100.0), &mut rng, FRAC_PI_4);
        assert!(e.body.pos.x < 100.0);
    }

    #[test]
    fn test_vision_fixed_at_spawn() {
        let tuning = Tuning::default();
        let mut e = Enemy::new(3, Vec2::ZERO, 4.0, Color::BLACK, &tuning);
        assert_eq!(e.vision_radius, 55.0);
        e.body.grow(10.0, &tuning);
        assert_eq!(e.vision_radius, 55.0);
    }
}
