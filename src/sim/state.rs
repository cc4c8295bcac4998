//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::blob::Player;
use super::population::Population;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player was eaten
    GameOver,
    /// Quit requested
    Quit,
}

impl GamePhase {
    /// True once the run can no longer continue
    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Quit)
    }
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerAte { enemy_id: u32, new_radius: f32 },
    EnemyAte { eater_id: u32, eaten_id: u32, new_radius: f32 },
    Spawned { enemy_id: u32, radius: f32 },
    PlayerEaten { enemy_id: u32 },
}

/// The rectangular play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const EDGE_TOLERANCE: f32 = 1e-3;

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Largest radius that still fits fully on screen
    pub fn max_blob_radius(&self) -> f32 {
        (self.width.min(self.height) / 2.0).floor()
    }

    /// True when the circle lies inside the arena, give or take
    /// `EDGE_TOLERANCE` of float rounding at the edges
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= -Self::EDGE_TOLERANCE
            && pos.x + radius <= self.width + Self::EDGE_TOLERANCE
            && pos.y - radius >= -Self::EDGE_TOLERANCE
            && pos.y + radius <= self.height + Self::EDGE_TOLERANCE
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Every random draw in the simulation comes from here
    pub rng: Pcg32,
    pub arena: Arena,
    pub tuning: Tuning,
    pub player: Player,
    pub population: Population,
    pub phase: GamePhase,
    /// Simulation tick counter (ticks actually simulated)
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session with the opening population spawned
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, arena, tuning);
        state
            .population
            .seed(state.arena, &mut state.rng, &state.tuning);
        state
    }

    /// New session with the player but no enemies yet
    pub fn empty(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let population = Population::new(&mut rng, &tuning);
        let player = Player::new(arena.center(), tuning.player_start_radius, &tuning);
        Self {
            seed,
            rng,
            arena,
            tuning,
            player,
            population,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Score shown on the HUD: the player's radius
    pub fn score(&self) -> f32 {
        self.player.body.radius
    }

    /// Keep every blob fully on screen
    pub fn clamp_all(&mut self) {
        let Arena { width, height } = self.arena;
        self.player.body.clamp_to_bounds(width, height);
        for enemy in &mut self.population.enemies {
            enemy.body.clamp_to_bounds(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345, Arena::new(1920.0, 1080.0), Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.population.len(), 120);
        assert_eq!(state.player.body.pos, Vec2::new(960.0, 540.0));
        assert_eq!(state.score(), 15.0);
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = GameState::new(7, Arena::new(800.0, 600.0), Tuning::default());
        let b = GameState::new(7, Arena::new(800.0, 600.0), Tuning::default());
        for (x, y) in a.population.enemies.iter().zip(&b.population.enemies) {
            assert_eq!(x.body, y.body);
        }
        assert_eq!(a.population.spawn_timer(), b.population.spawn_timer());
    }

    #[test]
    fn test_arena_helpers() {
        let arena = Arena::new(101.0, 60.0);
        assert_eq!(arena.center(), Vec2::new(50.0, 30.0));
        assert_eq!(arena.max_blob_radius(), 30.0);
        assert!(arena.contains_circle(Vec2::new(30.0, 30.0), 30.0));
        assert!(!arena.contains_circle(Vec2::new(29.0, 30.0), 30.0));
        assert!(!arena.contains_circle(Vec2::new(50.0, 31.0), 30.0));
        // Rounding slop at the far edge still counts as inside
        assert!(arena.contains_circle(Vec2::new(71.0 + 1e-4, 30.0), 30.0));
    }
}
