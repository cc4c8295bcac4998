//! Enemy population: spawning, difficulty scaling and batched removal

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;
use rand_distr::Exp1;

use super::blob::{Color, Enemy};
use super::state::Arena;
use crate::tuning::Tuning;

/// Owns every live enemy, kept sorted by id
#[derive(Debug, Clone)]
pub struct Population {
    pub enemies: Vec<Enemy>,
    /// Ticks until the next spawn
    spawn_timer: u32,
    /// Mean of the exponential spawn-radius draw
    expected_radius: f32,
    /// Enemies spawned so far this session (also the next id)
    spawn_count: u32,
}

impl Population {
    /// Empty population with a freshly drawn spawn timer
    pub fn new<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        Self {
            enemies: Vec::new(),
            spawn_timer: draw_spawn_timer(rng, tuning),
            expected_radius: tuning.initial_expected_radius,
            spawn_count: 0,
        }
    }

    /// Spawn the opening population
    pub fn seed<R: Rng + ?Sized>(&mut self, arena: Arena, rng: &mut R, tuning: &Tuning) {
        for _ in 0..tuning.initial_enemy_count {
            self.spawn(arena, rng, tuning);
        }
        log::info!(
            "Seeded {} enemies in {}x{} arena",
            self.enemies.len(),
            arena.width,
            arena.height
        );
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Enemy> {
        self.enemies
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.enemies[i])
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    pub fn expected_radius(&self) -> f32 {
        self.expected_radius
    }

    /// Spawn one enemy with a random radius, position and color.
    ///
    /// Returns the new id.
    pub fn spawn<R: Rng + ?Sized>(&mut self, arena: Arena, rng: &mut R, tuning: &Tuning) -> u32 {
        // Difficulty ramps once the opening population has been matched
        if self.spawn_count + 1 >= tuning.initial_enemy_count {
            self.expected_radius += tuning.expected_radius_growth;
        }

        let radius = self.draw_radius(arena, rng, tuning);
        let pos = Vec2::new(
            rng.random_range(radius..=arena.width - radius),
            rng.random_range(radius..=arena.height - radius),
        );
        debug_assert!(
            arena.contains_circle(pos, radius),
            "spawn at {pos} with radius {radius} leaves the arena"
        );
        let color = Color::random_enemy(rng);
        self.spawn_at(pos, radius, color, tuning)
    }

    /// Insert an enemy at an exact spot. Ids keep increasing so the
    /// population stays sorted.
    pub fn spawn_at(&mut self, pos: Vec2, radius: f32, color: Color, tuning: &Tuning) -> u32 {
        let id = self.spawn_count;
        self.spawn_count += 1;
        debug_assert!(self.enemies.last().is_none_or(|e| e.id < id));
        self.enemies.push(Enemy::new(id, pos, radius, color, tuning));
        log::debug!("Spawned enemy {id} (radius {radius}) at {pos}");
        id
    }

    /// `max(min_radius, floor(Exp(1 / expected_radius)))`, capped so the
    /// circle still fits in the arena.
    fn draw_radius<R: Rng + ?Sized>(&self, arena: Arena, rng: &mut R, tuning: &Tuning) -> f32 {
        let draw: f32 = rng.sample(Exp1);
        let radius = (draw * self.expected_radius).floor().max(tuning.min_radius);
        let radius = radius.min(arena.max_blob_radius());
        debug_assert!(radius > 0.0);
        radius
    }

    /// Count down one tick; spawn and redraw the timer when it hits zero.
    pub fn tick_spawn_timer<R: Rng + ?Sized>(
        &mut self,
        arena: Arena,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<u32> {
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer > 0 {
            return None;
        }
        let id = self.spawn(arena, rng, tuning);
        self.spawn_timer = draw_spawn_timer(rng, tuning);
        Some(id)
    }

    /// Drop every enemy in `ids` in one pass. Returns how many were removed.
    pub fn remove(&mut self, ids: &BTreeSet<u32>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| !ids.contains(&e.id));
        before - self.enemies.len()
    }
}

fn draw_spawn_timer<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> u32 {
    rng.random_range(tuning.respawn_min_ticks..=tuning.respawn_max_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(1920.0, 1080.0)
    }

    #[test]
    fn test_seed_population() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pop = Population::new(&mut rng, &tuning);
        pop.seed(arena(), &mut rng, &tuning);
        assert_eq!(pop.len(), 120);
        for (i, e) in pop.enemies.iter().enumerate() {
            assert_eq!(e.id, i as u32);
            assert!(e.body.radius >= tuning.min_radius);
            assert_eq!(e.body.radius, e.body.radius.floor());
            assert!(e.body.pos.x >= e.body.radius && e.body.pos.x <= 1920.0 - e.body.radius);
            assert!(e.body.pos.y >= e.body.radius && e.body.pos.y <= 1080.0 - e.body.radius);
            assert_eq!(e.vision_radius, tuning.vision_radius(e.body.radius));
            assert!(arena().contains_circle(e.body.pos, e.body.radius));
        }
    }

    #[test]
    fn test_expected_radius_grows_after_seed_count() {
        let tuning = Tuning {
            initial_enemy_count: 3,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pop = Population::new(&mut rng, &tuning);
        pop.spawn(arena(), &mut rng, &tuning);
        pop.spawn(arena(), &mut rng, &tuning);
        assert_eq!(pop.expected_radius(), tuning.initial_expected_radius);
        pop.spawn(arena(), &mut rng, &tuning);
        let grown = tuning.initial_expected_radius + tuning.expected_radius_growth;
        assert!((pop.expected_radius() - grown).abs() < 1e-6);
        pop.spawn(arena(), &mut rng, &tuning);
        assert!(pop.expected_radius() > grown);
    }

    #[test]
    fn test_spawn_timer_cycle() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pop = Population::new(&mut rng, &tuning);
        let start = pop.spawn_timer();
        assert!((5..=25).contains(&start));

        for _ in 1..start {
            assert_eq!(pop.tick_spawn_timer(arena(), &mut rng, &tuning), None);
        }
        assert!(pop.is_empty());
        let id = pop.tick_spawn_timer(arena(), &mut rng, &tuning);
        assert_eq!(id, Some(0));
        assert_eq!(pop.len(), 1);
        assert!((5..=25).contains(&pop.spawn_timer()));
    }

    #[test]
    fn test_huge_radius_is_capped_to_arena() {
        let tuning = Tuning {
            initial_expected_radius: 10_000.0,
            ..Default::default()
        };
        let small = Arena::new(100.0, 60.0);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pop = Population::new(&mut rng, &tuning);
        for _ in 0..50 {
            pop.spawn(small, &mut rng, &tuning);
        }
        for e in &pop.enemies {
            assert!(e.body.radius <= 30.0);
            assert!(e.body.pos.y >= e.body.radius && e.body.pos.y <= 60.0 - e.body.radius);
            assert!(small.contains_circle(e.body.pos, e.body.radius));
        }
    }

    #[test]
    fn test_batched_remove_and_lookup() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pop = Population::new(&mut rng, &tuning);
        for i in 0..5 {
            pop.spawn_at(Vec2::splat(100.0 + i as f32), 5.0, Color::BLACK, &tuning);
        }
        let ids: BTreeSet<u32> = [1, 3, 99].into_iter().collect();
        assert_eq!(pop.remove(&ids), 2);
        assert_eq!(pop.enemies.iter().map(|e| e.id).collect::<Vec<_>>(), vec![0, 2, 4]);
        assert!(pop.get(3).is_none());
        assert_eq!(pop.get(4).map(|e| e.id), Some(4));

        // Ids are not reused after removal
        let id = pop.spawn_at(Vec2::splat(50.0), 5.0, Color::BLACK, &tuning);
        assert_eq!(id, 5);
    }
}
