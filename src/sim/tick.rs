//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame:
//! input -> enemy decisions -> player collisions -> clamping -> spawning.

use std::collections::BTreeSet;

use glam::Vec2;

use super::blob::MoveKeys;
use super::perception::{Decision, TargetKind, perceive};
use super::state::{GameEvent, GamePhase, GameState};

/// Enemies farther than this (edge to edge) are ignored by the autopilot
pub const AUTOPILOT_THREAT_RANGE: f32 = 120.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: MoveKeys,
    /// Pause toggle
    pub pause: bool,
    /// Stop before this tick runs
    pub quit: bool,
    /// Ignore `keys` and let the autopilot steer
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.quit {
        if state.phase != GamePhase::Quit {
            log::info!("Quit requested after {} ticks", state.time_ticks);
        }
        state.phase = GamePhase::Quit;
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let keys = if input.autopilot {
        autopilot_input(state).keys
    } else {
        input.keys
    };
    state.player.apply_input(keys);

    update_enemies(state);
    resolve_player_collisions(state);
    state.clamp_all();

    if state.phase == GamePhase::Playing {
        let arena = state.arena;
        if let Some(enemy_id) =
            state
                .population
                .tick_spawn_timer(arena, &mut state.rng, &state.tuning)
        {
            let radius = state
                .population
                .get(enemy_id)
                .map(|e| e.body.radius)
                .unwrap_or_default();
            state.events.push(GameEvent::Spawned { enemy_id, radius });
        }
    }
}

/// Every enemy perceives, moves, and possibly eats another enemy.
///
/// Eaten enemies are only collected here and dropped after the pass, so
/// they still take their own turn and still show up in later distance
/// checks within the same tick.
fn update_enemies(state: &mut GameState) {
    let tuning = &state.tuning;
    let rng = &mut state.rng;
    let player = &state.player.body;
    let enemies = &mut state.population.enemies;
    let mut eaten: BTreeSet<u32> = BTreeSet::new();

    for i in 0..enemies.len() {
        let (decision, target) = perceive(enemies, i, player, rng, tuning.jitter_limit);
        let Some(target) = target else {
            continue;
        };

        match decision {
            Decision::Approach => {
                let enemy = &mut enemies[i];
                enemy.move_towards(target.pos, rng, tuning.heading_jitter);

                // Eating the player is decided by the player collision pass
                if let TargetKind::Enemy { id, .. } = target.kind {
                    if enemy.body.overlaps(target.pos, target.radius) {
                        enemy.body.grow(target.radius, tuning);
                        eaten.insert(id);
                        state.events.push(GameEvent::EnemyAte {
                            eater_id: enemy.id,
                            eaten_id: id,
                            new_radius: enemy.body.radius,
                        });
                    }
                }
            }
            Decision::Evade => {
                enemies[i].move_away_from(target.pos, rng, tuning.heading_jitter);
            }
            Decision::Idle => {}
        }
    }

    let removed = state.population.remove(&eaten);
    if removed > 0 {
        log::debug!("Enemies ate {removed} enemies on tick {}", state.time_ticks);
    }
}

/// Player eats every strictly smaller enemy it touches; touching an
/// equal or bigger one ends the game on the spot.
fn resolve_player_collisions(state: &mut GameState) {
    let mut eaten: BTreeSet<u32> = BTreeSet::new();

    for enemy in &state.population.enemies {
        if !state.player.body.is_colliding(&enemy.body) {
            continue;
        }
        if state.player.body.radius > enemy.body.radius {
            state.player.body.eat(&enemy.body, &state.tuning);
            eaten.insert(enemy.id);
            state.events.push(GameEvent::PlayerAte {
                enemy_id: enemy.id,
                new_radius: state.player.body.radius,
            });
        } else {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlayerEaten { enemy_id: enemy.id });
            log::info!(
                "Game over on tick {}: player (radius {:.2}) eaten by enemy {} (radius {:.2})",
                state.time_ticks,
                state.player.body.radius,
                enemy.id,
                enemy.body.radius
            );
            break;
        }
    }

    state.population.remove(&eaten);
}

/// Demo-mode steering for the player.
///
/// Flee the nearest enemy at least as big as the player if one is within
/// `AUTOPILOT_THREAT_RANGE`, otherwise chase the nearest smaller enemy.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let me = &state.player.body;
    let edge_distance = |pos: Vec2, radius: f32| me.pos.distance(pos) - me.radius - radius;

    let threat = state
        .population
        .enemies
        .iter()
        .filter(|e| e.body.radius >= me.radius)
        .map(|e| (edge_distance(e.body.pos, e.body.radius), e.body.pos))
        .filter(|(d, _)| *d < AUTOPILOT_THREAT_RANGE)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let direction = if let Some((_, pos)) = threat {
        let mut away = me.pos - pos;
        // Cornered: slide along the wall instead of pushing into it
        if me.pos.x - me.radius <= 0.0 || me.pos.x + me.radius >= state.arena.width {
            away.x = 0.0;
        }
        if me.pos.y - me.radius <= 0.0 || me.pos.y + me.radius >= state.arena.height {
            away.y = 0.0;
        }
        away
    } else {
        state
            .population
            .enemies
            .iter()
            .filter(|e| e.body.radius < me.radius)
            .min_by(|a, b| {
                me.pos
                    .distance_squared(a.body.pos)
                    .total_cmp(&me.pos.distance_squared(b.body.pos))
            })
            .map(|e| e.body.pos - me.pos)
            .unwrap_or(Vec2::ZERO)
    };

    TickInput {
        keys: keys_for(direction),
        ..Default::default()
    }
}

/// Quantize a direction onto the four movement keys (8-way)
fn keys_for(direction: Vec2) -> MoveKeys {
    let dir = direction.normalize_or_zero();
    // sin(22.5 degrees)
    const AXIS_THRESHOLD: f32 = 0.382_683_43;
    MoveKeys {
        up: dir.y < -AXIS_THRESHOLD,
        down: dir.y > AXIS_THRESHOLD,
        left: dir.x < -AXIS_THRESHOLD,
        right: dir.x > AXIS_THRESHOLD,
    }
}
