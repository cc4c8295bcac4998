//! Enemy perception and the approach/evade decision

use glam::Vec2;
use rand::Rng;
use rand_distr::StandardNormal;

use super::blob::{Blob, Enemy};

/// What an enemy has locked onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Player,
    /// Index into the population slice plus the stable id
    Enemy { index: usize, id: u32 },
}

/// Snapshot of the nearest visible blob
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub radius: f32,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approach,
    Evade,
    Idle,
}

/// Nearest blob strictly inside the vision radius of `enemies[index]`.
///
/// Enemies are scanned in slice order (ascending id) and the player last,
/// with a strict `<`, so equal distances resolve to the lowest id and the
/// player never wins a tie.
pub fn nearest_visible(enemies: &[Enemy], index: usize, player: &Blob) -> Option<Target> {
    let me = &enemies[index];
    let mut best: Option<Target> = None;

    let mut consider = |kind: TargetKind, body: &Blob| {
        let distance = me.body.distance_to(body);
        let closer = best.is_none_or(|b| distance < b.distance);
        if closer && distance < me.vision_radius {
            best = Some(Target {
                kind,
                pos: body.pos,
                radius: body.radius,
                distance,
            });
        }
    };

    for (i, other) in enemies.iter().enumerate() {
        if i == index {
            continue;
        }
        consider(TargetKind::Enemy { index: i, id: other.id }, &other.body);
    }
    consider(TargetKind::Player, player);

    best
}

/// Standard normal draw clamped to `[-limit, limit]`
pub fn draw_jitter<R: Rng + ?Sized>(rng: &mut R, limit: f32) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    z.clamp(-limit, limit)
}

/// Approach when strictly bigger than the target after jitter, else evade
#[inline]
pub fn decide(me: &Blob, target: &Target, jitter: f32) -> Decision {
    if me.radius > target.radius + jitter {
        Decision::Approach
    } else {
        Decision::Evade
    }
}

/// Full perception step for one enemy. Only draws jitter when something is
/// in sight.
pub fn perceive<R: Rng + ?Sized>(
    enemies: &[Enemy],
    index: usize,
    player: &Blob,
    rng: &mut R,
    jitter_limit: f32,
) -> (Decision, Option<Target>) {
    match nearest_visible(enemies, index, player) {
        Some(target) => {
            let jitter = draw_jitter(rng, jitter_limit);
            (decide(&enemies[index].body, &target, jitter), Some(target))
        }
        None => (Decision::Idle, None),
    }
}
