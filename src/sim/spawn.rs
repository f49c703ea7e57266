//! Probabilistic enemy and cloud spawning
//!
//! Each tick rolls one independent trial for an enemy and one for a cloud.
//! All randomness comes from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Cloud, Enemy, GameState, MovePattern};
use crate::tuning::Tuning;

/// Build an enemy just above the field with a random pattern and anchor
pub fn spawn_enemy(rng: &mut impl Rng, tuning: &Tuning) -> Enemy {
    let pattern = MovePattern::ALL[rng.random_range(0..MovePattern::ALL.len())];
    let max_x = (tuning.field_width - tuning.enemy_size).max(0.0);
    let original_x = rng.random_range(0.0..=max_x);
    let speed = rng.random_range(tuning.enemy_speed_min..=tuning.enemy_speed_max);
    Enemy::new(original_x, tuning.enemy_size, speed, pattern)
}

/// One Bernoulli trial at `enemy_spawn_chance`
pub fn roll_enemy(rng: &mut impl Rng, tuning: &Tuning) -> Option<Enemy> {
    rng.random_bool(tuning.enemy_spawn_chance)
        .then(|| spawn_enemy(rng, tuning))
}

/// Build a random cloud; without an explicit `y` it sits just above the field
fn spawn_cloud(rng: &mut impl Rng, tuning: &Tuning, y: Option<f32>) -> Cloud {
    let size = rng.random_range(tuning.cloud_size_min..=tuning.cloud_size_max);
    let speed = rng.random_range(tuning.cloud_speed_min..=tuning.cloud_speed_max);
    let x = rng.random_range(0.0..=tuning.field_width);
    Cloud {
        pos: Vec2::new(x, y.unwrap_or(-size)),
        size,
        speed,
    }
}

/// One Bernoulli trial at `cloud_spawn_chance`; new clouds enter at the top
pub fn roll_cloud(rng: &mut impl Rng, tuning: &Tuning) -> Option<Cloud> {
    rng.random_bool(tuning.cloud_spawn_chance)
        .then(|| spawn_cloud(rng, tuning, None))
}

/// Scatter the opening clouds over the whole field
pub fn scatter_clouds(state: &mut GameState) {
    for _ in 0..state.tuning.initial_clouds {
        let y = state.rng.random_range(0.0..=state.tuning.field_height);
        let cloud = spawn_cloud(&mut state.rng, &state.tuning, Some(y));
        state.clouds.push(cloud);
    }
}

/// Run this tick's spawn trials against the state. Returns true if an
/// enemy was added.
pub fn spawn_step(state: &mut GameState) -> bool {
    let at_cap = state
        .tuning
        .max_enemies
        .is_some_and(|cap| state.enemies.len() >= cap);

    let mut spawned = false;
    if !at_cap {
        if let Some(enemy) = roll_enemy(&mut state.rng, &state.tuning) {
            log::debug!(
                "Spawned {:?} enemy at x={:.0} ({} live)",
                enemy.pattern,
                enemy.original_x,
                state.enemies.len() + 1
            );
            state.enemies.push(enemy);
            spawned = true;
        }
    }

    if let Some(cloud) = roll_cloud(&mut state.rng, &state.tuning) {
        state.clouds.push(cloud);
    }

    spawned
}
