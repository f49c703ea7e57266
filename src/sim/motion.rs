//! Per-tick position updates
//!
//! Positions move in pixels per tick. Enemies follow one of three patterns
//! keyed off their phase accumulator; clouds drift purely for decoration.

use super::input::TickInput;
use super::state::{Cloud, Enemy, MovePattern, Player};
use crate::clamp_to_field;
use crate::consts::*;
use crate::tuning::CloudDrift;

/// Steer the player from held keys, then apply any pointer placement.
///
/// The pointer is the later, atomic input so it overrides key motion for
/// this tick. The result is always clamped to the field.
pub fn move_player(player: &mut Player, input: &TickInput, field_width: f32) {
    if let Some(direction) = input.direction {
        player.pos.x += direction.sign() * player.speed;
    }
    if let Some(target) = input.pointer_x {
        player.pos.x = target - player.size.x / 2.0;
    }
    player.pos.x = clamp_to_field(player.pos.x, player.size.x, field_width);
}

/// Unclamped horizontal position for a pattern at the given phase
#[inline]
pub fn pattern_x(pattern: MovePattern, original_x: f32, phase: f32) -> f32 {
    match pattern {
        MovePattern::Straight => original_x,
        MovePattern::Zigzag => original_x + phase.sin() * ZIGZAG_AMPLITUDE,
        MovePattern::Circle => original_x + phase.cos() * CIRCLE_AMPLITUDE,
    }
}

/// Vertical pixels per tick for a pattern
#[inline]
pub fn fall_speed(pattern: MovePattern, speed: f32) -> f32 {
    match pattern {
        MovePattern::Circle => speed * CIRCLE_SPEED_FACTOR,
        MovePattern::Straight | MovePattern::Zigzag => speed,
    }
}

/// Advance one enemy by a tick and recompute whether it is still on-field
pub fn advance_enemy(enemy: &mut Enemy, field_width: f32, field_height: f32) {
    let x = pattern_x(enemy.pattern, enemy.original_x, enemy.phase);
    enemy.pos.x = clamp_to_field(x, enemy.size.x, field_width);
    enemy.pos.y += fall_speed(enemy.pattern, enemy.speed);
    enemy.phase += PHASE_STEP;
    enemy.active = enemy.pos.y < field_height + enemy.size.y;
}

/// Drop enemies that went inactive on a previous pass
pub fn compact_inactive(enemies: &mut Vec<Enemy>) {
    enemies.retain(|e| e.active);
}

/// One motion pass over the live enemy set.
///
/// Enemies deactivated by the previous pass are compacted out first, so an
/// enemy that leaves the field stays in the set (inactive) for exactly one
/// more frame.
pub fn advance_enemies(enemies: &mut Vec<Enemy>, field_width: f32, field_height: f32) {
    compact_inactive(enemies);
    for enemy in enemies.iter_mut() {
        advance_enemy(enemy, field_width, field_height);
    }
}

/// Time input for cloud drift, or `None` when drift is disabled
pub fn drift_time(drift: CloudDrift, now_ms: f64, time_ticks: u64) -> Option<f64> {
    match drift {
        CloudDrift::WallClock => Some(now_ms * 0.001),
        CloudDrift::TickPhase => Some(time_ticks as f64 * PHASE_STEP as f64),
        CloudDrift::Off => None,
    }
}

/// Scroll clouds down, drift them sideways, recycle the ones past the bottom
pub fn advance_clouds(clouds: &mut Vec<Cloud>, drift_t: Option<f64>, field_height: f32) {
    for cloud in clouds.iter_mut() {
        cloud.pos.y += cloud.speed;
        if let Some(t) = drift_t {
            cloud.pos.x += ((t + cloud.pos.x as f64).sin() as f32) * CLOUD_DRIFT;
        }
    }
    clouds.retain(|c| c.pos.y <= field_height + CLOUD_DESPAWN_MARGIN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn player() -> Player {
        Player::spawn(&Tuning::default())
    }

    fn steer(direction: Direction) -> TickInput {
        TickInput {
            direction: Some(direction),
            pointer_x: None,
        }
    }

    #[test]
    fn test_player_moves_by_speed() {
        let mut p = player();
        let start = p.pos.x;
        move_player(&mut p, &steer(Direction::Left), FIELD_WIDTH);
        assert_eq!(p.pos.x, start - p.speed);
        move_player(&mut p, &steer(Direction::Right), FIELD_WIDTH);
        move_player(&mut p, &steer(Direction::Right), FIELD_WIDTH);
        assert_eq!(p.pos.x, start + p.speed);
    }

    #[test]
    fn test_player_never_moves_vertically() {
        let mut p = player();
        let y = p.pos.y;
        move_player(&mut p, &steer(Direction::Left), FIELD_WIDTH);
        move_player(
            &mut p,
            &TickInput {
                direction: None,
                pointer_x: Some(10.0),
            },
            FIELD_WIDTH,
        );
        assert_eq!(p.pos.y, y);
    }

    #[test]
    fn test_player_clamped_at_edges() {
        let mut p = player();
        p.pos.x = 2.0;
        move_player(&mut p, &steer(Direction::Left), FIELD_WIDTH);
        assert_eq!(p.pos.x, 0.0);

        p.pos.x = FIELD_WIDTH - p.size.x - 1.0;
        move_player(&mut p, &steer(Direction::Right), FIELD_WIDTH);
        assert_eq!(p.pos.x, FIELD_WIDTH - p.size.x);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let mut p = player();
        let input = TickInput {
            direction: Some(Direction::Right),
            pointer_x: Some(200.0),
        };
        move_player(&mut p, &input, FIELD_WIDTH);
        assert_eq!(p.pos.x, 200.0 - p.size.x / 2.0);

        // Clicks past the edge are clamped
        let input = TickInput {
            direction: None,
            pointer_x: Some(FIELD_WIDTH + 300.0),
        };
        move_player(&mut p, &input, FIELD_WIDTH);
        assert_eq!(p.pos.x, FIELD_WIDTH - p.size.x);
    }

    #[test]
    fn test_zigzag_at_quarter_turn() {
        let x = pattern_x(MovePattern::Zigzag, 100.0, FRAC_PI_2);
        assert!((x - 160.0).abs() < EPS);
    }

    #[test]
    fn test_circle_at_zero_phase() {
        let x = pattern_x(MovePattern::Circle, 50.0, 0.0);
        assert!((x - 90.0).abs() < EPS);
        assert_eq!(fall_speed(MovePattern::Circle, 3.0), 3.0 * 0.8);
    }

    #[test]
    fn test_straight_keeps_anchor() {
        assert_eq!(pattern_x(MovePattern::Straight, 321.0, 17.3), 321.0);
        assert_eq!(fall_speed(MovePattern::Straight, 4.0), 4.0);
        assert_eq!(fall_speed(MovePattern::Zigzag, 4.0), 4.0);
    }

    #[test]
    fn test_advance_enemy_steps_phase_and_falls() {
        let mut enemy = Enemy::new(50.0, ENEMY_SIZE, 3.0, MovePattern::Circle);
        advance_enemy(&mut enemy, FIELD_WIDTH, FIELD_HEIGHT);
        assert!((enemy.pos.x - 90.0).abs() < EPS);
        assert!((enemy.pos.y - (-ENEMY_SIZE + 2.4)).abs() < EPS);
        assert!((enemy.phase - PHASE_STEP).abs() < EPS);
        assert!(enemy.active);
    }

    #[test]
    fn test_enemy_clamped_near_edge() {
        let mut enemy = Enemy::new(0.0, ENEMY_SIZE, 3.0, MovePattern::Zigzag);
        enemy.phase = -FRAC_PI_2; // sin = -1 -> x = -60 before clamping
        advance_enemy(&mut enemy, FIELD_WIDTH, FIELD_HEIGHT);
        assert_eq!(enemy.pos.x, 0.0);
    }

    #[test]
    fn test_enemy_deactivates_then_leaves_next_pass() {
        let mut enemies = vec![
            Enemy::new(100.0, ENEMY_SIZE, 5.0, MovePattern::Straight),
            Enemy::new(300.0, ENEMY_SIZE, 5.0, MovePattern::Straight),
        ];
        enemies[0].pos.y = FIELD_HEIGHT + ENEMY_SIZE - 1.0;

        advance_enemies(&mut enemies, FIELD_WIDTH, FIELD_HEIGHT);
        assert_eq!(enemies.len(), 2);
        assert!(!enemies[0].active);
        assert!(enemies[1].active);

        advance_enemies(&mut enemies, FIELD_WIDTH, FIELD_HEIGHT);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].original_x, 300.0);
    }

    #[test]
    fn test_clouds_scroll_and_recycle() {
        let mut clouds = vec![
            Cloud {
                pos: Vec2::new(100.0, 10.0),
                size: 30.0,
                speed: 1.0,
            },
            Cloud {
                pos: Vec2::new(400.0, FIELD_HEIGHT + CLOUD_DESPAWN_MARGIN - 0.5),
                size: 30.0,
                speed: 1.0,
            },
        ];
        advance_clouds(&mut clouds, None, FIELD_HEIGHT);
        assert_eq!(clouds.len(), 1);
        assert_eq!(clouds[0].pos, Vec2::new(100.0, 11.0));
    }

    #[test]
    fn test_cloud_drift_is_small() {
        let mut clouds = vec![Cloud {
            pos: Vec2::new(100.0, 10.0),
            size: 30.0,
            speed: 1.0,
        }];
        advance_clouds(&mut clouds, Some(12.5), FIELD_HEIGHT);
        assert!((clouds[0].pos.x - 100.0).abs() <= CLOUD_DRIFT + EPS);
    }

    #[test]
    fn test_drift_time_sources() {
        assert_eq!(drift_time(CloudDrift::Off, 1000.0, 5), None);
        let t = drift_time(CloudDrift::WallClock, 2000.0, 5).unwrap();
        assert!((t - 2.0).abs() < 1e-9);
        let t = drift_time(CloudDrift::TickPhase, 123_456.0, 10).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        let direction = prop_oneof![
            Just(None),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
        ];
        let pointer = proptest::option::of(-200.0f32..1000.0);
        (direction, pointer).prop_map(|(direction, pointer_x)| TickInput {
            direction,
            pointer_x,
        })
    }

    fn arb_pattern() -> impl Strategy<Value = MovePattern> {
        prop_oneof![
            Just(MovePattern::Straight),
            Just(MovePattern::Zigzag),
            Just(MovePattern::Circle),
        ]
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(inputs in proptest::collection::vec(arb_input(), 1..300)) {
            let mut p = player();
            for input in &inputs {
                move_player(&mut p, input, FIELD_WIDTH);
                prop_assert!(p.pos.x >= 0.0);
                prop_assert!(p.pos.x <= FIELD_WIDTH - p.size.x);
            }
        }

        #[test]
        fn prop_enemy_stays_in_field(
            pattern in arb_pattern(),
            original_x in 0.0f32..=(FIELD_WIDTH - ENEMY_SIZE),
            ticks in 1usize..400,
        ) {
            let mut enemy = Enemy::new(original_x, ENEMY_SIZE, 2.0, pattern);
            for _ in 0..ticks {
                advance_enemy(&mut enemy, FIELD_WIDTH, FIELD_HEIGHT);
                prop_assert!(enemy.pos.x >= 0.0);
                prop_assert!(enemy.pos.x <= FIELD_WIDTH - ENEMY_SIZE);
            }
        }
    }
}
