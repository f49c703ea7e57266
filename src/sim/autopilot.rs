//! Idle/demo mode steering
//!
//! Plays the game on its own: dodge the closest falling threat, otherwise
//! drift back towards the middle of the field.

use super::input::{Direction, TickInput};
use super::state::GameState;

/// Extra horizontal clearance kept around the player when judging threats
const THREAT_MARGIN: f32 = 30.0;

/// Choose this tick's input for the demo pilot
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let player_left = player.pos.x - THREAT_MARGIN;
    let player_right = player.pos.x + player.size.x + THREAT_MARGIN;
    let player_center = player.pos.x + player.size.x / 2.0;
    let player_bottom = player.pos.y + player.size.y;

    // The most urgent threat is the lowest enemy still above the player's
    // bottom edge whose span crosses the guarded band
    let threat = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .filter(|e| e.pos.y < player_bottom)
        .filter(|e| e.pos.x < player_right && e.pos.x + e.size.x > player_left)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let direction = match threat {
        Some(enemy) => {
            let enemy_center = enemy.pos.x + enemy.size.x / 2.0;
            let away = if enemy_center <= player_center {
                Direction::Right
            } else {
                Direction::Left
            };
            // Pinned against a wall: run under the enemy instead
            let max_x = state.tuning.field_width - player.size.x;
            match away {
                Direction::Left if player.pos.x <= 0.0 => Some(Direction::Right),
                Direction::Right if player.pos.x >= max_x => Some(Direction::Left),
                _ => Some(away),
            }
        }
        None => {
            let offset = state.tuning.field_width / 2.0 - player_center;
            if offset.abs() <= player.speed {
                None
            } else if offset > 0.0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        }
    };

    TickInput {
        direction,
        pointer_x: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, MovePattern, RunPhase};
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(21, Tuning::default(), 0);
        state.start_run(0.0);
        state
    }

    #[test]
    fn test_idle_at_center() {
        let state = running();
        assert_eq!(steer(&state).direction, None);
    }

    #[test]
    fn test_returns_to_center() {
        let mut state = running();
        state.player.pos.x = 0.0;
        assert_eq!(steer(&state).direction, Some(Direction::Right));
        state.player.pos.x = 700.0;
        assert_eq!(steer(&state).direction, Some(Direction::Left));
    }

    #[test]
    fn test_dodges_away_from_threat() {
        let mut state = running();
        let px = state.player.pos.x;
        // Threat slightly left of the player's centre
        let mut enemy = Enemy::new(px - 10.0, 40.0, 3.0, MovePattern::Straight);
        enemy.pos.y = 300.0;
        state.enemies.push(enemy);
        assert_eq!(steer(&state).direction, Some(Direction::Right));
    }

    #[test]
    fn test_ignores_enemies_already_past() {
        let mut state = running();
        let mut enemy = Enemy::new(state.player.pos.x, 40.0, 3.0, MovePattern::Straight);
        enemy.pos.y = state.player.pos.y + state.player.size.y + 5.0;
        state.enemies.push(enemy);
        assert_eq!(steer(&state).direction, None);
    }

    #[test]
    fn test_pinned_player_turns_around() {
        let mut state = running();
        state.player.pos.x = 0.0;
        let mut enemy = Enemy::new(20.0, 40.0, 3.0, MovePattern::Straight);
        enemy.pos.y = 200.0;
        state.enemies.push(enemy);
        // Enemy centre is right of the player, so "away" is left, into the wall
        assert_eq!(steer(&state).direction, Some(Direction::Right));
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = running();
        for i in 1..=600 {
            let input = steer(&state);
            tick(&mut state, &input, i as f64 * 1000.0 / 60.0);
            assert!(state.player.pos.x >= 0.0);
        }
        // Not a skill test: the run either ended cleanly or is still going
        assert!(matches!(state.phase, RunPhase::Running | RunPhase::Over));
    }
}
