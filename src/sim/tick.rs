//! Per-frame simulation tick
//!
//! Advances a running game by one step: clock, player, enemies, spawns,
//! clouds, then the collision check that may end the run.

use super::collision::player_hit;
use super::input::TickInput;
use super::motion;
use super::spawn;
use super::state::{GameState, RunPhase};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when the state was not running and nothing was simulated
    pub simulated: bool,
    /// An enemy was spawned this tick
    pub spawned: bool,
    /// The player was hit and the run is now over
    pub collided: bool,
}

/// Advance the game state by one frame.
///
/// `now_ms` comes from a monotonic clock on the same time base as the run's
/// start timestamp. Nothing moves unless the run is in progress, so an
/// ended run stays frozen for display.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickReport {
    if state.phase != RunPhase::Running {
        return TickReport::default();
    }

    state.time_ticks += 1;
    // Never count down within a run, even if the clock steps back
    state.survival_time = state.survival_time.max(state.clock.elapsed_secs(now_ms));

    let field_width = state.tuning.field_width;
    let field_height = state.tuning.field_height;

    motion::move_player(&mut state.player, input, field_width);
    motion::advance_enemies(&mut state.enemies, field_width, field_height);
    let spawned = spawn::spawn_step(state);

    let drift_t = motion::drift_time(state.tuning.cloud_drift, now_ms, state.time_ticks);
    motion::advance_clouds(&mut state.clouds, drift_t, field_height);

    let collided = player_hit(&state.player, &state.enemies);
    if collided {
        state.phase = RunPhase::Over;
        log::info!(
            "Run over after {}s ({} ticks, {} enemies live)",
            state.survival_time,
            state.time_ticks,
            state.enemies.len()
        );
    }

    TickReport {
        simulated: true,
        spawned,
        collided,
    }
}
