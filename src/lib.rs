//! Sky Dodge - a survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawning, motion, collisions, run state)
//! - `driver`: Frame loop scheduling with owned, cancellable pending frames
//! - `game`: A playable session tying the simulation to its collaborators
//! - `renderer`: 2D drawing surface abstraction
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Best-time record storage
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod best_time;
pub mod driver;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_time::BestTime;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size; display scaling happens outside the core
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0; // px per tick
    pub const PLAYER_HEALTH: u32 = 3;
    /// Gap between the player's bottom edge and the bottom of the field
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED_MIN: f32 = 2.0;
    pub const ENEMY_SPEED_MAX: f32 = 5.0;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;

    /// Pattern motion
    pub const PHASE_STEP: f32 = 0.1;
    pub const ZIGZAG_AMPLITUDE: f32 = 60.0;
    pub const CIRCLE_AMPLITUDE: f32 = 40.0;
    pub const CIRCLE_SPEED_FACTOR: f32 = 0.8;

    /// Clouds (decorative)
    pub const CLOUD_SPAWN_CHANCE: f64 = 0.01;
    pub const CLOUD_SIZE_MIN: f32 = 20.0;
    pub const CLOUD_SIZE_MAX: f32 = 50.0;
    pub const CLOUD_SPEED_MIN: f32 = 0.5;
    pub const CLOUD_SPEED_MAX: f32 = 1.5;
    pub const CLOUD_DRIFT: f32 = 0.1;
    /// Clouds are recycled once this far below the bottom edge
    pub const CLOUD_DESPAWN_MARGIN: f32 = 50.0;
    pub const INITIAL_CLOUDS: usize = 3;
}

/// Clamp a left edge so a span of `width` stays inside `[0, field_width]`.
#[inline]
pub fn clamp_to_field(x: f32, width: f32, field_width: f32) -> f32 {
    x.clamp(0.0, (field_width - width).max(0.0))
}
