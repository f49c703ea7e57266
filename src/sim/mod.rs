//! Simulation module
//!
//! All gameplay logic lives here. Given a seed, a sequence of tick inputs
//! and timestamps, a run replays identically:
//! - Seeded RNG only
//! - Time comes in as an argument, never read from the platform
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod input;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::GameClock;
pub use collision::{Rect, overlaps, player_hit};
pub use input::{Direction, InputState, TickInput};
pub use state::{Cloud, Enemy, FrameSnapshot, GameState, MovePattern, Player, RunPhase};
pub use tick::{TickReport, tick};
