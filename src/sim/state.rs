//! Game state and core simulation types
//!
//! Everything one run mutates lives in [`GameState`]. The renderer only ever
//! sees a [`FrameSnapshot`] of shared borrows.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::collision::Rect;
use super::spawn;
use crate::best_time::BestTime;
use crate::clamp_to_field;
use crate::consts::PLAYER_BOTTOM_MARGIN;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Start screen, nothing simulated yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; state is frozen for display until restart
    Over,
}

/// Enemy movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePattern {
    /// Falls straight down from its anchor
    Straight,
    /// Swings around its anchor on a sine
    Zigzag,
    /// Swings around its anchor on a cosine, falling slower
    Circle,
}

impl MovePattern {
    pub const ALL: [MovePattern; 3] = [
        MovePattern::Straight,
        MovePattern::Zigzag,
        MovePattern::Circle,
    ];
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick
    pub speed: f32,
    /// Informational only; a single hit ends the run
    pub health: u32,
}

impl Player {
    /// Canonical spawn: centred horizontally, resting near the bottom edge
    pub fn spawn(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let x = clamp_to_field(
            (tuning.field_width - size.x) / 2.0,
            size.x,
            tuning.field_width,
        );
        let y = tuning.field_height - size.y - PLAYER_BOTTOM_MARGIN;
        Self {
            pos: Vec2::new(x, y),
            size,
            speed: tuning.player_speed,
            health: tuning.player_health,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A falling enemy craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Base fall speed in pixels per tick
    pub speed: f32,
    /// False once the enemy has fallen out of the field
    pub active: bool,
    pub pattern: MovePattern,
    /// Angle accumulator driving the pattern, grows every tick
    pub phase: f32,
    /// Horizontal anchor the oscillating patterns swing around
    pub original_x: f32,
}

impl Enemy {
    /// A fresh enemy sitting just above the visible field
    pub fn new(original_x: f32, size: f32, speed: f32, pattern: MovePattern) -> Self {
        Self {
            pos: Vec2::new(original_x, -size),
            size: Vec2::splat(size),
            speed,
            active: true,
            pattern,
            phase: 0.0,
            original_x,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Decorative background cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    /// Centre of the cloud
    pub pos: Vec2,
    /// Radius-like extent
    pub size: f32,
    pub speed: f32,
}

/// Read-only view of one frame, handed to the renderer and the UI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: RunPhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub clouds: &'a [Cloud],
    pub survival_time: u32,
    pub best_time: u32,
    pub field: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    pub clouds: Vec<Cloud>,
    pub clock: GameClock,
    /// Whole seconds survived in the current (or last) run
    pub survival_time: u32,
    pub best: BestTime,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle game with the given seed and previously stored record
    pub fn new(seed: u64, tuning: Tuning, best_time: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&tuning),
            tuning,
            phase: RunPhase::Idle,
            enemies: Vec::new(),
            clouds: Vec::new(),
            clock: GameClock::default(),
            survival_time: 0,
            best: BestTime::new(best_time),
            time_ticks: 0,
        }
    }

    /// Idle/Over -> Running. Returns false if a run is already in progress.
    pub fn start_run(&mut self, now_ms: f64) -> bool {
        if self.phase == RunPhase::Running {
            log::warn!("Start requested while a run is in progress, ignoring");
            return false;
        }

        self.player = Player::spawn(&self.tuning);
        self.enemies.clear();
        self.clouds.clear();
        spawn::scatter_clouds(self);
        self.survival_time = 0;
        self.time_ticks = 0;
        self.clock.start(now_ms);
        self.phase = RunPhase::Running;

        log::info!("Run started (best {}s)", self.best.secs());
        true
    }

    /// Over -> Running, committing the finished run to the best time first.
    ///
    /// Returns the new record when the finished run beat the previous one,
    /// so the caller can persist it.
    pub fn restart_run(&mut self, now_ms: f64) -> Option<u32> {
        let record = match self.phase {
            RunPhase::Running => {
                log::warn!("Restart requested while a run is in progress, ignoring");
                return None;
            }
            RunPhase::Idle => None,
            RunPhase::Over => self
                .best
                .submit(self.survival_time)
                .then(|| self.best.secs()),
        };

        if let Some(secs) = record {
            log::info!("New best time: {}s", secs);
        }
        self.start_run(now_ms);
        record
    }

    /// Borrow the current frame for drawing
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            phase: self.phase,
            player: &self.player,
            enemies: &self.enemies,
            clouds: &self.clouds,
            survival_time: self.survival_time,
            best_time: self.best.secs(),
            field: Vec2::new(self.tuning.field_width, self.tuning.field_height),
        }
    }
}
