//! Keyboard and pointer input
//!
//! [`InputState`] is written by host event handlers between ticks. Once per
//! tick its owner calls [`InputState::take_tick_input`] and hands the
//! resulting immutable [`TickInput`] to the simulation.

use std::collections::HashMap;

/// Key identifiers that steer left
pub const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
/// Key identifiers that steer right
pub const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];

/// Resolved horizontal steering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn of_key(key: &str) -> Option<Self> {
        if LEFT_KEYS.contains(&key) {
            Some(Direction::Left)
        } else if RIGHT_KEYS.contains(&key) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held steering direction, if any
    pub direction: Option<Direction>,
    /// Absolute field x the player was pointed at since the last tick
    pub pointer_x: Option<f32>,
}

/// Current pressed/released state of every key seen so far
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashMap<String, bool>,
    /// Direction of the most recent steering key press
    last_direction: Option<Direction>,
    pointer_x: Option<f32>,
}

/// Map key name used for tracking. Character keys are case-folded so a
/// Shift change between keydown and keyup still releases the key.
fn key_id(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => key.to_string(),
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        let id = key_id(key);
        if let Some(direction) = Direction::of_key(&id) {
            self.last_direction = Some(direction);
        }
        self.pressed.insert(id, true);
    }

    pub fn release(&mut self, key: &str) {
        self.pressed.insert(key_id(key), false);
    }

    /// Forget every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.last_direction = None;
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.get(&key_id(key)).copied().unwrap_or(false)
    }

    fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_pressed(k))
    }

    /// Record a pointer placement in field coordinates
    pub fn point_at(&mut self, field_x: f32) {
        self.pointer_x = Some(field_x);
    }

    /// Steering from held keys. With both directions held, the one pressed
    /// last wins.
    pub fn direction(&self) -> Option<Direction> {
        let left = self.any_pressed(&LEFT_KEYS);
        let right = self.any_pressed(&RIGHT_KEYS);
        match (left, right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            (true, true) => self.last_direction,
            (false, false) => None,
        }
    }

    /// Snapshot for the next tick; consumes any pending pointer placement
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            direction: self.direction(),
            pointer_x: self.pointer_x.take(),
        }
    }
}
