//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`]. A partial JSON
//! document only needs to name the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Environment variable naming a JSON tuning file (native only)
pub const TUNING_ENV_VAR: &str = "SKY_DODGE_TUNING";

/// Time source for the horizontal cloud drift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CloudDrift {
    /// Keyed off the frame timestamp; not reproducible between runs
    #[default]
    WallClock,
    /// Keyed off the tick counter, so replays with the same seed match
    TickPhase,
    /// No drift at all
    Off,
}

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be a probability in [0, 1], got {value}")]
    BadProbability { field: &'static str, value: f64 },
    #[error("{field} range is empty: min {min} > max {max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{what} ({size}) is wider than the field ({field_width})")]
    TooWide {
        what: &'static str,
        size: f32,
        field_width: f32,
    },
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_health: u32,

    pub enemy_size: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_spawn_chance: f64,
    /// Optional ceiling on concurrently live enemies (`None` = unbounded)
    pub max_enemies: Option<usize>,

    pub cloud_spawn_chance: f64,
    pub cloud_size_min: f32,
    pub cloud_size_max: f32,
    pub cloud_speed_min: f32,
    pub cloud_speed_max: f32,
    pub cloud_drift: CloudDrift,
    pub initial_clouds: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,

            enemy_size: ENEMY_SIZE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            max_enemies: None,

            cloud_spawn_chance: CLOUD_SPAWN_CHANCE,
            cloud_size_min: CLOUD_SIZE_MIN,
            cloud_size_max: CLOUD_SIZE_MAX,
            cloud_speed_min: CLOUD_SPEED_MIN,
            cloud_speed_max: CLOUD_SPEED_MAX,
            cloud_drift: CloudDrift::WallClock,
            initial_clouds: INITIAL_CLOUDS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value can drive the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("enemy_speed_min", self.enemy_speed_min),
            ("cloud_size_min", self.cloud_size_min),
            ("cloud_speed_min", self.cloud_speed_min),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("cloud_spawn_chance", self.cloud_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::BadProbability { field, value });
            }
        }

        for (field, min, max) in [
            ("enemy_speed", self.enemy_speed_min, self.enemy_speed_max),
            ("cloud_size", self.cloud_size_min, self.cloud_size_max),
            ("cloud_speed", self.cloud_speed_min, self.cloud_speed_max),
        ] {
            if min > max {
                return Err(TuningError::EmptyRange { field, min, max });
            }
        }

        for (what, size) in [("player", self.player_width), ("enemy", self.enemy_size)] {
            if size > self.field_width {
                return Err(TuningError::TooWide {
                    what,
                    size,
                    field_width: self.field_width,
                });
            }
        }

        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_dodge_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load tuning overrides from the file named by `SKY_DODGE_TUNING`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV_VAR) else {
            return Self::default();
        };

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));

        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_enemies": 12, "cloud_drift": "TickPhase" }"#)
            .unwrap();
        assert_eq!(tuning.max_enemies, Some(12));
        assert_eq!(tuning.cloud_drift, CloudDrift::TickPhase);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.enemy_spawn_chance, ENEMY_SPAWN_CHANCE);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "enemy_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::BadProbability {
                field: "enemy_spawn_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_speed_range() {
        let tuning = Tuning {
            enemy_speed_min: 6.0,
            enemy_speed_max: 3.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyRange { field: "enemy_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_enemy_wider_than_field() {
        let tuning = Tuning {
            field_width: 30.0,
            player_width: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooWide { what: "enemy", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
