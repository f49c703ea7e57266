//! Player preferences
//!
//! Persisted separately from the best time in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::{CloudDrift, Tuning};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw background clouds
    pub show_clouds: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (clouds stop drifting sideways)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_clouds: true,
            show_fps: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective cloud drift (respects reduced_motion)
    pub fn effective_cloud_drift(&self, configured: CloudDrift) -> CloudDrift {
        if self.reduced_motion {
            CloudDrift::Off
        } else {
            configured
        }
    }

    /// Fold the preferences that affect the simulation into a tuning
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.cloud_drift = self.effective_cloud_drift(tuning.cloud_drift);
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Could not write settings to LocalStorage");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Could not encode settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_stops_drift() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut tuning = Tuning::default();
        tuning.cloud_drift = CloudDrift::TickPhase;
        settings.apply_to(&mut tuning);
        assert_eq!(tuning.cloud_drift, CloudDrift::Off);
    }

    #[test]
    fn test_default_keeps_configured_drift() {
        let settings = Settings::default();
        assert_eq!(
            settings.effective_cloud_drift(CloudDrift::WallClock),
            CloudDrift::WallClock
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"show_fps": false}"#).unwrap();
        assert!(!settings.show_fps);
        assert!(settings.show_clouds);
        assert!(!settings.reduced_motion);
    }
}
