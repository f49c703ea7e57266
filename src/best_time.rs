//! Best survival time record
//!
//! A single integer, in whole seconds, that only ever goes up. Reading and
//! writing it are best-effort: storage trouble is logged, never fatal.

use serde::{Deserialize, Serialize};

use crate::persistence::RecordStore;

/// Longest survival time seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTime {
    secs: u32,
}

impl BestTime {
    pub fn new(secs: u32) -> Self {
        Self { secs }
    }

    pub fn secs(&self) -> u32 {
        self.secs
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, survival_secs: u32) -> bool {
        survival_secs > self.secs
    }

    /// Offer a finished run. Returns true if it became the new record.
    pub fn submit(&mut self, survival_secs: u32) -> bool {
        if !self.qualifies(survival_secs) {
            return false;
        }
        self.secs = survival_secs;
        true
    }

    /// Read the stored record, falling back to zero on any failure
    pub fn load(store: &dyn RecordStore) -> Self {
        match store.load() {
            Ok(Some(secs)) => {
                log::info!("Loaded best time: {}s", secs);
                Self::new(secs)
            }
            Ok(None) => {
                log::info!("No best time stored, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best time, starting from 0: {}", e);
                Self::default()
            }
        }
    }

    /// Write the record; a failed write only loses the new record
    pub fn save(&self, store: &mut dyn RecordStore) {
        match store.save(self.secs) {
            Ok(()) => log::info!("Best time saved ({}s)", self.secs),
            Err(e) => log::warn!("Could not save best time {}s: {}", self.secs, e),
        }
    }
}
