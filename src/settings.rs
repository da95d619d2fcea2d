//! Player preferences
//!
//! Persisted separately from game progress under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::Store;

/// Audio and haptics preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music: bool,
    pub sound: bool,
    pub vibration: bool,
    /// 0.0 - 1.0
    pub sound_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music: true,
            sound: true,
            vibration: true,
            sound_volume: 1.0,
        }
    }
}

impl Settings {
    /// Storage key for the settings save
    const STORAGE_KEY: &'static str = "settings";

    pub fn load(store: &Store) -> Self {
        store.load_or(Self::STORAGE_KEY, Self::default)
    }

    pub fn save(&self, store: &Store) {
        if let Err(err) = store.save(Self::STORAGE_KEY, self) {
            log::error!("failed to persist settings: {err}");
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }
}
