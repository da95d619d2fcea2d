//! Data-driven balance configuration
//!
//! Coin values and gameplay pacing live in JSON so designers can retune
//! without a code change. Every field has a default, so a partial file
//! still parses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_LOADING_DURATION;
use crate::flow::FailReason;

/// Coin economy values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconConfig {
    /// Daily reward payout
    pub daily_win_coin: i64,
    /// Cost of continuing after a run ends
    pub one_more_day_coin: i64,
    /// Payout for watching a rewarded ad
    pub ad_win_coin: i64,
    /// Wallet balance for a brand new player
    pub initial_coin: i64,
    pub level_complete_coin: i64,
}

impl Default for EconConfig {
    fn default() -> Self {
        Self {
            daily_win_coin: 101,
            one_more_day_coin: 40,
            ad_win_coin: 30,
            initial_coin: 130,
            level_complete_coin: 50,
        }
    }
}

/// Pacing and presentation knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seconds between level end and the success popup
    pub level_complete_delay: f32,
    /// Seconds between a fail and the fail popup
    pub level_fail_delay: f32,
    pub loading_screen_enabled: bool,
    /// Total progress-bar animation duration (seconds)
    pub loading_duration: f32,
    /// Message shown for each fail reason
    pub fail_messages: HashMap<FailReason, String>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        let mut fail_messages = HashMap::new();
        fail_messages.insert(FailReason::TimeOut, "Time's up!".to_string());
        fail_messages.insert(FailReason::OutOfMoves, "Out of moves!".to_string());
        Self {
            level_complete_delay: 1.0,
            level_fail_delay: 0.75,
            loading_screen_enabled: true,
            loading_duration: DEFAULT_LOADING_DURATION,
            fail_messages,
        }
    }
}

/// Config loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Aggregate configuration handed to the flow driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gameplay: GameplayConfig,
    pub econ: EconConfig,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded game config from {}", path.display());
        Ok(config)
    }
}
