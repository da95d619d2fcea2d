//! Box Rush - headless core for a conveyor box-sorting puzzle game
//!
//! Core modules:
//! - `level`: Level data, catalog, and deterministic cursor sequencing
//! - `flow`: Game-flow state machine (phases, popups, fail reasons)
//! - `progress`: Persisted player progress (cursor, coins, best score)
//! - `settings`: Player preferences
//! - `economy`: Data-driven balance configuration
//! - `loading`: Loading-bar timing split
//! - `persistence`: Versioned save envelope + storage backends

pub mod economy;
pub mod flow;
pub mod level;
pub mod loading;
pub mod persistence;
pub mod progress;
pub mod remote;
pub mod settings;

pub use flow::{FailReason, GameFlow, GamePhase, Popup};
pub use level::{LevelCatalog, LevelDefinition, NoLevelsAvailable, resolve};
pub use progress::Progress;
pub use remote::RemoteOverrides;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions for authored levels
    pub const DEFAULT_GRID_ROWS: usize = 5;
    pub const DEFAULT_GRID_COLS: usize = 5;

    /// Where cyclic replay begins unless the catalog or remote config says otherwise
    pub const DEFAULT_LOOP_START: usize = 1;

    /// Loading bar stage targets (fraction of full bar)
    pub const LOADING_STAGE_TARGETS: [f32; 3] = [0.35, 0.70, 1.0];
    /// Pauses after the first and second loading stages (seconds)
    pub const LOADING_STAGE_PAUSES: [f32; 2] = [0.1, 0.15];
    /// Hold on the full bar before the loading screen closes (seconds)
    pub const LOADING_FINAL_HOLD: f32 = 0.2;
    /// Default total progress-bar animation duration (seconds)
    pub const DEFAULT_LOADING_DURATION: f32 = 1.5;

    /// Directory name for native save files (under the platform data dir)
    pub const SAVE_DIR_NAME: &str = "box-rush";
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser bootstrap: panic hook + console logging.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
