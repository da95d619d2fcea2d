//! Game-flow state machine
//!
//! Drives phase and popup transitions around the level lifecycle. The
//! embedding shell feeds wall-clock time in (`poll`) and drains
//! `FlowEvent`s out; the flow itself owns no timers and reads no clock.
//! All collaborators are injected - there is no shared global state.

use serde::{Deserialize, Serialize};

use crate::economy::GameConfig;
use crate::level::{Difficulty, LevelCatalog, LevelDefinition, NoLevelsAvailable, resolve_position};
use crate::progress::Progress;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Menu,
    Loading,
    Start,
    Play,
    Pause,
    End,
    Restart,
    KeepPlaying,
}

/// Popup requested from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Popup {
    #[default]
    None,
    Settings,
    LevelSuccess,
    LevelFail,
    HardLevel,
    NewFeature,
}

/// Why the current attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    #[default]
    None,
    TimeOut,
    OutOfMoves,
}

/// Events drained by the embedding shell
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    PopupRequested(Popup),
    LevelResolved {
        name: String,
        display_level: usize,
        difficulty: Difficulty,
    },
    CoinsAwarded(i64),
}

#[derive(Debug, Clone, Copy)]
struct PendingPopup {
    popup: Popup,
    due_at_ms: f64,
}

/// The game-flow driver
pub struct GameFlow {
    catalog: LevelCatalog,
    progress: Progress,
    config: GameConfig,
    phase: GamePhase,
    popup: Popup,
    fail_reason: FailReason,
    pending: Vec<PendingPopup>,
    events: Vec<FlowEvent>,
}

impl GameFlow {
    pub fn new(catalog: LevelCatalog, progress: Progress, config: GameConfig) -> Self {
        Self {
            catalog,
            progress,
            config,
            phase: GamePhase::Menu,
            popup: Popup::None,
            fail_reason: FailReason::None,
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn popup(&self) -> Popup {
        self.popup
    }

    pub fn fail_reason(&self) -> FailReason {
        self.fail_reason
    }

    /// Message for the current fail reason, from config
    pub fn fail_message(&self) -> Option<&str> {
        self.config
            .gameplay
            .fail_messages
            .get(&self.fail_reason)
            .map(String::as_str)
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, to: GamePhase) {
        if self.phase == to {
            log::warn!("phase is already {to:?}, transition skipped");
            return;
        }
        log::info!("phase {:?} -> {to:?}", self.phase);
        let from = self.phase;
        self.phase = to;
        self.events.push(FlowEvent::PhaseChanged { from, to });
    }

    fn set_popup(&mut self, popup: Popup) {
        if self.popup == popup {
            return;
        }
        self.popup = popup;
        self.events.push(FlowEvent::PopupRequested(popup));
    }

    fn schedule_popup(&mut self, popup: Popup, due_at_ms: f64) {
        self.pending.push(PendingPopup { popup, due_at_ms });
    }

    /// Enter the loading screen, or skip straight to Start when it is
    /// disabled in config.
    pub fn begin_loading(&mut self) {
        if self.config.gameplay.loading_screen_enabled {
            self.set_phase(GamePhase::Loading);
        } else {
            self.set_phase(GamePhase::Start);
        }
    }

    /// Resolve the level for the current cursor and enter the Start phase.
    ///
    /// Consumes the sequencer exactly once per level start. An empty
    /// catalog aborts the transition; the caller must surface the error,
    /// never substitute a level.
    pub fn start_level(&mut self) -> Result<&LevelDefinition, NoLevelsAvailable> {
        if matches!(self.phase, GamePhase::Play | GamePhase::Pause) {
            log::warn!("start_level during {:?}, tearing the level down first", self.phase);
        }
        let position = resolve_position(self.progress.cursor(), &self.catalog)?;
        let (name, difficulty) = {
            let level = self.catalog.level_at(position);
            (level.name.clone(), level.difficulty)
        };

        self.set_popup(Popup::None);
        self.fail_reason = FailReason::None;
        self.set_phase(GamePhase::Start);

        if difficulty == Difficulty::Hard {
            self.set_popup(Popup::HardLevel);
        }

        log::info!("starting level {} ({name})", self.progress.display_level());
        self.events.push(FlowEvent::LevelResolved {
            name,
            display_level: self.progress.display_level(),
            difficulty,
        });

        Ok(self.catalog.level_at(position))
    }

    /// The shell finished building the level; gameplay begins.
    pub fn enter_play(&mut self) {
        self.set_phase(GamePhase::Play);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Play {
            self.set_phase(GamePhase::Pause);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Pause {
            self.set_phase(GamePhase::Play);
        }
    }

    /// Level cleared: advance the cursor, award coins, and schedule the
    /// success popup after the configured delay.
    pub fn complete_level(&mut self, score: u32, now_ms: f64) {
        if self.phase != GamePhase::Play {
            log::warn!("complete_level during {:?} ignored", self.phase);
            return;
        }
        self.set_phase(GamePhase::End);
        self.progress.advance();
        self.progress.record_score(score);

        let reward = self.config.econ.level_complete_coin;
        self.progress.earn(reward);
        self.events.push(FlowEvent::CoinsAwarded(reward));

        let delay_ms = f64::from(self.config.gameplay.level_complete_delay) * 1000.0;
        self.schedule_popup(Popup::LevelSuccess, now_ms + delay_ms);
    }

    /// Level failed: the cursor stays put so the same level replays.
    pub fn fail_level(&mut self, reason: FailReason, now_ms: f64) {
        if self.phase != GamePhase::Play {
            log::warn!("fail_level during {:?} ignored", self.phase);
            return;
        }
        self.fail_reason = reason;
        self.set_phase(GamePhase::Restart);

        let delay_ms = f64::from(self.config.gameplay.level_fail_delay) * 1000.0;
        self.schedule_popup(Popup::LevelFail, now_ms + delay_ms);
    }

    /// Spend the continue fee and keep the run going. Returns false when
    /// the wallet can't cover it or the run isn't over.
    pub fn keep_playing(&mut self) -> bool {
        if self.phase != GamePhase::End {
            return false;
        }
        if !self.progress.spend(self.config.econ.one_more_day_coin) {
            return false;
        }
        self.set_phase(GamePhase::KeepPlaying);
        true
    }

    /// Back to the menu (run abandoned or finished).
    pub fn to_menu(&mut self) {
        self.set_popup(Popup::None);
        self.set_phase(GamePhase::Menu);
    }

    /// Fire popups whose deadline has passed.
    pub fn poll(&mut self, now_ms: f64) {
        let mut due: Vec<Popup> = Vec::new();
        self.pending.retain(|p| {
            if p.due_at_ms <= now_ms {
                due.push(p.popup);
                false
            } else {
                true
            }
        });
        for popup in due {
            self.set_popup(popup);
        }
    }
}
