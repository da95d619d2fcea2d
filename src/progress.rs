//! Persisted player progress
//!
//! Owns the level cursor plus the coin wallet, best score, and
//! daily-reward bookkeeping. Every mutator persists before returning, so
//! a crash never loses more than the in-flight change. Timestamps are
//! Unix milliseconds supplied by the caller; the core never reads a
//! clock.

use serde::{Deserialize, Serialize};

use crate::economy::EconConfig;
use crate::persistence::Store;

/// Storage key for the progress save
const STORAGE_KEY: &str = "progress";

/// The serialized save payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Zero-based index of the next level to play
    pub cursor: usize,
    pub coins: i64,
    pub best_score: u32,
    pub last_active_ms: f64,
    pub last_daily_collect_ms: f64,
    pub daily_collect_count: u32,
}

impl ProgressData {
    fn fresh(econ: &EconConfig, now_ms: f64) -> Self {
        Self {
            cursor: 0,
            coins: econ.initial_coin,
            best_score: 0,
            last_active_ms: now_ms,
            last_daily_collect_ms: now_ms,
            daily_collect_count: 0,
        }
    }
}

/// Save-data collaborator: the cursor's single owner
pub struct Progress {
    data: ProgressData,
    store: Store,
}

impl Progress {
    /// Load the save, or start fresh (seeded from the economy config) and
    /// persist the fresh state immediately.
    pub fn load(store: Store, econ: &EconConfig, now_ms: f64) -> Self {
        let mut fresh = false;
        let data = store.load_or(STORAGE_KEY, || {
            fresh = true;
            ProgressData::fresh(econ, now_ms)
        });
        let progress = Self { data, store };
        if fresh {
            progress.persist();
        }
        log::info!(
            "progress loaded: level {}, {} coins",
            progress.display_level(),
            progress.coins()
        );
        progress
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(STORAGE_KEY, &self.data) {
            log::error!("failed to persist progress: {err}");
        }
    }

    // === Cursor ===

    pub fn cursor(&self) -> usize {
        self.data.cursor
    }

    /// 1-based level number for display and analytics
    pub fn display_level(&self) -> usize {
        self.data.cursor + 1
    }

    pub fn advance(&mut self) {
        self.data.cursor += 1;
        self.persist();
    }

    pub fn retreat(&mut self) {
        self.data.cursor = self.data.cursor.saturating_sub(1);
        self.persist();
    }

    pub fn reset(&mut self) {
        self.data.cursor = 0;
        self.persist();
    }

    pub fn set(&mut self, cursor: usize) {
        self.data.cursor = cursor;
        self.persist();
    }

    // === Coins ===

    pub fn coins(&self) -> i64 {
        self.data.coins
    }

    pub fn earn(&mut self, amount: i64) {
        self.data.coins += amount;
        self.persist();
    }

    /// Returns false (and changes nothing) when the wallet can't cover it.
    pub fn spend(&mut self, amount: i64) -> bool {
        if amount > self.data.coins {
            log::warn!("refusing to spend {amount} with {} coins", self.data.coins);
            return false;
        }
        self.data.coins -= amount;
        self.persist();
        true
    }

    // === Best score ===

    pub fn best_score(&self) -> u32 {
        self.data.best_score
    }

    /// Record a finished run's score; returns true on a new best.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score <= self.data.best_score {
            return false;
        }
        self.data.best_score = score;
        self.persist();
        true
    }

    // === Activity / daily rewards ===

    pub fn last_active_ms(&self) -> f64 {
        self.data.last_active_ms
    }

    pub fn touch(&mut self, now_ms: f64) {
        self.data.last_active_ms = now_ms;
        self.persist();
    }

    pub fn daily_collect_count(&self) -> u32 {
        self.data.daily_collect_count
    }

    pub fn last_daily_collect_ms(&self) -> f64 {
        self.data.last_daily_collect_ms
    }

    pub fn collect_daily(&mut self, now_ms: f64) {
        self.data.last_daily_collect_ms = now_ms;
        self.data.daily_collect_count += 1;
        self.persist();
    }

    pub fn reset_daily(&mut self) {
        self.data.daily_collect_count = 0;
        self.persist();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        (dir, store)
    }

    #[test]
    fn test_fresh_save_seeded_from_econ() {
        let (_dir, store) = store();
        let econ = EconConfig::default();
        let progress = Progress::load(store.clone(), &econ, 1000.0);
        assert_eq!(progress.cursor(), 0);
        assert_eq!(progress.display_level(), 1);
        assert_eq!(progress.coins(), econ.initial_coin);
        // The fresh state was persisted immediately.
        assert!(store.load::<ProgressData>("progress").is_some());
    }

    #[test]
    fn test_mutators_persist_immediately() {
        let (_dir, store) = store();
        let econ = EconConfig::default();
        let mut progress = Progress::load(store.clone(), &econ, 0.0);
        progress.advance();
        progress.advance();
        progress.earn(20);

        // A second load sees everything without an explicit save call.
        let reloaded = Progress::load(store, &econ, 0.0);
        assert_eq!(reloaded.cursor(), 2);
        assert_eq!(reloaded.coins(), econ.initial_coin + 20);
    }

    #[test]
    fn test_retreat_clamps_at_zero() {
        let (_dir, store) = store();
        let mut progress = Progress::load(store, &EconConfig::default(), 0.0);
        progress.retreat();
        assert_eq!(progress.cursor(), 0);
        progress.set(5);
        progress.retreat();
        assert_eq!(progress.cursor(), 4);
        progress.reset();
        assert_eq!(progress.cursor(), 0);
    }

    #[test]
    fn test_spend_rejects_overdraft() {
        let (_dir, store) = store();
        let mut progress = Progress::load(store, &EconConfig::default(), 0.0);
        let balance = progress.coins();
        assert!(!progress.spend(balance + 1));
        assert_eq!(progress.coins(), balance);
        assert!(progress.spend(balance));
        assert_eq!(progress.coins(), 0);
    }

    #[test]
    fn test_best_score_is_monotonic() {
        let (_dir, store) = store();
        let mut progress = Progress::load(store, &EconConfig::default(), 0.0);
        assert!(progress.record_score(100));
        assert!(!progress.record_score(80));
        assert!(!progress.record_score(100));
        assert_eq!(progress.best_score(), 100);
        assert!(progress.record_score(150));
    }

    #[test]
    fn test_daily_collection_bookkeeping() {
        let (_dir, store) = store();
        let mut progress = Progress::load(store, &EconConfig::default(), 0.0);
        progress.collect_daily(5000.0);
        progress.collect_daily(9000.0);
        assert_eq!(progress.daily_collect_count(), 2);
        assert_eq!(progress.last_daily_collect_ms(), 9000.0);
        progress.reset_daily();
        assert_eq!(progress.daily_collect_count(), 0);
    }
}
