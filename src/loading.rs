//! Loading-bar timing
//!
//! The loading screen is cosmetic, so its bar fills in three staged bursts
//! with short holds in between. The split is seeded and precomputed here;
//! the shell just samples `progress_at` each frame.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{LOADING_FINAL_HOLD, LOADING_STAGE_PAUSES, LOADING_STAGE_TARGETS};

/// Ease-out quadratic
fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Split a total duration into three parts, each between 20% and 40% of
/// the total, summing exactly to the total. Out-of-band thirds are
/// repaired by redistributing the excess over the other two parts.
pub fn split_three(total: f32, seed: u64) -> [f32; 3] {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut p1: f32 = rng.random_range(0.2..0.4);
    let mut p2: f32 = rng.random_range(0.2..0.4);
    let mut p3 = 1.0 - p1 - p2;

    if p3 < 0.2 {
        let excess = 0.2 - p3;
        p1 = (p1 - excess / 2.0).max(0.2);
        p2 = (p2 - excess / 2.0).max(0.2);
        p3 = 1.0 - p1 - p2;
    } else if p3 > 0.4 {
        let excess = p3 - 0.4;
        p1 = (p1 + excess / 2.0).min(0.4);
        p2 = (p2 + excess / 2.0).min(0.4);
        p3 = 1.0 - p1 - p2;
    }

    [total * p1, total * p2, total * p3]
}

#[derive(Debug, Clone, Copy)]
struct Stage {
    start: f32,
    duration: f32,
    from: f32,
    to: f32,
}

/// Precomputed three-stage fill timeline
#[derive(Debug, Clone)]
pub struct LoadingTimeline {
    stages: [Stage; 3],
    /// Full wall time including pauses and the final hold
    total: f32,
}

impl LoadingTimeline {
    pub fn new(bar_duration: f32, seed: u64) -> Self {
        let parts = split_three(bar_duration, seed);
        let mut stages = [Stage {
            start: 0.0,
            duration: 0.0,
            from: 0.0,
            to: 0.0,
        }; 3];

        let mut clock = 0.0;
        let mut from = 0.0;
        for (i, part) in parts.iter().enumerate() {
            stages[i] = Stage {
                start: clock,
                duration: *part,
                from,
                to: LOADING_STAGE_TARGETS[i],
            };
            from = LOADING_STAGE_TARGETS[i];
            clock += part;
            if i < LOADING_STAGE_PAUSES.len() {
                clock += LOADING_STAGE_PAUSES[i];
            }
        }

        Self {
            stages,
            total: clock + LOADING_FINAL_HOLD,
        }
    }

    /// Full wall time of the loading screen in seconds
    pub fn duration(&self) -> f32 {
        self.total
    }

    /// Bar fill in [0, 1] at `elapsed` seconds. The bar holds its last
    /// target during the pauses between stages.
    pub fn progress_at(&self, elapsed: f32) -> f32 {
        let mut last_target = 0.0;
        for stage in &self.stages {
            if elapsed < stage.start {
                return last_target;
            }
            if elapsed < stage.start + stage.duration {
                let t = (elapsed - stage.start) / stage.duration;
                return stage.from + (stage.to - stage.from) * ease_out_quad(t);
            }
            last_target = stage.to;
        }
        1.0
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sums_to_total() {
        for seed in 0..50 {
            let parts = split_three(3.0, seed);
            let sum: f32 = parts.iter().sum();
            assert!((sum - 3.0).abs() < 1e-4, "seed {seed}: sum {sum}");
        }
    }

    #[test]
    fn test_split_parts_stay_in_band() {
        for seed in 0..50 {
            for part in split_three(1.0, seed) {
                assert!(part >= 0.2 - 1e-4, "seed {seed}: part {part} too small");
                assert!(part <= 0.4 + 1e-4, "seed {seed}: part {part} too large");
            }
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        assert_eq!(split_three(1.5, 42), split_three(1.5, 42));
    }

    #[test]
    fn test_progress_is_monotonic_and_hits_targets() {
        let timeline = LoadingTimeline::new(1.5, 7);
        let mut last = -1.0;
        let steps = 300;
        for i in 0..=steps {
            let t = timeline.duration() * i as f32 / steps as f32;
            let p = timeline.progress_at(t);
            assert!(p >= last - 1e-5, "progress went backwards at t={t}");
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(timeline.progress_at(timeline.duration()), 1.0);
        assert!(timeline.is_finished(timeline.duration()));
        assert!(!timeline.is_finished(0.0));
    }

    #[test]
    fn test_bar_holds_during_pause() {
        let timeline = LoadingTimeline::new(1.5, 7);
        // End of stage 1 / start of its pause.
        let stage1_end = timeline.stages[0].start + timeline.stages[0].duration;
        let during_pause = stage1_end + 0.05;
        assert!((timeline.progress_at(during_pause) - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_starts_at_zero() {
        let timeline = LoadingTimeline::new(1.5, 3);
        assert_eq!(timeline.progress_at(0.0), 0.0);
    }
}
