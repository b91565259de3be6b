//! Adaptive pacing telemetry.
//!
//! The generator can be handed a [`DrainTracker`] that remembers how much of
//! the party's resources past encounters actually burned, per session and
//! difficulty. When recorded drain runs hot the tracker nudges future budgets
//! down; when encounters barely scratch the party it nudges them up. The
//! nudge is bounded so one bad night cannot double the next fight.

use std::collections::HashMap;

use dw_core::Difficulty;
use serde::{Deserialize, Serialize};

/// Fraction of party resources a well-tuned encounter should drain.
pub const TARGET_DRAIN: f64 = 0.25;

/// Largest budget swing the tracker may apply in either direction.
pub const MAX_SWING: f64 = 0.25;

/// Running drain statistics for one session/difficulty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrainStats {
    /// Number of encounter outcomes recorded.
    pub samples: u32,
    /// Mean recorded drain, maintained incrementally.
    pub average: f64,
}

/// Records encounter drain per session and difficulty and turns it into a
/// bounded budget adjustment.
///
/// The tracker holds no references to the generator; callers own it and pass
/// it in when they want adaptive budgets. Sessions persist until explicitly
/// removed with [`DrainTracker::remove_session`] or [`DrainTracker::clear`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrainTracker {
    sessions: HashMap<String, HashMap<Difficulty, DrainStats>>,
}

impl DrainTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the observed drain of one finished encounter.
    ///
    /// `drain` is the fraction of party resources spent, clamped into
    /// `[0.0, 1.0]` so a wild outlier cannot poison the average.
    pub fn record_outcome(
        &mut self,
        session: impl Into<String>,
        difficulty: Difficulty,
        drain: f64,
    ) {
        let drain = drain.clamp(0.0, 1.0);
        let stats = self
            .sessions
            .entry(session.into())
            .or_default()
            .entry(difficulty)
            .or_default();
        stats.average += (drain - stats.average) / f64::from(stats.samples + 1);
        stats.samples += 1;
    }

    /// The stats recorded for one session/difficulty bucket, if any.
    pub fn stats(&self, session: &str, difficulty: Difficulty) -> Option<DrainStats> {
        self.sessions
            .get(session)
            .and_then(|bucket| bucket.get(&difficulty))
            .copied()
    }

    /// Budget multiplier for a session and difficulty.
    ///
    /// With no recorded samples this is exactly `1.0`. Otherwise it is
    /// `1.0 + (average - TARGET_DRAIN)` clamped to a swing of
    /// [`MAX_SWING`], so the result always lies in `[0.75, 1.25]`.
    pub fn adjustment(&self, session: &str, difficulty: Difficulty) -> f64 {
        match self.stats(session, difficulty) {
            Some(stats) if stats.samples > 0 => {
                1.0 + (stats.average - TARGET_DRAIN).clamp(-MAX_SWING, MAX_SWING)
            }
            _ => 1.0,
        }
    }

    /// Drop every bucket recorded for one session. Returns `true` if the
    /// session had any data.
    pub fn remove_session(&mut self, session: &str) -> bool {
        self.sessions.remove(session).is_some()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// True when no outcomes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsampled_buckets_adjust_by_one() {
        let tracker = DrainTracker::new();
        assert_eq!(tracker.adjustment("s1", Difficulty::Medium), 1.0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn on_target_drain_leaves_budget_alone() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Medium, TARGET_DRAIN);
        let adj = tracker.adjustment("s1", Difficulty::Medium);
        assert!((adj - 1.0).abs() < 1e-12);
    }

    #[test]
    fn incremental_mean_matches_arithmetic_mean() {
        let mut tracker = DrainTracker::new();
        for drain in [0.2, 0.4, 0.6] {
            tracker.record_outcome("s1", Difficulty::Hard, drain);
        }
        let stats = tracker.stats("s1", Difficulty::Hard).unwrap();
        assert_eq!(stats.samples, 3);
        assert!((stats.average - 0.4).abs() < 1e-9);
    }

    #[test]
    fn heavy_drain_caps_at_upper_swing() {
        let mut tracker = DrainTracker::new();
        for _ in 0..5 {
            tracker.record_outcome("s1", Difficulty::Deadly, 1.0);
        }
        assert!((tracker.adjustment("s1", Difficulty::Deadly) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn trivial_drain_floors_at_lower_swing() {
        let mut tracker = DrainTracker::new();
        for _ in 0..5 {
            tracker.record_outcome("s1", Difficulty::Easy, 0.0);
        }
        assert!((tracker.adjustment("s1", Difficulty::Easy) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn two_brutal_fights_and_a_cakewalk() {
        let mut tracker = DrainTracker::new();
        for drain in [1.0, 1.0, 0.0] {
            tracker.record_outcome("s1", Difficulty::Medium, drain);
        }
        let stats = tracker.stats("s1", Difficulty::Medium).unwrap();
        assert!((stats.average - 2.0 / 3.0).abs() < 1e-9);
        // 2/3 - 0.25 exceeds the swing cap, so the adjustment pins at 1.25.
        assert!((tracker.adjustment("s1", Difficulty::Medium) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn outlier_drain_is_clamped_before_averaging() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Medium, 7.5);
        tracker.record_outcome("s2", Difficulty::Medium, -3.0);
        assert_eq!(tracker.stats("s1", Difficulty::Medium).unwrap().average, 1.0);
        assert_eq!(tracker.stats("s2", Difficulty::Medium).unwrap().average, 0.0);
    }

    #[test]
    fn sessions_and_difficulties_stay_isolated() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Medium, 1.0);
        assert!((tracker.adjustment("s1", Difficulty::Medium) - 1.25).abs() < 1e-12);
        assert_eq!(tracker.adjustment("s1", Difficulty::Hard), 1.0);
        assert_eq!(tracker.adjustment("s2", Difficulty::Medium), 1.0);
    }

    #[test]
    fn adjustment_stays_bounded() {
        let mut tracker = DrainTracker::new();
        let drains = [0.0, 0.1, 0.9, 1.0, 0.5, 0.33, 0.25, 0.75];
        for (i, drain) in drains.iter().enumerate() {
            tracker.record_outcome("s1", Difficulty::Medium, *drain);
            let adj = tracker.adjustment("s1", Difficulty::Medium);
            assert!((0.75..=1.25).contains(&adj), "sample {i}: {adj} out of range");
        }
    }

    #[test]
    fn remove_session_evicts_all_buckets() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Easy, 0.9);
        tracker.record_outcome("s1", Difficulty::Hard, 0.9);
        assert!(tracker.remove_session("s1"));
        assert!(!tracker.remove_session("s1"));
        assert_eq!(tracker.adjustment("s1", Difficulty::Easy), 1.0);
        assert_eq!(tracker.adjustment("s1", Difficulty::Hard), 1.0);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Medium, 0.8);
        tracker.record_outcome("s2", Difficulty::Medium, 0.8);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.adjustment("s1", Difficulty::Medium), 1.0);
    }

    #[test]
    fn tracker_round_trips_through_json() {
        let mut tracker = DrainTracker::new();
        tracker.record_outcome("s1", Difficulty::Hard, 0.6);
        tracker.record_outcome("s1", Difficulty::Hard, 0.2);
        let json = serde_json::to_string(&tracker).unwrap();
        let back: DrainTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.stats("s1", Difficulty::Hard),
            tracker.stats("s1", Difficulty::Hard)
        );
    }
}
