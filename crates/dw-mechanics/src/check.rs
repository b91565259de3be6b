//! d20 checks against a difficulty class.
//!
//! Skill checks, saves, and the grapple contest all reduce to the same
//! shape: roll a d20 under some mode, add a modifier, compare to a DC.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::dice::roll::{RollMode, RollResult, roll_d20};

/// Outcome of a d20 check, carrying enough to narrate the attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// The underlying d20 roll.
    pub roll: RollResult,
    /// Modifier added to the kept die.
    pub modifier: i32,
    /// Difficulty class tested against.
    pub dc: i32,
    /// Kept die plus modifier.
    pub total: i32,
    /// True when the total meets or beats the DC.
    pub success: bool,
    /// Total minus DC; negative on a failure.
    pub margin: i32,
}

impl CheckOutcome {
    /// True when the kept die was a natural 20.
    pub fn is_critical_success(&self) -> bool {
        self.roll.natural_twenty
    }

    /// True when the kept die was a natural 1.
    pub fn is_critical_failure(&self) -> bool {
        self.roll.natural_one
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.success { "success" } else { "failure" };
        write!(f, "{} vs DC {} ({verdict})", self.total, self.dc)
    }
}

/// Roll a d20 check: `1d20 [mode] + modifier` vs `dc`.
pub fn resolve_check<R: RngCore>(
    rng: &mut R,
    modifier: i32,
    dc: i32,
    mode: RollMode,
) -> CheckOutcome {
    let roll = roll_d20(rng, mode);
    let total = roll.total + modifier;
    CheckOutcome {
        modifier,
        dc,
        total,
        success: total >= dc,
        margin: total - dc,
        roll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Mulberry32;

    #[test]
    fn outcome_fields_stay_consistent() {
        for seed in 0..100 {
            let mut rng = Mulberry32::new(seed);
            let outcome = resolve_check(&mut rng, 3, 12, RollMode::Normal);
            assert_eq!(outcome.total, outcome.roll.total + 3);
            assert_eq!(outcome.success, outcome.total >= 12);
            assert_eq!(outcome.margin, outcome.total - 12);
        }
    }

    #[test]
    fn identical_seeds_give_identical_checks() {
        let mut a = Mulberry32::new(314);
        let mut b = Mulberry32::new(314);
        assert_eq!(
            resolve_check(&mut a, 5, 15, RollMode::Advantage),
            resolve_check(&mut b, 5, 15, RollMode::Advantage)
        );
    }

    #[test]
    fn advantage_never_rolls_below_normal_from_the_same_seed() {
        // Both draws start from the same stream, so the advantage roll's
        // first die equals the normal roll.
        for seed in 0..100 {
            let mut normal_rng = Mulberry32::new(seed);
            let mut adv_rng = Mulberry32::new(seed);
            let normal = resolve_check(&mut normal_rng, 2, 10, RollMode::Normal);
            let adv = resolve_check(&mut adv_rng, 2, 10, RollMode::Advantage);
            assert!(adv.total >= normal.total);
        }
    }

    #[test]
    fn impossible_and_trivial_dcs_force_both_verdicts() {
        let mut rng = Mulberry32::new(8);
        let guaranteed = resolve_check(&mut rng, 0, -10, RollMode::Normal);
        assert!(guaranteed.success);
        let hopeless = resolve_check(&mut rng, 0, 40, RollMode::Normal);
        assert!(!hopeless.success);
        assert!(hopeless.margin < 0);
    }

    #[test]
    fn critical_flags_mirror_the_roll() {
        for seed in 0..200 {
            let mut rng = Mulberry32::new(seed);
            let outcome = resolve_check(&mut rng, 0, 10, RollMode::Normal);
            assert_eq!(outcome.is_critical_success(), outcome.roll.natural_twenty);
            assert_eq!(outcome.is_critical_failure(), outcome.roll.natural_one);
        }
    }

    #[test]
    fn display_reads_like_a_table_callout() {
        let mut rng = Mulberry32::new(21);
        let outcome = resolve_check(&mut rng, 4, 13, RollMode::Normal);
        let line = outcome.to_string();
        assert!(line.contains("vs DC 13"));
        assert!(line.contains("success") || line.contains("failure"));
    }
}
