//! XP budget tables and encounter-size scaling.
//!
//! A combat encounter is budgeted per party member using a threshold table
//! keyed by character level and target difficulty. The raw XP of the chosen
//! hostiles is then scaled by a size multiplier that models how much harder a
//! fight gets when attacks come from many directions at once.

use dw_core::Difficulty;

/// Per-character XP threshold table: `XP_THRESHOLDS[level - 1][difficulty]`.
///
/// Rows are character levels 1..=5, columns are easy/medium/hard/deadly.
/// Levels above 5 clamp to the level-5 row; the catalog's tier range ends
/// there and higher tiers would need their own bestiary.
const XP_THRESHOLDS: [[u32; 4]; 5] = [
    // easy  medium  hard  deadly
    [25, 50, 75, 100],     // level 1
    [50, 100, 150, 200],   // level 2
    [75, 150, 225, 400],   // level 3
    [125, 250, 375, 500],  // level 4
    [250, 500, 750, 1100], // level 5
];

/// Look up the per-character XP threshold for a level and difficulty.
///
/// Level 0 clamps up to 1 and anything above 5 clamps down to the level-5
/// row, so the lookup never panics on out-of-table input.
pub fn xp_threshold(level: u32, difficulty: Difficulty) -> u32 {
    let row = (level.clamp(1, 5) - 1) as usize;
    XP_THRESHOLDS[row][difficulty_column(difficulty)]
}

fn difficulty_column(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
        Difficulty::Deadly => 3,
    }
}

/// Encounter-size multiplier for a total hostile head count.
///
/// A lone hostile fights at face value; pairs and packs punch above their
/// summed XP because they spread the party's actions thin.
pub fn size_multiplier(count: u32) -> f64 {
    match count {
        0 | 1 => 1.0,
        2 => 1.5,
        3..=6 => 2.0,
        _ => 2.5,
    }
}

/// Acceptable deviation around an XP budget: 10% of the budget, never less
/// than 25 XP.
pub fn budget_tolerance(budget: u32) -> u32 {
    (budget / 10).max(25)
}

/// Effective XP of a hostile roster: raw XP total scaled by the size
/// multiplier for the full head count, rounded to the nearest point.
pub fn effective_xp(raw_total: u32, count: u32) -> u32 {
    (f64::from(raw_total) * size_multiplier(count)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_table() {
        assert_eq!(xp_threshold(1, Difficulty::Easy), 25);
        assert_eq!(xp_threshold(1, Difficulty::Deadly), 100);
        assert_eq!(xp_threshold(3, Difficulty::Medium), 150);
        assert_eq!(xp_threshold(3, Difficulty::Deadly), 400);
        assert_eq!(xp_threshold(5, Difficulty::Hard), 750);
        assert_eq!(xp_threshold(5, Difficulty::Deadly), 1100);
    }

    #[test]
    fn thresholds_increase_with_level() {
        for difficulty in Difficulty::all() {
            let mut prev = 0;
            for level in 1..=5 {
                let t = xp_threshold(level, difficulty);
                assert!(t > prev, "{difficulty} level {level}: {t} <= {prev}");
                prev = t;
            }
        }
    }

    #[test]
    fn thresholds_increase_with_difficulty() {
        for level in 1..=5 {
            let mut prev = 0;
            for difficulty in Difficulty::all() {
                let t = xp_threshold(level, difficulty);
                assert!(t > prev, "{difficulty} level {level}: {t} <= {prev}");
                prev = t;
            }
        }
    }

    #[test]
    fn out_of_table_levels_clamp() {
        assert_eq!(
            xp_threshold(0, Difficulty::Medium),
            xp_threshold(1, Difficulty::Medium)
        );
        assert_eq!(
            xp_threshold(9, Difficulty::Deadly),
            xp_threshold(5, Difficulty::Deadly)
        );
        assert_eq!(
            xp_threshold(20, Difficulty::Easy),
            xp_threshold(5, Difficulty::Easy)
        );
    }

    #[test]
    fn multiplier_steps() {
        assert_eq!(size_multiplier(0), 1.0);
        assert_eq!(size_multiplier(1), 1.0);
        assert_eq!(size_multiplier(2), 1.5);
        assert_eq!(size_multiplier(3), 2.0);
        assert_eq!(size_multiplier(6), 2.0);
        assert_eq!(size_multiplier(7), 2.5);
        assert_eq!(size_multiplier(40), 2.5);
    }

    #[test]
    fn multiplier_never_decreases() {
        let mut prev = 0.0;
        for count in 0..=20 {
            let m = size_multiplier(count);
            assert!(m >= prev, "count {count}: {m} < {prev}");
            prev = m;
        }
    }

    #[test]
    fn tolerance_has_a_floor() {
        assert_eq!(budget_tolerance(0), 25);
        assert_eq!(budget_tolerance(100), 25);
        assert_eq!(budget_tolerance(249), 25);
        assert_eq!(budget_tolerance(250), 25);
        assert_eq!(budget_tolerance(600), 60);
        assert_eq!(budget_tolerance(1100), 110);
    }

    #[test]
    fn effective_xp_scales_raw_total() {
        // One ogre at 450 XP fights at face value.
        assert_eq!(effective_xp(450, 1), 450);
        // Six goblins at 50 XP each double up.
        assert_eq!(effective_xp(300, 6), 600);
        // A horde of twelve crosses into the 2.5x band.
        assert_eq!(effective_xp(600, 12), 1500);
        assert_eq!(effective_xp(0, 0), 0);
    }
}
