//! Dice expressions and rolls.
//!
//! Expressions use the table notation `NdM+K` / `NdM-K` (`2d6+1`, `d20`,
//! `3d8-2`). Parsing is strict: anything malformed is an error, never a
//! silent default, because expression strings arrive from narrative tools
//! that must learn about their typos.

/// Rolling dice expressions and d20s with advantage or disadvantage.
pub mod roll;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Maximum dice in one expression.
pub const MAX_DICE: u32 = 100;
/// Maximum sides on one die.
pub const MAX_SIDES: u32 = 10_000;
/// Maximum magnitude of the flat modifier.
pub const MAX_MODIFIER: u32 = 10_000;

/// Parse one unsigned numeric part, digits only. Explicit signs inside the
/// expression (`2d6++1`) are malformed, even though `str::parse` would
/// accept them.
fn digits(input: &str, part: &str, what: &str) -> MechResult<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MechError::invalid_expression(
            input,
            format!("{what} is not a number"),
        ));
    }
    part.parse::<u32>()
        .map_err(|_| MechError::invalid_expression(input, format!("{what} is out of range")))
}

/// A parsed dice expression: count, sides, and a signed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice to roll.
    pub count: u32,
    /// Sides per die. Zero parses, and is clamped to one when rolled.
    pub sides: u32,
    /// Flat modifier added to the summed faces.
    pub modifier: i32,
}

impl DiceExpr {
    /// Build an expression directly.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Parse `NdM`, `NdM+K`, or `NdM-K`. The count may be omitted (`d20`),
    /// whitespace is ignored, and case is irrelevant (`2D6+1`).
    pub fn parse(input: &str) -> MechResult<Self> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let Some((count_part, rest)) = cleaned.split_once('d') else {
            return Err(MechError::invalid_expression(input, "expected NdM form"));
        };

        let count = if count_part.is_empty() {
            1
        } else {
            digits(input, count_part, "dice count")?
        };
        if count > MAX_DICE {
            return Err(MechError::invalid_expression(
                input,
                format!("at most {MAX_DICE} dice per roll"),
            ));
        }

        let (sides_part, sign, magnitude_part) = if let Some((sides, bonus)) = rest.split_once('+')
        {
            (sides, 1, Some(bonus))
        } else if let Some((sides, penalty)) = rest.split_once('-') {
            (sides, -1, Some(penalty))
        } else {
            (rest, 1, None)
        };

        let modifier = match magnitude_part {
            Some(part) => {
                let magnitude = digits(input, part, "modifier")?;
                if magnitude > MAX_MODIFIER {
                    return Err(MechError::invalid_expression(
                        input,
                        format!("modifier magnitude is at most {MAX_MODIFIER}"),
                    ));
                }
                sign * magnitude as i32
            }
            None => 0,
        };

        let sides = digits(input, sides_part, "die size")?;
        if sides > MAX_SIDES {
            return Err(MechError::invalid_expression(
                input,
                format!("at most {MAX_SIDES} sides per die"),
            ));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Smallest possible total.
    pub fn min_total(&self) -> i32 {
        saturate(i64::from(self.count) + i64::from(self.modifier))
    }

    /// Largest possible total.
    pub fn max_total(&self) -> i32 {
        let faces = i64::from(self.count) * i64::from(self.sides.max(1));
        saturate(faces + i64::from(self.modifier))
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier.cmp(&0) {
            std::cmp::Ordering::Greater => write!(f, "+{}", self.modifier),
            std::cmp::Ordering::Less => write!(f, "{}", self.modifier),
            std::cmp::Ordering::Equal => Ok(()),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::roll::roll_dice;
    use super::*;
    use crate::rng::Mulberry32;

    #[test]
    fn parses_standard_forms() {
        assert_eq!(DiceExpr::parse("2d6+1").unwrap(), DiceExpr::new(2, 6, 1));
        assert_eq!(DiceExpr::parse("1d20").unwrap(), DiceExpr::new(1, 20, 0));
        assert_eq!(DiceExpr::parse("d20").unwrap(), DiceExpr::new(1, 20, 0));
        assert_eq!(DiceExpr::parse("3d8-2").unwrap(), DiceExpr::new(3, 8, -2));
        assert_eq!(DiceExpr::parse("4d6").unwrap(), DiceExpr::new(4, 6, 0));
    }

    #[test]
    fn tolerates_case_and_whitespace() {
        assert_eq!(DiceExpr::parse("2D6 + 1").unwrap(), DiceExpr::new(2, 6, 1));
        assert_eq!(DiceExpr::parse(" d12 ").unwrap(), DiceExpr::new(1, 12, 0));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "", "abc", "d", "2d", "2x6", "2d6+", "2d6++1", "2d6+-1", "+2d6", "-1d6", "2d6+1.5",
            "1d6+2d4", "2d-6",
        ] {
            assert!(DiceExpr::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_absurd_counts_and_sides() {
        assert!(DiceExpr::parse("101d6").is_err());
        assert!(DiceExpr::parse("2d10001").is_err());
        assert!(DiceExpr::parse("99999999999d6").is_err());
        assert!(DiceExpr::parse("1d6+99999").is_err());
        assert!(DiceExpr::parse("100d6").is_ok());
    }

    #[test]
    fn zero_count_and_zero_sides_parse() {
        assert_eq!(DiceExpr::parse("0d6+5").unwrap(), DiceExpr::new(0, 6, 5));
        assert_eq!(DiceExpr::parse("2d0+1").unwrap(), DiceExpr::new(2, 0, 1));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(DiceExpr::new(2, 6, 1).to_string(), "2d6+1");
        assert_eq!(DiceExpr::new(1, 20, 0).to_string(), "1d20");
        assert_eq!(DiceExpr::new(3, 8, -2).to_string(), "3d8-2");
        assert_eq!(DiceExpr::parse("d20").unwrap().to_string(), "1d20");
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let expr: DiceExpr = "2d4+3".parse().unwrap();
        assert_eq!(expr, DiceExpr::new(2, 4, 3));
        assert!("garbage".parse::<DiceExpr>().is_err());
    }

    #[test]
    fn total_bounds() {
        let expr = DiceExpr::new(2, 6, 1);
        assert_eq!(expr.min_total(), 3);
        assert_eq!(expr.max_total(), 13);
        let flat = DiceExpr::new(0, 6, 4);
        assert_eq!(flat.min_total(), 4);
        assert_eq!(flat.max_total(), 4);
    }

    proptest! {
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = DiceExpr::parse(&input);
        }

        #[test]
        fn display_round_trips(count in 1u32..=100, sides in 1u32..=100, modifier in -50i32..=50) {
            let expr = DiceExpr::new(count, sides, modifier);
            prop_assert_eq!(DiceExpr::parse(&expr.to_string()).unwrap(), expr);
        }

        #[test]
        fn rolls_stay_within_bounds(
            seed in proptest::num::u32::ANY,
            count in 1u32..=20,
            sides in 1u32..=100,
            modifier in -20i32..=20,
        ) {
            let expr = DiceExpr::new(count, sides, modifier);
            let mut rng = Mulberry32::new(seed);
            let result = roll_dice(&mut rng, &expr);
            prop_assert!(result.total >= expr.min_total());
            prop_assert!(result.total <= expr.max_total());
        }
    }
}
