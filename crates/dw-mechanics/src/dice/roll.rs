use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::dice::DiceExpr;
use crate::error::{MechError, MechResult};
use crate::rng::roll_die;

/// How a d20 is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// One die, as it lands.
    #[default]
    Normal,
    /// Roll two, keep the higher.
    Advantage,
    /// Roll two, keep the lower.
    Disadvantage,
}

impl RollMode {
    /// Build a mode from a pair of boundary flags (wire payloads, CLI
    /// switches). Both flags set is a caller error, not a silent pick.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> MechResult<Self> {
        match (advantage, disadvantage) {
            (true, true) => Err(MechError::ConflictingRollMode),
            (true, false) => Ok(Self::Advantage),
            (false, true) => Ok(Self::Disadvantage),
            (false, false) => Ok(Self::Normal),
        }
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

/// The full story of one roll, self-describing enough for a narrative layer
/// to recount it without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollResult {
    /// What was rolled.
    pub expr: DiceExpr,
    /// Mode the roll was made under.
    pub mode: RollMode,
    /// Every die drawn, in order.
    pub rolls: Vec<u32>,
    /// Dice that counted after advantage/disadvantage selection.
    pub kept: Vec<u32>,
    /// Sum of kept dice plus the modifier.
    pub total: i32,
    /// True when a lone d20 kept a 20.
    pub natural_twenty: bool,
    /// True when a lone d20 kept a 1.
    pub natural_one: bool,
}

fn finish(expr: DiceExpr, mode: RollMode, rolls: Vec<u32>, kept: Vec<u32>) -> RollResult {
    let faces: i64 = kept.iter().map(|&v| i64::from(v)).sum();
    let total = super::saturate(faces + i64::from(expr.modifier));
    let lone_d20 = expr.sides == 20 && kept.len() == 1;
    RollResult {
        expr,
        mode,
        natural_twenty: lone_d20 && kept[0] == 20,
        natural_one: lone_d20 && kept[0] == 1,
        rolls,
        kept,
        total,
    }
}

/// Roll a parsed expression. All dice count; advantage never applies to
/// multi-die expressions.
pub fn roll_dice<R: RngCore>(rng: &mut R, expr: &DiceExpr) -> RollResult {
    let mut rolls = Vec::with_capacity(expr.count as usize);
    for _ in 0..expr.count {
        rolls.push(roll_die(rng, expr.sides));
    }
    let kept = rolls.clone();
    finish(*expr, RollMode::Normal, rolls, kept)
}

/// Parse and roll in one step.
pub fn roll_expression<R: RngCore>(rng: &mut R, input: &str) -> MechResult<RollResult> {
    Ok(roll_dice(rng, &DiceExpr::parse(input)?))
}

/// Roll a d20 under the given mode.
pub fn roll_d20<R: RngCore>(rng: &mut R, mode: RollMode) -> RollResult {
    let expr = DiceExpr::new(1, 20, 0);
    match mode {
        RollMode::Normal => {
            let value = roll_die(rng, 20);
            finish(expr, mode, vec![value], vec![value])
        }
        RollMode::Advantage | RollMode::Disadvantage => {
            let first = roll_die(rng, 20);
            let second = roll_die(rng, 20);
            let kept = if mode == RollMode::Advantage {
                first.max(second)
            } else {
                first.min(second)
            };
            finish(expr, mode, vec![first, second], vec![kept])
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.mode != RollMode::Normal {
            write!(f, " ({})", self.mode)?;
        }
        write!(f, ": {:?}", self.rolls)?;
        match self.expr.modifier.cmp(&0) {
            std::cmp::Ordering::Greater => write!(f, " + {}", self.expr.modifier)?,
            std::cmp::Ordering::Less => write!(f, " - {}", -self.expr.modifier)?,
            std::cmp::Ordering::Equal => {}
        }
        if self.mode == RollMode::Normal {
            write!(f, " = {}", self.total)
        } else {
            write!(f, " -> {}", self.total)
        }
    }
}
