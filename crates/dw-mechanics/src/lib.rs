//! Seeded dice and action resolution for Dicewright.
//!
//! Two concerns live here. The randomness service: a stable string-keyed
//! seed hash, the [`Mulberry32`] generator, dice-expression parsing, and
//! d20 rolls with advantage or disadvantage. And the rules engine: discrete
//! combat actions (opportunity attacks, grapples, death saves) resolved as
//! explicit state transitions over actor snapshots.
//!
//! Determinism is the load-bearing property: every roll flows through a
//! caller-owned generator, and equal seeds replay equal sessions.

/// d20 checks against a difficulty class.
pub mod check;
/// Action resolution: opportunity attacks, grapples, death saves.
pub mod combat;
/// Dice expressions and rolls.
pub mod dice;
/// Error types used throughout the crate.
pub mod error;
/// Seeded random number generation.
pub mod rng;

/// Re-export check types.
pub use check::{CheckOutcome, resolve_check};
/// Re-export action resolution types.
pub use combat::{ActionOutcome, ActionRequest, OpportunityOutcome, resolve_action};
/// Re-export dice roll types.
pub use dice::roll::{RollMode, RollResult, roll_d20, roll_dice, roll_expression};
/// Re-export dice expression types.
pub use dice::{DiceExpr, MAX_DICE, MAX_SIDES};
/// Re-export error types.
pub use error::{MechError, MechResult};
/// Re-export generator types.
pub use rng::{Mulberry32, hash_seed, roll_die};
