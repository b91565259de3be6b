//! Death saving throws and stabilization.
//!
//! The per-round lifecycle for an actor at 0 HP: accumulate successes and
//! failures until one side reaches three, with natural 1s and 20s bending
//! the curve. [`apply_death_save`] is the pure transition over an explicit
//! roll, so every path of the machine can be driven move by move;
//! [`death_save`] rolls the die and delegates.

use std::fmt;

use dw_core::{Actor, Condition, condition};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::rng::roll_die;

/// Bucket a death-save d20 falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSaveKind {
    /// Natural 20: back on your feet with 1 HP.
    CriticalSuccess,
    /// 10-19: one success.
    Success,
    /// 2-9: one failure.
    Failure,
    /// Natural 1: two failures.
    CriticalFailure,
}

impl fmt::Display for DeathSaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "critical success"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::CriticalFailure => write!(f, "critical failure"),
        }
    }
}

/// Why a death save was not rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSaveBlock {
    /// The actor is conscious; no save to make.
    HasHitPoints,
    /// The actor is already stable.
    AlreadyStable,
    /// The actor is already dead.
    AlreadyDead,
}

impl fmt::Display for DeathSaveBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasHitPoints => write!(f, "actor has hit points"),
            Self::AlreadyStable => write!(f, "actor is already stable"),
            Self::AlreadyDead => write!(f, "actor is already dead"),
        }
    }
}

/// Result of one death saving throw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSaveOutcome {
    /// The save was not rolled; no dice were drawn.
    Blocked {
        /// Why no save was made.
        reason: DeathSaveBlock,
        /// The actor, unchanged.
        actor: Actor,
    },
    /// The save was rolled and applied.
    Rolled {
        /// The raw d20.
        roll: u32,
        /// Which bucket it landed in.
        kind: DeathSaveKind,
        /// Updated actor copy: tally, stability, death, consciousness.
        actor: Actor,
    },
}

/// Result of stabilizing an actor through external aid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilizeOutcome {
    /// The dead are beyond first aid.
    AlreadyDead {
        /// The actor, unchanged.
        actor: Actor,
    },
    /// The actor is now stable with a clean tally; still unconscious.
    Stabilized {
        /// Updated actor copy.
        actor: Actor,
    },
}

/// Classify a raw d20 into its death-save bucket.
pub fn classify(roll: u32) -> DeathSaveKind {
    match roll {
        r if r >= 20 => DeathSaveKind::CriticalSuccess,
        r if r >= 10 => DeathSaveKind::Success,
        r if r >= 2 => DeathSaveKind::Failure,
        _ => DeathSaveKind::CriticalFailure,
    }
}

fn eligibility(actor: &Actor) -> Option<DeathSaveBlock> {
    if actor.is_dead {
        Some(DeathSaveBlock::AlreadyDead)
    } else if actor.current_hp > 0 {
        Some(DeathSaveBlock::HasHitPoints)
    } else if actor.is_stable {
        Some(DeathSaveBlock::AlreadyStable)
    } else {
        None
    }
}

fn record_failures(actor: &mut Actor, count: u8) {
    actor.death_saves.failures = (actor.death_saves.failures + count).min(3);
    if actor.death_saves.failures >= 3 {
        actor.is_dead = true;
        actor.add_condition(Condition::unconscious());
    }
}

/// Apply one death save with an explicit roll. Pure: the only state touched
/// is the actor passed in.
pub fn apply_death_save(actor: Actor, roll: u32) -> DeathSaveOutcome {
    if let Some(reason) = eligibility(&actor) {
        return DeathSaveOutcome::Blocked { reason, actor };
    }
    let mut actor = actor;
    let kind = classify(roll);
    match kind {
        DeathSaveKind::CriticalSuccess => {
            actor.current_hp = 1;
            actor.is_stable = true;
            actor.death_saves.reset();
            actor.remove_condition(condition::UNCONSCIOUS);
        }
        DeathSaveKind::Success => {
            actor.death_saves.successes = (actor.death_saves.successes + 1).min(3);
            if actor.death_saves.successes >= 3 {
                // stable but not awake
                actor.is_stable = true;
                actor.death_saves.reset();
                actor.add_condition(Condition::unconscious());
            }
        }
        DeathSaveKind::Failure => record_failures(&mut actor, 1),
        DeathSaveKind::CriticalFailure => record_failures(&mut actor, 2),
    }
    DeathSaveOutcome::Rolled { roll, kind, actor }
}

/// Roll one death saving throw. Blocked attempts draw no dice.
pub fn death_save<R: RngCore>(rng: &mut R, actor: Actor) -> DeathSaveOutcome {
    if let Some(reason) = eligibility(&actor) {
        return DeathSaveOutcome::Blocked { reason, actor };
    }
    let roll = roll_die(rng, 20);
    apply_death_save(actor, roll)
}

/// Stabilize through external aid (a medicine check or healer's kit, handled
/// by the caller): force stability and clear the tally. The actor stays
/// unconscious at 0 HP; stabilizing is not healing.
pub fn stabilize(actor: Actor) -> StabilizeOutcome {
    if actor.is_dead {
        return StabilizeOutcome::AlreadyDead { actor };
    }
    let mut actor = actor;
    actor.is_stable = true;
    actor.death_saves.reset();
    StabilizeOutcome::Stabilized { actor }
}
