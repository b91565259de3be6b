//! Grapple attempts, escapes, and the maintain predicate.
//!
//! Both sides of a grapple reduce to the same numbers: a grapple DC of
//! `8 + proficiency bonus + Strength modifier`, and contest rolls of
//! `1d20 + Strength modifier + proficiency bonus`. The initiator rolls
//! against the target's DC; on success the target carries a grappled
//! condition storing the *initiator's* DC as the escape threshold.

use std::fmt;

use dw_core::{Ability, Actor, Condition, condition};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::check::{CheckOutcome, resolve_check};
use crate::dice::roll::RollMode;

/// Escape DC assumed for grappled conditions authored without one.
const DEFAULT_ESCAPE_DC: i32 = 10;

/// Why a grapple attempt never reached the dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrappleBlock {
    /// Initiator is stunned, paralyzed, unconscious, or petrified.
    InitiatorIncapacitated,
    /// Initiator's main hand is committed to a two-handed weapon.
    TwoHandedWeapon,
    /// The target is already grappled.
    TargetAlreadyGrappled,
}

impl fmt::Display for GrappleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitiatorIncapacitated => write!(f, "initiator is incapacitated"),
            Self::TwoHandedWeapon => write!(f, "initiator's hands are full"),
            Self::TargetAlreadyGrappled => write!(f, "target is already grappled"),
        }
    }
}

/// Result of a grapple attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrappleOutcome {
    /// The attempt was disallowed before any dice were rolled.
    Blocked {
        /// Why the attempt was refused.
        reason: GrappleBlock,
        /// The target, unchanged.
        target: Actor,
    },
    /// The contest was rolled.
    Resolved {
        /// True when the target is now grappled.
        success: bool,
        /// Escape DC attached to the target on success (the initiator's DC).
        dc: i32,
        /// The contest roll against the target's DC.
        check: CheckOutcome,
        /// Updated target copy.
        target: Actor,
    },
}

/// Result of an escape attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeOutcome {
    /// The actor is not grappled; nothing to escape, no dice drawn.
    NotGrappled {
        /// The actor, unchanged.
        actor: Actor,
    },
    /// The escape check was rolled.
    Resolved {
        /// True when the grapple was broken.
        success: bool,
        /// DC the escape was rolled against.
        dc: i32,
        /// The escape check.
        check: CheckOutcome,
        /// Updated actor copy.
        actor: Actor,
    },
}

/// Grapple DC for an actor: `8 + proficiency bonus + Strength modifier`.
pub fn grapple_dc(actor: &Actor) -> i32 {
    8 + actor.proficiency_bonus() + actor.ability_modifier(Ability::Strength)
}

/// Contest modifier for an actor: Strength modifier plus proficiency bonus.
fn contest_modifier(actor: &Actor) -> i32 {
    actor.ability_modifier(Ability::Strength) + actor.proficiency_bonus()
}

/// Eligibility gates for initiating a grapple, checked in order.
pub fn eligibility(initiator: &Actor, target: &Actor) -> Option<GrappleBlock> {
    if initiator.is_incapacitated() {
        return Some(GrappleBlock::InitiatorIncapacitated);
    }
    if initiator.main_hand.as_ref().is_some_and(|w| w.two_handed) {
        return Some(GrappleBlock::TwoHandedWeapon);
    }
    if target.has_condition(condition::GRAPPLED) {
        return Some(GrappleBlock::TargetAlreadyGrappled);
    }
    None
}

/// Attempt a grapple. Precondition violations come back as
/// [`GrappleOutcome::Blocked`] values, never errors.
pub fn attempt<R: RngCore>(rng: &mut R, initiator: &Actor, target: Actor) -> GrappleOutcome {
    if let Some(reason) = eligibility(initiator, &target) {
        return GrappleOutcome::Blocked { reason, target };
    }
    let defense_dc = grapple_dc(&target);
    let escape_dc = grapple_dc(initiator);
    let check = resolve_check(rng, contest_modifier(initiator), defense_dc, RollMode::Normal);
    let mut target = target;
    if check.success {
        target.add_condition(Condition::grappled(escape_dc));
    }
    GrappleOutcome::Resolved {
        success: check.success,
        dc: escape_dc,
        check,
        target,
    }
}

/// Attempt to escape a grapple: the same style of check, rolled against the
/// DC stored on the grappled condition.
pub fn escape<R: RngCore>(rng: &mut R, actor: Actor) -> EscapeOutcome {
    let Some(dc) = actor
        .condition(condition::GRAPPLED)
        .map(|c| c.escape_dc.unwrap_or(DEFAULT_ESCAPE_DC))
    else {
        return EscapeOutcome::NotGrappled { actor };
    };
    let check = resolve_check(rng, contest_modifier(&actor), dc, RollMode::Normal);
    let mut actor = actor;
    if check.success {
        actor.remove_condition(condition::GRAPPLED);
    }
    EscapeOutcome::Resolved {
        success: check.success,
        dc,
        check,
        actor,
    }
}

/// True while the grappler can keep holding on: not incapacitated.
///
/// The engine never auto-releases; the session decides when to consult this
/// (typically whenever the grappler's conditions change).
pub fn can_maintain_grapple(grappler: &Actor) -> bool {
    !grappler.is_incapacitated()
}
