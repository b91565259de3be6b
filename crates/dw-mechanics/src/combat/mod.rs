//! Discrete combat-action resolution.
//!
//! Requests and outcomes are sum types keyed by the same action
//! discriminator, so a session gateway can round-trip them as data. Each
//! dice-based action also exposes a pure transition over an explicit roll
//! value; [`resolve_action`] draws the dice and delegates. Blocked attempts
//! never draw dice, so a blocked request leaves the roll stream untouched.

/// Death saving throws and stabilization.
pub mod death;
/// Grapple attempts, escapes, and the maintain predicate.
pub mod grapple;

use std::fmt;

use dw_core::Actor;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use self::death::{DeathSaveOutcome, StabilizeOutcome};
use self::grapple::{EscapeOutcome, GrappleOutcome};

/// A request to resolve one discrete action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRequest {
    /// Did a move provoke an opportunity attack?
    OpportunityAttack {
        /// Mover was inside the attacker's reach before moving.
        in_reach_before: bool,
        /// Mover is inside the attacker's reach after moving.
        in_reach_after: bool,
    },
    /// Attempt to grapple a target.
    Grapple {
        /// The actor grabbing.
        initiator: Actor,
        /// The actor being grabbed.
        target: Actor,
    },
    /// Attempt to escape an active grapple.
    GrappleEscape {
        /// The grappled actor.
        actor: Actor,
    },
    /// Roll one death saving throw.
    DeathSave {
        /// The dying actor.
        actor: Actor,
    },
    /// Stabilize a dying actor through external aid.
    Stabilize {
        /// The actor receiving aid.
        actor: Actor,
    },
}

/// The resolved outcome, tagged identically to the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Whether the move provoked.
    OpportunityAttack(OpportunityOutcome),
    /// Result of the grapple attempt.
    Grapple(GrappleOutcome),
    /// Result of the escape attempt.
    GrappleEscape(EscapeOutcome),
    /// Result of the death save.
    DeathSave(DeathSaveOutcome),
    /// Result of the stabilization.
    Stabilize(StabilizeOutcome),
}

/// Opportunity-attack determination. Purely positional: no dice, no state
/// change. The follow-up attack, if any, is ordinary attack resolution
/// outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityOutcome {
    /// True when the move provokes.
    pub triggered: bool,
    /// Echo of the request: in reach before the move.
    pub in_reach_before: bool,
    /// Echo of the request: in reach after the move.
    pub in_reach_after: bool,
}

impl fmt::Display for OpportunityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.triggered {
            write!(f, "provokes an opportunity attack")
        } else {
            write!(f, "no opportunity attack")
        }
    }
}

/// An opportunity attack triggers exactly when the mover leaves reach:
/// in reach before the move and out of it after.
pub fn opportunity_attack(in_reach_before: bool, in_reach_after: bool) -> OpportunityOutcome {
    OpportunityOutcome {
        triggered: in_reach_before && !in_reach_after,
        in_reach_before,
        in_reach_after,
    }
}

/// Resolve one action request, drawing any dice from `rng`.
pub fn resolve_action<R: RngCore>(rng: &mut R, request: ActionRequest) -> ActionOutcome {
    match request {
        ActionRequest::OpportunityAttack {
            in_reach_before,
            in_reach_after,
        } => ActionOutcome::OpportunityAttack(opportunity_attack(in_reach_before, in_reach_after)),
        ActionRequest::Grapple { initiator, target } => {
            ActionOutcome::Grapple(grapple::attempt(rng, &initiator, target))
        }
        ActionRequest::GrappleEscape { actor } => {
            ActionOutcome::GrappleEscape(grapple::escape(rng, actor))
        }
        ActionRequest::DeathSave { actor } => {
            ActionOutcome::DeathSave(death::death_save(rng, actor))
        }
        ActionRequest::Stabilize { actor } => ActionOutcome::Stabilize(death::stabilize(actor)),
    }
}
