//! Core types for Dicewright: actors, monsters, parties, and encounter specs.
//!
//! This crate defines the data model the rules engine and encounter tools
//! operate on. It is independent of any session store: construct values
//! programmatically or deserialize them from JSON.

/// Ability enum, ability score blocks, and modifier math.
pub mod ability;
/// Combatant state: actors, weapons, and death-save tallies.
pub mod actor;
/// Conditions such as grappled or unconscious, with durations.
pub mod condition;
/// The standard damage types.
pub mod damage;
/// Encounter specifications, difficulties, and hazards.
pub mod encounter;
/// Error types used throughout the crate.
pub mod error;
/// Monster reference data.
pub mod monster;
/// Party snapshots and resource pools.
pub mod party;

/// Re-export ability types.
pub use ability::{Ability, AbilityScores, ability_modifier};
/// Re-export actor types.
pub use actor::{Actor, DeathSaveTally, SizeCategory, Weapon};
/// Re-export condition types.
pub use condition::{Condition, ConditionDuration};
/// Re-export damage types.
pub use damage::DamageType;
/// Re-export encounter spec types.
pub use encounter::{
    Difficulty, EncounterId, EncounterSpec, EncounterType, HAZARD_TIMINGS, Hazard, HazardSave,
    InitiativeRule, ParticipantRef,
};
/// Re-export error types.
pub use error::{DwError, DwResult};
/// Re-export monster types.
pub use monster::MonsterDef;
/// Re-export party types.
pub use party::{PartyMember, PartySnapshot, ResourcePool};
