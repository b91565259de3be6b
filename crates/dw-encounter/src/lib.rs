//! Encounter tooling for Dicewright: budgets, generation, validation, and
//! pacing telemetry.
//!
//! The pipeline is deliberately split: [`generator::generate`] builds specs,
//! [`validate::validate`] judges them (generated or hand-authored alike),
//! and [`telemetry::DrainTracker`] feeds observed outcomes back into future
//! budgets. Each half works without the others.

/// XP threshold tables and size scaling.
pub mod budget;
/// Monster catalog loading and lookup.
pub mod catalog;
/// Error types for the crate.
pub mod error;
/// Encounter generation from a party snapshot and catalog.
pub mod generator;
/// Adaptive pacing telemetry.
pub mod telemetry;
/// Spec validation.
pub mod validate;

/// Re-export budget math.
pub use budget::{budget_tolerance, effective_xp, size_multiplier, xp_threshold};
/// Re-export the catalog.
pub use catalog::MonsterCatalog;
/// Re-export error types.
pub use error::{EncounterError, EncounterResult};
/// Re-export generation entry points.
pub use generator::{DEFAULT_MAX_ITERATIONS, EncounterRequest, GeneratorLimits, generate};
/// Re-export pacing telemetry.
pub use telemetry::{DrainStats, DrainTracker, MAX_SWING, TARGET_DRAIN};
/// Re-export validation types.
pub use validate::{Severity, Validation, ValidationIssue, validate};
