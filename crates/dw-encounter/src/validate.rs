//! Encounter-spec validation.
//!
//! Validation never mutates or repairs a spec. It accumulates human-readable
//! issues: hard data errors (dangling references, impossible hazard saves)
//! and softer tuning concerns (budget drift, swarms, a party that cannot
//! hurt what it is about to fight). A spec passes only when the issue list
//! comes back empty.

use std::fmt;

use dw_core::{EncounterSpec, EncounterType, HAZARD_TIMINGS, MonsterDef, PartySnapshot};
use serde::{Deserialize, Serialize};

use crate::budget::{budget_tolerance, effective_xp};
use crate::catalog::MonsterCatalog;

/// Hostile head count beyond which a fight bogs down at the table.
pub const SWARM_LIMIT: u32 = 12;

/// Sane range for authored hazard save DCs.
pub const HAZARD_DC_RANGE: std::ops::RangeInclusive<i32> = 8..=25;

/// How bad a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The spec is unusable as written.
    Error,
    /// The spec will run, but the table should know.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// An error-severity issue.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// A warning-severity issue.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// The validator's verdict on one spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// True when no issues of any severity were found.
    pub ok: bool,
    /// Everything the validator flagged, in check order.
    pub issues: Vec<ValidationIssue>,
    /// Effective XP recomputed from the resolved hostiles.
    pub effective_xp: u32,
}

/// Validate a spec against a catalog and, optionally, the party it was
/// built for. Party-dependent checks are skipped when no snapshot is given.
pub fn validate(
    spec: &EncounterSpec,
    catalog: &MonsterCatalog,
    party: Option<&PartySnapshot>,
) -> Validation {
    let mut issues = Vec::new();

    check_combat_shape(spec, &mut issues);
    let resolved = resolve_hostiles(spec, catalog, &mut issues);
    let effective = check_budget(spec, &resolved, &mut issues);
    if let Some(party) = party {
        check_party_coverage(party, &resolved, &mut issues);
    }
    check_swarm(spec, &mut issues);
    check_hazards(spec, &mut issues);

    Validation {
        ok: issues.is_empty(),
        issues,
        effective_xp: effective,
    }
}

fn check_combat_shape(spec: &EncounterSpec, issues: &mut Vec<ValidationIssue>) {
    if spec.encounter_type != EncounterType::Combat {
        return;
    }
    if spec.hostiles.is_empty() {
        issues.push(ValidationIssue::error("combat encounter has no hostiles"));
    }
    if spec.xp_budget == 0 {
        issues.push(ValidationIssue::error(
            "combat encounter has a zero XP budget",
        ));
    }
}

/// Resolve hostile references against the catalog. Dangling ids are flagged
/// and excluded, so later XP math only sees real monsters.
fn resolve_hostiles<'a>(
    spec: &EncounterSpec,
    catalog: &'a MonsterCatalog,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<(&'a MonsterDef, u32)> {
    let mut resolved = Vec::with_capacity(spec.hostiles.len());
    for hostile in &spec.hostiles {
        match catalog.get(&hostile.id) {
            Some(monster) => resolved.push((monster, hostile.count)),
            None => issues.push(ValidationIssue::error(format!(
                "unresolved monster reference \"{}\"",
                hostile.id
            ))),
        }
    }
    resolved
}

/// Recompute effective XP from the resolved roster. Counts are authored
/// data, so the sums run in saturating `u64` and clamp into `effective_xp`'s
/// domain instead of wrapping.
fn check_budget(
    spec: &EncounterSpec,
    resolved: &[(&MonsterDef, u32)],
    issues: &mut Vec<ValidationIssue>,
) -> u32 {
    let raw = resolved.iter().fold(0u64, |acc, (monster, count)| {
        acc.saturating_add(u64::from(monster.xp) * u64::from(*count))
    });
    let heads = resolved
        .iter()
        .fold(0u64, |acc, (_, count)| acc.saturating_add(u64::from(*count)));
    let effective = effective_xp(
        raw.min(u64::from(u32::MAX)) as u32,
        heads.min(u64::from(u32::MAX)) as u32,
    );

    if spec.encounter_type == EncounterType::Combat {
        let tolerance = budget_tolerance(spec.xp_budget);
        let deviation = effective.abs_diff(spec.xp_budget);
        if deviation > tolerance {
            issues.push(ValidationIssue::warning(format!(
                "effective XP {effective} deviates from budget {} by {deviation} \
                 (tolerance {tolerance})",
                spec.xp_budget
            )));
        }
    }
    effective
}

/// Flag hostiles the party cannot meaningfully hurt. Skipped entirely when
/// the snapshot records no damage coverage at all, and magical attacks are
/// assumed to bypass mundane resistances and immunities.
fn check_party_coverage(
    party: &PartySnapshot,
    resolved: &[(&MonsterDef, u32)],
    issues: &mut Vec<ValidationIssue>,
) {
    if party.has_magical_attacks() {
        return;
    }
    let coverage = party.damage_types();
    if coverage.is_empty() {
        return;
    }
    for (monster, _) in resolved {
        if coverage.iter().all(|damage| monster.is_immune(*damage)) {
            issues.push(ValidationIssue::warning(format!(
                "party may lack counters for {}: it is immune to every damage \
                 type the party can deal",
                monster.name
            )));
            continue;
        }
        let all_blunted = coverage
            .iter()
            .all(|damage| monster.is_resistant(*damage) || monster.is_immune(*damage));
        if all_blunted {
            issues.push(ValidationIssue::warning(format!(
                "low damage diversity against {}: every party damage type is \
                 resisted",
                monster.name
            )));
        }
    }
}

fn check_swarm(spec: &EncounterSpec, issues: &mut Vec<ValidationIssue>) {
    let heads = spec.hostile_count();
    if heads > SWARM_LIMIT {
        issues.push(ValidationIssue::warning(format!(
            "swarm alert: {heads} hostiles will drag the table (limit {SWARM_LIMIT})"
        )));
    }
}

fn check_hazards(spec: &EncounterSpec, issues: &mut Vec<ValidationIssue>) {
    for hazard in &spec.hazards {
        let Some(save) = &hazard.save else {
            continue;
        };
        if !HAZARD_DC_RANGE.contains(&save.dc) {
            issues.push(ValidationIssue::error(format!(
                "hazard \"{}\": save DC {} outside the sane range {}-{}",
                hazard.name,
                save.dc,
                HAZARD_DC_RANGE.start(),
                HAZARD_DC_RANGE.end()
            )));
        }
        if !HAZARD_TIMINGS.contains(&save.timing.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "hazard \"{}\": unknown timing \"{}\" (expected start, end, or trigger)",
                hazard.name, save.timing
            )));
        }
    }
}
