//! Encounter generation.
//!
//! Combat encounters are budgeted from the party snapshot, optionally bent
//! by pacing telemetry, and then filled greedily from the monster catalog:
//! cheapest viable monster first, grown into a group while the
//! size-multiplied total still fits under budget plus tolerance. The fill is
//! fully deterministic for a given request and catalog. Social and
//! exploration encounters skip budget math entirely and come back as
//! templated scene prompts.

use dw_core::{
    Difficulty, EncounterSpec, EncounterType, InitiativeRule, MonsterDef, ParticipantRef,
    PartySnapshot,
};
use serde::{Deserialize, Serialize};

use crate::budget::{budget_tolerance, effective_xp, size_multiplier, xp_threshold};
use crate::catalog::MonsterCatalog;
use crate::error::{EncounterError, EncounterResult};
use crate::telemetry::DrainTracker;

/// Default cap on hostile-selection iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

/// Tunable bounds on the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorLimits {
    /// Hard cap on selection iterations; a termination guarantee, not a
    /// tuning knob. The default is generous enough for any realistic budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A request for one encounter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterRequest {
    /// The party the encounter is for.
    #[serde(default)]
    pub party: PartySnapshot,
    /// Target difficulty tier.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Combat, social, or exploration.
    #[serde(default)]
    pub encounter_type: EncounterType,
    /// Restrict hostile selection to monsters tagged with this biome. If
    /// nothing in the catalog matches, selection falls back to the full
    /// catalog rather than producing an empty fight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
    /// Session to look up pacing telemetry under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Force the surprise flag on the generated spec.
    #[serde(default)]
    pub surprise: bool,
    /// Replace the terrain line; beats both the biome and the stock phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    /// Replace the objectives; empty keeps the per-type stock list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,
    /// Initiative rule stamped on the generated spec.
    #[serde(default)]
    pub initiative: InitiativeRule,
    /// Generator bounds.
    #[serde(default)]
    pub limits: GeneratorLimits,
}

impl EncounterRequest {
    /// A medium combat request for the given party.
    pub fn new(party: PartySnapshot) -> Self {
        Self {
            party,
            ..Self::default()
        }
    }

    /// Set the difficulty tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the encounter type.
    pub fn with_encounter_type(mut self, encounter_type: EncounterType) -> Self {
        self.encounter_type = encounter_type;
        self
    }

    /// Restrict selection to a biome.
    pub fn with_biome(mut self, biome: impl Into<String>) -> Self {
        self.biome = Some(biome.into());
        self
    }

    /// Attach a session id for pacing lookups.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Mark the encounter as a surprise.
    pub fn with_surprise(mut self) -> Self {
        self.surprise = true;
        self
    }

    /// Override the terrain line.
    pub fn with_terrain(mut self, terrain: impl Into<String>) -> Self {
        self.terrain = Some(terrain.into());
        self
    }

    /// Override the objectives.
    pub fn with_objectives(mut self, objectives: &[&str]) -> Self {
        self.objectives = objectives.iter().map(|o| o.to_string()).collect();
        self
    }

    /// Set the initiative rule.
    pub fn with_initiative(mut self, initiative: InitiativeRule) -> Self {
        self.initiative = initiative;
        self
    }

    /// Override the generator bounds.
    pub fn with_limits(mut self, limits: GeneratorLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Generate an encounter spec for a request.
///
/// Pass a [`DrainTracker`] to get adaptive budgets; without one (or without
/// a session id on the request) the budget comes straight from the
/// threshold table. Combat generation fails with
/// [`EncounterError::EmptyCatalog`] when there is nothing to select from;
/// social and exploration requests never touch the catalog.
pub fn generate(
    request: &EncounterRequest,
    catalog: &MonsterCatalog,
    pacing: Option<&DrainTracker>,
) -> EncounterResult<EncounterSpec> {
    match request.encounter_type {
        EncounterType::Combat => generate_combat(request, catalog, pacing),
        EncounterType::Social => Ok(social_template(request)),
        EncounterType::Exploration => Ok(exploration_template(request)),
    }
}

fn generate_combat(
    request: &EncounterRequest,
    catalog: &MonsterCatalog,
    pacing: Option<&DrainTracker>,
) -> EncounterResult<EncounterSpec> {
    if catalog.is_empty() {
        return Err(EncounterError::EmptyCatalog);
    }

    let difficulty = request.difficulty;
    let per_character = xp_threshold(request.party.average_level(), difficulty);
    let raw_budget = per_character.saturating_mul(request.party.size());
    let adjustment = match (&request.session_id, pacing) {
        (Some(session), Some(tracker)) => tracker.adjustment(session, difficulty),
        _ => 1.0,
    };
    let budget = (f64::from(raw_budget) * adjustment).round() as u32;
    let tolerance = budget_tolerance(budget);

    let pool = selection_pool(catalog, request.biome.as_deref());
    let hostiles = select_hostiles(&pool, budget, tolerance, request.limits.max_iterations);

    let mut spec = EncounterSpec::new(EncounterType::Combat, difficulty);
    spec.xp_budget = budget;
    spec.hostiles = hostiles;
    spec.loot_hooks = loot_hooks(difficulty);
    Ok(finish_spec(spec, request, "open ground", &["Defeat or drive off the hostiles"]))
}

/// The monsters eligible for selection, cheapest first with id tiebreaks so
/// the fill never depends on catalog hash order.
fn selection_pool<'a>(catalog: &'a MonsterCatalog, biome: Option<&str>) -> Vec<&'a MonsterDef> {
    let mut pool: Vec<&MonsterDef> = match biome {
        Some(biome) => {
            let tagged: Vec<&MonsterDef> =
                catalog.iter().filter(|m| m.has_biome(biome)).collect();
            if tagged.is_empty() {
                catalog.iter().collect()
            } else {
                tagged
            }
        }
        None => catalog.iter().collect(),
    };
    pool.sort_by(|a, b| a.xp.cmp(&b.xp).then_with(|| a.id.cmp(&b.id)));
    pool
}

/// True when adding `extra` copies of a monster keeps the size-multiplied
/// total at or under `ceiling`. Arithmetic is done in `u64` so absurd
/// explicit party sizes cannot overflow the check.
fn fits(raw_total: u32, head_count: u32, xp: u32, extra: u32, ceiling: u32) -> bool {
    let raw = u64::from(raw_total) + u64::from(extra) * u64::from(xp);
    let heads = u64::from(head_count) + u64::from(extra);
    // The multiplier is flat above 7 heads, so clamping keeps the cast exact.
    let multiplier = size_multiplier(heads.min(8) as u32);
    (raw as f64 * multiplier).round() as u64 <= u64::from(ceiling)
}

fn select_hostiles(
    pool: &[&MonsterDef],
    budget: u32,
    tolerance: u32,
    max_iterations: u32,
) -> Vec<ParticipantRef> {
    let floor = budget.saturating_sub(tolerance);
    let ceiling = budget.saturating_add(tolerance);
    let mut picks: Vec<(usize, u32)> = Vec::new();
    let mut raw_total = 0u32;
    let mut head_count = 0u32;

    for _ in 0..max_iterations {
        // Stop once within tolerance, but never settle for an empty fight
        // while something affordable remains.
        if head_count > 0 && effective_xp(raw_total, head_count) >= floor {
            break;
        }
        let Some(pick) = pool
            .iter()
            .position(|m| m.xp > 0 && fits(raw_total, head_count, m.xp, 1, ceiling))
        else {
            break;
        };
        let xp = pool[pick].xp;
        let mut count = 1u32;
        while fits(raw_total, head_count, xp, count + 1, ceiling) {
            count += 1;
        }
        raw_total += count * xp;
        head_count += count;
        match picks.iter_mut().find(|(index, _)| *index == pick) {
            Some((_, existing)) => *existing += count,
            None => picks.push((pick, count)),
        }
    }

    picks
        .into_iter()
        .map(|(index, count)| ParticipantRef::new(pool[index].id.clone(), count))
        .collect()
}

fn social_template(request: &EncounterRequest) -> EncounterSpec {
    let spec = EncounterSpec::new(EncounterType::Social, request.difficulty);
    finish_spec(
        spec,
        request,
        "a meeting place",
        &["Learn what the other side wants", "Walk away with an agreement or an advantage"],
    )
}

fn exploration_template(request: &EncounterRequest) -> EncounterSpec {
    let spec = EncounterSpec::new(EncounterType::Exploration, request.difficulty);
    finish_spec(
        spec,
        request,
        "uncharted ground",
        &["Chart a safe route through the area", "Find what the place is hiding"],
    )
}

/// Stamp the shared presentation fields on a spec. Explicit request
/// overrides win; terrain falls back to the biome, then the stock phrase.
fn finish_spec(
    mut spec: EncounterSpec,
    request: &EncounterRequest,
    stock_terrain: &str,
    stock_objectives: &[&str],
) -> EncounterSpec {
    spec.terrain = request
        .terrain
        .clone()
        .or_else(|| request.biome.clone())
        .unwrap_or_else(|| stock_terrain.to_string());
    spec.objectives = if request.objectives.is_empty() {
        stock_objectives.iter().map(|o| o.to_string()).collect()
    } else {
        request.objectives.clone()
    };
    spec.initiative = request.initiative;
    spec.surprise = request.surprise;
    spec
}

fn loot_hooks(difficulty: Difficulty) -> Option<Vec<String>> {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => None,
        Difficulty::Hard | Difficulty::Deadly => Some(vec![
            "Roll once on the treasure hoard table for the tier".to_string(),
            "One hostile carries a map fragment or a minor trinket".to_string(),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_catalog() -> MonsterCatalog {
        MonsterCatalog::new(vec![
            MonsterDef::new("goblin", "Goblin", 0.25, 50).with_biomes(&["forest", "hills"]),
            MonsterDef::new("orc", "Orc", 0.5, 100).with_biomes(&["hills"]),
            MonsterDef::new("skeleton", "Skeleton", 0.25, 50).with_biomes(&["crypt"]),
            MonsterDef::new("ogre", "Ogre", 2.0, 450).with_biomes(&["hills"]),
        ])
        .unwrap()
    }

    /// Effective XP of a generated roster, recomputed against the catalog.
    fn roster_effective_xp(spec: &EncounterSpec, catalog: &MonsterCatalog) -> u32 {
        let raw: u32 = spec
            .hostiles
            .iter()
            .map(|h| catalog.get(&h.id).map_or(0, |m| m.xp) * h.count)
            .sum();
        effective_xp(raw, spec.hostile_count())
    }

    #[test]
    fn budget_comes_from_the_threshold_table() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        // 4 characters x 150 XP (level 3, medium).
        assert_eq!(spec.xp_budget, 600);
        assert_eq!(spec.encounter_type, EncounterType::Combat);
    }

    #[test]
    fn roster_lands_within_tolerance() {
        let catalog = standard_catalog();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        let spec = generate(&request, &catalog, None).unwrap();
        let effective = roster_effective_xp(&spec, &catalog);
        let tolerance = budget_tolerance(spec.xp_budget);
        assert!(
            effective.abs_diff(spec.xp_budget) <= tolerance,
            "effective {effective} vs budget {} (tolerance {tolerance})",
            spec.xp_budget
        );
    }

    #[test]
    fn six_goblins_fill_a_medium_budget_exactly() {
        let catalog = MonsterCatalog::new(vec![MonsterDef::new("goblin", "Goblin", 0.25, 50)])
            .unwrap();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        let spec = generate(&request, &catalog, None).unwrap();
        assert_eq!(spec.hostiles, vec![ParticipantRef::new("goblin", 6)]);
        assert_eq!(roster_effective_xp(&spec, &catalog), 600);
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = standard_catalog();
        let request = EncounterRequest::new(PartySnapshot::uniform(5, 2))
            .with_difficulty(Difficulty::Hard)
            .with_biome("hills");
        let a = generate(&request, &catalog, None).unwrap();
        let b = generate(&request, &catalog, None).unwrap();
        assert_eq!(a.hostiles, b.hostiles);
        assert_eq!(a.xp_budget, b.xp_budget);
        assert_eq!(a.terrain, b.terrain);
    }

    #[test]
    fn biome_restricts_selection() {
        let catalog = standard_catalog();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 2)).with_biome("crypt");
        let spec = generate(&request, &catalog, None).unwrap();
        assert!(!spec.hostiles.is_empty());
        for hostile in &spec.hostiles {
            assert_eq!(hostile.id, "skeleton");
        }
        assert_eq!(spec.terrain, "crypt");
    }

    #[test]
    fn unmatched_biome_falls_back_to_full_catalog() {
        let catalog = standard_catalog();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 2)).with_biome("swamp");
        let spec = generate(&request, &catalog, None).unwrap();
        assert!(!spec.hostiles.is_empty());
    }

    #[test]
    fn empty_catalog_fails_combat_only() {
        let catalog = MonsterCatalog::default();
        let combat = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        assert!(matches!(
            generate(&combat, &catalog, None),
            Err(EncounterError::EmptyCatalog)
        ));

        let social = combat
            .clone()
            .with_encounter_type(EncounterType::Social);
        assert!(generate(&social, &catalog, None).is_ok());
    }

    #[test]
    fn social_encounters_skip_budget_math() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_encounter_type(EncounterType::Social);
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert_eq!(spec.encounter_type, EncounterType::Social);
        assert_eq!(spec.xp_budget, 0);
        assert!(spec.hostiles.is_empty());
        assert!(!spec.objectives.is_empty());
        assert!(!spec.terrain.is_empty());
    }

    #[test]
    fn exploration_encounters_are_templated() {
        let request = EncounterRequest::new(PartySnapshot::uniform(3, 1))
            .with_encounter_type(EncounterType::Exploration)
            .with_biome("underdark");
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert_eq!(spec.encounter_type, EncounterType::Exploration);
        assert_eq!(spec.terrain, "underdark");
        assert!(spec.hostiles.is_empty());
    }

    #[test]
    fn pacing_telemetry_bends_the_budget() {
        let catalog = standard_catalog();
        let mut tracker = DrainTracker::new();
        for _ in 0..4 {
            tracker.record_outcome("night-3", Difficulty::Hard, 1.0);
        }
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_difficulty(Difficulty::Hard)
            .with_session("night-3");
        // 4 x 225 = 900, pushed up by the capped 1.25 adjustment.
        let spec = generate(&request, &catalog, Some(&tracker)).unwrap();
        assert_eq!(spec.xp_budget, 1125);

        // Same request without telemetry stays at the table value.
        let flat = generate(&request, &catalog, None).unwrap();
        assert_eq!(flat.xp_budget, 900);
    }

    #[test]
    fn session_without_samples_changes_nothing() {
        let catalog = standard_catalog();
        let tracker = DrainTracker::new();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3)).with_session("fresh");
        let spec = generate(&request, &catalog, Some(&tracker)).unwrap();
        assert_eq!(spec.xp_budget, 600);
    }

    #[test]
    fn zero_xp_monsters_are_never_selected() {
        let catalog = MonsterCatalog::new(vec![
            MonsterDef::new("commoner", "Commoner", 0.0, 0),
            MonsterDef::new("goblin", "Goblin", 0.25, 50),
        ])
        .unwrap();
        let request = EncounterRequest::new(PartySnapshot::uniform(2, 1));
        let spec = generate(&request, &catalog, None).unwrap();
        assert!(!spec.hostiles.is_empty());
        assert!(spec.hostiles.iter().all(|h| h.id != "commoner"));
    }

    #[test]
    fn iteration_cap_forces_termination() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_limits(GeneratorLimits { max_iterations: 0 });
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert!(spec.hostiles.is_empty());
        assert_eq!(spec.xp_budget, 600);
    }

    #[test]
    fn lone_big_monster_is_a_best_effort() {
        // Nothing else fits, so the generator settles for one ogre even
        // though it undershoots the 540 XP floor.
        let catalog = MonsterCatalog::new(vec![MonsterDef::new("ogre", "Ogre", 2.0, 450)])
            .unwrap();
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        let spec = generate(&request, &catalog, None).unwrap();
        assert_eq!(spec.hostiles, vec![ParticipantRef::new("ogre", 1)]);
    }

    #[test]
    fn tiny_budgets_still_produce_a_fight() {
        // Solo level-1 easy: budget 25, tolerance 25. One goblin overshoots
        // to 50, which is exactly within tolerance.
        let catalog = MonsterCatalog::new(vec![MonsterDef::new("goblin", "Goblin", 0.25, 50)])
            .unwrap();
        let request = EncounterRequest::new(PartySnapshot::uniform(1, 1))
            .with_difficulty(Difficulty::Easy);
        let spec = generate(&request, &catalog, None).unwrap();
        assert_eq!(spec.hostiles, vec![ParticipantRef::new("goblin", 1)]);
    }

    #[test]
    fn surprise_flag_carries_through() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3)).with_surprise();
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert!(spec.surprise);
    }

    #[test]
    fn explicit_overrides_beat_the_stock_lines() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_biome("hills")
            .with_terrain("a collapsed watchtower")
            .with_objectives(&["Hold the stairwell until dawn"])
            .with_initiative(InitiativeRule::Static);
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert_eq!(spec.terrain, "a collapsed watchtower");
        assert_eq!(spec.objectives, vec!["Hold the stairwell until dawn".to_string()]);
        assert_eq!(spec.initiative, InitiativeRule::Static);
        // The biome still steers selection even when it loses the terrain line.
        assert!(spec.hostiles.iter().all(|h| h.id != "skeleton"));
    }

    #[test]
    fn overrides_apply_to_templated_types_too() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_encounter_type(EncounterType::Social)
            .with_terrain("the guildhall balcony")
            .with_objectives(&["Get the ledger", "Leave unseen"]);
        let spec = generate(&request, &standard_catalog(), None).unwrap();
        assert_eq!(spec.terrain, "the guildhall balcony");
        assert_eq!(spec.objectives.len(), 2);
    }

    #[test]
    fn loot_hooks_only_on_upper_tiers() {
        let catalog = standard_catalog();
        let medium = EncounterRequest::new(PartySnapshot::uniform(4, 3));
        assert!(generate(&medium, &catalog, None).unwrap().loot_hooks.is_none());

        let deadly = medium.clone().with_difficulty(Difficulty::Deadly);
        let hooks = generate(&deadly, &catalog, None).unwrap().loot_hooks;
        assert!(hooks.is_some_and(|h| !h.is_empty()));
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = EncounterRequest::new(PartySnapshot::uniform(4, 3))
            .with_difficulty(Difficulty::Deadly)
            .with_biome("forest")
            .with_terrain("a burned clearing")
            .with_session("night-1");
        let json = serde_json::to_string(&request).unwrap();
        let back: EncounterRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn partial_request_json_fills_defaults() {
        let request: EncounterRequest = serde_json::from_str(r#"{"party": {"size": 4}}"#).unwrap();
        assert_eq!(request.difficulty, Difficulty::Medium);
        assert_eq!(request.encounter_type, EncounterType::Combat);
        assert_eq!(request.limits.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(request.initiative, InitiativeRule::Roll);
        assert!(!request.surprise);
        assert!(request.objectives.is_empty());
    }
}
