use serde::{Deserialize, Serialize};

use crate::damage::DamageType;

/// Immutable reference data for one monster type.
///
/// Catalog entries are supplied externally (bundled JSON file or data
/// service) and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDef {
    /// Stable identifier, referenced by encounter specs.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Challenge rating; fractional for the weakest creatures.
    pub challenge_rating: f64,
    /// XP value used for budget math.
    pub xp: u32,
    /// Biomes this monster is at home in, matched case-insensitively.
    #[serde(default)]
    pub biomes: Vec<String>,
    /// Damage types this monster resists.
    #[serde(default)]
    pub resistances: Vec<DamageType>,
    /// Damage types this monster is immune to.
    #[serde(default)]
    pub immunities: Vec<DamageType>,
    /// Damage types this monster is vulnerable to.
    #[serde(default)]
    pub vulnerabilities: Vec<DamageType>,
}

impl MonsterDef {
    /// A catalog entry with no biome tags or defensive traits.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        challenge_rating: f64,
        xp: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            challenge_rating,
            xp,
            biomes: Vec::new(),
            resistances: Vec::new(),
            immunities: Vec::new(),
            vulnerabilities: Vec::new(),
        }
    }

    /// Tag the monster with biomes.
    pub fn with_biomes(mut self, biomes: &[&str]) -> Self {
        self.biomes = biomes.iter().map(|b| b.to_string()).collect();
        self
    }

    /// Set resisted damage types.
    pub fn with_resistances(mut self, types: &[DamageType]) -> Self {
        self.resistances = types.to_vec();
        self
    }

    /// Set damage-type immunities.
    pub fn with_immunities(mut self, types: &[DamageType]) -> Self {
        self.immunities = types.to_vec();
        self
    }

    /// True when the monster is tagged with the given biome.
    pub fn has_biome(&self, biome: &str) -> bool {
        self.biomes.iter().any(|b| b.eq_ignore_ascii_case(biome))
    }

    /// True when the monster is immune to the given damage type.
    pub fn is_immune(&self, damage: DamageType) -> bool {
        self.immunities.contains(&damage)
    }

    /// True when the monster resists the given damage type.
    pub fn is_resistant(&self, damage: DamageType) -> bool {
        self.resistances.contains(&damage)
    }
}
