use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ability::Ability;
use crate::error::{DwError, DwResult};

/// Unique identifier for a generated encounter spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterId(pub Uuid);

impl EncounterId {
    /// Generate a new random encounter ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EncounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The flavor of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterType {
    /// A fight; carries hostiles and an XP budget.
    #[default]
    Combat,
    /// Talking, trading, or scheming; no budget math.
    Social,
    /// Travel, puzzles, and discovery; no budget math.
    Exploration,
}

impl EncounterType {
    /// Parse from a lowercase name.
    pub fn parse(s: &str) -> DwResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "combat" => Ok(Self::Combat),
            "social" => Ok(Self::Social),
            "exploration" => Ok(Self::Exploration),
            _ => Err(DwError::UnknownEncounterType(s.to_string())),
        }
    }
}

impl fmt::Display for EncounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combat => write!(f, "combat"),
            Self::Social => write!(f, "social"),
            Self::Exploration => write!(f, "exploration"),
        }
    }
}

/// Requested difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// A warm-up; little resource drain expected.
    Easy,
    /// The baseline tier.
    #[default]
    Medium,
    /// A real threat.
    Hard,
    /// Potentially lethal.
    Deadly,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub fn all() -> [Difficulty; 4] {
        [Self::Easy, Self::Medium, Self::Hard, Self::Deadly]
    }

    /// Parse from a lowercase name.
    pub fn parse(s: &str) -> DwResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "deadly" => Ok(Self::Deadly),
            _ => Err(DwError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
            Self::Deadly => write!(f, "deadly"),
        }
    }
}

/// How initiative is determined when the encounter starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeRule {
    /// Everyone rolls at the table.
    #[default]
    Roll,
    /// The table supplies a fixed order out of band.
    Static,
}

/// A participant reference: a catalog or roster id plus a head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    /// Referenced id; hostiles resolve against the monster catalog.
    pub id: String,
    /// Number of this participant present.
    pub count: u32,
}

impl ParticipantRef {
    /// A reference with a head count.
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }
}

/// Saving throw attached to a hazard.
///
/// `timing` stays a free string rather than an enum: hazard data is
/// hand-authored, and a typo must surface as a validation issue instead of
/// failing deserialization of the whole spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSave {
    /// Ability being tested.
    pub ability: Ability,
    /// Difficulty class; sane authored values sit in `[8, 25]`.
    pub dc: i32,
    /// When the save fires: `start`, `end`, or `trigger`.
    pub timing: String,
}

/// Valid hazard-save timings.
pub const HAZARD_TIMINGS: [&str; 3] = ["start", "end", "trigger"];

/// An environmental hazard in an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    /// Display name.
    pub name: String,
    /// What the hazard does, for the table.
    #[serde(default)]
    pub description: String,
    /// Saving throw the hazard forces, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<HazardSave>,
}

fn default_created_at() -> DateTime<Utc> {
    Utc::now()
}

/// A complete encounter specification, generated or hand-authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    /// Spec identifier.
    #[serde(default)]
    pub id: EncounterId,
    /// When the spec was produced.
    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
    /// Combat, social, or exploration.
    #[serde(default)]
    pub encounter_type: EncounterType,
    /// Difficulty tier the spec was built for.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// XP budget the hostiles were chosen against; zero for non-combat.
    #[serde(default)]
    pub xp_budget: u32,
    /// Hostile participants, resolved against the monster catalog.
    #[serde(default)]
    pub hostiles: Vec<ParticipantRef>,
    /// Friendly participants, if any.
    #[serde(default)]
    pub friendlies: Vec<ParticipantRef>,
    /// Where the encounter takes place.
    #[serde(default)]
    pub terrain: String,
    /// What the party is trying to accomplish.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// How initiative is determined.
    #[serde(default)]
    pub initiative: InitiativeRule,
    /// True when one side starts the encounter unaware.
    #[serde(default)]
    pub surprise: bool,
    /// Treasure prompts for the table, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot_hooks: Option<Vec<String>>,
    /// Environmental hazards.
    #[serde(default)]
    pub hazards: Vec<Hazard>,
}

impl EncounterSpec {
    /// An empty spec of the given type and difficulty.
    pub fn new(encounter_type: EncounterType, difficulty: Difficulty) -> Self {
        Self {
            id: EncounterId::new(),
            created_at: Utc::now(),
            encounter_type,
            difficulty,
            xp_budget: 0,
            hostiles: Vec::new(),
            friendlies: Vec::new(),
            terrain: String::new(),
            objectives: Vec::new(),
            initiative: InitiativeRule::default(),
            surprise: false,
            loot_hooks: None,
            hazards: Vec::new(),
        }
    }

    /// Total hostile head count across all groups, saturating at
    /// `u32::MAX` since group counts are authored data.
    pub fn hostile_count(&self) -> u32 {
        self.hostiles.iter().map(|h| h.count).fold(0, u32::saturating_add)
    }
}
