use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores};
use crate::condition::Condition;

/// Size category of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    /// Up to 2.5 feet.
    Tiny,
    /// Up to 5 feet.
    Small,
    /// Up to 10 feet.
    #[default]
    Medium,
    /// Up to 15 feet.
    Large,
    /// Up to 20 feet.
    Huge,
    /// Larger still.
    Gargantuan,
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
            Self::Gargantuan => "gargantuan",
        };
        write!(f, "{name}")
    }
}

/// A wielded weapon. Only the grip matters to the rules engine; the damage
/// expression is carried for callers that roll it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name.
    pub name: String,
    /// Damage dice expression, e.g. `1d8+3`.
    pub damage: String,
    /// True when the weapon needs both hands, which rules out grappling.
    #[serde(default)]
    pub two_handed: bool,
}

impl Weapon {
    /// A one-handed weapon.
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: damage.into(),
            two_handed: false,
        }
    }

    /// A two-handed weapon.
    pub fn two_handed(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: damage.into(),
            two_handed: true,
        }
    }
}

/// Running death-save tally for an actor at death's door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathSaveTally {
    /// Successes recorded so far (0-3).
    pub successes: u8,
    /// Failures recorded so far (0-3).
    pub failures: u8,
}

impl DeathSaveTally {
    /// Clear both counters.
    pub fn reset(&mut self) {
        self.successes = 0;
        self.failures = 0;
    }
}

fn default_level() -> u32 {
    1
}

fn default_armor_class() -> i32 {
    10
}

fn default_hit_points() -> i32 {
    10
}

fn default_speed() -> u32 {
    30
}

/// A combatant snapshot.
///
/// The rules engine never mutates caller state: resolution functions take
/// actors by value (or clone them) and return updated copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Caller-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Character level; drives the proficiency bonus.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Size category.
    #[serde(default)]
    pub size: SizeCategory,
    /// The six ability scores.
    #[serde(default)]
    pub abilities: AbilityScores,
    /// Base armor class.
    #[serde(default = "default_armor_class")]
    pub armor_class: i32,
    /// Situational AC modifier (cover, shield spell, ...).
    #[serde(default)]
    pub ac_bonus: i32,
    /// Hit point maximum.
    #[serde(default = "default_hit_points")]
    pub max_hp: i32,
    /// Current hit points; zero or below means dying or dead.
    #[serde(default = "default_hit_points")]
    pub current_hp: i32,
    /// Walking speed in feet.
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Active conditions.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Death-save tally; meaningful only while dying.
    #[serde(default)]
    pub death_saves: DeathSaveTally,
    /// True once stabilized at 0 HP.
    #[serde(default)]
    pub is_stable: bool,
    /// True once dead.
    #[serde(default)]
    pub is_dead: bool,
    /// Main-hand weapon, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_hand: Option<Weapon>,
    /// Off-hand weapon, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_hand: Option<Weapon>,
}

impl Actor {
    /// A level-`level` actor with baseline defaults (AC 10, 10 HP, speed 30,
    /// all scores 10).
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            size: SizeCategory::default(),
            abilities: AbilityScores::default(),
            armor_class: default_armor_class(),
            ac_bonus: 0,
            max_hp: default_hit_points(),
            current_hp: default_hit_points(),
            speed: default_speed(),
            conditions: Vec::new(),
            death_saves: DeathSaveTally::default(),
            is_stable: false,
            is_dead: false,
            main_hand: None,
            off_hand: None,
        }
    }

    /// Replace the ability block.
    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    /// Set the base armor class.
    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    /// Set maximum and current hit points together.
    pub fn with_hit_points(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp;
        self.current_hp = max_hp;
        self
    }

    /// Set walking speed.
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Set size category.
    pub fn with_size(mut self, size: SizeCategory) -> Self {
        self.size = size;
        self
    }

    /// Equip a main-hand weapon.
    pub fn with_main_hand(mut self, weapon: Weapon) -> Self {
        self.main_hand = Some(weapon);
        self
    }

    /// Equip an off-hand weapon.
    pub fn with_off_hand(mut self, weapon: Weapon) -> Self {
        self.off_hand = Some(weapon);
        self
    }

    /// Armor class after situational modifiers.
    pub fn effective_ac(&self) -> i32 {
        self.armor_class + self.ac_bonus
    }

    /// Modifier for one ability.
    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Proficiency bonus from level: +2 at levels 1-4, +3 at 5-8, and so on.
    pub fn proficiency_bonus(&self) -> i32 {
        2 + (self.level.saturating_sub(1) / 4) as i32
    }

    /// Look up an active condition by name, case-insensitively.
    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// True when the named condition is active.
    pub fn has_condition(&self, name: &str) -> bool {
        self.condition(name).is_some()
    }

    /// Attach a condition, replacing any existing condition of the same name.
    pub fn add_condition(&mut self, condition: Condition) {
        self.remove_condition(&condition.name);
        self.conditions.push(condition);
    }

    /// Remove a condition by name. Returns true when one was removed.
    pub fn remove_condition(&mut self, name: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| !c.name.eq_ignore_ascii_case(name));
        self.conditions.len() != before
    }

    /// True while stunned, paralyzed, unconscious, or petrified.
    pub fn is_incapacitated(&self) -> bool {
        self.conditions.iter().any(Condition::is_incapacitating)
    }

    /// True while at 0 HP or below, not yet stable, and not dead.
    pub fn is_dying(&self) -> bool {
        self.current_hp <= 0 && !self.is_stable && !self.is_dead
    }
}
