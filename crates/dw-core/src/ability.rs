use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DwError, DwResult};

/// The six ability scores of d20-style play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Raw physical power; drives grapple contests.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Endurance and vitality.
    Constitution,
    /// Reasoning and memory.
    Intelligence,
    /// Perception and willpower.
    Wisdom,
    /// Force of personality.
    Charisma,
}

impl Ability {
    /// All six abilities in standard order.
    pub fn all() -> [Ability; 6] {
        [
            Self::Strength,
            Self::Dexterity,
            Self::Constitution,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
        ]
    }

    /// Parse an ability from its full name or three-letter abbreviation,
    /// case-insensitively.
    pub fn parse(s: &str) -> DwResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "dexterity" | "dex" => Ok(Self::Dexterity),
            "constitution" | "con" => Ok(Self::Constitution),
            "intelligence" | "int" => Ok(Self::Intelligence),
            "wisdom" | "wis" => Ok(Self::Wisdom),
            "charisma" | "cha" => Ok(Self::Charisma),
            _ => Err(DwError::UnknownAbility(s.to_string())),
        }
    }

    /// Three-letter uppercase abbreviation (`STR`, `DEX`, ...).
    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => write!(f, "strength"),
            Self::Dexterity => write!(f, "dexterity"),
            Self::Constitution => write!(f, "constitution"),
            Self::Intelligence => write!(f, "intelligence"),
            Self::Wisdom => write!(f, "wisdom"),
            Self::Charisma => write!(f, "charisma"),
        }
    }
}

/// Modifier derived from a raw ability score.
///
/// Uses floor division, not truncation: a score of 9 yields -1, not 0.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A full block of six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    /// Strength score.
    pub strength: i32,
    /// Dexterity score.
    pub dexterity: i32,
    /// Constitution score.
    pub constitution: i32,
    /// Intelligence score.
    pub intelligence: i32,
    /// Wisdom score.
    pub wisdom: i32,
    /// Charisma score.
    pub charisma: i32,
}

impl AbilityScores {
    /// Scores in standard order: STR, DEX, CON, INT, WIS, CHA.
    pub fn new(str_: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: str_,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    /// The raw score for one ability.
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// The modifier for one ability, with floor semantics.
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_floors_toward_negative_infinity() {
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(18), 4);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn parse_accepts_names_and_abbreviations() {
        assert_eq!(Ability::parse("strength").unwrap(), Ability::Strength);
        assert_eq!(Ability::parse("DEX").unwrap(), Ability::Dexterity);
        assert_eq!(Ability::parse("Wis").unwrap(), Ability::Wisdom);
        assert!(Ability::parse("luck").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for ability in Ability::all() {
            assert_eq!(Ability::parse(&ability.to_string()).unwrap(), ability);
        }
    }

    #[test]
    fn scores_look_up_by_ability() {
        let scores = AbilityScores::new(16, 14, 13, 12, 10, 8);
        assert_eq!(scores.score(Ability::Strength), 16);
        assert_eq!(scores.modifier(Ability::Strength), 3);
        assert_eq!(scores.modifier(Ability::Charisma), -1);
    }

    #[test]
    fn default_scores_are_all_ten() {
        let scores = AbilityScores::default();
        for ability in Ability::all() {
            assert_eq!(scores.score(ability), 10);
            assert_eq!(scores.modifier(ability), 0);
        }
    }

    #[test]
    fn serde_round_trip() {
        let scores = AbilityScores::new(15, 12, 14, 10, 11, 9);
        let json = serde_json::to_string(&scores).unwrap();
        let back: AbilityScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scores);
    }
}
