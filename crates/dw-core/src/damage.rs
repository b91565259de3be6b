use std::fmt;

use serde::{Deserialize, Serialize};

/// The thirteen standard damage types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Corrosive sprays and dissolving attacks.
    Acid,
    /// Blunt force: hammers, falls, constriction.
    Bludgeoning,
    /// Freezing attacks.
    Cold,
    /// Flames and heat.
    Fire,
    /// Pure magical energy.
    Force,
    /// Electrical attacks.
    Lightning,
    /// Life-draining energy.
    Necrotic,
    /// Puncturing attacks: arrows, fangs, spears.
    Piercing,
    /// Venoms and toxins.
    Poison,
    /// Mental assault.
    Psychic,
    /// Searing divine energy.
    Radiant,
    /// Cutting attacks: blades, claws.
    Slashing,
    /// Concussive sound.
    Thunder,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Acid => "acid",
            Self::Bludgeoning => "bludgeoning",
            Self::Cold => "cold",
            Self::Fire => "fire",
            Self::Force => "force",
            Self::Lightning => "lightning",
            Self::Necrotic => "necrotic",
            Self::Piercing => "piercing",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Radiant => "radiant",
            Self::Slashing => "slashing",
            Self::Thunder => "thunder",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DamageType::Bludgeoning).unwrap(),
            "\"bludgeoning\""
        );
        let back: DamageType = serde_json::from_str("\"fire\"").unwrap();
        assert_eq!(back, DamageType::Fire);
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(DamageType::Psychic.to_string(), "psychic");
        assert_eq!(DamageType::Slashing.to_string(), "slashing");
    }
}
