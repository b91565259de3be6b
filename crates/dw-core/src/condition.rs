use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ability::Ability;

/// Canonical name of the grappled condition.
pub const GRAPPLED: &str = "grappled";
/// Canonical name of the unconscious condition.
pub const UNCONSCIOUS: &str = "unconscious";
/// Canonical name of the stunned condition.
pub const STUNNED: &str = "stunned";
/// Canonical name of the paralyzed condition.
pub const PARALYZED: &str = "paralyzed";
/// Canonical name of the petrified condition.
pub const PETRIFIED: &str = "petrified";

/// Conditions that prevent an actor from taking deliberate actions.
pub const INCAPACITATING: [&str; 4] = [STUNNED, PARALYZED, UNCONSCIOUS, PETRIFIED];

/// How long a condition persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionDuration {
    /// Expires after this many rounds.
    Rounds(u32),
    /// Persists until something removes it (an escape check, a spell, rest).
    UntilRemoved,
}

/// A condition attached to an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition name, matched case-insensitively.
    pub name: String,
    /// Short rules text for display.
    pub description: String,
    /// How long the condition lasts.
    pub duration: ConditionDuration,
    /// Ability used to escape the condition, when escapable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_ability: Option<Ability>,
    /// DC of the escape check, when escapable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_dc: Option<i32>,
}

impl Condition {
    /// A condition with no escape check that lasts until removed.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            duration: ConditionDuration::UntilRemoved,
            escape_ability: None,
            escape_dc: None,
        }
    }

    /// The grappled condition, carrying the grappler's DC as the escape
    /// threshold.
    pub fn grappled(escape_dc: i32) -> Self {
        Self {
            name: GRAPPLED.to_string(),
            description: "Speed is 0; escape with a contested Strength check".to_string(),
            duration: ConditionDuration::UntilRemoved,
            escape_ability: Some(Ability::Strength),
            escape_dc: Some(escape_dc),
        }
    }

    /// The unconscious condition.
    pub fn unconscious() -> Self {
        Self::new(UNCONSCIOUS, "Incapacitated, prone, and unaware")
    }

    /// The stunned condition.
    pub fn stunned() -> Self {
        Self::new(STUNNED, "Incapacitated and unable to move")
    }

    /// The paralyzed condition.
    pub fn paralyzed() -> Self {
        Self::new(PARALYZED, "Incapacitated and frozen in place")
    }

    /// The petrified condition.
    pub fn petrified() -> Self {
        Self::new(PETRIFIED, "Turned to stone and incapacitated")
    }

    /// True for conditions that block deliberate actions.
    pub fn is_incapacitating(&self) -> bool {
        INCAPACITATING
            .iter()
            .any(|name| self.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration {
            ConditionDuration::Rounds(n) => write!(f, "{} ({n} rounds)", self.name),
            ConditionDuration::UntilRemoved => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grappled_carries_escape_dc() {
        let condition = Condition::grappled(14);
        assert_eq!(condition.name, GRAPPLED);
        assert_eq!(condition.escape_ability, Some(Ability::Strength));
        assert_eq!(condition.escape_dc, Some(14));
        assert_eq!(condition.duration, ConditionDuration::UntilRemoved);
    }

    #[test]
    fn incapacitating_set_matches_names() {
        assert!(Condition::stunned().is_incapacitating());
        assert!(Condition::paralyzed().is_incapacitating());
        assert!(Condition::unconscious().is_incapacitating());
        assert!(Condition::petrified().is_incapacitating());
        assert!(!Condition::grappled(12).is_incapacitating());
    }

    #[test]
    fn display_shows_round_count() {
        let mut condition = Condition::new("dazed", "Minor daze");
        condition.duration = ConditionDuration::Rounds(3);
        assert_eq!(condition.to_string(), "dazed (3 rounds)");
        assert_eq!(Condition::stunned().to_string(), "stunned");
    }

    #[test]
    fn serde_round_trip() {
        let condition = Condition::grappled(13);
        let json = serde_json::to_string(&condition).unwrap();
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, condition);
    }
}
