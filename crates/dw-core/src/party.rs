use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::damage::DamageType;

/// One party member, reduced to what budget math and validation need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    /// Character level.
    pub level: u32,
    /// Damage types this member can deal.
    #[serde(default)]
    pub damage_types: Vec<DamageType>,
    /// True when the member has magical attacks that bypass mundane defenses.
    #[serde(default)]
    pub has_magical_attacks: bool,
    /// Saving throws this member is proficient in.
    #[serde(default)]
    pub save_proficiencies: Vec<Ability>,
}

impl PartyMember {
    /// A member with no recorded damage coverage.
    pub fn new(level: u32) -> Self {
        Self {
            level,
            damage_types: Vec::new(),
            has_magical_attacks: false,
            save_proficiencies: Vec::new(),
        }
    }

    /// Set the damage types this member deals.
    pub fn with_damage_types(mut self, types: &[DamageType]) -> Self {
        self.damage_types = types.to_vec();
        self
    }

    /// Mark the member as having magical attacks.
    pub fn with_magical_attacks(mut self) -> Self {
        self.has_magical_attacks = true;
        self
    }
}

/// Aggregate fraction of party resources remaining, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Fraction of total hit points remaining.
    pub hit_points: f64,
    /// Fraction of spell slots (and comparable per-day resources) remaining.
    pub spell_slots: f64,
}

impl ResourcePool {
    /// A pool with both fractions clamped into `[0, 1]`.
    pub fn new(hit_points: f64, spell_slots: f64) -> Self {
        Self {
            hit_points: hit_points.clamp(0.0, 1.0),
            spell_slots: spell_slots.clamp(0.0, 1.0),
        }
    }

    /// A fully rested party.
    pub fn full() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Drain relative to an earlier snapshot: the mean fractional drop,
    /// clamped to `[0, 1]`. Regained resources never produce negative drain.
    pub fn drain_since(&self, before: &ResourcePool) -> f64 {
        let hp_drop = (before.hit_points - self.hit_points).max(0.0);
        let slot_drop = (before.spell_slots - self.spell_slots).max(0.0);
        ((hp_drop + slot_drop) / 2.0).clamp(0.0, 1.0)
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::full()
    }
}

/// A point-in-time description of the party.
///
/// Size and average level can be supplied directly (some callers only know
/// the headline numbers) or derived from the member list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartySnapshot {
    /// Individual members; may be empty when only headline numbers are known.
    #[serde(default)]
    pub members: Vec<PartyMember>,
    /// Explicit party size, overriding the member count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Explicit average level, overriding the derived mean.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_level: Option<u32>,
    /// Resource state, for callers that track drain between encounters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcePool>,
}

impl PartySnapshot {
    /// A snapshot of the given members.
    pub fn of_members(members: Vec<PartyMember>) -> Self {
        Self {
            members,
            size: None,
            average_level: None,
            resources: None,
        }
    }

    /// A snapshot of `size` members all at `level`, without per-member detail.
    pub fn uniform(size: u32, level: u32) -> Self {
        Self {
            members: Vec::new(),
            size: Some(size),
            average_level: Some(level),
            resources: None,
        }
    }

    /// Party size: the explicit value when present, otherwise the member
    /// count. Never less than one, so budget math stays well-defined even
    /// for an empty snapshot.
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(self.members.len() as u32).max(1)
    }

    /// Average level rounded to the nearest integer, minimum one.
    pub fn average_level(&self) -> u32 {
        if let Some(level) = self.average_level {
            return level.max(1);
        }
        if self.members.is_empty() {
            return 1;
        }
        let sum: u32 = self.members.iter().map(|m| m.level).sum();
        let mean = f64::from(sum) / self.members.len() as f64;
        (mean.round() as u32).max(1)
    }

    /// True when any member has magical attacks.
    pub fn has_magical_attacks(&self) -> bool {
        self.members.iter().any(|m| m.has_magical_attacks)
    }

    /// Union of damage types across members, in first-seen order.
    pub fn damage_types(&self) -> Vec<DamageType> {
        let mut types = Vec::new();
        for member in &self.members {
            for damage in &member.damage_types {
                if !types.contains(damage) {
                    types.push(*damage);
                }
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_floors_at_one() {
        assert_eq!(PartySnapshot::default().size(), 1);
        assert_eq!(PartySnapshot::uniform(0, 3).size(), 1);
        assert_eq!(PartySnapshot::uniform(5, 3).size(), 5);
    }

    #[test]
    fn average_level_rounds_to_nearest() {
        let party = PartySnapshot::of_members(vec![
            PartyMember::new(3),
            PartyMember::new(4),
            PartyMember::new(4),
        ]);
        // mean 3.67 rounds to 4
        assert_eq!(party.average_level(), 4);

        let party = PartySnapshot::of_members(vec![PartyMember::new(2), PartyMember::new(3)]);
        // mean 2.5 rounds half-up to 3
        assert_eq!(party.average_level(), 3);

        assert_eq!(PartySnapshot::default().average_level(), 1);
    }

    #[test]
    fn explicit_numbers_override_members() {
        let mut party = PartySnapshot::of_members(vec![PartyMember::new(8)]);
        party.size = Some(4);
        party.average_level = Some(2);
        assert_eq!(party.size(), 4);
        assert_eq!(party.average_level(), 2);
    }

    #[test]
    fn damage_types_dedupe_across_members() {
        let party = PartySnapshot::of_members(vec![
            PartyMember::new(3).with_damage_types(&[DamageType::Slashing, DamageType::Fire]),
            PartyMember::new(3).with_damage_types(&[DamageType::Fire, DamageType::Piercing]),
        ]);
        assert_eq!(
            party.damage_types(),
            vec![DamageType::Slashing, DamageType::Fire, DamageType::Piercing]
        );
        assert!(!party.has_magical_attacks());
    }

    #[test]
    fn drain_averages_fractional_drops() {
        let before = ResourcePool::full();
        let after = ResourcePool::new(0.5, 0.9);
        let drain = after.drain_since(&before);
        assert!((drain - 0.3).abs() < 1e-9);
    }

    #[test]
    fn drain_ignores_regained_resources() {
        let before = ResourcePool::new(0.4, 0.5);
        let after = ResourcePool::new(0.8, 0.5);
        assert_eq!(after.drain_since(&before), 0.0);
    }

    #[test]
    fn resource_pool_clamps_on_construction() {
        let pool = ResourcePool::new(1.5, -0.2);
        assert_eq!(pool.hit_points, 1.0);
        assert_eq!(pool.spell_slots, 0.0);
    }
}
