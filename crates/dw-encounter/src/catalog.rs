//! Monster catalog loading and lookup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use dw_core::MonsterDef;

use crate::error::{EncounterError, EncounterResult};

/// An id-indexed collection of monster definitions.
///
/// The catalog preserves the order entries were supplied in, which keeps
/// generation deterministic for a given data file. On disk a catalog is a
/// JSON array of monster definitions.
#[derive(Debug, Clone, Default)]
pub struct MonsterCatalog {
    monsters: Vec<MonsterDef>,
    by_id: HashMap<String, usize>,
}

impl MonsterCatalog {
    /// Build a catalog from a list of definitions.
    ///
    /// Ids must be unique; a duplicate is a data error, not something to
    /// resolve silently.
    pub fn new(monsters: Vec<MonsterDef>) -> EncounterResult<Self> {
        let mut by_id = HashMap::with_capacity(monsters.len());
        for (index, monster) in monsters.iter().enumerate() {
            if by_id.insert(monster.id.clone(), index).is_some() {
                return Err(EncounterError::DuplicateMonster(monster.id.clone()));
            }
        }
        Ok(Self { monsters, by_id })
    }

    /// Parse a catalog from a JSON array of monster definitions.
    pub fn from_json_str(json: &str) -> EncounterResult<Self> {
        let monsters: Vec<MonsterDef> = serde_json::from_str(json)?;
        Self::new(monsters)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> EncounterResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EncounterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Look up a monster by id.
    pub fn get(&self, id: &str) -> Option<&MonsterDef> {
        self.by_id.get(id).map(|&index| &self.monsters[index])
    }

    /// Iterate the catalog in supply order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterDef> {
        self.monsters.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    /// True when the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}
