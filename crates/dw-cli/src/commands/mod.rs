pub mod generate;
pub mod roll;
pub mod validate;

use std::fs;
use std::path::Path;

use dw_core::{EncounterSpec, PartySnapshot};
use dw_encounter::{DrainTracker, MonsterCatalog};

/// Load a monster catalog, mapping library errors to CLI strings.
fn load_catalog(path: &Path) -> Result<MonsterCatalog, String> {
    MonsterCatalog::load(path).map_err(|e| e.to_string())
}

/// Load a party snapshot from a JSON file.
fn load_party(path: &Path) -> Result<PartySnapshot, String> {
    let json = read_file(path)?;
    serde_json::from_str(&json).map_err(|e| format!("invalid party JSON: {e}"))
}

/// Load an encounter spec from a JSON file.
fn load_spec(path: &Path) -> Result<EncounterSpec, String> {
    let json = read_file(path)?;
    serde_json::from_str(&json).map_err(|e| format!("invalid encounter spec JSON: {e}"))
}

/// Load pacing telemetry from a JSON file.
fn load_tracker(path: &Path) -> Result<DrainTracker, String> {
    let json = read_file(path)?;
    serde_json::from_str(&json).map_err(|e| format!("invalid telemetry JSON: {e}"))
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}
