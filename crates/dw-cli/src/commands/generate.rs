use std::fs;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dw_core::{Difficulty, EncounterType, PartySnapshot};
use dw_encounter::{EncounterRequest, generate};

/// Arguments for `dw generate`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Monster catalog JSON (an array of monster definitions)
    #[arg(short, long)]
    pub monsters: PathBuf,

    /// Party snapshot JSON (default: four level-3 characters)
    #[arg(short, long)]
    pub party: Option<PathBuf>,

    /// Difficulty tier: easy, medium, hard, deadly
    #[arg(short, long, default_value = "medium")]
    pub difficulty: String,

    /// Encounter kind: combat, social, exploration
    #[arg(short, long, default_value = "combat")]
    pub kind: String,

    /// Restrict hostile selection to monsters tagged with this biome
    #[arg(short, long)]
    pub biome: Option<String>,

    /// Session id for pacing lookups (needs --telemetry to have any effect)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Pacing telemetry JSON, as serialized from a drain tracker
    #[arg(long)]
    pub telemetry: Option<PathBuf>,

    /// Mark the encounter as a surprise
    #[arg(long)]
    pub surprise: bool,

    /// Write the full spec JSON here as well as printing the summary
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let catalog = super::load_catalog(&args.monsters)?;
    let party = match &args.party {
        Some(path) => super::load_party(path)?,
        None => PartySnapshot::uniform(4, 3),
    };
    let difficulty = Difficulty::parse(&args.difficulty).map_err(|e| e.to_string())?;
    let kind = EncounterType::parse(&args.kind).map_err(|e| e.to_string())?;
    let tracker = match &args.telemetry {
        Some(path) => Some(super::load_tracker(path)?),
        None => None,
    };

    let mut request = EncounterRequest::new(party)
        .with_difficulty(difficulty)
        .with_encounter_type(kind);
    if let Some(biome) = &args.biome {
        request = request.with_biome(biome.clone());
    }
    if let Some(session) = &args.session {
        request = request.with_session(session.clone());
    }
    if args.surprise {
        request = request.with_surprise();
    }

    let spec = generate(&request, &catalog, tracker.as_ref()).map_err(|e| e.to_string())?;

    println!(
        "  {} {} encounter {}",
        "Generated".bold(),
        spec.difficulty,
        format!("({}, id {})", spec.encounter_type, spec.id).dimmed()
    );
    println!("  Terrain: {} | XP budget: {}", spec.terrain, spec.xp_budget);
    if let (Some(session), Some(tracker)) = (&request.session_id, &tracker) {
        let adjustment = tracker.adjustment(session, difficulty);
        if (adjustment - 1.0).abs() > f64::EPSILON {
            println!("  Pacing adjustment: x{adjustment:.2}");
        }
    }
    if spec.surprise {
        println!("  {}", "Surprise round!".yellow());
    }
    println!();

    if spec.hostiles.is_empty() {
        println!("  (no hostiles)");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Hostile", "Count", "CR", "XP each"]);
        for hostile in &spec.hostiles {
            // Generated ids always resolve; the fallback keeps the table
            // honest if that ever changes.
            let (name, cr, xp) = match catalog.get(&hostile.id) {
                Some(m) => (
                    m.name.clone(),
                    m.challenge_rating.to_string(),
                    m.xp.to_string(),
                ),
                None => (hostile.id.clone(), "?".to_string(), "?".to_string()),
            };
            table.add_row(vec![name, hostile.count.to_string(), cr, xp]);
        }
        println!("{table}");
    }
    println!();

    for objective in &spec.objectives {
        println!("  Objective: {objective}");
    }
    if let Some(hooks) = &spec.loot_hooks {
        for hook in hooks {
            println!("  Loot: {hook}");
        }
    }

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&spec).map_err(|e| e.to_string())?;
        fs::write(out, json).map_err(|e| format!("failed to write {}: {e}", out.display()))?;
        println!();
        println!("  Spec written to {}", out.display());
    }

    Ok(())
}
