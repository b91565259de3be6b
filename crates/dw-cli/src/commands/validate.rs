use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use dw_encounter::{Severity, validate};

/// Arguments for `dw validate`.
#[derive(Args)]
pub struct ValidateArgs {
    /// Encounter spec JSON to validate
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Monster catalog JSON to resolve hostile references against
    #[arg(short, long)]
    pub monsters: PathBuf,

    /// Party snapshot JSON; enables damage-coverage checks
    #[arg(short, long)]
    pub party: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs) -> Result<(), String> {
    let catalog = super::load_catalog(&args.monsters)?;
    let spec = super::load_spec(&args.spec)?;
    let party = match &args.party {
        Some(path) => Some(super::load_party(path)?),
        None => None,
    };

    let report = validate(&spec, &catalog, party.as_ref());

    println!(
        "  {} {} encounter {}",
        "Validating".bold(),
        spec.difficulty,
        format!("({}, id {})", spec.encounter_type, spec.id).dimmed()
    );
    println!(
        "  Declared budget: {} XP | Effective: {} XP",
        spec.xp_budget, report.effective_xp
    );
    println!();

    if report.ok {
        println!("  {} no issues found", "OK".green().bold());
        return Ok(());
    }

    for issue in &report.issues {
        match issue.severity {
            Severity::Error => println!("  {} {}", "ERROR".red().bold(), issue.message),
            Severity::Warning => println!("  {}  {}", "WARN".yellow().bold(), issue.message),
        }
    }
    println!();

    let errors = report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();
    let warnings = report.issues.len() - errors;
    Err(format!(
        "validation failed: {} error{}, {} warning{}",
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    ))
}
