use clap::Args;
use colored::Colorize;
use dw_mechanics::{DiceExpr, Mulberry32, RollMode, roll_d20, roll_dice};
use rand::RngCore;

/// Arguments for `dw roll`.
#[derive(Args)]
pub struct RollArgs {
    /// Expression to roll: NdM, NdM+K, or NdM-K (count defaults to 1)
    pub expression: String,

    /// Seed key for reproducible rolls; the same key always gives the
    /// same dice. Omit for fresh entropy.
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Roll a plain d20 twice and keep the higher die
    #[arg(short, long, conflicts_with = "disadvantage")]
    pub advantage: bool,

    /// Roll a plain d20 twice and keep the lower die
    #[arg(short, long)]
    pub disadvantage: bool,

    /// Repeat the roll this many times
    #[arg(short, long, default_value = "1")]
    pub times: u32,
}

pub fn run(args: &RollArgs) -> Result<(), String> {
    let mode =
        RollMode::from_flags(args.advantage, args.disadvantage).map_err(|e| e.to_string())?;
    let expr = DiceExpr::parse(&args.expression).map_err(|e| e.to_string())?;
    if mode != RollMode::Normal && (expr.count != 1 || expr.sides != 20 || expr.modifier != 0) {
        return Err("advantage and disadvantage apply to a plain d20 roll".into());
    }

    let mut rng = match &args.seed {
        Some(key) => Mulberry32::from_key(key),
        None => Mulberry32::new(rand::rng().next_u32()),
    };

    if let Some(key) = &args.seed {
        println!("  {}", format!("seed '{key}'").dimmed());
    }
    for _ in 0..args.times {
        let result = if mode == RollMode::Normal {
            roll_dice(&mut rng, &expr)
        } else {
            roll_d20(&mut rng, mode)
        };
        let line = result.to_string();
        if result.natural_twenty {
            println!("  {}", line.green().bold());
        } else if result.natural_one {
            println!("  {}", line.red().bold());
        } else {
            println!("  {line}");
        }
    }

    Ok(())
}
