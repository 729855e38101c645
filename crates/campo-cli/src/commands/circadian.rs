//! `campo circadian`: phase of day and the A/B recommendation.

use clap::Args;

use campo_core::binary_recommendation;

use super::common::{parse_at, parse_energy, print_json, CliResult};

#[derive(Args)]
pub struct CircadianArgs {
    /// Current energy, 1-10
    #[arg(short, long)]
    energy: f64,
    /// Local time "YYYY-MM-DD HH:MM" (defaults to now)
    #[arg(long)]
    at: Option<String>,
    #[arg(long)]
    json: bool,
}

pub fn run(args: CircadianArgs) -> CliResult {
    let energy = parse_energy(args.energy)?;
    let at = parse_at(args.at.as_deref())?;
    let rec = binary_recommendation(energy, at);

    if args.json {
        return print_json(&rec);
    }

    println!("Phase: {}", rec.phase.label());
    for (key, value) in &rec.factors {
        println!("  {key}: {value}");
    }
    println!();
    println!(
        "A: {} ({} min) - {}",
        rec.option_a.action, rec.option_a.duration_min, rec.option_a.description
    );
    println!(
        "B: {} ({} min) - {}",
        rec.option_b.action, rec.option_b.duration_min, rec.option_b.description
    );
    println!(
        "\nRecommended: {:?} ({:.0}% confidence)",
        rec.recommended,
        rec.confidence * 100.0
    );
    Ok(())
}
