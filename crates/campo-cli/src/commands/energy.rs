//! `campo energy`: describe an energy level.

use clap::Subcommand;

use super::common::{parse_energy, CliResult};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Show the band and suited activities for a level
    Show {
        /// Energy, 1-10
        level: f64,
    },
}

pub fn run(action: EnergyAction) -> CliResult {
    match action {
        EnergyAction::Show { level } => {
            let energy = parse_energy(level)?;
            println!("Energy: {energy}");
            println!("Band: {}", energy.band().name());
            println!("\nSuited activities:");
            for activity in energy.optimal_activities() {
                println!("  - {}", activity.as_str());
            }
        }
    }
    Ok(())
}
