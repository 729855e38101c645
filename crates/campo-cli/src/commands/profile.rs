//! `campo profile`: inspect and adjust the personal profile.

use clap::Subcommand;

use campo_core::{Config, PositioningUpdate, ProfileStore};

use super::common::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Print the coherence score
    Coherence,
    /// Activate a gift by name
    GiftOn { name: String },
    /// Deactivate a gift by name
    GiftOff { name: String },
    /// Update positioning axes, each in -1..=1
    Position {
        #[arg(long, allow_hyphen_values = true)]
        spiritual_technical: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        individual_collective: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        ancestral_emergent: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        contemplative_active: Option<f64>,
    },
}

pub fn run(action: ProfileAction) -> CliResult {
    let config = Config::load()?;
    let mut store = ProfileStore::new(open_store(&config)?);
    let mut profile = store.load()?;

    match action {
        ProfileAction::Show { json } => {
            if json {
                return print_json(&profile);
            }
            println!("{} ({})", profile.name, profile.cognitive_type);
            println!(
                "Design: {} / {} / {}",
                profile.design_profile, profile.authority, profile.configuration
            );
            let p = &profile.positioning;
            println!(
                "Positioning: spiritual/technical {:+.2}, individual/collective {:+.2}, ancestral/emergent {:+.2}, contemplative/active {:+.2}",
                p.spiritual_technical, p.individual_collective, p.ancestral_emergent, p.contemplative_active
            );
            println!("\nGifts:");
            for gift in &profile.gifts {
                let mark = if gift.active { "x" } else { " " };
                println!("  [{mark}] {} ({})", gift.name, gift.intensity);
            }
            println!("\nNon-negotiables:");
            for item in &profile.non_negotiables {
                println!("  - {item}");
            }
            println!("\nCoherence: {:.1}", profile.coherence());
        }
        ProfileAction::Coherence => println!("{:.1}", profile.coherence()),
        ProfileAction::GiftOn { name } => {
            if !profile.activate_gift(&name) {
                return Err(format!("unknown gift: {name}").into());
            }
            store.save(&profile)?;
            println!("ok");
        }
        ProfileAction::GiftOff { name } => {
            if !profile.deactivate_gift(&name) {
                return Err(format!("unknown gift: {name}").into());
            }
            store.save(&profile)?;
            println!("ok");
        }
        ProfileAction::Position {
            spiritual_technical,
            individual_collective,
            ancestral_emergent,
            contemplative_active,
        } => {
            profile.update_positioning(PositioningUpdate {
                spiritual_technical,
                individual_collective,
                ancestral_emergent,
                contemplative_active,
            })?;
            store.save(&profile)?;
            println!("Coherence: {:.1}", profile.coherence());
        }
    }
    Ok(())
}
