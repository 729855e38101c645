//! `campo field`: work fields and the next action across them.

use clap::Subcommand;

use campo_core::{Config, FieldState, OrchestratorStore, ProfileStore};

use super::common::{open_store, parse_energy, print_json, CliResult};

#[derive(Subcommand)]
pub enum FieldAction {
    /// List work fields
    List {
        #[arg(long)]
        json: bool,
    },
    /// Suggest the next action for the current energy
    Next {
        /// Current energy, 1-10
        #[arg(short, long)]
        energy: f64,
        #[arg(long)]
        json: bool,
    },
    /// Add progress percentage points to a field
    Progress {
        /// Field id, e.g. "ventas"
        id: String,
        /// Percentage points to add
        amount: u8,
    },
    /// Change a field's state
    State {
        id: String,
        /// active, paused or completed
        state: FieldState,
    },
}

pub fn run(action: FieldAction) -> CliResult {
    let config = Config::load()?;
    let profiles = ProfileStore::new(open_store(&config)?);
    let profile = profiles.load()?;
    let mut store = OrchestratorStore::new(profiles.into_store());
    let mut orchestrator = store.load()?;

    match action {
        FieldAction::List { json } => {
            if json {
                return print_json(&orchestrator.fields());
            }
            for field in orchestrator.fields() {
                println!(
                    "{:<12} {:>3}%  P{} E{:<2} {}",
                    field.id, field.progress, field.priority, field.energy_required, field.state
                );
            }
        }
        FieldAction::Next { energy, json } => {
            let next = orchestrator.next_action(parse_energy(energy)?, &profile);
            if json {
                return print_json(&next);
            }
            println!("[{}] {}", next.field, next.action);
            println!(
                "  {} min, coherence {:.0}%",
                next.duration_min, next.coherence
            );
            if !next.applicable_gifts.is_empty() {
                println!("  gifts: {}", next.applicable_gifts.join(", "));
            }
        }
        FieldAction::Progress { id, amount } => {
            let field = orchestrator.advance_progress(&id, amount)?;
            println!("{} {}% ({})", field.id, field.progress, field.state);
            store.save(&orchestrator)?;
        }
        FieldAction::State { id, state } => {
            orchestrator.set_state(&id, state)?;
            store.save(&orchestrator)?;
            println!("{id} {state}");
        }
    }
    Ok(())
}
