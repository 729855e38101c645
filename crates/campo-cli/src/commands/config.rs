//! `campo config`: read and edit `<data_dir>/config.toml`.
//!
//! Keys are dotted paths into the TOML sections: `recommendation.*`,
//! `location.*`, `storage.backend` and `export.vault_dir`.

use clap::Subcommand;
use campo_core::Config;

use super::common::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dotted key, e.g. "recommendation.top_n" or "location.timezone"
        key: String,
    },
    /// Validate and store one value
    Set {
        /// Dotted key, e.g. "storage.backend"
        key: String,
        /// New value, parsed as the type of the existing field
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Print the path of the config file
    Path,
    /// Overwrite the config file with the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => print_json(&Config::load()?)?,
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
