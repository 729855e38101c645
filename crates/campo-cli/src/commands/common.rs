//! Helpers shared by the subcommands.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use campo_core::storage::data_dir;
use campo_core::{Config, EnergyLevel, FileStore, KvStore, SqliteStore, StorageBackend};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Open the store selected by `storage.backend`.
pub fn open_store(config: &Config) -> Result<Box<dyn KvStore>, Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    debug!(backend = ?config.storage.backend, dir = %dir.display(), "opening store");
    let store: Box<dyn KvStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open(dir.join("campo.db"))?),
        StorageBackend::File => Box::new(FileStore::open(dir.join("campo.json"))?),
    };
    Ok(store)
}

/// `--at` value, or local now.
pub fn parse_at(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => NaiveDateTime::parse_from_str(raw, AT_FORMAT).map_err(|e| {
            format!("invalid time '{raw}': {e} (expected YYYY-MM-DD HH:MM)").into()
        }),
        None => Ok(Local::now().naive_local()),
    }
}

pub fn parse_energy(raw: f64) -> Result<EnergyLevel, Box<dyn std::error::Error>> {
    Ok(EnergyLevel::new(raw)?)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
