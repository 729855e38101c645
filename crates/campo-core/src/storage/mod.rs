mod config;
pub mod file_store;
pub mod kv;
pub mod migrations;
pub mod sqlite_store;

pub use config::{Config, ExportConfig, LocationConfig, StorageBackend, StorageConfig};
pub use file_store::FileStore;
pub use kv::{get_json, set_json, KvStore, MemoryStore};
pub use sqlite_store::SqliteStore;

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `CAMPO_DATA_DIR` wins when set. Otherwise `~/.config/campo[-dev]/`,
/// with `CAMPO_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("CAMPO_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CAMPO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("campo-dev")
            } else {
                base_dir.join("campo")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
