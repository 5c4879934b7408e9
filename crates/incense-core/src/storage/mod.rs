mod config;
pub mod database;

pub use config::{ChimeConfig, Config};
pub use database::Database;

use std::path::PathBuf;

/// Returns the Incense data directory, creating it if needed.
///
/// `INCENSE_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/incense`, or `~/.config/incense-dev` when `INCENSE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("INCENSE_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("INCENSE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("incense-dev")
            } else {
                base_dir.join("incense")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
