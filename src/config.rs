use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "pokedex.db";

/// Resolve the database path, creating its parent directory if needed.
///
/// Without an explicit path the database lives in the platform data
/// directory (e.g. `~/.local/share/pokedex-etl/pokedex.db`).
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let db_path = match custom {
        Some(path) => path,
        None => {
            let proj_dirs = ProjectDirs::from("", "", "pokedex-etl")
                .context("Could not determine data directory")?;
            proj_dirs.data_dir().join(DB_FILE_NAME)
        }
    };

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    Ok(db_path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {:?}", dir))
}
