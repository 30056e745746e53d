//! Locations of moviedeck's config file and TUI log.
//!
//! Both files live in one directory: `--dir` when given, otherwise
//! `~/.config/moviedeck/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory under `~/.config` holding moviedeck's files.
const APP_DIR_NAME: &str = "moviedeck";

/// TOML file carrying the `[tmdb]` section.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Log file written while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "moviedeck.log";

/// Returns the path of moviedeck's `config.toml`, inside `dir` when given
/// or `~/.config/moviedeck/` otherwise. The file need not exist.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is not set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let base = match dir {
        Some(dir) => dir.clone(),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable is not set")?;
            Path::new(&home).join(".config").join(APP_DIR_NAME)
        }
    };
    Ok(base.join(CONFIG_FILE_NAME))
}

/// Returns where `browse` writes its log: `moviedeck.log` beside the config.
#[must_use]
pub fn resolve_log_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map_or_else(|| PathBuf::from(LOG_FILE_NAME), |dir| dir.join(LOG_FILE_NAME))
}
