//! Configuration module for WikiAgent
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Candidate settings file locations, in lookup order
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/wikiagent/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("wikiagent/settings.yml"));
    }
    paths
}

/// Load settings from file or use defaults, then apply env overrides.
///
/// An explicit path must exist; otherwise the search paths are tried.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) if !path.exists() => bail!("settings file not found: {}", path.display()),
        Some(path) => Some(path.to_path_buf()),
        None => locate(),
    };

    let mut settings = match path {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn locate() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = std::env::var("WIKIAGENT_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }
    search_paths().into_iter().find(|p| p.exists())
}
