//! Configuration module for the proxy
//!
//! Settings are read once at startup from defaults, an optional YAML file
//! and a few environment variables, then shared read-only.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Candidate locations for settings.yml, in lookup order
pub fn settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/searxng-proxy/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("searxng-proxy/settings.yml"));
    }
    paths
}

/// First existing settings file, if any
pub fn find_settings_file() -> Option<PathBuf> {
    settings_paths().into_iter().find(|p| p.exists())
}

/// Load settings from `path` (or defaults), apply environment overrides
/// and validate
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}
