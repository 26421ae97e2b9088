use std::path::{Path, PathBuf};

use crate::core::trigger::TriggerRegistry;
use crate::kernel::services::ports::{TargetConfig, TriggerRule};

const SETTINGS_DIR: &str = ".rte-surface";
const SETTINGS_FILE: &str = "target.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid target config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn parse_target_config(data: &str) -> Result<TargetConfig, ConfigError> {
    Ok(serde_json::from_str(data)?)
}

pub fn load_target_config(path: &Path) -> Result<TargetConfig, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_target_config(&data)?;
    tracing::info!(path = %path.display(), "target config loaded");
    Ok(config)
}

/// Writes the default config when none exists yet.
pub fn ensure_settings_file(path: &Path) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(&TargetConfig::default())?;
    std::fs::write(path, content).map_err(io_err)
}

/// Overrides registry entries with configured rules. Bad chords are logged
/// and skipped; returns how many rules were applied.
pub fn apply_trigger_rules(registry: &mut TriggerRegistry, rules: &[TriggerRule]) -> usize {
    let mut applied = 0;
    for rule in rules {
        match registry.register(&rule.command, rule.trigger.clone()) {
            Ok(()) => applied += 1,
            Err(error) => {
                tracing::error!(command = %rule.command, %error, "trigger rule rejected");
            }
        }
    }
    applied
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
