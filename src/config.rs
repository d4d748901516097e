use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

use crate::reset::DEFAULT_RESET_FORMAT;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SCREDITS_CONFIG";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Accounting binary, looked up in `PATH` unless absolute.
    pub sshare: String,
    pub last_reset_file: PathBuf,
    pub next_reset_file: PathBuf,
    pub reset_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sshare: "sshare".to_string(),
            last_reset_file: PathBuf::from("/etc/scredits/last_reset"),
            next_reset_file: PathBuf::from("/etc/scredits/next_reset"),
            reset_format: DEFAULT_RESET_FORMAT.to_string(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "scredits").map(|d| d.config_dir().join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

pub fn load_config_from(path: &Path) -> Config {
    let Ok(data) = fs::read_to_string(path) else {
        return Config::default();
    };

    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            warn!("invalid config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}
