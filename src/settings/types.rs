// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::apply::ResourceConfig;
use crate::nios::NiosConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Update {
    /// Seconds between passes. 0 runs a single pass.
    #[serde(default)]
    pub interval: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StateSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub update: Update,
    pub nios: NiosConfig,
    #[serde(default)]
    pub state: StateSettings,

    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceConfig>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Manages the application settings.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub config_path: PathBuf,
}

/// Settings that passed validation.
#[derive(Debug)]
pub struct ValidatedSettings(pub(super) Settings);
