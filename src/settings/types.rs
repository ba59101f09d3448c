// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::providers::lunarcrush::types::LcConfig;
use crate::utility::throttle::types::ThrottleConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Update {
    pub interval: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,

    #[serde(default)]
    pub update: Update,

    #[serde(default)]
    pub throttle: ThrottleConfig,

    #[serde(default)]
    pub lunarcrush: LcConfig,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Update {
    fn default() -> Self {
        Self {
            interval: default_update_interval(),
        }
    }
}

fn default_update_interval() -> u64 {
    300 // 5 minutes
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Manages the application settings, allowing for loading and reloading configurations.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub _config_path: PathBuf,
}

/// Settings that have passed validation.
pub struct ValidatedSettings(pub(super) Settings);
