use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::session::{validate_duration, Difficulty, SessionConfig, TextCategory};

/// Default practice settings, read from the user's config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u32,
    pub text_category: TextCategory,
    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            text_category: TextCategory::Sentences,
            difficulty: Difficulty::Medium,
        }
    }
}

impl TryFrom<&Config> for SessionConfig {
    type Error = ConfigError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        SessionConfig::new(cfg.duration_secs, cfg.text_category, cfg.difficulty)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config, ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file yields the defaults
    fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }

        let bytes = fs::read(&self.path)?;
        let cfg: Config = serde_json::from_slice(&bytes)?;
        validate_duration(cfg.duration_secs)?;

        Ok(cfg)
    }
}

/// Load the config, falling back to the defaults when it is unusable
pub fn load_or_default(store: &impl ConfigStore) -> Config {
    store.load().unwrap_or_else(|e| {
        tracing::warn!("ignoring config: {e}");
        Config::default()
    })
}
