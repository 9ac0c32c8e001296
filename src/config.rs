use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::{Algorithm, SearchConfig};
use crate::error::ConfigError;

/// Identity announced to the game manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: "Othello AI".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Opponent {
    #[default]
    Random,
    /// The configured engine plays both sides
    SelfPlay,
}

/// Settings for the local `selfplay` match runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub games: usize,
    pub seed: Option<u64>,
    pub opponent: Opponent,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            games: 10,
            seed: None,
            opponent: Opponent::Random,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub search: SearchConfig,
    pub selfplay: SelfPlayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "engine.name must not be empty".into(),
            ));
        }
        if self.engine.name.contains('\n') {
            return Err(ConfigError::Validation(
                "engine.name must be a single line".into(),
            ));
        }
        if self.search.depth_limit < -1 {
            return Err(ConfigError::Validation(
                "search.depth_limit must be >= -1 (-1 = unbounded)".into(),
            ));
        }
        if self.selfplay.games == 0 {
            return Err(ConfigError::Validation(
                "selfplay.games must be > 0".into(),
            ));
        }
        if self.search.algorithm == Algorithm::Minimax && self.search.ordering {
            log::warn!("search.ordering has no effect on minimax");
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
