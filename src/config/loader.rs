//! Configuration loader
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::{
    default_player_chains, default_team_chains, DEFAULT_LOG_LEVEL, DEFAULT_PLAYER_STATIC_RVA,
    DEFAULT_PROCESS_NAME,
};
use crate::codec::RatingScale;
use crate::resolver::{PointerChain, TableResolver};
use crate::scanner::{PlayerLayout, TeamLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub process: ProcessConfig,

    #[serde(default)]
    pub players: PlayersConfig,

    #[serde(default)]
    pub teams: TeamsConfig,

    #[serde(default)]
    pub ratings: RatingScale,

    #[serde(default)]
    pub offsets: OffsetsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_process_name")]
    pub name: String,
    /// Module whose base the chains are relative to
    #[serde(default = "default_process_name")]
    pub module: String,
}

/// Player table location and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersConfig {
    #[serde(default = "default_player_chains")]
    pub chains: Vec<PointerChain>,
    #[serde(default = "default_player_static_rva")]
    pub static_rva: Option<u64>,
    #[serde(default)]
    pub layout: PlayerLayout,
}

/// Team table location and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsConfig {
    #[serde(default = "default_team_chains")]
    pub chains: Vec<PointerChain>,
    #[serde(default)]
    pub static_rva: Option<u64>,
    #[serde(default)]
    pub layout: TeamLayout,
}

/// Offset map location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffsetsConfig {
    /// JSON offset map; the built-in categories are used when absent
    #[serde(default)]
    pub map_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl PlayersConfig {
    pub fn resolver(&self) -> TableResolver {
        TableResolver::from_chains("Player", &self.chains, self.static_rva)
    }
}

impl TeamsConfig {
    pub fn resolver(&self) -> TableResolver {
        TableResolver::from_chains("Team", &self.chains, self.static_rva)
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration or returns defaults if the file is missing
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    ConfigLoader::new("roster-memory.toml").load_or_default()
}

// Default functions for serde
fn default_process_name() -> String {
    DEFAULT_PROCESS_NAME.to_string()
}

fn default_player_static_rva() -> Option<u64> {
    Some(DEFAULT_PLAYER_STATIC_RVA)
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig {
            name: default_process_name(),
            module: default_process_name(),
        }
    }
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            chains: default_player_chains(),
            static_rva: default_player_static_rva(),
            layout: PlayerLayout::default(),
        }
    }
}

impl Default for TeamsConfig {
    fn default() -> Self {
        TeamsConfig {
            chains: default_team_chains(),
            static_rva: None,
            layout: TeamLayout::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            process: ProcessConfig::default(),
            players: PlayersConfig::default(),
            teams: TeamsConfig::default(),
            ratings: RatingScale::default(),
            offsets: OffsetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.process.name, "NBA2K25.exe");
        assert_eq!(config.players.chains.len(), 4);
        assert_eq!(config.players.static_rva, Some(0x07E5_2998));
        assert_eq!(config.teams.static_rva, None);
        assert_eq!(config.players.layout.stride, 0x448);
        assert_eq!(config.teams.layout.stride, 0x1620);
        assert_eq!(config.ratings.max_true, 110.0);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new("nonexistent.toml");
        let result = loader.load();
        assert!(matches!(result.unwrap_err(), ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_or_default() {
        let loader = ConfigLoader::new("nonexistent.toml");
        let config = loader.load_or_default().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[players\nchains = 3").unwrap();
        let result = ConfigLoader::new(&path).load_or_default();
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        config.teams.static_rva = Some(0x07DF_0000);
        let loader = ConfigLoader::new(&config_path);

        loader.save(&config).unwrap();
        assert!(config_path.exists());

        let loaded = loader.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [process]
            name = "NBA2K25_patch5.exe"

            [[teams.chains]]
            rva = 0x07E40000
            final_offset = 0x90
            extra_deref = true

            [players.layout]
            max_slots = 100
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.process.name, "NBA2K25_patch5.exe");
        assert_eq!(config.process.module, "NBA2K25.exe");
        assert_eq!(config.teams.chains, vec![PointerChain::new(0x07E4_0000, 0x90, true)]);
        assert_eq!(config.players.layout.max_slots, 100);
        // Check defaults are applied
        assert_eq!(config.players.layout.stride, 0x448);
        assert_eq!(config.players.chains.len(), 4);
        assert_eq!(config.logging.level, "info");
    }
}
