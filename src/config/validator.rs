//! Configuration validator
//!
//! Validates layouts and locations so a bad config fails at startup rather
//! than as a stream of garbage reads.

use super::loader::{Config, ConfigError, LoggingConfig, PlayersConfig, ProcessConfig, TeamsConfig};
use crate::codec::RatingScale;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_process(&config.process)?;
        Self::validate_players(&config.players)?;
        Self::validate_teams(&config.teams)?;
        Self::validate_ratings(&config.ratings)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_process(process: &ProcessConfig) -> Result<(), ConfigError> {
        if process.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Process name cannot be empty".to_string(),
            ));
        }
        if process.module.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Module name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the player table location and record layout
    fn validate_players(players: &PlayersConfig) -> Result<(), ConfigError> {
        if players.chains.is_empty() && players.static_rva.is_none() {
            return Err(ConfigError::Invalid(
                "Player table needs at least one chain or a static RVA".to_string(),
            ));
        }

        let layout = &players.layout;
        if layout.stride == 0 || layout.max_slots == 0 {
            return Err(ConfigError::Invalid(
                "Player stride and max slots must be greater than 0".to_string(),
            ));
        }
        if layout.name_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "Player name length must be at least 1".to_string(),
            ));
        }

        let name_bytes = layout.name_max_chars as u64 * 2;
        Self::check_fits("player last name", layout.last_name_offset, name_bytes, layout.stride)?;
        Self::check_fits("player first name", layout.first_name_offset, name_bytes, layout.stride)?;
        Self::check_fits("player face id", layout.face_id_offset, 4, layout.stride)?;
        Self::check_fits("player team pointer", layout.team_ptr_offset, 8, layout.stride)?;
        Ok(())
    }

    /// Validates the team table location and record layout
    fn validate_teams(teams: &TeamsConfig) -> Result<(), ConfigError> {
        let layout = &teams.layout;
        if layout.stride == 0 || layout.max_slots == 0 {
            return Err(ConfigError::Invalid(
                "Team stride and max slots must be greater than 0".to_string(),
            ));
        }
        if layout.name_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "Team name length must be at least 1".to_string(),
            ));
        }

        Self::check_fits(
            "team name",
            layout.name_offset,
            layout.name_max_chars as u64 * 2,
            layout.stride,
        )?;
        Self::check_fits("team roster", 0, layout.roster_slots as u64 * 8, layout.stride)?;
        Self::check_fits("team type", layout.type_offset, 1, layout.stride)?;
        Self::check_fits("team era", layout.year_offset, 2, layout.stride)?;
        Ok(())
    }

    fn validate_ratings(ratings: &RatingScale) -> Result<(), ConfigError> {
        if !(ratings.min >= 0.0 && ratings.min < ratings.max_true) {
            return Err(ConfigError::Invalid(format!(
                "Rating range {}..{} is empty",
                ratings.min, ratings.max_true
            )));
        }
        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }
        Ok(())
    }

    fn check_fits(what: &str, offset: u64, len: u64, stride: u64) -> Result<(), ConfigError> {
        if offset.saturating_add(len) > stride {
            return Err(ConfigError::Invalid(format!(
                "{} at +0x{:X} ({} bytes) overruns the 0x{:X}-byte record",
                what, offset, len, stride
            )));
        }
        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
