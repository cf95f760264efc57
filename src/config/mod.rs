//! Configuration module
//!
//! TOML configuration for the target process, table locations and record
//! layouts, plus the JSON offset map describing editable player fields.

mod contract;
mod defaults;
mod loader;
pub mod offsets;
mod validator;

pub use contract::CONTRACT_FIELDS;
pub use defaults::{
    default_player_chains, default_team_chains, DEFAULT_PLAYER_STATIC_RVA, DEFAULT_PROCESS_NAME,
};
pub use loader::{
    load_config, ConfigLoader, LoggingConfig, OffsetsConfig, PlayersConfig, ProcessConfig,
    TeamsConfig,
};
pub use offsets::{load_offset_map, BaseOverrides, FieldCategory, OffsetMap};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structure
pub use loader::Config;

// Configuration-related error type
pub use loader::ConfigError;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
