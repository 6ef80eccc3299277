//! Configuration loading from TOML files
//!
//! Error type and TOML helpers are shared with loot_core.

mod character;

pub use character::{
    default_character_config, load_character_config, parse_character_config, CharacterConfig,
};
pub use loot_core::config::{load_toml, parse_toml, ConfigError};
