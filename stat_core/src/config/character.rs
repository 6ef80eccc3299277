//! Character defaults: base stats and level growth

use super::ConfigError;
use crate::save::StatSaveData;
use loot_core::types::StatType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Starting stats and per-level growth for a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default)]
    pub base_stats: BTreeMap<StatType, f32>,
    /// Flat bonus per level above 1
    #[serde(default)]
    pub level_growth: BTreeMap<StatType, f32>,
}

impl CharacterConfig {
    /// Save data for a fresh character with no equipment
    pub fn initial_save_data(&self) -> StatSaveData {
        StatSaveData {
            base_stats: self.base_stats.clone(),
            permanent_modifiers: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::ValidationError("max_level must be at least 1".to_string()));
        }
        let values = self.base_stats.iter().chain(self.level_growth.iter());
        for (stat, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "stat {:?} has non-finite value {}",
                    stat, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        CharacterConfig {
            max_level: default_max_level(),
            base_stats: BTreeMap::from([
                (StatType::MaxHp, 100.0),
                (StatType::Damage, 5.0),
                (StatType::Defense, 2.0),
                (StatType::MoveSpeed, 5.0),
                (StatType::AttackSpeed, 1.0),
                (StatType::AttackRange, 2.0),
                (StatType::AttackRadius, 1.0),
                (StatType::ExpCollectionRadius, 3.0),
                (StatType::HpRegenRate, 1.0),
                (StatType::CriticalChance, 10.0),
                (StatType::CriticalDamage, 2.0),
                (StatType::DodgeChance, 10.0),
                (StatType::Luck, 5.0),
                (StatType::LifeSteal, 5.0),
            ]),
            level_growth: BTreeMap::new(),
        }
    }
}

fn default_max_level() -> u32 {
    50
}

/// Load character config from a TOML file
pub fn load_character_config(path: &Path) -> Result<CharacterConfig, ConfigError> {
    let config: CharacterConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Load character config from a TOML string
pub fn parse_character_config(content: &str) -> Result<CharacterConfig, ConfigError> {
    let config: CharacterConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Get the shipped character config
pub fn default_character_config() -> CharacterConfig {
    let toml = include_str!("../../config/character.toml");
    parse_character_config(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to parse shipped character config");
        CharacterConfig::default()
    })
}
