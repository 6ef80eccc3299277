//! LevelSource - Stats from character level

use crate::source::StatSource;
use loot_core::modifier::StatModifier;
use loot_core::types::{SourceType, StatType};
use std::collections::BTreeMap;

/// Flat growth per level above 1
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSource {
    pub level: u32,
    /// Flat bonus gained per level, by stat
    pub growth: BTreeMap<StatType, f32>,
}

impl LevelSource {
    pub fn new(level: u32, growth: BTreeMap<StatType, f32>) -> Self {
        LevelSource { level, growth }
    }

    fn levels_gained(&self) -> f32 {
        self.level.saturating_sub(1) as f32
    }
}

impl StatSource for LevelSource {
    fn id(&self) -> &str {
        "level"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Level
    }

    fn modifiers(&self) -> Vec<StatModifier> {
        let levels = self.levels_gained();
        if levels == 0.0 {
            return Vec::new();
        }

        self.growth
            .iter()
            .filter(|(_, per_level)| **per_level != 0.0)
            .filter_map(|(stat, per_level)| {
                StatModifier::flat(*stat, SourceType::Level, per_level * levels)
                    .map_err(|err| tracing::warn!(?stat, %err, "skipping level growth"))
                    .ok()
            })
            .collect()
    }
}
