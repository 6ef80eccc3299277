//! Persisted stat and character state

use crate::types::EquipmentSlot;
use loot_core::item::GeneratedItem;
use loot_core::modifier::StatModifier;
use loot_core::types::StatType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base stats plus modifiers from permanent sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSaveData {
    #[serde(default)]
    pub base_stats: BTreeMap<StatType, f32>,
    #[serde(default)]
    pub permanent_modifiers: Vec<StatModifier>,
}

/// Everything needed to rebuild a character between sessions
///
/// Equipment modifiers live in `stats.permanent_modifiers`; the items are
/// kept for identity and are not re-applied on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSave {
    pub id: String,
    pub level: u32,
    pub current_hp: f32,
    pub stats: StatSaveData,
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentSlot, GeneratedItem>,
}
