//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{StatAggregator, StatValue};
pub use crate::types::{EquipmentSlot, StatChange};

// Sources
pub use crate::source::{
    BuffPresets, BuffSource, GearSource, LevelSource, StatSource, TimedModifiers,
};

// Entities
pub use crate::character::{Character, EquipError};
pub use crate::context::GameContext;
pub use crate::save::{CharacterSave, StatSaveData};

// Config
pub use crate::config::{default_character_config, CharacterConfig};

// Re-exports from loot_core
pub use loot_core::rng::{RandomSource, SeededRandom, SystemRandom};
pub use loot_core::types::{EnemyKind, IncreaseType, ItemKind, Rarity, SourceType, StatType};
pub use loot_core::{GeneratedItem, StatModifier};
