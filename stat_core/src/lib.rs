//! stat_core - Layered stat aggregation for game entities
//!
//! This library provides:
//! - StatAggregator: Base values plus per-source modifiers, recomputed on mutation
//! - StatSource: Level, gear and buff modifier providers
//! - TimedModifiers: Tick-scheduled expiry of temporary modifiers
//! - Character: Equipment, buffs and HP-ratio preserving stat changes
//! - GameContext: Explicit owner of item data, drop tables, RNG and player

pub mod character;
pub mod config;
pub mod context;
pub mod prelude;
pub mod save;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, EquipError};
pub use context::GameContext;
pub use save::{CharacterSave, StatSaveData};
pub use source::{BuffPresets, BuffSource, GearSource, LevelSource, StatSource, TimedModifiers};
pub use stat_block::{StatAggregator, StatValue};
pub use types::{EquipmentSlot, StatChange};

// Re-export loot_core types for convenience
pub use loot_core::types::{IncreaseType, ItemKind, Rarity, SourceType, StatType};
pub use loot_core::{GeneratedItem, StatModifier};
