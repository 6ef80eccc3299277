//! loot_core - Rarity-driven item generation for game entities
//!
//! This library provides:
//! - StatModifier: Immutable additive/multiplicative stat adjustment
//! - RandomSource: Swappable, seedable uniform randomness
//! - Weighted sampling without replacement over template pools
//! - Attribute/ItemGenerator: Rarity-scaled stat and effect rolls
//! - DropResolver: Guaranteed and luck-scaled drops from drop tables

pub mod config;
pub mod database;
pub mod drop;
pub mod generator;
pub mod item;
pub mod modifier;
pub mod prelude;
pub mod rng;
pub mod sampler;
pub mod template;
pub mod types;

pub use database::{DropTableRegistry, ItemCatalog, ItemDatabase};
pub use drop::{DropEntry, DropResolver, DropTable, EntryRarity, RaritySource};
pub use generator::{generate_attributes, ItemGenerator};
pub use item::{GeneratedAttributes, GeneratedEffect, GeneratedItem};
pub use modifier::{ModifierError, StatModifier};
pub use rng::{RandomSource, SeededRandom, SequenceRandom, SystemRandom};
pub use template::{EffectRange, ItemTemplate, StatRange};
pub use types::*;
