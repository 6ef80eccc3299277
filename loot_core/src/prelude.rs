//! Prelude module for convenient imports
//!
//! ```rust
//! use loot_core::prelude::*;
//! ```

pub use crate::database::{DropTableRegistry, ItemCatalog, ItemDatabase};
pub use crate::drop::{DropEntry, DropResolver, DropTable};
pub use crate::generator::ItemGenerator;
pub use crate::item::{GeneratedEffect, GeneratedItem};
pub use crate::modifier::StatModifier;
pub use crate::rng::{RandomSource, SeededRandom, SystemRandom};
pub use crate::template::{EffectRange, ItemTemplate, StatRange};
pub use crate::types::{IncreaseType, ItemKind, Rarity, SourceType, StatType};
