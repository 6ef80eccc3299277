//! Drop tables and drop resolution
//!
//! Resolution order:
//! 1. Guaranteed check: `uniform() < guaranteed_drop_rate` picks one entry by
//!    `drop_rate` weight and generates it. Luck never touches this check.
//! 2. Every entry in table order rolls `uniform() < drop_rate * luck`.
//! 3. Resolution stops as soon as `max_drops` items have dropped.

use crate::database::ItemCatalog;
use crate::generator::ItemGenerator;
use crate::item::GeneratedItem;
use crate::rng::RandomSource;
use crate::sampler::pick_index;
use crate::types::{EnemyKind, Rarity};
use serde::{Deserialize, Serialize};

/// One possible drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: String,
    /// Chance per kill, also the weight for guaranteed picks
    pub drop_rate: f32,
    /// Rarity the item is generated at
    #[serde(default)]
    pub min_rarity: Rarity,
    #[serde(default = "default_amount")]
    pub min_amount: u32,
    #[serde(default = "default_amount")]
    pub max_amount: u32,
}

impl DropEntry {
    pub fn new(item_id: impl Into<String>, drop_rate: f32) -> Self {
        DropEntry {
            item_id: item_id.into(),
            drop_rate,
            min_rarity: Rarity::Common,
            min_amount: 1,
            max_amount: 1,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.min_rarity = rarity;
        self
    }

    pub fn with_amount(mut self, min: u32, max: u32) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }
}

fn default_amount() -> u32 {
    1
}

/// Per-enemy drop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    pub enemy_kind: EnemyKind,
    #[serde(default)]
    pub entries: Vec<DropEntry>,
    #[serde(default = "default_guaranteed_rate")]
    pub guaranteed_drop_rate: f32,
    #[serde(default = "default_max_drops")]
    pub max_drops: u32,
}

fn default_guaranteed_rate() -> f32 {
    0.1
}

fn default_max_drops() -> u32 {
    3
}

impl DropTable {
    pub fn new(enemy_kind: impl Into<EnemyKind>) -> Self {
        DropTable {
            enemy_kind: enemy_kind.into(),
            entries: Vec::new(),
            guaranteed_drop_rate: default_guaranteed_rate(),
            max_drops: default_max_drops(),
        }
    }

    pub fn with_entry(mut self, entry: DropEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_guaranteed_rate(mut self, rate: f32) -> Self {
        self.guaranteed_drop_rate = rate;
        self
    }

    pub fn with_max_drops(mut self, max_drops: u32) -> Self {
        self.max_drops = max_drops;
        self
    }

    /// Check designer data for rates and amounts resolution cannot use
    pub fn validate(&self) -> Result<(), String> {
        if !self.guaranteed_drop_rate.is_finite() || self.guaranteed_drop_rate < 0.0 {
            return Err(format!(
                "drop table '{}' has invalid guaranteed rate {}",
                self.enemy_kind.0, self.guaranteed_drop_rate
            ));
        }
        for entry in &self.entries {
            if !entry.drop_rate.is_finite() || entry.drop_rate < 0.0 {
                return Err(format!(
                    "drop table '{}' entry '{}' has invalid rate {}",
                    self.enemy_kind.0, entry.item_id, entry.drop_rate
                ));
            }
            if entry.min_amount > entry.max_amount {
                return Err(format!(
                    "drop table '{}' entry '{}' has min amount {} above max {}",
                    self.enemy_kind.0, entry.item_id, entry.min_amount, entry.max_amount
                ));
            }
        }
        Ok(())
    }
}

/// Chooses the rarity a dropped entry is generated at
pub trait RaritySource {
    fn rarity_for(&mut self, entry: &DropEntry) -> Rarity;
}

/// Generates every entry at its configured rarity
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryRarity;

impl RaritySource for EntryRarity {
    fn rarity_for(&mut self, entry: &DropEntry) -> Rarity {
        entry.min_rarity
    }
}

impl<F: FnMut(&DropEntry) -> Rarity> RaritySource for F {
    fn rarity_for(&mut self, entry: &DropEntry) -> Rarity {
        self(entry)
    }
}

/// Turns drop tables into generated items
pub struct DropResolver<'a, C: ItemCatalog + ?Sized> {
    generator: ItemGenerator<'a, C>,
}

impl<'a, C: ItemCatalog + ?Sized> DropResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        DropResolver {
            generator: ItemGenerator::new(catalog),
        }
    }

    /// Roll `table` once, scaling per-entry rates by `luck_multiplier`
    ///
    /// Entries whose item id is unknown are logged and produce nothing. A
    /// guaranteed pick that lands on an unknown id yields no guaranteed drop
    /// and does not fall through to later entries.
    pub fn resolve<R, S>(
        &self,
        table: &DropTable,
        luck_multiplier: f32,
        rng: &mut R,
        rarity_source: &mut S,
    ) -> Vec<GeneratedItem>
    where
        R: RandomSource + ?Sized,
        S: RaritySource + ?Sized,
    {
        let mut drops = Vec::new();
        if table.entries.is_empty() || table.max_drops == 0 {
            tracing::warn!(enemy = %table.enemy_kind.0, "drop table has nothing to drop");
            return drops;
        }

        if rng.uniform() < table.guaranteed_drop_rate {
            if let Some(index) = pick_index(&table.entries, |e| e.drop_rate, rng) {
                let entry = &table.entries[index];
                if let Some(item) = self.roll_entry(entry, rng, rarity_source) {
                    tracing::debug!(item = %item.id, amount = item.amount, "guaranteed drop");
                    drops.push(item);
                }
            }
        }

        for entry in &table.entries {
            if drops.len() as u32 >= table.max_drops {
                break;
            }

            let adjusted_rate = entry.drop_rate * luck_multiplier;
            if rng.uniform() < adjusted_rate {
                if let Some(item) = self.roll_entry(entry, rng, rarity_source) {
                    tracing::debug!(item = %item.id, amount = item.amount, "generated drop");
                    drops.push(item);
                }
            }
        }

        drops
    }

    /// Resolve with every entry generated at its configured rarity
    pub fn resolve_default<R>(
        &self,
        table: &DropTable,
        luck_multiplier: f32,
        rng: &mut R,
    ) -> Vec<GeneratedItem>
    where
        R: RandomSource + ?Sized,
    {
        self.resolve(table, luck_multiplier, rng, &mut EntryRarity)
    }

    fn roll_entry<R, S>(
        &self,
        entry: &DropEntry,
        rng: &mut R,
        rarity_source: &mut S,
    ) -> Option<GeneratedItem>
    where
        R: RandomSource + ?Sized,
        S: RaritySource + ?Sized,
    {
        let rarity = rarity_source.rarity_for(entry);
        let mut item = self.generator.generate(&entry.item_id, Some(rarity), rng)?;
        item.amount = roll_amount(entry.min_amount, entry.max_amount, rng);
        Some(item)
    }
}

/// Uniform stack size in `[min, max]`
fn roll_amount<R: RandomSource + ?Sized>(min: u32, max: u32, rng: &mut R) -> u32 {
    let min = i32::try_from(min).unwrap_or(i32::MAX - 1);
    let max = i32::try_from(max).unwrap_or(i32::MAX - 1);
    let amount = rng.range_int(min, max.saturating_add(1));
    u32::try_from(amount).unwrap_or(0)
}
