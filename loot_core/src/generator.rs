//! Attribute generation - Rolls concrete stats and effects from a template
//!
//! For each pool (stats, then effects):
//! 1. `bonus = additional_count_by_rarity[rarity]` (0 if absent)
//! 2. `count = range_int(min_count, min(max_count + bonus + 1, pool_len + 1))`
//! 3. Draw `count` ranges by weight without replacement, so nothing repeats
//! 4. Roll each value in `[min, max)` and scale it by `1 + rarity_index * 0.2`
//!
//! Stat values are rounded by increase type (flat to whole numbers, multiply
//! to two decimals). Effect values are left as rolled.

use crate::database::ItemCatalog;
use crate::item::{GeneratedAttributes, GeneratedEffect, GeneratedItem};
use crate::modifier::StatModifier;
use crate::rng::RandomSource;
use crate::sampler::pick_without_replacement;
use crate::template::{EffectRange, ItemTemplate, StatRange};
use crate::types::{IncreaseType, Rarity, SourceType};

/// Per-tier value growth for rolled stats
pub const STAT_RARITY_STEP: f32 = 0.2;

/// Per-tier value growth for rolled effects
pub const EFFECT_RARITY_STEP: f32 = 0.2;

/// Roll all attributes of `template` at `rarity`
///
/// Empty pools produce empty results; generation never fails.
pub fn generate_attributes<R>(
    template: &ItemTemplate,
    rarity: Rarity,
    rng: &mut R,
) -> GeneratedAttributes
where
    R: RandomSource + ?Sized,
{
    let source = template.kind.source_type();
    GeneratedAttributes {
        stats: generate_stats(template, rarity, source, rng),
        effects: generate_effects(template, rarity, rng),
    }
}

/// Roll the stat modifiers of `template`, attributed to `source`
pub fn generate_stats<R>(
    template: &ItemTemplate,
    rarity: Rarity,
    source: SourceType,
    rng: &mut R,
) -> Vec<StatModifier>
where
    R: RandomSource + ?Sized,
{
    if template.possible_stats.is_empty() {
        tracing::warn!(item = %template.id, "no stat ranges defined");
        return Vec::new();
    }

    let count = roll_count(
        template.min_stat_count,
        template.max_stat_count,
        template.additional_count(rarity),
        template.possible_stats.len(),
        rng,
    );
    tracing::debug!(item = %template.id, ?rarity, count, "generating stats");

    let mut pool: Vec<&StatRange> = template
        .possible_stats
        .iter()
        .filter(|r| r.min_rarity <= rarity)
        .collect();

    let mut stats = Vec::new();
    for _ in 0..count {
        let Some(range) = pick_without_replacement(&mut pool, |r| r.weight, rng) else {
            break;
        };
        let value = roll_stat_value(range, rarity, rng);
        match StatModifier::new(range.stat, source, range.increase_type, value) {
            Ok(modifier) => {
                tracing::trace!(item = %template.id, %modifier, "rolled stat");
                stats.push(modifier);
            }
            Err(err) => {
                tracing::warn!(item = %template.id, stat = ?range.stat, %err, "dropping stat roll");
            }
        }
    }
    stats
}

/// Roll the effects of `template`
pub fn generate_effects<R>(
    template: &ItemTemplate,
    rarity: Rarity,
    rng: &mut R,
) -> Vec<GeneratedEffect>
where
    R: RandomSource + ?Sized,
{
    if template.possible_effects.is_empty() {
        tracing::debug!(item = %template.id, "no effect ranges defined");
        return Vec::new();
    }

    let count = roll_count(
        template.min_effect_count,
        template.max_effect_count,
        template.additional_count(rarity),
        template.possible_effects.len(),
        rng,
    );
    tracing::debug!(item = %template.id, ?rarity, count, "generating effects");

    let mut pool: Vec<&EffectRange> = template
        .possible_effects
        .iter()
        .filter(|r| r.min_rarity <= rarity)
        .collect();

    let mut effects = Vec::new();
    for _ in 0..count {
        let Some(range) = pick_without_replacement(&mut pool, |r| r.weight, rng) else {
            break;
        };
        let value = roll_effect_value(range, rarity, rng);
        tracing::trace!(item = %template.id, effect = %range.id, value, "rolled effect");
        effects.push(GeneratedEffect {
            id: range.id.clone(),
            name: range.name.clone(),
            effect_type: range.effect_type,
            value,
            applicable_item_kinds: range.applicable_item_kinds.clone(),
            applicable_skill_types: range.applicable_skill_types.clone(),
            applicable_element_types: range.applicable_element_types.clone(),
        });
    }
    effects
}

/// Number of picks: `[min, min(max + bonus, pool_len)]`
fn roll_count<R>(min: i32, max: i32, bonus: i32, pool_len: usize, rng: &mut R) -> i32
where
    R: RandomSource + ?Sized,
{
    let pool_bound = i32::try_from(pool_len).unwrap_or(i32::MAX - 1) + 1;
    let upper = max.saturating_add(bonus).saturating_add(1).min(pool_bound);
    rng.range_int(min, upper)
}

/// Roll a stat value, scale it by rarity and round it by increase type
pub fn roll_stat_value<R>(range: &StatRange, rarity: Rarity, rng: &mut R) -> f32
where
    R: RandomSource + ?Sized,
{
    let raw = rng.range(range.min, range.max);
    let rarity_multiplier = 1.0 + rarity.index() as f32 * STAT_RARITY_STEP;
    round_for(range.increase_type, raw * rarity_multiplier)
}

/// Roll an effect value scaled by rarity
pub fn roll_effect_value<R>(range: &EffectRange, rarity: Rarity, rng: &mut R) -> f32
where
    R: RandomSource + ?Sized,
{
    let raw = rng.range(range.min, range.max);
    let rarity_multiplier = 1.0 + rarity.index() as f32 * EFFECT_RARITY_STEP;
    raw * rarity_multiplier
}

/// Flat values read as whole numbers, multipliers as two-decimal percentages
///
/// Halfway cases round to even.
pub fn round_for(kind: IncreaseType, value: f32) -> f32 {
    match kind {
        IncreaseType::Flat => value.round_ties_even(),
        IncreaseType::Multiply => (value * 100.0).round_ties_even() / 100.0,
    }
}

/// Produces owned items from a template catalog
pub struct ItemGenerator<'a, C: ItemCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ItemCatalog + ?Sized> ItemGenerator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        ItemGenerator { catalog }
    }

    /// Generate the item `id` at `rarity`, or at the template's own rarity
    ///
    /// Unknown ids are logged and yield `None`.
    pub fn generate<R>(
        &self,
        id: &str,
        rarity: Option<Rarity>,
        rng: &mut R,
    ) -> Option<GeneratedItem>
    where
        R: RandomSource + ?Sized,
    {
        let Some(template) = self.catalog.template(id) else {
            tracing::warn!(item = id, "item not found in catalog");
            return None;
        };
        let rarity = rarity.unwrap_or(template.rarity);
        tracing::debug!(item = id, name = %template.name, ?rarity, "generating item");

        let attributes = generate_attributes(template, rarity, rng);
        Some(GeneratedItem::from_template(template, rarity, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ItemDatabase;
    use crate::rng::{SeededRandom, SequenceRandom};
    use crate::types::{EffectType, ItemKind, StatType};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sword() -> ItemTemplate {
        ItemTemplate::new("iron_sword", "Iron Sword", ItemKind::Weapon)
            .with_stats(
                vec![
                    StatRange::new(StatType::Damage, 5.0, 10.0, IncreaseType::Flat)
                        .with_weight(3.0),
                    StatRange::new(StatType::AttackSpeed, 0.05, 0.15, IncreaseType::Multiply),
                    StatRange::new(StatType::CriticalChance, 1.0, 5.0, IncreaseType::Flat),
                    StatRange::new(StatType::LifeSteal, 0.01, 0.03, IncreaseType::Multiply)
                        .with_min_rarity(Rarity::Epic),
                ],
                1,
                2,
            )
            .with_effects(
                vec![
                    EffectRange::new("sharp", "Sharpness", EffectType::DamageBonus, 0.1, 0.2),
                    EffectRange::new(
                        "swift",
                        "Swiftness",
                        EffectType::CooldownReduction,
                        0.05,
                        0.1,
                    ),
                ],
                0,
                1,
            )
    }

    #[test]
    fn test_rounding_contract() {
        assert!((round_for(IncreaseType::Flat, 7.6) - 8.0).abs() < f32::EPSILON);
        assert!((round_for(IncreaseType::Multiply, 0.1234) - 0.12).abs() < 1e-6);
        assert!((round_for(IncreaseType::Flat, 2.5) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_flat_roll_rounds_to_integer() {
        let range = StatRange::new(StatType::Damage, 7.6, 7.6, IncreaseType::Flat);
        let mut rng = SequenceRandom::new([0.3]);
        let value = roll_stat_value(&range, Rarity::Common, &mut rng);
        assert!((value - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_multiply_roll_rounds_to_two_decimals() {
        let range = StatRange::new(StatType::AttackSpeed, 0.1234, 0.1234, IncreaseType::Multiply);
        let mut rng = SequenceRandom::new([0.3]);
        let value = roll_stat_value(&range, Rarity::Common, &mut rng);
        assert!((value - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_rarity_scales_values() {
        // Legendary: 1 + 4 * 0.2 = 1.8
        let range = StatRange::new(StatType::Damage, 10.0, 10.0, IncreaseType::Flat);
        let mut rng = SequenceRandom::new([0.0]);
        assert!((roll_stat_value(&range, Rarity::Legendary, &mut rng) - 18.0).abs() < 0.001);

        let effect = EffectRange::new("e", "E", EffectType::AreaRadius, 0.25, 0.25);
        let value = roll_effect_value(&effect, Rarity::Rare, &mut rng);
        assert!((value - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_empty_template_yields_nothing() {
        let template = ItemTemplate::new("rock", "Rock", ItemKind::Material);
        let mut rng = SequenceRandom::new([0.5]);
        let attributes = generate_attributes(&template, Rarity::Legendary, &mut rng);
        assert!(attributes.is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_stats_use_item_source() {
        let mut rng = SeededRandom::new(1);
        let attributes = generate_attributes(&sword(), Rarity::Rare, &mut rng);
        assert!(!attributes.stats.is_empty());
        assert!(attributes.stats.iter().all(|m| m.source() == SourceType::Weapon));
    }

    #[test]
    fn test_min_rarity_excludes_ranges() {
        let mut rng = SeededRandom::new(5);
        for _ in 0..50 {
            let stats = generate_stats(&sword(), Rarity::Common, SourceType::Weapon, &mut rng);
            assert!(stats.iter().all(|m| m.stat() != StatType::LifeSteal));
        }
    }

    #[test]
    fn test_count_clamped_to_pool() {
        // max 2 + legendary bonus 4 exceeds the pool of 4
        let mut rng = SequenceRandom::new([0.999]);
        let stats = generate_stats(&sword(), Rarity::Legendary, SourceType::Weapon, &mut rng);
        assert_eq!(stats.len(), 4);
    }

    #[test]
    fn test_generator_unknown_item() {
        let db = ItemDatabase::new();
        let mut rng = SeededRandom::new(3);
        assert!(ItemGenerator::new(&db).generate("missing", None, &mut rng).is_none());
    }

    #[test]
    fn test_generator_produces_owned_item() {
        let mut db = ItemDatabase::new();
        db.insert(sword());
        let mut rng = SeededRandom::new(3);
        let generator = ItemGenerator::new(&db);

        let item = generator.generate("iron_sword", Some(Rarity::Epic), &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Epic);
        assert_eq!(item.amount, 1);
        assert_eq!(item.name, "Iron Sword");

        let default_rarity = generator.generate("iron_sword", None, &mut rng).unwrap();
        assert_eq!(default_rarity.rarity, Rarity::Common);
    }

    proptest! {
        #[test]
        fn prop_counts_bounded_and_unique(seed in any::<u64>(), rarity_idx in 0usize..5) {
            let rarity = Rarity::all()[rarity_idx];
            let template = sword();
            let mut rng = SeededRandom::new(seed);
            let attributes = generate_attributes(&template, rarity, &mut rng);

            let stat_cap = (template.max_stat_count + template.additional_count(rarity))
                .min(template.possible_stats.len() as i32);
            prop_assert!(attributes.stats.len() as i32 <= stat_cap);

            let effect_cap = (template.max_effect_count + template.additional_count(rarity))
                .min(template.possible_effects.len() as i32);
            prop_assert!(attributes.effects.len() as i32 <= effect_cap);

            let stats: HashSet<_> = attributes.stats.iter().map(|m| m.stat()).collect();
            prop_assert_eq!(stats.len(), attributes.stats.len());
            let effects: HashSet<_> = attributes.effects.iter().map(|e| e.id.clone()).collect();
            prop_assert_eq!(effects.len(), attributes.effects.len());
        }
    }
}
