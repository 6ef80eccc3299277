//! Item templates - Designer-authored ranges that generation rolls from

use crate::types::{ElementType, EffectType, IncreaseType, ItemKind, Rarity, SkillType, StatType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Possible stat on an item with its roll bounds and pick weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub stat: StatType,
    pub min: f32,
    pub max: f32,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub increase_type: IncreaseType,
    /// Lowest rarity at which this stat can roll
    #[serde(default)]
    pub min_rarity: Rarity,
}

impl StatRange {
    pub fn new(stat: StatType, min: f32, max: f32, increase_type: IncreaseType) -> Self {
        StatRange {
            stat,
            min,
            max,
            weight: 1.0,
            increase_type,
            min_rarity: Rarity::Common,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_min_rarity(mut self, rarity: Rarity) -> Self {
        self.min_rarity = rarity;
        self
    }
}

/// Possible effect on an item with its roll bounds and pick weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRange {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect_type: EffectType,
    pub min: f32,
    pub max: f32,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub min_rarity: Rarity,
    /// Item kinds the effect is meaningful on; empty means any
    #[serde(default)]
    pub applicable_item_kinds: Vec<ItemKind>,
    /// Skill types the effect modifies; empty means any
    #[serde(default)]
    pub applicable_skill_types: Vec<SkillType>,
    /// Elements the effect modifies; empty means any
    #[serde(default)]
    pub applicable_element_types: Vec<ElementType>,
}

impl EffectRange {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        effect_type: EffectType,
        min: f32,
        max: f32,
    ) -> Self {
        EffectRange {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            effect_type,
            min,
            max,
            weight: 1.0,
            min_rarity: Rarity::Common,
            applicable_item_kinds: Vec::new(),
            applicable_skill_types: Vec::new(),
            applicable_element_types: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_skill_types(mut self, skills: Vec<SkillType>) -> Self {
        self.applicable_skill_types = skills;
        self
    }

    pub fn with_element_types(mut self, elements: Vec<ElementType>) -> Self {
        self.applicable_element_types = elements;
        self
    }
}

/// Blueprint for an item: identity plus the pools its attributes roll from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    /// Rarity used when generation does not request one
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub element: ElementType,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,

    #[serde(default)]
    pub possible_stats: Vec<StatRange>,
    #[serde(default = "default_min_stat_count")]
    pub min_stat_count: i32,
    #[serde(default = "default_max_stat_count")]
    pub max_stat_count: i32,

    #[serde(default)]
    pub possible_effects: Vec<EffectRange>,
    #[serde(default = "default_min_effect_count")]
    pub min_effect_count: i32,
    #[serde(default = "default_max_effect_count")]
    pub max_effect_count: i32,

    /// Extra picks granted per rarity, shared by stats and effects
    #[serde(default = "default_additional_counts")]
    pub additional_count_by_rarity: BTreeMap<Rarity, i32>,
}

impl ItemTemplate {
    /// Template with no attribute pools and default count bounds
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        ItemTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            rarity: Rarity::Common,
            element: ElementType::None,
            max_stack: default_max_stack(),
            possible_stats: Vec::new(),
            min_stat_count: default_min_stat_count(),
            max_stat_count: default_max_stat_count(),
            possible_effects: Vec::new(),
            min_effect_count: default_min_effect_count(),
            max_effect_count: default_max_effect_count(),
            additional_count_by_rarity: default_additional_counts(),
        }
    }

    pub fn with_stats(mut self, stats: Vec<StatRange>, min_count: i32, max_count: i32) -> Self {
        self.possible_stats = stats;
        self.min_stat_count = min_count;
        self.max_stat_count = max_count;
        self
    }

    pub fn with_effects(
        mut self,
        effects: Vec<EffectRange>,
        min_count: i32,
        max_count: i32,
    ) -> Self {
        self.possible_effects = effects;
        self.min_effect_count = min_count;
        self.max_effect_count = max_count;
        self
    }

    pub fn with_additional_counts(mut self, counts: BTreeMap<Rarity, i32>) -> Self {
        self.additional_count_by_rarity = counts;
        self
    }

    /// Extra picks for `rarity`, zero when the table has no entry
    pub fn additional_count(&self, rarity: Rarity) -> i32 {
        self.additional_count_by_rarity
            .get(&rarity)
            .copied()
            .unwrap_or(0)
    }

    /// Check designer data for values generation cannot use sensibly
    pub fn validate(&self) -> Result<(), String> {
        for range in &self.possible_stats {
            let name = format!("{:?}", range.stat);
            check_range(&self.id, &name, range.min, range.max, range.weight)?;
        }
        for range in &self.possible_effects {
            check_range(&self.id, &range.id, range.min, range.max, range.weight)?;
        }
        if self.min_stat_count < 0 || self.min_effect_count < 0 {
            return Err(format!("item '{}' has a negative minimum count", self.id));
        }
        Ok(())
    }
}

fn check_range(item: &str, name: &str, min: f32, max: f32, weight: f32) -> Result<(), String> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(format!("item '{}' range '{}' has invalid bounds {}..{}", item, name, min, max));
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("item '{}' range '{}' has invalid weight {}", item, name, weight));
    }
    Ok(())
}

fn default_weight() -> f32 {
    1.0
}

fn default_max_stack() -> u32 {
    1
}

fn default_min_stat_count() -> i32 {
    1
}

fn default_max_stat_count() -> i32 {
    4
}

fn default_min_effect_count() -> i32 {
    1
}

fn default_max_effect_count() -> i32 {
    3
}

/// Common 0, Uncommon 1, Rare 2, Epic 3, Legendary 4
pub fn default_additional_counts() -> BTreeMap<Rarity, i32> {
    Rarity::all()
        .iter()
        .map(|r| (*r, r.index() as i32))
        .collect()
}
