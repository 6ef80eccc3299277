//! Item template loading

use super::ConfigError;
use crate::database::ItemDatabase;
use crate::template::ItemTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for item templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

impl ItemsConfig {
    fn into_database(self) -> Result<ItemDatabase, ConfigError> {
        for template in &self.items {
            template.validate().map_err(ConfigError::ValidationError)?;
        }
        Ok(self.items.into_iter().collect())
    }
}

/// Load item templates from a TOML file
pub fn load_item_templates(path: &Path) -> Result<ItemDatabase, ConfigError> {
    let config: ItemsConfig = super::load_toml(path)?;
    config.into_database()
}

/// Load item templates from a TOML string
pub fn parse_item_templates(content: &str) -> Result<ItemDatabase, ConfigError> {
    let config: ItemsConfig = super::parse_toml(content)?;
    config.into_database()
}

/// Get the shipped item templates
pub fn default_items() -> ItemDatabase {
    let toml = include_str!("../../config/items.toml");
    parse_item_templates(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to parse shipped item templates");
        ItemDatabase::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ItemCatalog;
    use crate::types::{AccessoryKind, IncreaseType, ItemKind, Rarity, StatType};

    #[test]
    fn test_parse_items() {
        let toml = r#"
[[items]]
id = "ruby_ring"
name = "Ruby Ring"
kind = { accessory = "ring" }
element = "fire"
max_stat_count = 2

[items.additional_count_by_rarity]
common = 0
legendary = 3

[[items.possible_stats]]
stat = "fire_resistance"
min = 5.0
max = 10.0
weight = 2.0

[[items.possible_stats]]
stat = "damage"
min = 0.05
max = 0.1
increase_type = "multiply"
min_rarity = "rare"

[[items.possible_effects]]
id = "ember"
name = "Ember"
effect_type = "elemental_power"
min = 0.1
max = 0.2
applicable_element_types = ["fire"]
"#;

        let db = parse_item_templates(toml).unwrap();
        let ring = db.template("ruby_ring").unwrap();
        assert_eq!(ring.kind, ItemKind::Accessory(AccessoryKind::Ring));
        assert_eq!(ring.min_stat_count, 1);
        assert_eq!(ring.max_stat_count, 2);
        assert_eq!(ring.additional_count(Rarity::Legendary), 3);
        assert_eq!(ring.additional_count(Rarity::Rare), 0);
        assert_eq!(ring.possible_stats[0].increase_type, IncreaseType::Flat);
        assert_eq!(ring.possible_stats[1].stat, StatType::Damage);
        assert_eq!(ring.possible_stats[1].min_rarity, Rarity::Rare);
        assert!((ring.possible_effects[0].weight - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_rejects_invalid_range() {
        let toml = r#"
[[items]]
id = "bad"
name = "Bad"
kind = "weapon"

[[items.possible_stats]]
stat = "damage"
min = 10.0
max = 1.0
"#;
        assert!(matches!(
            parse_item_templates(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_items_loads() {
        let db = default_items();
        assert!(!db.is_empty(), "Expected shipped item templates");
        for id in ["iron_sword", "leather_armor", "silver_ring", "jade_necklace", "health_potion"] {
            assert!(db.template(id).is_some(), "Missing item: {}", id);
        }
    }
}
