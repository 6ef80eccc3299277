//! Drop table loading

use super::ConfigError;
use crate::database::DropTableRegistry;
use crate::drop::DropTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for drop tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropTablesConfig {
    #[serde(default)]
    pub drop_tables: Vec<DropTable>,
}

impl DropTablesConfig {
    fn into_registry(self) -> Result<DropTableRegistry, ConfigError> {
        for table in &self.drop_tables {
            table.validate().map_err(ConfigError::ValidationError)?;
        }
        Ok(self.drop_tables.into_iter().collect())
    }
}

/// Load drop tables from a TOML file
pub fn load_drop_tables(path: &Path) -> Result<DropTableRegistry, ConfigError> {
    let config: DropTablesConfig = super::load_toml(path)?;
    config.into_registry()
}

/// Load drop tables from a TOML string
pub fn parse_drop_tables(content: &str) -> Result<DropTableRegistry, ConfigError> {
    let config: DropTablesConfig = super::parse_toml(content)?;
    config.into_registry()
}

/// Get the shipped drop tables
pub fn default_drop_tables() -> DropTableRegistry {
    let toml = include_str!("../../config/drop_tables.toml");
    parse_drop_tables(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to parse shipped drop tables");
        DropTableRegistry::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_items;
    use crate::database::ItemCatalog;
    use crate::types::{EnemyKind, Rarity};

    #[test]
    fn test_parse_drop_tables() {
        let toml = r#"
[[drop_tables]]
enemy_kind = "skeleton"
guaranteed_drop_rate = 0.25
max_drops = 2

[[drop_tables.entries]]
item_id = "bone"
drop_rate = 0.5
max_amount = 3

[[drop_tables.entries]]
item_id = "iron_sword"
drop_rate = 0.05
min_rarity = "uncommon"
"#;

        let registry = parse_drop_tables(toml).unwrap();
        let table = registry.get(&EnemyKind::from("skeleton")).unwrap();
        assert_eq!(table.max_drops, 2);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].min_amount, 1);
        assert_eq!(table.entries[0].max_amount, 3);
        assert_eq!(table.entries[1].min_rarity, Rarity::Uncommon);
    }

    #[test]
    fn test_defaults_apply() {
        let toml = r#"
[[drop_tables]]
enemy_kind = "rat"
"#;
        let registry = parse_drop_tables(toml).unwrap();
        let table = registry.get(&EnemyKind::from("rat")).unwrap();
        assert!((table.guaranteed_drop_rate - 0.1).abs() < f32::EPSILON);
        assert_eq!(table.max_drops, 3);
    }

    #[test]
    fn test_parse_rejects_bad_amounts() {
        let toml = r#"
[[drop_tables]]
enemy_kind = "rat"

[[drop_tables.entries]]
item_id = "cheese"
drop_rate = 0.5
min_amount = 4
max_amount = 2
"#;
        assert!(matches!(
            parse_drop_tables(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_tables_reference_default_items() {
        let registry = default_drop_tables();
        assert!(!registry.is_empty());
        let items = default_items();
        for enemy in ["slime", "goblin", "orc_chief"] {
            let table = registry.get(&EnemyKind::from(enemy)).unwrap();
            for entry in &table.entries {
                assert!(
                    items.template(&entry.item_id).is_some(),
                    "Unknown item: {}",
                    entry.item_id
                );
            }
        }
    }
}
