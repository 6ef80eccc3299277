//! Template and drop table lookup

use crate::drop::DropTable;
use crate::template::ItemTemplate;
use crate::types::EnemyKind;
use std::collections::HashMap;

/// Looks up item templates by id
pub trait ItemCatalog {
    fn template(&self, id: &str) -> Option<&ItemTemplate>;
}

impl ItemCatalog for HashMap<String, ItemTemplate> {
    fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.get(id)
    }
}

/// Read-only store of item templates
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    templates: HashMap<String, ItemTemplate>,
}

impl ItemDatabase {
    pub fn new() -> Self {
        ItemDatabase {
            templates: HashMap::new(),
        }
    }

    /// Register a template, replacing any with the same id
    pub fn insert(&mut self, template: ItemTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.templates.values()
    }
}

impl ItemCatalog for ItemDatabase {
    fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.get(id)
    }
}

impl FromIterator<ItemTemplate> for ItemDatabase {
    fn from_iter<I: IntoIterator<Item = ItemTemplate>>(iter: I) -> Self {
        let mut db = ItemDatabase::new();
        for template in iter {
            db.insert(template);
        }
        db
    }
}

/// Drop tables keyed by enemy category
#[derive(Debug, Clone, Default)]
pub struct DropTableRegistry {
    tables: HashMap<EnemyKind, DropTable>,
}

impl DropTableRegistry {
    pub fn new() -> Self {
        DropTableRegistry {
            tables: HashMap::new(),
        }
    }

    /// Register a table, replacing any for the same enemy kind
    pub fn insert(&mut self, table: DropTable) {
        self.tables.insert(table.enemy_kind.clone(), table);
    }

    pub fn get(&self, enemy: &EnemyKind) -> Option<&DropTable> {
        self.tables.get(enemy)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<DropTable> for DropTableRegistry {
    fn from_iter<I: IntoIterator<Item = DropTable>>(iter: I) -> Self {
        let mut registry = DropTableRegistry::new();
        for table in iter {
            registry.insert(table);
        }
        registry
    }
}
