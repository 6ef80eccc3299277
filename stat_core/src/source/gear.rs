//! GearSource - Stats from equipped items

use crate::source::StatSource;
use crate::types::EquipmentSlot;
use loot_core::item::GeneratedItem;
use loot_core::modifier::StatModifier;
use loot_core::types::SourceType;

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    pub item: &'a GeneratedItem,
}

impl<'a> GearSource<'a> {
    pub fn new(slot: EquipmentSlot, item: &'a GeneratedItem) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn source_type(&self) -> SourceType {
        self.item.kind.source_type()
    }

    /// Rolled stats, retagged to the item's source when they disagree
    fn modifiers(&self) -> Vec<StatModifier> {
        let source = self.source_type();
        self.item
            .stats
            .iter()
            .map(|m| if m.source() == source { *m } else { m.with_source(source) })
            .collect()
    }
}
