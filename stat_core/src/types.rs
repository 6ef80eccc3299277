//! Core types specific to stat_core

use loot_core::types::{AccessoryKind, ItemKind, StatType};
use serde::{Deserialize, Serialize};

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Necklace,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Necklace,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
        ]
    }

    /// Slots an item of `kind` may occupy, empty for non-equipment
    pub fn for_kind(kind: ItemKind) -> &'static [EquipmentSlot] {
        match kind {
            ItemKind::Weapon => &[EquipmentSlot::Weapon],
            ItemKind::Armor => &[EquipmentSlot::Armor],
            ItemKind::Accessory(AccessoryKind::Necklace) => &[EquipmentSlot::Necklace],
            ItemKind::Accessory(AccessoryKind::Ring) => {
                &[EquipmentSlot::Ring1, EquipmentSlot::Ring2]
            }
            ItemKind::Consumable | ItemKind::Material => &[],
        }
    }

    /// Whether an item of `kind` fits this slot
    pub fn accepts(&self, kind: ItemKind) -> bool {
        EquipmentSlot::for_kind(kind).contains(self)
    }
}

/// Notification that a stat's cached value changed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatType,
    /// New final value
    pub value: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_fits_both_ring_slots() {
        let ring = ItemKind::Accessory(AccessoryKind::Ring);
        assert!(EquipmentSlot::Ring1.accepts(ring));
        assert!(EquipmentSlot::Ring2.accepts(ring));
        assert!(!EquipmentSlot::Necklace.accepts(ring));
    }

    #[test]
    fn test_non_equipment_has_no_slot() {
        for kind in [ItemKind::Consumable, ItemKind::Material] {
            assert_eq!(EquipmentSlot::for_kind(kind).is_empty(), !kind.is_equipment());
        }
        assert!(EquipmentSlot::all()
            .iter()
            .all(|slot| !slot.accepts(ItemKind::Consumable)));
    }
}
