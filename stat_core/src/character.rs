//! Character - One entity's stats, equipment and timed effects

use crate::config::CharacterConfig;
use crate::save::CharacterSave;
use crate::source::{BuffSource, GearSource, LevelSource, StatSource, TimedModifiers};
use crate::stat_block::StatAggregator;
use crate::types::{EquipmentSlot, StatChange};
use loot_core::item::GeneratedItem;
use loot_core::modifier::StatModifier;
use loot_core::types::{ItemKind, StatType};
use std::collections::BTreeMap;
use thiserror::Error;

/// Rejected equip attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquipError {
    #[error("{item} is not equipment")]
    NotEquipment { item: String },
    #[error("{item} does not fit the {slot:?} slot")]
    WrongSlot { item: String, slot: EquipmentSlot },
}

/// A player or monster: one owned aggregator plus everything feeding it
///
/// Every operation that can move MaxHp keeps the HP bar's fill ratio.
#[derive(Debug, Clone)]
pub struct Character {
    /// Unique identifier for this entity
    pub id: String,
    stats: StatAggregator,
    level: u32,
    max_level: u32,
    level_growth: BTreeMap<StatType, f32>,
    equipment: BTreeMap<EquipmentSlot, GeneratedItem>,
    buffs: Vec<BuffSource>,
    timed: TimedModifiers,
}

impl Character {
    /// Level 1 character at full HP with the configured base stats
    pub fn new(id: impl Into<String>, config: &CharacterConfig) -> Self {
        let mut stats = StatAggregator::new();
        stats.load_from_save_data(&config.initial_save_data());
        Character {
            id: id.into(),
            stats,
            level: 1,
            max_level: config.max_level,
            level_growth: config.level_growth.clone(),
            equipment: BTreeMap::new(),
            buffs: Vec::new(),
            timed: TimedModifiers::new(),
        }
    }

    pub fn stats(&self) -> &StatAggregator {
        &self.stats
    }

    /// Direct aggregator access for hosts with their own sources
    pub fn stats_mut(&mut self) -> &mut StatAggregator {
        &mut self.stats
    }

    /// Take the stat changes queued since the last drain
    pub fn drain_changes(&mut self) -> Vec<StatChange> {
        self.stats.drain_changes()
    }

    /// Final value of one stat
    pub fn stat(&self, stat: StatType) -> f32 {
        self.stats.get(stat)
    }

    // === Level ===

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Move to `level`, clamped to `[1, max_level]`
    pub fn set_level(&mut self, level: u32) {
        let level = level.clamp(1, self.max_level.max(1));
        let old = LevelSource::new(self.level, self.level_growth.clone());
        let new = LevelSource::new(level, self.level_growth.clone());
        self.stats.preserving_hp_ratio(|stats| {
            old.revoke(stats);
            new.apply(stats);
        });
        tracing::debug!(id = %self.id, from = self.level, to = level, "level changed");
        self.level = level;
    }

    // === Equipment ===

    /// Equip an item to a slot, returning whatever it replaced
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: GeneratedItem,
    ) -> Result<Option<GeneratedItem>, EquipError> {
        if !item.kind.is_equipment() {
            return Err(EquipError::NotEquipment { item: item.id });
        }
        if !slot.accepts(item.kind) {
            return Err(EquipError::WrongSlot { item: item.id, slot });
        }

        let previous = self.equipment.remove(&slot);
        self.stats.preserving_hp_ratio(|stats| {
            if let Some(old) = &previous {
                GearSource::new(slot, old).revoke(stats);
            }
            GearSource::new(slot, &item).apply(stats);
        });
        tracing::debug!(id = %self.id, ?slot, item = %item.id, "equipped");
        self.equipment.insert(slot, item);
        Ok(previous)
    }

    /// Equip into the first free slot for the item's kind, or the first slot
    pub fn equip_any(&mut self, item: GeneratedItem) -> Result<Option<GeneratedItem>, EquipError> {
        let slots = EquipmentSlot::for_kind(item.kind);
        let slot = slots
            .iter()
            .find(|slot| !self.equipment.contains_key(*slot))
            .or_else(|| slots.first())
            .copied();
        match slot {
            Some(slot) => self.equip(slot, item),
            None => Err(EquipError::NotEquipment { item: item.id }),
        }
    }

    /// Unequip an item from a slot, returning it if present
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<GeneratedItem> {
        let item = self.equipment.remove(&slot)?;
        self.stats.preserving_hp_ratio(|stats| {
            GearSource::new(slot, &item).revoke(stats);
        });
        tracing::debug!(id = %self.id, ?slot, item = %item.id, "unequipped");
        Some(item)
    }

    /// Get a reference to the item equipped in a slot
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&GeneratedItem> {
        self.equipment.get(&slot)
    }

    /// Get all equipped items
    pub fn all_equipped(&self) -> impl Iterator<Item = (&EquipmentSlot, &GeneratedItem)> {
        self.equipment.iter()
    }

    // === Buffs and Timed Effects ===

    /// Apply a buff at tick `now`
    ///
    /// Re-applying an active buff adds a stack and restarts its duration.
    pub fn apply_buff(&mut self, mut buff: BuffSource, now: u64) {
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.buff_id == buff.buff_id) {
            self.stats.preserving_hp_ratio(|stats| {
                existing.revoke(stats);
                existing.add_stack();
                existing.duration = buff.duration;
                existing.refresh(now);
                existing.apply(stats);
            });
            return;
        }

        buff.refresh(now);
        self.stats.preserving_hp_ratio(|stats| buff.apply(stats));
        tracing::debug!(
            id = %self.id,
            buff = %buff.buff_id,
            expires_at = buff.expires_at,
            "buff applied"
        );
        self.buffs.push(buff);
    }

    /// Remove a buff by ID
    pub fn remove_buff(&mut self, buff_id: &str) -> Option<BuffSource> {
        let index = self.buffs.iter().position(|b| b.buff_id == buff_id)?;
        let buff = self.buffs.remove(index);
        self.stats.preserving_hp_ratio(|stats| buff.revoke(stats));
        Some(buff)
    }

    /// Get all active buffs
    pub fn active_buffs(&self) -> &[BuffSource] {
        &self.buffs
    }

    /// Apply a modifier that ends `duration` ticks after `now`
    pub fn add_temporary(&mut self, modifier: StatModifier, now: u64, duration: u64) {
        self.stats.preserving_hp_ratio(|stats| stats.add_modifier(modifier));
        self.timed.schedule(modifier, now, duration);
    }

    /// Use a consumable, applying its rolled stats for `duration` ticks
    ///
    /// Returns false for anything that is not a consumable.
    pub fn consume(&mut self, item: &GeneratedItem, now: u64, duration: u64) -> bool {
        if item.kind != ItemKind::Consumable {
            return false;
        }
        for modifier in &item.stats {
            self.add_temporary(modifier.with_source(item.kind.source_type()), now, duration);
        }
        true
    }

    pub fn timed_modifiers(&self) -> &TimedModifiers {
        &self.timed
    }

    /// Expire buffs and timed modifiers due at tick `now`
    pub fn tick(&mut self, now: u64) {
        let (active, expired): (Vec<_>, Vec<_>) =
            self.buffs.drain(..).partition(|b| b.is_active(now));
        self.buffs = active;

        let timed = &mut self.timed;
        self.stats.preserving_hp_ratio(|stats| {
            for buff in &expired {
                buff.revoke(stats);
            }
            timed.expire(now, stats);
        });
        for buff in &expired {
            tracing::debug!(id = %self.id, buff = %buff.buff_id, "buff expired");
        }
    }

    /// Drop every buff, debuff, consumable effect and scheduled modifier
    pub fn on_scene_transition(&mut self) {
        self.buffs.clear();
        let timed = &mut self.timed;
        self.stats.preserving_hp_ratio(|stats| {
            timed.clear(stats);
            stats.clear_ephemeral();
        });
    }

    // === Health ===

    /// Lose HP, returning the amount actually lost
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.stats.take_damage(amount)
    }

    pub fn heal(&mut self, amount: f32) {
        self.stats.heal(amount);
    }

    pub fn current_hp(&self) -> f32 {
        self.stats.current_hp()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    // === Persistence ===

    /// Snapshot of level, base stats, permanent modifiers and equipment
    pub fn save(&self) -> CharacterSave {
        CharacterSave {
            id: self.id.clone(),
            level: self.level,
            current_hp: self.stats.current_hp(),
            stats: self.stats.create_save_data(),
            equipment: self.equipment.clone(),
        }
    }

    /// Rebuild a character from a save
    ///
    /// Equipment modifiers come from the saved permanent modifiers; level
    /// growth is re-derived from `config`.
    pub fn load(save: CharacterSave, config: &CharacterConfig) -> Self {
        let mut character = Character::new(save.id, config);
        character.stats.load_from_save_data(&save.stats);
        character.equipment = save.equipment;
        character.set_level(save.level);
        character.stats.set_current_hp(save.current_hp);
        character
    }
}
