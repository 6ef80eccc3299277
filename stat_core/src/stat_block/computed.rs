//! Current HP - A clamped resource tracked beside the MaxHp stat

use crate::stat_block::StatAggregator;
use loot_core::types::StatType;

impl StatAggregator {
    /// Get computed max HP
    pub fn max_hp(&self) -> f32 {
        self.get(StatType::MaxHp)
    }

    pub fn current_hp(&self) -> f32 {
        self.current_hp
    }

    /// Set current HP, clamped to `[0, max_hp]`
    pub fn set_current_hp(&mut self, value: f32) {
        self.current_hp = value.clamp(0.0, self.max_hp().max(0.0));
    }

    /// Current HP as a fraction of max, zero when max is not positive
    pub fn hp_ratio(&self) -> f32 {
        let max = self.max_hp();
        if max <= 0.0 {
            return 0.0;
        }
        self.current_hp / max
    }

    /// Re-derive current HP from a ratio of the present max
    pub fn restore_hp_ratio(&mut self, ratio: f32) {
        self.set_current_hp(self.max_hp() * ratio);
    }

    /// Run a mutation that may move MaxHp, keeping the HP bar's fill level
    ///
    /// An entity with no max HP beforehand comes out at full HP.
    pub fn preserving_hp_ratio<T>(&mut self, mutate: impl FnOnce(&mut Self) -> T) -> T {
        let ratio = if self.max_hp() > 0.0 { self.hp_ratio() } else { 1.0 };
        let result = mutate(self);
        self.restore_hp_ratio(ratio);
        result
    }

    /// Heal by amount, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.set_current_hp(self.current_hp + amount.max(0.0));
    }

    /// Lose HP, returning the amount actually lost
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current_hp;
        self.set_current_hp(before - amount.max(0.0));
        before - self.current_hp
    }

    /// Check if the entity is alive
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub(super) fn clamp_current_hp(&mut self) {
        self.current_hp = self.current_hp.clamp(0.0, self.max_hp().max(0.0));
    }
}
