//! BuffSource - Temporary buffs and debuffs

use crate::source::StatSource;
use loot_core::modifier::StatModifier;
use loot_core::types::{IncreaseType, SourceType, StatType};

/// Named, stackable, tick-limited buff or debuff
#[derive(Debug, Clone, PartialEq)]
pub struct BuffSource {
    /// Buff identifier
    pub buff_id: String,
    /// Display name
    pub name: String,
    /// Ticks the buff lasts once applied
    pub duration: u64,
    /// Tick at which the buff ends
    pub expires_at: u64,
    /// Current stack count
    pub stacks: u32,
    pub max_stacks: u32,
    /// Whether this is a debuff
    pub is_debuff: bool,
    /// Stat modifiers per stack
    modifiers: Vec<BuffModifier>,
}

/// A stat modifier from a buff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuffModifier {
    pub stat: StatType,
    pub kind: IncreaseType,
    /// Value per stack
    pub value_per_stack: f32,
}

impl BuffSource {
    pub fn new(
        buff_id: impl Into<String>,
        name: impl Into<String>,
        duration: u64,
        is_debuff: bool,
    ) -> Self {
        BuffSource {
            buff_id: buff_id.into(),
            name: name.into(),
            duration,
            expires_at: duration,
            stacks: 1,
            max_stacks: 1,
            is_debuff,
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier to this buff
    pub fn with_modifier(
        mut self,
        stat: StatType,
        kind: IncreaseType,
        value_per_stack: f32,
    ) -> Self {
        self.modifiers.push(BuffModifier {
            stat,
            kind,
            value_per_stack,
        });
        self
    }

    /// Set the number of stacks, raising the cap if needed
    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self.max_stacks = self.max_stacks.max(stacks);
        self
    }

    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks;
        self
    }

    /// Add a stack, up to `max_stacks`
    pub fn add_stack(&mut self) {
        self.stacks = (self.stacks + 1).min(self.max_stacks);
    }

    pub fn remove_stack(&mut self) {
        self.stacks = self.stacks.saturating_sub(1);
    }

    /// Restart the duration from `now`
    pub fn refresh(&mut self, now: u64) {
        self.expires_at = now.saturating_add(self.duration);
    }

    /// Check if the buff is active at tick `now`
    pub fn is_active(&self, now: u64) -> bool {
        now < self.expires_at && self.stacks > 0
    }

    pub fn buff_modifiers(&self) -> &[BuffModifier] {
        &self.modifiers
    }
}

impl StatSource for BuffSource {
    fn id(&self) -> &str {
        &self.buff_id
    }

    fn source_type(&self) -> SourceType {
        if self.is_debuff {
            SourceType::Debuff
        } else {
            SourceType::Buff
        }
    }

    fn modifiers(&self) -> Vec<StatModifier> {
        if self.stacks == 0 {
            return Vec::new();
        }

        let source = self.source_type();
        let stack_mult = self.stacks as f32;
        self.modifiers
            .iter()
            .filter_map(|m| {
                StatModifier::new(m.stat, source, m.kind, m.value_per_stack * stack_mult)
                    .map_err(|err| {
                        tracing::warn!(buff = %self.buff_id, %err, "skipping buff modifier")
                    })
                    .ok()
            })
            .collect()
    }
}

/// Common buff presets
pub struct BuffPresets;

impl BuffPresets {
    /// Create a generic damage buff
    pub fn damage_buff(name: &str, fraction: f32, duration: u64) -> BuffSource {
        BuffSource::new(
            format!("buff_{}", name.to_lowercase().replace(' ', "_")),
            name,
            duration,
            false,
        )
        .with_modifier(StatType::Damage, IncreaseType::Multiply, fraction)
    }

    /// +20% damage
    pub fn might(duration: u64) -> BuffSource {
        BuffPresets::damage_buff("Might", 0.2, duration)
    }

    /// +20% attack speed and +10% move speed
    pub fn haste(duration: u64) -> BuffSource {
        BuffSource::new("buff_haste", "Haste", duration, false)
            .with_modifier(StatType::AttackSpeed, IncreaseType::Multiply, 0.2)
            .with_modifier(StatType::MoveSpeed, IncreaseType::Multiply, 0.1)
    }

    /// -20% damage
    pub fn weakness(duration: u64) -> BuffSource {
        BuffSource::new("debuff_weakness", "Weakness", duration, true)
            .with_modifier(StatType::Damage, IncreaseType::Multiply, -0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_block::StatAggregator;

    #[test]
    fn test_buff_expiry() {
        let mut buff = BuffSource::new("test", "Test", 5, false);
        buff.refresh(10);
        assert!(buff.is_active(10));
        assert!(buff.is_active(14));
        assert!(!buff.is_active(15));
    }

    #[test]
    fn test_buff_stacks() {
        let buff = BuffSource::new("test", "Test", 5, false)
            .with_modifier(StatType::Damage, IncreaseType::Flat, 2.0)
            .with_stacks(3);

        let modifiers = buff.modifiers();
        assert_eq!(modifiers.len(), 1);
        // 2 per stack * 3 stacks
        assert!((modifiers[0].value() - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_stacks_capped() {
        let mut buff = BuffSource::new("test", "Test", 5, false).with_max_stacks(2);
        buff.add_stack();
        buff.add_stack();
        assert_eq!(buff.stacks, 2);

        buff.remove_stack();
        buff.remove_stack();
        assert!(buff.modifiers().is_empty());
        assert!(!buff.is_active(0));
    }

    #[test]
    fn test_debuff_source_type() {
        let weakness = BuffPresets::weakness(10);
        assert_eq!(weakness.source_type(), SourceType::Debuff);
        assert!(weakness.modifiers().iter().all(|m| m.source() == SourceType::Debuff));
        assert_eq!(BuffPresets::haste(10).source_type(), SourceType::Buff);
    }

    #[test]
    fn test_might_and_weakness_compound() {
        let mut stats = StatAggregator::with_base([(StatType::Damage, 10.0)]);
        BuffPresets::might(10).apply(&mut stats);
        BuffPresets::weakness(10).apply(&mut stats);
        // 10 * 1.2 * 0.8
        assert!((stats.get(StatType::Damage) - 9.6).abs() < 0.01);

        BuffPresets::might(10).revoke(&mut stats);
        assert!((stats.get(StatType::Damage) - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_damage_buff_id() {
        let buff = BuffPresets::damage_buff("Battle Cry", 0.3, 4);
        assert_eq!(buff.id(), "buff_battle_cry");
    }
}
