//! Shared vocabulary for stats, modifier sources, rarity and items

use serde::{Deserialize, Serialize};

/// Named numeric character attributes
///
/// Aggregation treats these as opaque keys; no stat has a hardcoded formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    MaxHp,
    Damage,
    Defense,
    MoveSpeed,
    AttackSpeed,
    AttackRange,
    AttackRadius,
    ExpCollectionRadius,
    HpRegenRate,
    ExpGainRate,
    GoldGainRate,
    CriticalChance,
    CriticalDamage,
    FireResistance,
    IceResistance,
    LightningResistance,
    PoisonResistance,
    StunResistance,
    SlowResistance,
    Luck,
    DodgeChance,
    ReflectDamage,
    LifeSteal,
}

impl StatType {
    /// Get all stat types
    pub fn all() -> &'static [StatType] {
        &[
            StatType::MaxHp,
            StatType::Damage,
            StatType::Defense,
            StatType::MoveSpeed,
            StatType::AttackSpeed,
            StatType::AttackRange,
            StatType::AttackRadius,
            StatType::ExpCollectionRadius,
            StatType::HpRegenRate,
            StatType::ExpGainRate,
            StatType::GoldGainRate,
            StatType::CriticalChance,
            StatType::CriticalDamage,
            StatType::FireResistance,
            StatType::IceResistance,
            StatType::LightningResistance,
            StatType::PoisonResistance,
            StatType::StunResistance,
            StatType::SlowResistance,
            StatType::Luck,
            StatType::DodgeChance,
            StatType::ReflectDamage,
            StatType::LifeSteal,
        ]
    }
}

/// Why a modifier exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Base,
    Level,
    Passive,
    Active,
    Weapon,
    Armor,
    Accessory,
    Special,
    Consumable,
    Buff,
    Debuff,
}

impl SourceType {
    /// Equipment-derived sources survive between sessions
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            SourceType::Weapon | SourceType::Armor | SourceType::Accessory | SourceType::Special
        )
    }

    /// Sources cleared on scene or session reset
    pub fn is_ephemeral(&self) -> bool {
        matches!(
            self,
            SourceType::Buff | SourceType::Debuff | SourceType::Consumable
        )
    }

    /// Sources cleared by a scene transition
    pub fn ephemeral() -> &'static [SourceType] {
        &[SourceType::Buff, SourceType::Debuff, SourceType::Consumable]
    }
}

/// How a modifier combines with the stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncreaseType {
    /// Added to the base before any multiplier
    #[default]
    Flat,
    /// Fractional bonus, 0.2 means +20%
    Multiply,
}

/// Item rarity tiers, ordered from weakest to strongest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Position in the tier order (Common = 0)
    pub fn index(&self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Get all rarities in ascending order
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }
}

/// Accessory sub-kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    Necklace,
    Ring,
}

/// Item family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory(AccessoryKind),
    Consumable,
    Material,
}

impl ItemKind {
    /// Modifier source used for stats rolled on this kind of item
    pub fn source_type(&self) -> SourceType {
        match self {
            ItemKind::Weapon => SourceType::Weapon,
            ItemKind::Armor => SourceType::Armor,
            ItemKind::Accessory(_) => SourceType::Accessory,
            ItemKind::Consumable => SourceType::Consumable,
            ItemKind::Material => SourceType::Special,
        }
    }

    /// Whether the item can be worn
    pub fn is_equipment(&self) -> bool {
        matches!(
            self,
            ItemKind::Weapon | ItemKind::Armor | ItemKind::Accessory(_)
        )
    }
}

/// Item effect categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    DamageBonus,
    CooldownReduction,
    ProjectileSpeed,
    ProjectileRange,
    HomingEffect,
    AreaRadius,
    AreaDuration,
    ElementalPower,
}

/// Skill delivery categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Projectile,
    Area,
    Passive,
}

/// Elemental affinity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    #[default]
    None,
    Dark,
    Water,
    Fire,
    Earth,
}

/// Identifier for an enemy category that owns a drop table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyKind(pub String);

impl From<&str> for EnemyKind {
    fn from(s: &str) -> Self {
        EnemyKind(s.to_string())
    }
}

impl From<String> for EnemyKind {
    fn from(s: String) -> Self {
        EnemyKind(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_order() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert_eq!(Rarity::Legendary.index(), 4);
    }

    #[test]
    fn test_item_kind_source() {
        assert_eq!(ItemKind::Weapon.source_type(), SourceType::Weapon);
        assert_eq!(
            ItemKind::Accessory(AccessoryKind::Ring).source_type(),
            SourceType::Accessory
        );
        assert!(!ItemKind::Material.is_equipment());
    }

    #[test]
    fn test_permanent_and_ephemeral_are_disjoint() {
        for source in [
            SourceType::Base,
            SourceType::Level,
            SourceType::Passive,
            SourceType::Active,
            SourceType::Weapon,
            SourceType::Armor,
            SourceType::Accessory,
            SourceType::Special,
            SourceType::Consumable,
            SourceType::Buff,
            SourceType::Debuff,
        ] {
            assert!(!(source.is_permanent() && source.is_ephemeral()));
        }
    }

    #[test]
    fn test_item_kind_serialization() {
        let json = serde_json::to_string(&ItemKind::Accessory(AccessoryKind::Ring)).unwrap();
        assert_eq!(json, r#"{"accessory":"ring"}"#);
        let json = serde_json::to_string(&ItemKind::Weapon).unwrap();
        assert_eq!(json, r#""weapon""#);
    }
}
