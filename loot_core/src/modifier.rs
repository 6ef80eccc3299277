//! StatModifier - One additive or multiplicative adjustment to one stat

use crate::types::{IncreaseType, SourceType, StatType};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tolerance used when comparing modifier values
pub const MODIFIER_EPSILON: f32 = 1e-6;

/// Rejected modifier construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModifierError {
    #[error("Modifier value must be finite, got {0}")]
    NonFinite(f32),
}

/// Immutable stat adjustment tagged with its source
///
/// Equality is by value (all four fields, `value` within [`MODIFIER_EPSILON`])
/// so a modifier can be removed by rebuilding an equal one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawModifier")]
pub struct StatModifier {
    stat: StatType,
    source: SourceType,
    kind: IncreaseType,
    value: f32,
}

/// Unvalidated serialized shape
#[derive(Deserialize)]
struct RawModifier {
    stat: StatType,
    source: SourceType,
    #[serde(default)]
    kind: IncreaseType,
    value: f32,
}

impl TryFrom<RawModifier> for StatModifier {
    type Error = ModifierError;

    fn try_from(raw: RawModifier) -> Result<Self, Self::Error> {
        StatModifier::new(raw.stat, raw.source, raw.kind, raw.value)
    }
}

impl StatModifier {
    /// Create a modifier, rejecting NaN and infinite values
    pub fn new(
        stat: StatType,
        source: SourceType,
        kind: IncreaseType,
        value: f32,
    ) -> Result<Self, ModifierError> {
        if !value.is_finite() {
            return Err(ModifierError::NonFinite(value));
        }
        Ok(StatModifier {
            stat,
            source,
            kind,
            value,
        })
    }

    /// Flat modifier shorthand
    pub fn flat(stat: StatType, source: SourceType, value: f32) -> Result<Self, ModifierError> {
        Self::new(stat, source, IncreaseType::Flat, value)
    }

    /// Multiplicative modifier shorthand (0.2 = +20%)
    pub fn multiply(stat: StatType, source: SourceType, value: f32) -> Result<Self, ModifierError> {
        Self::new(stat, source, IncreaseType::Multiply, value)
    }

    pub fn stat(&self) -> StatType {
        self.stat
    }

    pub fn source(&self) -> SourceType {
        self.source
    }

    pub fn kind(&self) -> IncreaseType {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Same modifier scaled by `factor`, used for stacked buffs
    pub fn scaled(&self, factor: f32) -> Result<Self, ModifierError> {
        Self::new(self.stat, self.source, self.kind, self.value * factor)
    }

    /// Same modifier attributed to another source
    pub fn with_source(&self, source: SourceType) -> Self {
        StatModifier { source, ..*self }
    }
}

impl PartialEq for StatModifier {
    fn eq(&self, other: &Self) -> bool {
        self.stat == other.stat
            && self.source == other.source
            && self.kind == other.kind
            && (self.value - other.value).abs() < MODIFIER_EPSILON
    }
}

impl fmt::Display for StatModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            IncreaseType::Flat => "+",
            IncreaseType::Multiply => "x",
        };
        write!(f, "[{:?}] {:?} {} {}", self.source, self.stat, op, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            StatModifier::flat(StatType::Damage, SourceType::Weapon, f32::INFINITY),
            Err(ModifierError::NonFinite(f32::INFINITY))
        );
        assert!(StatModifier::flat(StatType::Damage, SourceType::Weapon, f32::NAN).is_err());
    }

    #[test]
    fn test_value_equality() {
        let a = StatModifier::flat(StatType::Damage, SourceType::Weapon, 10.0).unwrap();
        let b = StatModifier::flat(StatType::Damage, SourceType::Weapon, 10.0).unwrap();
        let c = StatModifier::flat(StatType::Damage, SourceType::Armor, 10.0).unwrap();
        let d = StatModifier::multiply(StatType::Damage, SourceType::Weapon, 10.0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_display() {
        let m = StatModifier::multiply(StatType::MoveSpeed, SourceType::Buff, 0.2).unwrap();
        assert_eq!(m.to_string(), "[Buff] MoveSpeed x 0.2");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: StatModifier = serde_json::from_str(
            r#"{"stat":"damage","source":"weapon","kind":"multiply","value":0.25}"#,
        )
        .unwrap();
        assert_eq!(ok.kind(), IncreaseType::Multiply);

        let bad = serde_json::from_str::<StatModifier>(
            r#"{"stat":"damage","source":"weapon","value":1e999}"#,
        );
        assert!(bad.is_err());
    }
}
