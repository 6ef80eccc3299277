//! StatValue - Breakdown of one stat into base, flat and multiplier terms

use serde::{Deserialize, Serialize};

/// Represents one stat's contributing terms
///
/// Final value is calculated as:
/// `(base + flat) × Π(1 + multiplier)`
///
/// - `base`: The unmodified floor value
/// - `flat`: Sum of all flat modifiers
/// - `multipliers`: Every multiply modifier (as decimal, each compounds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f32,
    pub flat: f32,
    pub multipliers: Vec<f32>,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f32) -> Self {
        StatValue {
            base,
            flat: 0.0,
            multipliers: Vec::new(),
        }
    }

    /// Calculate final value: (base + flat) × Π(1 + multiplier)
    ///
    /// Flats always sum before any multiplier compounds.
    pub fn compute(&self) -> f32 {
        self.total_flat() * self.total_multiplier()
    }

    pub fn add_flat(&mut self, value: f32) {
        self.flat += value;
    }

    /// Add a multiplier (as decimal, e.g., 0.20 for +20%)
    pub fn add_multiplier(&mut self, value: f32) {
        self.multipliers.push(value);
    }

    /// Get the total flat value (base + flat additions)
    pub fn total_flat(&self) -> f32 {
        self.base + self.flat
    }

    /// Get the product of all multipliers
    pub fn total_multiplier(&self) -> f32 {
        self.multipliers.iter().map(|m| 1.0 + m).product()
    }
}
