//! StatSource - Trait and implementations for modifier providers

mod buff;
mod gear;
mod level;
mod timed;

pub use buff::{BuffModifier, BuffPresets, BuffSource};
pub use gear::GearSource;
pub use level::LevelSource;
pub use timed::{TimedModifier, TimedModifiers};

use crate::stat_block::StatAggregator;
use loot_core::modifier::StatModifier;
use loot_core::types::SourceType;

/// Anything that contributes a set of modifiers under one source type
///
/// `revoke` removes exactly what `apply` added, so a source must yield the
/// same modifiers between the two calls.
pub trait StatSource {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Source type every modifier from this provider carries
    fn source_type(&self) -> SourceType;

    /// Modifiers this source currently contributes
    fn modifiers(&self) -> Vec<StatModifier>;

    /// Add this source's modifiers to the aggregator
    fn apply(&self, stats: &mut StatAggregator) {
        for modifier in self.modifiers() {
            stats.add_modifier(modifier);
        }
    }

    /// Remove this source's modifiers from the aggregator
    fn revoke(&self, stats: &mut StatAggregator) {
        for modifier in self.modifiers() {
            stats.remove_modifier(&modifier);
        }
    }
}
