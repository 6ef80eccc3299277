//! TimedModifiers - Modifiers that expire at a scheduled tick

use crate::stat_block::StatAggregator;
use loot_core::modifier::StatModifier;

/// A modifier and the tick it stops applying
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedModifier {
    pub expires_at: u64,
    pub modifier: StatModifier,
}

/// Schedule of temporary modifiers, checked by the owner's update loop
///
/// Scheduling only records the expiry; the owner adds the modifier to its
/// aggregator. `expire` and `clear` remove them again.
#[derive(Debug, Clone, Default)]
pub struct TimedModifiers {
    entries: Vec<TimedModifier>,
}

impl TimedModifiers {
    pub fn new() -> Self {
        TimedModifiers {
            entries: Vec::new(),
        }
    }

    /// Record that `modifier` ends `duration` ticks after `now`
    pub fn schedule(&mut self, modifier: StatModifier, now: u64, duration: u64) {
        self.entries.push(TimedModifier {
            expires_at: now.saturating_add(duration),
            modifier,
        });
    }

    /// Remove every modifier due at or before `now` from `stats`
    pub fn expire(&mut self, now: u64, stats: &mut StatAggregator) -> Vec<StatModifier> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.expires_at <= now);
        self.entries = pending;

        for entry in &due {
            if !stats.remove_modifier(&entry.modifier) {
                tracing::debug!(modifier = %entry.modifier, "expired modifier was already gone");
            }
        }
        due.into_iter().map(|entry| entry.modifier).collect()
    }

    /// Remove every scheduled modifier from `stats`
    pub fn clear(&mut self, stats: &mut StatAggregator) {
        for entry in self.entries.drain(..) {
            stats.remove_modifier(&entry.modifier);
        }
    }

    /// Earliest pending expiry
    pub fn next_expiry(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.expires_at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedModifier> {
        self.entries.iter()
    }
}
