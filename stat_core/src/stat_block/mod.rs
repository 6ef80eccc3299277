//! StatAggregator - Layered stat values from base, level, gear and buffs

mod computed;
mod stat_value;

pub use stat_value::StatValue;

use crate::save::StatSaveData;
use crate::types::StatChange;
use loot_core::modifier::StatModifier;
use loot_core::types::{IncreaseType, SourceType, StatType};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Smallest difference that counts as a stat change
pub const CHANGE_EPSILON: f32 = 1e-4;

/// Owns base values and every active modifier for one entity
///
/// `get(stat)` always equals `(base + Σ flat) × Π(1 + multiply)` over the
/// modifiers currently held; every mutation recomputes the stats it touched
/// before returning. Missing stats and sources read as zero or empty.
#[derive(Debug, Clone, Default)]
pub struct StatAggregator {
    base: HashMap<StatType, f32>,
    active: BTreeMap<SourceType, Vec<StatModifier>>,
    current: HashMap<StatType, f32>,
    current_hp: f32,
    /// Latest unreported value per changed stat
    pending: BTreeMap<StatType, f32>,
}

impl StatAggregator {
    pub fn new() -> Self {
        StatAggregator {
            base: HashMap::new(),
            active: BTreeMap::new(),
            current: HashMap::new(),
            current_hp: 0.0,
            pending: BTreeMap::new(),
        }
    }

    /// Aggregator seeded with base values
    pub fn with_base(base: impl IntoIterator<Item = (StatType, f32)>) -> Self {
        let mut stats = StatAggregator::new();
        for (stat, value) in base {
            stats.set_base(stat, value);
        }
        stats
    }

    // === Base Values ===

    /// Set the unmodified floor value for a stat
    pub fn set_base(&mut self, stat: StatType, value: f32) {
        self.base.insert(stat, value);
        self.recompute(stat);
    }

    /// Base value for a stat, zero when never set
    pub fn base(&self, stat: StatType) -> f32 {
        self.base.get(&stat).copied().unwrap_or(0.0)
    }

    // === Modifiers ===

    /// Append a modifier under its source; duplicates stack
    pub fn add_modifier(&mut self, modifier: StatModifier) {
        let stat = modifier.stat();
        self.active.entry(modifier.source()).or_default().push(modifier);
        self.recompute(stat);
    }

    /// Remove the first value-equal modifier under its source
    ///
    /// Returns whether anything was removed.
    pub fn remove_modifier(&mut self, modifier: &StatModifier) -> bool {
        let removed = match self.active.get_mut(&modifier.source()) {
            Some(list) => match list.iter().position(|m| m == modifier) {
                Some(index) => {
                    list.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        };
        self.recompute(modifier.stat());
        removed
    }

    /// Remove the first modifier for `stat` held under `source`
    pub fn remove_first_for(&mut self, stat: StatType, source: SourceType) -> Option<StatModifier> {
        let list = self.active.get_mut(&source)?;
        let index = list.iter().position(|m| m.stat() == stat)?;
        let removed = list.remove(index);
        self.recompute(stat);
        Some(removed)
    }

    /// Clear every modifier tied to `source`, returning what was removed
    pub fn remove_by_source(&mut self, source: SourceType) -> Vec<StatModifier> {
        let removed = self.active.remove(&source).unwrap_or_default();
        let touched: BTreeSet<StatType> = removed.iter().map(|m| m.stat()).collect();
        for stat in touched {
            self.recompute(stat);
        }
        if !removed.is_empty() {
            tracing::debug!(?source, count = removed.len(), "removed modifiers by source");
        }
        removed
    }

    /// Drop buffs, debuffs and consumable effects
    pub fn clear_ephemeral(&mut self) {
        for source in SourceType::ephemeral() {
            self.remove_by_source(*source);
        }
    }

    /// Modifiers held under one source
    pub fn modifiers(&self, source: SourceType) -> &[StatModifier] {
        self.active.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every active modifier affecting `stat`
    pub fn modifiers_for(&self, stat: StatType) -> impl Iterator<Item = &StatModifier> {
        self.active
            .values()
            .flatten()
            .filter(move |m| m.stat() == stat)
    }

    /// Number of active modifiers across all sources
    pub fn modifier_count(&self) -> usize {
        self.active.values().map(Vec::len).sum()
    }

    // === Values ===

    /// Cached final value, zero for stats never computed
    pub fn get(&self, stat: StatType) -> f32 {
        self.current.get(&stat).copied().unwrap_or(0.0)
    }

    /// Base, flat and multiplier terms currently feeding `stat`
    pub fn breakdown(&self, stat: StatType) -> StatValue {
        let mut value = StatValue::with_base(self.base(stat));
        for modifier in self.modifiers_for(stat) {
            match modifier.kind() {
                IncreaseType::Flat => value.add_flat(modifier.value()),
                IncreaseType::Multiply => value.add_multiplier(modifier.value()),
            }
        }
        value
    }

    /// Recompute one stat from base and modifiers
    ///
    /// Queues a [`StatChange`] only when the value moved by more than
    /// [`CHANGE_EPSILON`]. Undrained changes coalesce to the latest value per
    /// stat, so the queue never holds more than one entry per stat type.
    pub fn recompute(&mut self, stat: StatType) {
        let value = self.breakdown(stat).compute();
        let previous = self.current.insert(stat, value).unwrap_or(0.0);
        if (value - previous).abs() > CHANGE_EPSILON {
            tracing::trace!(?stat, previous, value, "stat changed");
            self.pending.insert(stat, value);
        }
        if stat == StatType::MaxHp {
            self.clamp_current_hp();
        }
    }

    /// Recompute every stat type
    pub fn recompute_all(&mut self) {
        for stat in StatType::all() {
            self.recompute(*stat);
        }
    }

    /// Take the change notifications queued since the last drain, in stat order
    pub fn drain_changes(&mut self) -> Vec<StatChange> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(stat, value)| StatChange { stat, value })
            .collect()
    }

    /// Number of stats with an undrained change
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    /// Final value of every stat type
    pub fn snapshot(&self) -> BTreeMap<StatType, f32> {
        StatType::all()
            .iter()
            .map(|stat| (*stat, self.get(*stat)))
            .collect()
    }

    // === Persistence ===

    /// Re-seed from saved base values and permanent modifiers
    ///
    /// Drops every active modifier first. Current HP starts full.
    pub fn load_from_save_data(&mut self, data: &StatSaveData) {
        if data.base_stats.is_empty() {
            tracing::warn!("save data has no base stats");
        }

        self.base = data.base_stats.iter().map(|(k, v)| (*k, *v)).collect();
        self.active.clear();
        for modifier in &data.permanent_modifiers {
            if !modifier.source().is_permanent() {
                tracing::warn!(%modifier, "skipping non-permanent modifier in save data");
                continue;
            }
            self.active
                .entry(modifier.source())
                .or_default()
                .push(*modifier);
        }

        self.recompute_all();
        self.current_hp = self.max_hp();
        tracing::debug!(
            modifiers = self.modifier_count(),
            "loaded stats from save data"
        );
    }

    /// Base values plus modifiers from permanent sources only
    pub fn create_save_data(&self) -> StatSaveData {
        StatSaveData {
            base_stats: self.base.iter().map(|(k, v)| (*k, *v)).collect(),
            permanent_modifiers: self
                .active
                .iter()
                .filter(|(source, _)| source.is_permanent())
                .flat_map(|(_, list)| list.iter().copied())
                .collect(),
        }
    }
}
