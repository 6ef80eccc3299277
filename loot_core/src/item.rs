//! Generated items - Owned, fully rolled instances

use crate::modifier::StatModifier;
use crate::template::ItemTemplate;
use crate::types::{ElementType, EffectType, IncreaseType, ItemKind, Rarity, SkillType, StatType};
use serde::{Deserialize, Serialize};

/// A rolled item effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEffect {
    pub id: String,
    pub name: String,
    pub effect_type: EffectType,
    /// Rarity-scaled, unrounded value
    pub value: f32,
    #[serde(default)]
    pub applicable_item_kinds: Vec<ItemKind>,
    #[serde(default)]
    pub applicable_skill_types: Vec<SkillType>,
    #[serde(default)]
    pub applicable_element_types: Vec<ElementType>,
}

impl GeneratedEffect {
    /// Whether this effect applies to an item kind, skill and element
    ///
    /// `None` arguments and empty restriction lists match anything.
    pub fn applies_to(
        &self,
        item_kind: Option<ItemKind>,
        skill: Option<SkillType>,
        element: Option<ElementType>,
    ) -> bool {
        fn allowed<T: PartialEq>(list: &[T], value: Option<T>) -> bool {
            match value {
                Some(v) => list.is_empty() || list.contains(&v),
                None => true,
            }
        }

        allowed(&self.applicable_item_kinds, item_kind)
            && allowed(&self.applicable_skill_types, skill)
            && allowed(&self.applicable_element_types, element.filter(|e| *e != ElementType::None))
    }
}

/// Stats and effects rolled for one template at one rarity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAttributes {
    pub stats: Vec<StatModifier>,
    pub effects: Vec<GeneratedEffect>,
}

impl GeneratedAttributes {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.effects.is_empty()
    }
}

/// A concrete item produced by generation
///
/// Never aliases its template; every generated item owns its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    /// Template id this item was rolled from
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    #[serde(default)]
    pub element: ElementType,
    pub max_stack: u32,
    /// Stack size
    pub amount: u32,
    #[serde(default)]
    pub stats: Vec<StatModifier>,
    #[serde(default)]
    pub effects: Vec<GeneratedEffect>,
}

impl GeneratedItem {
    /// Build an item from a template and its rolled attributes
    pub fn from_template(
        template: &ItemTemplate,
        rarity: Rarity,
        attributes: GeneratedAttributes,
    ) -> Self {
        GeneratedItem {
            id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            kind: template.kind,
            rarity,
            element: template.element,
            max_stack: template.max_stack,
            amount: 1,
            stats: attributes.stats,
            effects: attributes.effects,
        }
    }

    /// First modifier rolled for `stat`
    pub fn stat(&self, stat: StatType) -> Option<&StatModifier> {
        self.stats.iter().find(|m| m.stat() == stat)
    }

    /// Sum of rolled values for `stat` of the given increase type
    pub fn stat_total(&self, stat: StatType, kind: IncreaseType) -> f32 {
        self.stats
            .iter()
            .filter(|m| m.stat() == stat && m.kind() == kind)
            .map(|m| m.value())
            .sum()
    }

    pub fn effect(&self, id: &str) -> Option<&GeneratedEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn effects_of_type(
        &self,
        effect_type: EffectType,
    ) -> impl Iterator<Item = &GeneratedEffect> {
        self.effects.iter().filter(move |e| e.effect_type == effect_type)
    }

    /// Effects that modify the given skill type
    pub fn effects_for_skill(&self, skill: SkillType) -> impl Iterator<Item = &GeneratedEffect> {
        self.effects
            .iter()
            .filter(move |e| e.applicable_skill_types.contains(&skill))
    }

    /// Effects that modify the given element
    pub fn effects_for_element(
        &self,
        element: ElementType,
    ) -> impl Iterator<Item = &GeneratedEffect> {
        self.effects
            .iter()
            .filter(move |e| e.applicable_element_types.contains(&element))
    }

    pub fn remove_effect(&mut self, id: &str) {
        self.effects.retain(|e| e.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceType;

    fn effect() -> GeneratedEffect {
        GeneratedEffect {
            id: "fire_power".to_string(),
            name: "Fire Power".to_string(),
            effect_type: EffectType::ElementalPower,
            value: 0.3,
            applicable_item_kinds: vec![],
            applicable_skill_types: vec![SkillType::Projectile],
            applicable_element_types: vec![ElementType::Fire],
        }
    }

    #[test]
    fn test_effect_applies_to() {
        let e = effect();
        assert!(e.applies_to(None, None, None));
        assert!(e.applies_to(
            Some(ItemKind::Weapon),
            Some(SkillType::Projectile),
            Some(ElementType::Fire)
        ));
        assert!(!e.applies_to(None, Some(SkillType::Area), None));
        assert!(!e.applies_to(None, None, Some(ElementType::Water)));
        assert!(e.applies_to(None, None, Some(ElementType::None)));
    }

    #[test]
    fn test_item_queries() {
        let template = ItemTemplate::new("staff", "Staff", ItemKind::Weapon);
        let attributes = GeneratedAttributes {
            stats: vec![
                StatModifier::flat(StatType::Damage, SourceType::Weapon, 4.0).unwrap(),
                StatModifier::multiply(StatType::Damage, SourceType::Weapon, 0.1).unwrap(),
            ],
            effects: vec![effect()],
        };
        let mut item = GeneratedItem::from_template(&template, Rarity::Rare, attributes);

        assert!((item.stat_total(StatType::Damage, IncreaseType::Flat) - 4.0).abs() < 0.001);
        assert_eq!(item.effects_for_skill(SkillType::Projectile).count(), 1);
        assert_eq!(item.effects_for_element(ElementType::Dark).count(), 0);
        assert_eq!(item.effects_of_type(EffectType::ElementalPower).count(), 1);

        item.remove_effect("fire_power");
        assert!(item.effect("fire_power").is_none());
    }
}
