use std::mem;

use super::{Effect, EffectCategory, EffectLifetime};

/// Ordered effects attached to one owner. At most one effect per exclusive
/// category; attaching a conflicting effect detaches the old one.
#[derive(Debug, Default)]
pub struct EffectList {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectList {
    /// Returns the effects the new one replaced.
    pub fn attach(&mut self, effect: Box<dyn Effect>) -> Vec<Box<dyn Effect>> {
        let category = effect.category();
        let name = effect.name();
        let mut replaced = Vec::new();
        let mut i = 0;
        while i < self.effects.len() {
            let existing = &self.effects[i];
            if existing.name() == name || existing.category().is_exclusive_with(category) {
                replaced.push(self.effects.remove(i));
            } else {
                i += 1;
            }
        }
        self.effects.push(effect);
        replaced
    }

    pub fn detach(&mut self, name: &str) -> Option<Box<dyn Effect>> {
        let index = self.effects.iter().position(|e| e.name() == name)?;
        Some(self.effects.remove(index))
    }

    pub fn detach_where(&mut self, predicate: impl Fn(EffectCategory) -> bool) -> Vec<Box<dyn Effect>> {
        let mut detached = Vec::new();
        let mut i = 0;
        while i < self.effects.len() {
            if predicate(self.effects[i].category()) {
                detached.push(self.effects.remove(i));
            } else {
                i += 1;
            }
        }
        detached
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Effect> {
        self.effects.iter().find(|e| e.name() == name).map(|e| e.as_ref())
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Effect>> {
        self.effects.iter_mut().find(|e| e.name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.effects.iter().position(|e| e.name() == name)
    }

    pub fn get_index(&self, index: usize) -> Option<&dyn Effect> {
        self.effects.get(index).map(|e| e.as_ref())
    }

    pub fn find_category(&self, category: EffectCategory) -> Option<&dyn Effect> {
        self.effects
            .iter()
            .find(|e| e.category() == category)
            .map(|e| e.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Effect> + '_ {
        self.effects.iter().map(|e| e.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Runs every effect's turn tick and detaches the expired ones.
    pub(crate) fn tick(&mut self) -> Vec<Box<dyn Effect>> {
        let mut expired = Vec::new();
        let mut i = 0;
        while i < self.effects.len() {
            if self.effects[i].on_turn_tick() == EffectLifetime::Expired {
                expired.push(self.effects.remove(i));
            } else {
                i += 1;
            }
        }
        expired
    }

    pub(crate) fn clear(&mut self) -> Vec<Box<dyn Effect>> {
        mem::take(&mut self.effects)
    }

    /// Lends the effect out for a mutable hook call, leaving a placeholder.
    pub(crate) fn take(&mut self, index: usize) -> Option<Box<dyn Effect>> {
        let slot = self.effects.get_mut(index)?;
        Some(mem::replace(slot, Box::new(Vacant)))
    }

    pub(crate) fn restore(&mut self, index: usize, effect: Box<dyn Effect>) {
        if let Some(slot) = self.effects.get_mut(index) {
            *slot = effect;
        }
    }
}

/// Stands in for an effect while its own hook runs.
#[derive(Debug)]
struct Vacant;

impl Effect for Vacant {
    fn name(&self) -> &'static str {
        "vacant"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::registry::REGISTRY;

    #[test]
    fn attaching_same_category_replaces() {
        let mut list = EffectList::default();
        list.attach(REGISTRY.item("leftovers").unwrap());
        let replaced = list.attach(REGISTRY.item("sitrusberry").unwrap());
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].name(), "leftovers");
        assert_eq!(list.names(), vec!["sitrusberry"]);
    }

    #[test]
    fn item_and_ability_coexist() {
        let mut list = EffectList::default();
        list.attach(REGISTRY.ability("intimidate").unwrap());
        list.attach(REGISTRY.item("leftovers").unwrap());
        assert_eq!(list.len(), 2);
        assert!(list.detach("intimidate").is_some());
        assert!(!list.contains("intimidate"));
    }

    #[test]
    fn take_and_restore_keep_order() {
        let mut list = EffectList::default();
        list.attach(REGISTRY.ability("intimidate").unwrap());
        list.attach(REGISTRY.item("leftovers").unwrap());
        let taken = list.take(0).unwrap();
        assert_eq!(list.names(), vec!["vacant", "leftovers"]);
        list.restore(0, taken);
        assert_eq!(list.names(), vec!["intimidate", "leftovers"]);
    }
}
