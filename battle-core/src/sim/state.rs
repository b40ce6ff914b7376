use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::types::Type;
use crate::sim::battler::{Battler, BattlerId};
use crate::sim::effects::{Effect, EffectCategory, EffectList, EffectOwner, HookView};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

#[derive(Debug)]
pub struct SideState {
    pub bank: usize,
    pub name: String,
    /// Party order as given by the roster.
    pub party: Vec<BattlerId>,
    /// One entry per field slot.
    pub active: Vec<Option<BattlerId>>,
    pub(crate) effects: EffectList,
    pub(crate) bag: BTreeMap<&'static str, u16>,
    pub ai_level: Vec<u8>,
    pub(crate) mega_used: bool,
}

impl SideState {
    pub fn effects(&self) -> &EffectList {
        &self.effects
    }

    pub fn bag_count(&self, item: &str) -> u16 {
        self.bag.get(item).copied().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct FieldState {
    pub(crate) effects: EffectList,
}

/// Position of an effect during a sweep. The name re-locates the effect
/// after earlier hooks in the same sweep changed its list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EffectSlot {
    pub owner: EffectOwner,
    pub index: usize,
    pub name: &'static str,
    pub allow_fainted: bool,
}

/// Which effects a sweep visits.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepScope {
    /// Fainted battlers still holding a slot keep their effects in the sweep.
    pub include_fainted: bool,
    /// A benched battler whose effects join the sweep (switch-out reactions).
    pub extra: Option<BattlerId>,
}

impl SweepScope {
    pub fn with_fainted() -> Self {
        Self {
            include_fainted: true,
            extra: None,
        }
    }

    pub fn including(id: BattlerId) -> Self {
        Self {
            include_fainted: false,
            extra: Some(id),
        }
    }
}

/// Arena-style battle state. Battlers are addressed by [`BattlerId`].
#[derive(Debug)]
pub struct BattleState {
    pub battlers: Vec<Battler>,
    pub sides: [SideState; 2],
    pub field: FieldState,
    pub turn: u32,
    pub wild: bool,
    pub battle_size: usize,
}

impl BattleState {
    pub fn battler(&self, id: BattlerId) -> &Battler {
        &self.battlers[id.0]
    }

    pub(crate) fn battler_mut(&mut self, id: BattlerId) -> &mut Battler {
        &mut self.battlers[id.0]
    }

    /// Battlers holding a field slot, by (bank, slot). Includes fainted ones
    /// that have not been replaced yet.
    pub fn active_battlers(&self) -> Vec<BattlerId> {
        self.sides
            .iter()
            .flat_map(|side| side.active.iter().flatten().copied())
            .collect()
    }

    pub fn living_active(&self) -> Vec<BattlerId> {
        self.active_battlers()
            .into_iter()
            .filter(|id| !self.battler(*id).is_fainted())
            .collect()
    }

    pub fn foes_of(&self, id: BattlerId) -> Vec<BattlerId> {
        let bank = self.battler(id).bank;
        self.living_active()
            .into_iter()
            .filter(|other| self.battler(*other).bank != bank)
            .collect()
    }

    pub fn allies_of(&self, id: BattlerId) -> Vec<BattlerId> {
        let bank = self.battler(id).bank;
        self.living_active()
            .into_iter()
            .filter(|other| *other != id && self.battler(*other).bank == bank)
            .collect()
    }

    pub fn battler_at(&self, bank: usize, position: usize) -> Option<BattlerId> {
        self.sides.get(bank)?.active.get(position).copied().flatten()
    }

    /// Party members that could be sent in.
    pub fn bench(&self, bank: usize) -> Vec<BattlerId> {
        self.sides[bank]
            .party
            .iter()
            .copied()
            .filter(|id| {
                let battler = self.battler(*id);
                !battler.is_active() && !battler.is_fainted()
            })
            .collect()
    }

    pub fn able_to_fight(&self, bank: usize) -> bool {
        self.sides[bank]
            .party
            .iter()
            .any(|id| !self.battler(*id).is_fainted())
    }

    pub fn weather(&self) -> Option<Weather> {
        self.field
            .effects
            .iter()
            .find_map(|effect| match effect.category() {
                EffectCategory::Weather(weather) => Some(weather),
                _ => None,
            })
    }

    pub fn terrain(&self) -> Option<Terrain> {
        self.field
            .effects
            .iter()
            .find_map(|effect| match effect.category() {
                EffectCategory::Terrain(terrain) => Some(terrain),
                _ => None,
            })
    }

    pub fn trick_room(&self) -> bool {
        self.field.effects.contains("trickroom")
    }

    /// False while another battler's ability suppresses this one's.
    pub fn ability_active(&self, id: BattlerId) -> bool {
        self.living_active()
            .into_iter()
            .filter(|other| *other != id)
            .all(|other| {
                let view = HookView::new(self, EffectOwner::Battler(other));
                self.battler(other)
                    .effects
                    .iter()
                    .filter(|effect| effect.category() == EffectCategory::Ability)
                    .all(|effect| !effect.suppresses_abilities_of(view, id))
            })
    }

    pub fn has_active_ability(&self, id: BattlerId, ability: &str) -> bool {
        self.battler(id).ability() == ability && self.ability_active(id)
    }

    /// Grounded unless Flying-typed or an effect lifts the battler.
    pub fn is_grounded(&self, id: BattlerId) -> bool {
        self.effects()
            .find_map(|(view, effect)| effect.grounded_override(view, id))
            .unwrap_or_else(|| !self.battler(id).has_type(Type::Flying))
    }

    pub fn effect_list(&self, owner: EffectOwner) -> &EffectList {
        match owner {
            EffectOwner::Field => &self.field.effects,
            EffectOwner::Side(bank) => &self.sides[bank].effects,
            EffectOwner::Battler(id) => &self.battler(id).effects,
        }
    }

    pub(crate) fn effect_list_mut(&mut self, owner: EffectOwner) -> &mut EffectList {
        match owner {
            EffectOwner::Field => &mut self.field.effects,
            EffectOwner::Side(bank) => &mut self.sides[bank].effects,
            EffectOwner::Battler(id) => &mut self.battler_mut(id).effects,
        }
    }

    /// Effect positions in dispatch order: field, side 0, side 1, then
    /// battlers by (bank, slot), each list in attach order.
    pub fn effect_slots(&self, scope: SweepScope) -> Vec<EffectSlot> {
        let mut owners = vec![EffectOwner::Field, EffectOwner::Side(0), EffectOwner::Side(1)];
        owners.extend(self.active_battlers().into_iter().map(EffectOwner::Battler));
        if let Some(extra) = scope.extra {
            if !self.battler(extra).is_active() {
                owners.push(EffectOwner::Battler(extra));
            }
        }
        owners
            .into_iter()
            .flat_map(|owner| self.slots_of(owner, scope.include_fainted))
            .collect()
    }

    pub fn slots_of(&self, owner: EffectOwner, allow_fainted: bool) -> Vec<EffectSlot> {
        self.effect_list(owner)
            .iter()
            .enumerate()
            .map(|(index, effect)| EffectSlot {
                owner,
                index,
                name: effect.name(),
                allow_fainted,
            })
            .collect()
    }

    /// Current index of the slot's effect, if it is still attached.
    pub fn locate(&self, slot: &EffectSlot) -> Option<usize> {
        self.effect_list(slot.owner).position(slot.name)
    }

    pub fn effect_at(&self, slot: &EffectSlot) -> Option<&dyn Effect> {
        self.effect_list(slot.owner).get_index(slot.index)
    }

    /// Per-invocation guard: fainted holders are skipped and ability effects
    /// run only while not suppressed.
    pub fn hook_enabled(&self, slot: &EffectSlot) -> bool {
        let EffectOwner::Battler(id) = slot.owner else {
            return true;
        };
        if self.battler(id).is_fainted() && !slot.allow_fainted {
            return false;
        }
        match self.effect_at(slot).map(|effect| effect.category()) {
            Some(EffectCategory::Ability) => self.ability_active(id),
            Some(_) => true,
            None => false,
        }
    }

    /// Enabled effects in dispatch order, for read-only query hooks.
    pub fn effects(&self) -> impl Iterator<Item = (HookView<'_>, &dyn Effect)> + '_ {
        self.effect_slots(SweepScope::default())
            .into_iter()
            .filter(move |slot| self.hook_enabled(slot))
            .filter_map(move |slot| {
                self.effect_at(&slot)
                    .map(|effect| (HookView::new(self, slot.owner), effect))
            })
    }

    pub(crate) fn take_effect(&mut self, slot: &EffectSlot) -> Option<Box<dyn Effect>> {
        self.effect_list_mut(slot.owner).take(slot.index)
    }

    pub(crate) fn restore_effect(&mut self, slot: &EffectSlot, effect: Box<dyn Effect>) {
        self.effect_list_mut(slot.owner).restore(slot.index, effect);
    }
}
