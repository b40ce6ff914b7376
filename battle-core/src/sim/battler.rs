use serde::{Deserialize, Serialize};

use crate::data::abilities::ABILITIES;
use crate::data::items::ITEMS;
use crate::data::moves::{MoveData, MOVES};
use crate::data::species::{SpeciesData, POKEDEX};
use crate::data::to_id;
use crate::data::types::Type;
use crate::error::LoadError;
use crate::sim::effects::EffectList;
use crate::sim::info::PartyMember;
use crate::sim::stats::{MajorStatus, Stat, StageStat, StatsSet};

/// Index into the battle's battler arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattlerId(pub usize);

#[derive(Clone, Copy, Debug)]
pub struct MoveSlot {
    pub data: &'static MoveData,
    pub pp: u8,
    pub max_pp: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveRecord {
    pub turn: u32,
    pub move_id: &'static str,
    pub succeeded: bool,
}

#[derive(Debug)]
pub struct Battler {
    pub id: BattlerId,
    pub bank: usize,
    pub party_index: usize,
    pub nickname: String,
    pub level: u8,
    pub ivs: [u8; 6],
    pub evs: [u8; 6],
    species: &'static SpeciesData,
    stats: StatsSet,
    types: [Type; 2],
    hp: u16,
    status: Option<MajorStatus>,
    status_count: u8,
    stages: [i8; 7],
    item: Option<&'static str>,
    ability: &'static str,
    moves: Vec<MoveSlot>,
    pub(crate) position: Option<usize>,
    pub(crate) effects: EffectList,
    pub(crate) switching: bool,
    pub(crate) item_consumed_this_turn: bool,
    pub(crate) move_history: Vec<MoveRecord>,
    pub(crate) last_damage_taken: u16,
    pub(crate) turns_on_field: u32,
    pub(crate) mega_evolved: bool,
    pub(crate) consumed_item: Option<&'static str>,
    pub(crate) ev_gained: [u8; 6],
    pub(crate) faced: Vec<BattlerId>,
    origin: PartyMember,
}

impl Battler {
    /// Validates every symbol on the roster record and builds the battler.
    pub fn from_member(
        member: &PartyMember,
        id: BattlerId,
        bank: usize,
        party_index: usize,
    ) -> Result<Self, LoadError> {
        let species_id = to_id(&member.species);
        let species = POKEDEX
            .get(species_id.as_str())
            .ok_or_else(|| LoadError::UnknownSpecies(member.species.clone()))?;
        if member.level == 0 || member.level > 100 {
            return Err(LoadError::InvalidLevel {
                species: member.species.clone(),
                level: member.level,
            });
        }
        if member.moves.is_empty() {
            return Err(LoadError::NoMoves(member.species.clone()));
        }
        if member.moves.len() > 4 {
            return Err(LoadError::TooManyMoves {
                species: member.species.clone(),
                count: member.moves.len(),
            });
        }
        let mut moves = Vec::with_capacity(member.moves.len());
        for (i, name) in member.moves.iter().enumerate() {
            let data = MOVES
                .get(to_id(name).as_str())
                .ok_or_else(|| LoadError::UnknownMove {
                    species: member.species.clone(),
                    id: name.clone(),
                })?;
            let pp = member.move_pp.get(i).copied().unwrap_or(data.pp).min(data.pp);
            moves.push(MoveSlot {
                data,
                pp,
                max_pp: data.pp,
            });
        }
        let item = match &member.item {
            Some(name) => Some(
                ITEMS
                    .get_entry(to_id(name).as_str())
                    .map(|(key, _)| *key)
                    .ok_or_else(|| LoadError::UnknownItem(name.clone()))?,
            ),
            None => None,
        };
        let ability = match &member.ability {
            Some(name) => ABILITIES
                .get_entry(to_id(name).as_str())
                .map(|(key, _)| *key)
                .ok_or_else(|| LoadError::UnknownAbility(name.clone()))?,
            None => species
                .abilities
                .first()
                .copied()
                .ok_or_else(|| LoadError::UnknownAbility(String::new()))?,
        };
        let stats = StatsSet::compute(
            &species.base_stats,
            member.level,
            member.evs,
            member.ivs,
            member.nature,
        );
        let hp = member.hp.unwrap_or(stats.hp).min(stats.hp);
        Ok(Self {
            id,
            bank,
            party_index,
            nickname: member
                .nickname
                .clone()
                .unwrap_or_else(|| species.name.to_string()),
            level: member.level,
            ivs: member.ivs,
            evs: member.evs,
            species,
            stats,
            types: species.types,
            hp,
            status: if hp == 0 { None } else { member.status },
            status_count: 0,
            stages: [0; 7],
            item,
            ability,
            moves,
            position: None,
            effects: EffectList::default(),
            switching: false,
            item_consumed_this_turn: false,
            move_history: Vec::new(),
            last_damage_taken: 0,
            turns_on_field: 0,
            mega_evolved: false,
            consumed_item: None,
            ev_gained: [0; 6],
            faced: Vec::new(),
            origin: member.clone(),
        })
    }

    pub fn species(&self) -> &'static SpeciesData {
        self.species
    }

    pub fn name(&self) -> &str {
        &self.nickname
    }

    pub fn stats(&self) -> &StatsSet {
        &self.stats
    }

    pub fn stat(&self, stat: Stat) -> u16 {
        self.stats.get(stat)
    }

    pub fn types(&self) -> [Type; 2] {
        self.types
    }

    pub fn has_type(&self, kind: Type) -> bool {
        self.types.contains(&kind)
    }

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn at_full_hp(&self) -> bool {
        self.hp == self.stats.hp
    }

    pub fn status(&self) -> Option<MajorStatus> {
        self.status
    }

    pub fn status_count(&self) -> u8 {
        self.status_count
    }

    pub fn stage(&self, stat: StageStat) -> i8 {
        self.stages[stat.index()]
    }

    pub fn item(&self) -> Option<&'static str> {
        self.item
    }

    pub fn ability(&self) -> &'static str {
        self.ability
    }

    pub fn moves(&self) -> &[MoveSlot] {
        &self.moves
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    pub fn effects(&self) -> &EffectList {
        &self.effects
    }

    /// Set once a switch out is queued, cleared when the battler leaves.
    pub fn is_switching(&self) -> bool {
        self.switching
    }

    pub fn item_consumed_this_turn(&self) -> bool {
        self.item_consumed_this_turn
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }

    pub fn last_damage_taken(&self) -> u16 {
        self.last_damage_taken
    }

    pub fn turns_on_field(&self) -> u32 {
        self.turns_on_field
    }

    pub fn is_mega(&self) -> bool {
        self.mega_evolved
    }

    pub fn origin(&self) -> &PartyMember {
        &self.origin
    }

    pub(crate) fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.stats.hp);
    }

    pub(crate) fn set_status(&mut self, status: Option<MajorStatus>, count: u8) {
        self.status = status;
        self.status_count = if status.is_some() { count } else { 0 };
    }

    pub(crate) fn set_status_count(&mut self, count: u8) {
        if self.status.is_some() {
            self.status_count = count;
        }
    }

    pub(crate) fn set_stage(&mut self, stat: StageStat, stage: i8) {
        self.stages[stat.index()] = stage;
    }

    pub(crate) fn reset_stages(&mut self) {
        self.stages = [0; 7];
    }

    pub(crate) fn set_item(&mut self, item: Option<&'static str>) {
        self.item = item;
    }

    pub(crate) fn set_ability(&mut self, ability: &'static str) {
        self.ability = ability;
    }

    pub(crate) fn deduct_pp(&mut self, index: usize) {
        if let Some(slot) = self.moves.get_mut(index) {
            slot.pp = slot.pp.saturating_sub(1);
        }
    }

    /// Switches species data (mega evolution). HP is carried over as is.
    pub(crate) fn set_form(&mut self, form: &'static SpeciesData) {
        self.species = form;
        self.types = form.types;
        let hp = self.stats.hp;
        self.stats = StatsSet::compute(
            &form.base_stats,
            self.level,
            self.evs,
            self.ivs,
            self.origin.nature,
        );
        self.stats.hp = hp;
    }

    /// Roster record carrying this battler's post-battle state.
    pub fn copy_back(&self, restore_consumed: bool) -> PartyMember {
        let mut member = self.origin.clone();
        member.hp = Some(self.hp);
        member.status = self.status;
        member.move_pp = self.moves.iter().map(|slot| slot.pp).collect();
        let item = match (self.item, self.consumed_item) {
            (None, Some(consumed)) if restore_consumed => Some(consumed),
            (item, _) => item,
        };
        member.item = item.map(str::to_string);
        for (i, gained) in self.ev_gained.iter().enumerate() {
            member.evs[i] = member.evs[i].saturating_add(*gained);
        }
        member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_party_member() {
        let member = PartyMember::new("Garchomp", 50, &["Earthquake", "Dragon Claw"]).with_item("Choice Band");
        let battler = Battler::from_member(&member, BattlerId(0), 0, 0).unwrap();
        assert_eq!(battler.species().id, "garchomp");
        assert_eq!(battler.item(), Some("choiceband"));
        assert_eq!(battler.ability(), "roughskin");
        assert_eq!(battler.hp(), battler.max_hp());
        assert_eq!(battler.moves()[1].data.id, "dragonclaw");
    }

    #[test]
    fn rejects_unknown_symbols() {
        let member = PartyMember::new("garchomp", 50, &["flyingpress"]);
        assert!(matches!(
            Battler::from_member(&member, BattlerId(0), 0, 0),
            Err(LoadError::UnknownMove { .. })
        ));
        let member = PartyMember::new("missingno", 50, &["tackle"]);
        assert_eq!(
            Battler::from_member(&member, BattlerId(0), 0, 0).unwrap_err(),
            LoadError::UnknownSpecies("missingno".into())
        );
    }

    #[test]
    fn hp_never_exceeds_max() {
        let member = PartyMember::new("pikachu", 50, &["thunderbolt"]);
        let mut battler = Battler::from_member(&member, BattlerId(0), 0, 0).unwrap();
        battler.set_hp(u16::MAX);
        assert_eq!(battler.hp(), battler.max_hp());
    }

    #[test]
    fn copy_back_restores_consumed_item_when_asked() {
        let member = PartyMember::new("pikachu", 50, &["thunderbolt"]).with_item("oranberry");
        let mut battler = Battler::from_member(&member, BattlerId(0), 0, 0).unwrap();
        battler.set_item(None);
        battler.consumed_item = Some("oranberry");
        battler.deduct_pp(0);
        assert_eq!(battler.copy_back(false).item, None);
        let restored = battler.copy_back(true);
        assert_eq!(restored.item.as_deref(), Some("oranberry"));
        assert_eq!(restored.move_pp, vec![14]);
    }
}
