use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::stats::{MajorStatus, Nature};

/// Persistent roster record. Battlers are built from it and copy back onto it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    pub species: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default = "default_ivs")]
    pub ivs: [u8; 6],
    #[serde(default)]
    pub evs: [u8; 6],
    pub moves: Vec<String>,
    /// Remaining PP per move; empty means full.
    #[serde(default)]
    pub move_pp: Vec<u8>,
    /// Defaults to the species' first ability.
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    /// `None` means full health.
    #[serde(default)]
    pub hp: Option<u16>,
    #[serde(default)]
    pub status: Option<MajorStatus>,
}

fn default_level() -> u8 {
    50
}

fn default_ivs() -> [u8; 6] {
    [31; 6]
}

impl PartyMember {
    pub fn new(species: &str, level: u8, moves: &[&str]) -> Self {
        Self {
            species: species.to_string(),
            nickname: None,
            level,
            nature: Nature::default(),
            ivs: default_ivs(),
            evs: [0; 6],
            moves: moves.iter().map(|m| m.to_string()).collect(),
            move_pp: Vec::new(),
            ability: None,
            item: None,
            hp: None,
            status: None,
        }
    }

    pub fn with_item(mut self, item: &str) -> Self {
        self.item = Some(item.to_string());
        self
    }

    pub fn with_ability(mut self, ability: &str) -> Self {
        self.ability = Some(ability.to_string());
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleSide {
    pub name: String,
    pub party: Vec<PartyMember>,
    /// AI difficulty per active slot, forwarded to action providers.
    #[serde(default)]
    pub ai_level: Vec<u8>,
    #[serde(default)]
    pub bag: BTreeMap<String, u16>,
}

/// Static description of an encounter. Never mutated by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleInfo {
    pub sides: [BattleSide; 2],
    #[serde(default = "default_battle_size")]
    pub battle_size: usize,
    /// Side 1 is a single wild creature.
    #[serde(default)]
    pub wild: bool,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
}

fn default_battle_size() -> usize {
    1
}

impl BattleInfo {
    pub fn singles(player: BattleSide, opponent: BattleSide) -> Self {
        Self {
            sides: [player, opponent],
            battle_size: 1,
            wild: false,
            background: None,
            music: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub seed: u64,
    /// Turn cap; reaching it ends the battle in a draw.
    pub max_turns: u32,
    pub allow_flee: bool,
    pub allow_catch: bool,
    pub restore_consumed_items: bool,
    pub ev_gain: bool,
    /// Ask the presenter before a flee is queued.
    pub confirm_flee: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 500,
            allow_flee: true,
            allow_catch: true,
            restore_consumed_items: false,
            ev_gain: true,
            confirm_flee: false,
        }
    }
}

impl BattleConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
