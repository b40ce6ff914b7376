use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::types::Type;
use crate::sim::effects::field::SideConditionKind;
use crate::sim::state::{Terrain, Weather};
use crate::sim::stats::{MajorStatus, StageStat};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveTarget {
    /// One adjacent battler chosen at collect time.
    Normal,
    AllAdjacentFoes,
    AllAdjacent,
    User,
    AllySide,
    FoeSide,
    Field,
}

/// Symbolic behavior resolved by the move procedure after damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveBehavior {
    None,
    Recoil { num: u16, den: u16 },
    Drain { num: u16, den: u16 },
    Status { status: MajorStatus, chance: u8 },
    Boost { stats: &'static [(StageStat, i8)], to_user: bool, chance: u8 },
    Flinch { chance: u8 },
    FakeOut,
    Confuse { chance: u8 },
    Protect,
    Endure,
    Heal { num: u16, den: u16 },
    /// Full heal, then two turns of sleep over any current status.
    Rest,
    Weather(Weather),
    Terrain(Terrain),
    SideCondition(SideConditionKind),
    TrickRoom,
    ForceSwitch,
    SelfSwitch,
    Trap,
    SwapItems,
    KnockOff,
    Pursuit,
    Struggle,
}

#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub id: &'static str,
    pub name: &'static str,
    pub move_type: Type,
    pub category: MoveCategory,
    pub power: u16,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub priority: i8,
    pub target: MoveTarget,
    pub crit_stage: u8,
    pub flags: &'static [&'static str],
    pub behavior: MoveBehavior,
}

impl MoveData {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|candidate| *candidate == flag)
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }
}

pub const STRUGGLE: &str = "struggle";

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => MoveData {
        id: "tackle",
        name: "Tackle",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(100),
        pp: 35,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::None,
    },
    "quickattack" => MoveData {
        id: "quickattack",
        name: "Quick Attack",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(100),
        pp: 30,
        priority: 1,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::None,
    },
    "extremespeed" => MoveData {
        id: "extremespeed",
        name: "Extreme Speed",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 80,
        accuracy: Some(100),
        pp: 5,
        priority: 2,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::None,
    },
    "fakeout" => MoveData {
        id: "fakeout",
        name: "Fake Out",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(100),
        pp: 10,
        priority: 3,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::FakeOut,
    },
    "bodyslam" => MoveData {
        id: "bodyslam",
        name: "Body Slam",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 85,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Paralysis, chance: 30 },
    },
    "doubleedge" => MoveData {
        id: "doubleedge",
        name: "Double-Edge",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 120,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Recoil { num: 33, den: 100 },
    },
    "flamethrower" => MoveData {
        id: "flamethrower",
        name: "Flamethrower",
        move_type: Type::Fire,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Burn, chance: 10 },
    },
    "fireblast" => MoveData {
        id: "fireblast",
        name: "Fire Blast",
        move_type: Type::Fire,
        category: MoveCategory::Special,
        power: 110,
        accuracy: Some(85),
        pp: 5,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Burn, chance: 10 },
    },
    "flareblitz" => MoveData {
        id: "flareblitz",
        name: "Flare Blitz",
        move_type: Type::Fire,
        category: MoveCategory::Physical,
        power: 120,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Recoil { num: 33, den: 100 },
    },
    "surf" => MoveData {
        id: "surf",
        name: "Surf",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::AllAdjacent,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::None,
    },
    "scald" => MoveData {
        id: "scald",
        name: "Scald",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 80,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Burn, chance: 30 },
    },
    "hydropump" => MoveData {
        id: "hydropump",
        name: "Hydro Pump",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 110,
        accuracy: Some(80),
        pp: 5,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::None,
    },
    "thunderbolt" => MoveData {
        id: "thunderbolt",
        name: "Thunderbolt",
        move_type: Type::Electric,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Paralysis, chance: 10 },
    },
    "thunderwave" => MoveData {
        id: "thunderwave",
        name: "Thunder Wave",
        move_type: Type::Electric,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(90),
        pp: 20,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Paralysis, chance: 100 },
    },
    "gigadrain" => MoveData {
        id: "gigadrain",
        name: "Giga Drain",
        move_type: Type::Grass,
        category: MoveCategory::Special,
        power: 75,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Drain { num: 1, den: 2 },
    },
    "icebeam" => MoveData {
        id: "icebeam",
        name: "Ice Beam",
        move_type: Type::Ice,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Freeze, chance: 10 },
    },
    "closecombat" => MoveData {
        id: "closecombat",
        name: "Close Combat",
        move_type: Type::Fighting,
        category: MoveCategory::Physical,
        power: 120,
        accuracy: Some(100),
        pp: 5,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Def, -1), (StageStat::Spd, -1)], to_user: true, chance: 100 },
    },
    "drainpunch" => MoveData {
        id: "drainpunch",
        name: "Drain Punch",
        move_type: Type::Fighting,
        category: MoveCategory::Physical,
        power: 75,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect", "punch"],
        behavior: MoveBehavior::Drain { num: 1, den: 2 },
    },
    "sludgebomb" => MoveData {
        id: "sludgebomb",
        name: "Sludge Bomb",
        move_type: Type::Poison,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Poison, chance: 30 },
    },
    "toxic" => MoveData {
        id: "toxic",
        name: "Toxic",
        move_type: Type::Poison,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(90),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Toxic, chance: 100 },
    },
    "earthquake" => MoveData {
        id: "earthquake",
        name: "Earthquake",
        move_type: Type::Ground,
        category: MoveCategory::Physical,
        power: 100,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::AllAdjacent,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::None,
    },
    "bravebird" => MoveData {
        id: "bravebird",
        name: "Brave Bird",
        move_type: Type::Flying,
        category: MoveCategory::Physical,
        power: 120,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Recoil { num: 33, den: 100 },
    },
    "psychic" => MoveData {
        id: "psychic",
        name: "Psychic",
        move_type: Type::Psychic,
        category: MoveCategory::Special,
        power: 90,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Spd, -1)], to_user: false, chance: 10 },
    },
    "uturn" => MoveData {
        id: "uturn",
        name: "U-turn",
        move_type: Type::Bug,
        category: MoveCategory::Physical,
        power: 70,
        accuracy: Some(100),
        pp: 20,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::SelfSwitch,
    },
    "stoneedge" => MoveData {
        id: "stoneedge",
        name: "Stone Edge",
        move_type: Type::Rock,
        category: MoveCategory::Physical,
        power: 100,
        accuracy: Some(80),
        pp: 5,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 1,
        flags: &["protect"],
        behavior: MoveBehavior::None,
    },
    "shadowball" => MoveData {
        id: "shadowball",
        name: "Shadow Ball",
        move_type: Type::Ghost,
        category: MoveCategory::Special,
        power: 80,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Spd, -1)], to_user: false, chance: 20 },
    },
    "dragonclaw" => MoveData {
        id: "dragonclaw",
        name: "Dragon Claw",
        move_type: Type::Dragon,
        category: MoveCategory::Physical,
        power: 80,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::None,
    },
    "crunch" => MoveData {
        id: "crunch",
        name: "Crunch",
        move_type: Type::Dark,
        category: MoveCategory::Physical,
        power: 80,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Def, -1)], to_user: false, chance: 20 },
    },
    "pursuit" => MoveData {
        id: "pursuit",
        name: "Pursuit",
        move_type: Type::Dark,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(100),
        pp: 20,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Pursuit,
    },
    "knockoff" => MoveData {
        id: "knockoff",
        name: "Knock Off",
        move_type: Type::Dark,
        category: MoveCategory::Physical,
        power: 65,
        accuracy: Some(100),
        pp: 20,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::KnockOff,
    },
    "ironhead" => MoveData {
        id: "ironhead",
        name: "Iron Head",
        move_type: Type::Steel,
        category: MoveCategory::Physical,
        power: 80,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["contact", "protect"],
        behavior: MoveBehavior::Flinch { chance: 30 },
    },
    "moonblast" => MoveData {
        id: "moonblast",
        name: "Moonblast",
        move_type: Type::Fairy,
        category: MoveCategory::Special,
        power: 95,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Spa, -1)], to_user: false, chance: 30 },
    },
    "swordsdance" => MoveData {
        id: "swordsdance",
        name: "Swords Dance",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Atk, 2)], to_user: true, chance: 100 },
    },
    "dragondance" => MoveData {
        id: "dragondance",
        name: "Dragon Dance",
        move_type: Type::Dragon,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Atk, 1), (StageStat::Spe, 1)], to_user: true, chance: 100 },
    },
    "calmmind" => MoveData {
        id: "calmmind",
        name: "Calm Mind",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Spa, 1), (StageStat::Spd, 1)], to_user: true, chance: 100 },
    },
    "growl" => MoveData {
        id: "growl",
        name: "Growl",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(100),
        pp: 40,
        priority: 0,
        target: MoveTarget::AllAdjacentFoes,
        crit_stage: 0,
        flags: &["protect", "sound"],
        behavior: MoveBehavior::Boost { stats: &[(StageStat::Atk, -1)], to_user: false, chance: 100 },
    },
    "willowisp" => MoveData {
        id: "willowisp",
        name: "Will-O-Wisp",
        move_type: Type::Fire,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(85),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Status { status: MajorStatus::Burn, chance: 100 },
    },
    "spore" => MoveData {
        id: "spore",
        name: "Spore",
        move_type: Type::Grass,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(100),
        pp: 15,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect", "powder"],
        behavior: MoveBehavior::Status { status: MajorStatus::Sleep, chance: 100 },
    },
    "confuseray" => MoveData {
        id: "confuseray",
        name: "Confuse Ray",
        move_type: Type::Ghost,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Confuse { chance: 100 },
    },
    "protect" => MoveData {
        id: "protect",
        name: "Protect",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 10,
        priority: 4,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Protect,
    },
    "endure" => MoveData {
        id: "endure",
        name: "Endure",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 10,
        priority: 4,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Endure,
    },
    "recover" => MoveData {
        id: "recover",
        name: "Recover",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Heal { num: 1, den: 2 },
    },
    "rest" => MoveData {
        id: "rest",
        name: "Rest",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Rest,
    },
    "raindance" => MoveData {
        id: "raindance",
        name: "Rain Dance",
        move_type: Type::Water,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: 0,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Weather(Weather::Rain),
    },
    "sunnyday" => MoveData {
        id: "sunnyday",
        name: "Sunny Day",
        move_type: Type::Fire,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: 0,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Weather(Weather::Sun),
    },
    "sandstorm" => MoveData {
        id: "sandstorm",
        name: "Sandstorm",
        move_type: Type::Rock,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 10,
        priority: 0,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Weather(Weather::Sand),
    },
    "electricterrain" => MoveData {
        id: "electricterrain",
        name: "Electric Terrain",
        move_type: Type::Electric,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 10,
        priority: 0,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Terrain(Terrain::Electric),
    },
    "grassyterrain" => MoveData {
        id: "grassyterrain",
        name: "Grassy Terrain",
        move_type: Type::Grass,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 10,
        priority: 0,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::Terrain(Terrain::Grassy),
    },
    "stealthrock" => MoveData {
        id: "stealthrock",
        name: "Stealth Rock",
        move_type: Type::Rock,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::FoeSide,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::SideCondition(SideConditionKind::StealthRock),
    },
    "spikes" => MoveData {
        id: "spikes",
        name: "Spikes",
        move_type: Type::Ground,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::FoeSide,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::SideCondition(SideConditionKind::Spikes),
    },
    "reflect" => MoveData {
        id: "reflect",
        name: "Reflect",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: 0,
        target: MoveTarget::AllySide,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::SideCondition(SideConditionKind::Reflect),
    },
    "lightscreen" => MoveData {
        id: "lightscreen",
        name: "Light Screen",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 30,
        priority: 0,
        target: MoveTarget::AllySide,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::SideCondition(SideConditionKind::LightScreen),
    },
    "tailwind" => MoveData {
        id: "tailwind",
        name: "Tailwind",
        move_type: Type::Flying,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 15,
        priority: 0,
        target: MoveTarget::AllySide,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::SideCondition(SideConditionKind::Tailwind),
    },
    "trickroom" => MoveData {
        id: "trickroom",
        name: "Trick Room",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: -7,
        target: MoveTarget::Field,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::TrickRoom,
    },
    "roar" => MoveData {
        id: "roar",
        name: "Roar",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 20,
        priority: -6,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["sound"],
        behavior: MoveBehavior::ForceSwitch,
    },
    "meanlook" => MoveData {
        id: "meanlook",
        name: "Mean Look",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 5,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::Trap,
    },
    "trick" => MoveData {
        id: "trick",
        name: "Trick",
        move_type: Type::Psychic,
        category: MoveCategory::Status,
        power: 0,
        accuracy: Some(100),
        pp: 10,
        priority: 0,
        target: MoveTarget::Normal,
        crit_stage: 0,
        flags: &["protect"],
        behavior: MoveBehavior::SwapItems,
    },
    "splash" => MoveData {
        id: "splash",
        name: "Splash",
        move_type: Type::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy: None,
        pp: 40,
        priority: 0,
        target: MoveTarget::User,
        crit_stage: 0,
        flags: &[],
        behavior: MoveBehavior::None,
    },
};

/// Used when a battler has no usable move left. Never part of a moveset.
pub static STRUGGLE_MOVE: MoveData = MoveData {
    id: "struggle",
    name: "Struggle",
    move_type: Type::Normal,
    category: MoveCategory::Physical,
    power: 50,
    accuracy: None,
    pp: 1,
    priority: 0,
    target: MoveTarget::Normal,
    crit_stage: 0,
    flags: &["contact", "protect"],
    behavior: MoveBehavior::Struggle,
};

pub fn get_move(id: &str) -> Option<&'static MoveData> {
    MOVES.get(id).or_else(|| (id == STRUGGLE).then_some(&STRUGGLE_MOVE))
}
