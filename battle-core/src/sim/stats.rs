use serde::{Deserialize, Serialize};

use crate::data::species::BaseStats;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Nature factor in percent: 110 boosted, 90 lowered, 100 otherwise.
pub fn nature_factor(nature: Nature, stat: Stat) -> u32 {
    match nature {
        Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => 100,
        Nature::Lonely => bonus(stat, Stat::Atk, Stat::Def),
        Nature::Brave => bonus(stat, Stat::Atk, Stat::Spe),
        Nature::Adamant => bonus(stat, Stat::Atk, Stat::Spa),
        Nature::Naughty => bonus(stat, Stat::Atk, Stat::Spd),
        Nature::Bold => bonus(stat, Stat::Def, Stat::Atk),
        Nature::Relaxed => bonus(stat, Stat::Def, Stat::Spe),
        Nature::Impish => bonus(stat, Stat::Def, Stat::Spa),
        Nature::Lax => bonus(stat, Stat::Def, Stat::Spd),
        Nature::Timid => bonus(stat, Stat::Spe, Stat::Atk),
        Nature::Hasty => bonus(stat, Stat::Spe, Stat::Def),
        Nature::Jolly => bonus(stat, Stat::Spe, Stat::Spa),
        Nature::Naive => bonus(stat, Stat::Spe, Stat::Spd),
        Nature::Modest => bonus(stat, Stat::Spa, Stat::Atk),
        Nature::Mild => bonus(stat, Stat::Spa, Stat::Def),
        Nature::Quiet => bonus(stat, Stat::Spa, Stat::Spe),
        Nature::Rash => bonus(stat, Stat::Spa, Stat::Spd),
        Nature::Calm => bonus(stat, Stat::Spd, Stat::Atk),
        Nature::Gentle => bonus(stat, Stat::Spd, Stat::Def),
        Nature::Sassy => bonus(stat, Stat::Spd, Stat::Spe),
        Nature::Careful => bonus(stat, Stat::Spd, Stat::Spa),
    }
}

fn bonus(stat: Stat, boosted: Stat, lowered: Stat) -> u32 {
    if stat == boosted {
        110
    } else if stat == lowered {
        90
    } else {
        100
    }
}

/// Max HP. A base of 1 always yields 1.
pub fn calc_hp(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    if base == 1 {
        return 1;
    }
    let level = level as u32;
    let base_value = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let hp = base_value * level / 100 + level + 10;
    hp.max(1) as u16
}

/// Non-HP stat. Every step floors; the order of operations is significant.
pub fn calc_stat(base: u16, iv: u8, ev: u8, level: u8, nature_factor: u32) -> u16 {
    let base_value = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let raw = base_value * level as u32 / 100 + 5;
    (raw * nature_factor / 100) as u16
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    pub fn compute(base: &BaseStats, level: u8, evs: [u8; 6], ivs: [u8; 6], nature: Nature) -> Self {
        let stat = |value: u16, stat: Stat| {
            let i = stat.index();
            calc_stat(value, ivs[i], evs[i], level, nature_factor(nature, stat))
        };
        Self {
            hp: calc_hp(base.hp, ivs[0], evs[0], level),
            atk: stat(base.atk, Stat::Atk),
            def: stat(base.def, Stat::Def),
            spa: stat(base.spa, Stat::Spa),
            spd: stat(base.spd, Stat::Spd),
            spe: stat(base.spe, Stat::Spe),
        }
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }
}

/// Battle stages: the five battle stats plus accuracy and evasion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl StageStat {
    pub const ALL: [StageStat; 7] = [
        StageStat::Atk,
        StageStat::Def,
        StageStat::Spa,
        StageStat::Spd,
        StageStat::Spe,
        StageStat::Accuracy,
        StageStat::Evasion,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StageStat::Atk => "atk",
            StageStat::Def => "def",
            StageStat::Spa => "spa",
            StageStat::Spd => "spd",
            StageStat::Spe => "spe",
            StageStat::Accuracy => "accuracy",
            StageStat::Evasion => "evasion",
        }
    }

    /// The derived stat a stage scales, if any.
    pub fn stat(self) -> Option<Stat> {
        match self {
            StageStat::Atk => Some(Stat::Atk),
            StageStat::Def => Some(Stat::Def),
            StageStat::Spa => Some(Stat::Spa),
            StageStat::Spd => Some(Stat::Spd),
            StageStat::Spe => Some(Stat::Spe),
            StageStat::Accuracy | StageStat::Evasion => None,
        }
    }
}

pub const MAX_STAGE: i8 = 6;
pub const MIN_STAGE: i8 = -6;

/// Outcome of a stage change request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageChange {
    /// Already at the bound in the requested direction.
    NoEffect,
    Changed { stage: i8, delta: i8 },
}

impl StageChange {
    pub fn delta(self) -> i8 {
        match self {
            StageChange::NoEffect => 0,
            StageChange::Changed { delta, .. } => delta,
        }
    }
}

pub fn apply_stage_change(current: i8, requested: i8) -> StageChange {
    let stage = current.saturating_add(requested).clamp(MIN_STAGE, MAX_STAGE);
    let delta = stage - current;
    if delta == 0 {
        StageChange::NoEffect
    } else {
        StageChange::Changed { stage, delta }
    }
}

/// (numerator, denominator) of the 2-based stat stage multiplier.
pub fn stage_ratio(stage: i8) -> (u32, u32) {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
    if stage >= 0 {
        (2 + stage as u32, 2)
    } else {
        (2, 2 + stage.unsigned_abs() as u32)
    }
}

pub fn stage_multiplier(stage: i8) -> f32 {
    let (num, den) = stage_ratio(stage);
    num as f32 / den as f32
}

/// Accuracy and evasion use a 3-based table.
pub fn accuracy_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
    if stage >= 0 {
        (3 + stage as i32) as f32 / 3.0
    } else {
        3.0 / (3 - stage as i32) as f32
    }
}

pub fn apply_stage(value: u16, stage: i8) -> u16 {
    let (num, den) = stage_ratio(stage);
    (value as u32 * num / den) as u16
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MajorStatus {
    Poison,
    Toxic,
    Paralysis,
    Burn,
    Freeze,
    Sleep,
}

impl MajorStatus {
    pub fn name(self) -> &'static str {
        match self {
            MajorStatus::Poison => "psn",
            MajorStatus::Toxic => "tox",
            MajorStatus::Paralysis => "par",
            MajorStatus::Burn => "brn",
            MajorStatus::Freeze => "frz",
            MajorStatus::Sleep => "slp",
        }
    }

    pub fn is_poison(self) -> bool {
        matches!(self, MajorStatus::Poison | MajorStatus::Toxic)
    }
}

/// `floor(max_hp * num / den)`, at least 1.
pub fn fraction_floor(max_hp: u16, num: u32, den: u32) -> u16 {
    ((max_hp as u32 * num / den).max(1)) as u16
}

/// `(amount * num + den / 2) / den`, at least 1.
pub fn fraction_round(amount: u16, num: u32, den: u32) -> u16 {
    (((amount as u32 * num + den / 2) / den).max(1)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::POKEDEX;

    #[test]
    fn golden_value_neutral_nature() {
        assert_eq!(calc_stat(100, 31, 252, 100, 100), 299);
        assert_eq!(calc_hp(100, 31, 252, 100), 404);
    }

    #[test]
    fn nature_factors_floor() {
        assert_eq!(calc_stat(100, 31, 252, 100, 110), 328);
        assert_eq!(calc_stat(100, 31, 252, 100, 90), 269);
    }

    #[test]
    fn test_charizard_lv50_adamant() {
        let evs = [0, 252, 0, 0, 4, 252];
        let ivs = [31; 6];
        let base = POKEDEX.get("charizard").unwrap().base_stats;
        let set = StatsSet::compute(&base, 50, evs, ivs, Nature::Adamant);
        assert_eq!(set.hp, 153);
        assert_eq!(set.atk, 149);
        assert_eq!(set.def, 98);
        assert_eq!(set.spa, 116);
        assert_eq!(set.spd, 106);
        assert_eq!(set.spe, 152);
    }

    #[test]
    fn base_one_hp_is_one() {
        assert_eq!(calc_hp(1, 31, 252, 100), 1);
    }

    #[test]
    fn stage_clamp_reports_true_delta() {
        assert_eq!(apply_stage_change(0, 8), StageChange::Changed { stage: 6, delta: 6 });
        assert_eq!(apply_stage_change(6, 1), StageChange::NoEffect);
        assert_eq!(apply_stage_change(-5, -3), StageChange::Changed { stage: -6, delta: -1 });
    }

    #[test]
    fn stage_multiplier_bounds() {
        assert_eq!(stage_multiplier(6), 4.0);
        assert_eq!(stage_multiplier(-6), 0.25);
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(apply_stage(299, -1), 199);
    }

    #[test]
    fn accuracy_stages_use_thirds() {
        assert_eq!(accuracy_multiplier(6), 3.0);
        assert_eq!(accuracy_multiplier(-6), 1.0 / 3.0);
    }

    #[test]
    fn fractional_hp_rounding() {
        assert_eq!(fraction_floor(15, 1, 16), 1);
        assert_eq!(fraction_floor(404, 1, 16), 25);
        assert_eq!(fraction_round(100, 33, 100), 33);
        assert_eq!(fraction_round(1, 1, 2), 1);
    }
}
