use crate::data::moves::MoveData;
use crate::sim::battler::BattlerId;
use crate::sim::effects::{chain_all, MoveContext};
use crate::sim::rng::BattleRng;
use crate::sim::state::BattleState;
use crate::sim::stats::{apply_stage, StageStat, Stat};

/// Raw numbers fed to the damage pipeline once hooks have been resolved.
#[derive(Clone, Copy, Debug)]
pub struct DamageInputs {
    pub level: u8,
    pub attack: u16,
    pub defense: u16,
    pub power: u16,
    pub spread: bool,
    pub mod1: f32,
    pub critical: bool,
    pub mod2: f32,
    /// Random roll in percent, 85..=100.
    pub random: u32,
    pub stab: bool,
    pub effectiveness: f32,
    pub mod3: f32,
}

impl Default for DamageInputs {
    fn default() -> Self {
        Self {
            level: 50,
            attack: 100,
            defense: 100,
            power: 40,
            spread: false,
            mod1: 1.0,
            critical: false,
            mod2: 1.0,
            random: 100,
            stab: false,
            effectiveness: 1.0,
            mod3: 1.0,
        }
    }
}

pub(crate) fn chain_modifier(previous: f32, next: f32) -> f32 {
    let previous = (previous * 4096.0).floor() as u64;
    let next = (next * 4096.0).floor() as u64;
    let chained = (previous * next + 2048) >> 12;
    chained as f32 / 4096.0
}

pub(crate) fn apply_modifier(value: u32, modifier: f32) -> u32 {
    if modifier <= 0.0 {
        return 0;
    }
    let modifier = (modifier * 4096.0).floor() as u64;
    let value = value as u64;
    ((value * modifier + 2048 - 1) / 4096) as u32
}

fn apply_random_factor(value: u32, percent: u32) -> u32 {
    value.saturating_mul(percent.clamp(85, 100)) / 100
}

fn type_effectiveness_steps(type_effectiveness: f32) -> i8 {
    if type_effectiveness == 4.0 {
        2
    } else if type_effectiveness == 2.0 {
        1
    } else if type_effectiveness == 1.0 {
        0
    } else if type_effectiveness == 0.5 {
        -1
    } else if type_effectiveness == 0.25 {
        -2
    } else {
        (type_effectiveness.ln() / 2.0_f32.ln()).round() as i8
    }
}

fn apply_type_effectiveness(value: u32, type_effectiveness: f32) -> u32 {
    if type_effectiveness == 0.0 {
        return 0;
    }
    let steps = type_effectiveness_steps(type_effectiveness);
    if steps > 0 {
        value.saturating_mul(1u32 << steps as u32)
    } else if steps < 0 {
        value / (1u32 << (-steps) as u32)
    } else {
        value
    }
}

fn compute_base_damage(level: u8, attack: u16, defense: u16, power: u16) -> u32 {
    let mut base_damage = 2 * level as u32 / 5 + 2;
    base_damage = base_damage.saturating_mul(power as u32);
    base_damage = base_damage.saturating_mul(attack as u32);
    base_damage /= defense.max(1) as u32;
    base_damage /= 50;
    base_damage
}

/// base -> spread/mod1 -> crit -> mod2 -> random -> STAB -> type -> mod3.
/// Immune matchups deal 0; anything else deals at least 1.
pub fn damage_from_inputs(inputs: &DamageInputs) -> u16 {
    if inputs.effectiveness == 0.0 {
        return 0;
    }
    let mut damage = compute_base_damage(inputs.level, inputs.attack, inputs.defense, inputs.power);
    damage = damage.saturating_add(2);
    if inputs.spread {
        damage = apply_modifier(damage, 0.75);
    }
    damage = apply_modifier(damage, inputs.mod1);
    if inputs.critical {
        damage = damage * 3 / 2;
    }
    damage = apply_modifier(damage, inputs.mod2);
    damage = apply_random_factor(damage, inputs.random);
    if inputs.stab {
        damage = apply_modifier(damage, 1.5);
    }
    damage = apply_type_effectiveness(damage, inputs.effectiveness);
    damage = apply_modifier(damage, inputs.mod3);
    damage.clamp(1, u16::MAX as u32) as u16
}

/// Stat after stages. A critical hit ignores stages that hurt the attacker.
pub fn staged_stat(state: &BattleState, id: BattlerId, stat: Stat, critical: bool, attacking: bool) -> u16 {
    let battler = state.battler(id);
    let stage_stat = match stat {
        Stat::Atk => StageStat::Atk,
        Stat::Def => StageStat::Def,
        Stat::Spa => StageStat::Spa,
        Stat::Spd => StageStat::Spd,
        Stat::Spe => StageStat::Spe,
        Stat::Hp => return battler.max_hp(),
    };
    let mut stage = battler.stage(stage_stat);
    if critical {
        stage = if attacking { stage.max(0) } else { stage.min(0) };
    }
    apply_stage(battler.stat(stat), stage)
}

/// Critical-hit odds by stage: 1/24, 1/8, 1/2, then always.
pub fn roll_critical(state: &BattleState, rng: &mut BattleRng, user: BattlerId, data: &'static MoveData) -> bool {
    let bonus: u8 = state
        .effects()
        .map(|(view, effect)| effect.critical_rate_bonus(view, user, data))
        .sum();
    match data.crit_stage.saturating_add(bonus) {
        0 => rng.ratio(1, 24),
        1 => rng.ratio(1, 8),
        2 => rng.ratio(1, 2),
        _ => true,
    }
}

/// Full damage calculation for one target, with every multiplier hook applied.
pub fn calc_damage(state: &BattleState, mv: &MoveContext, random: u32, power_bonus: f32) -> u16 {
    let user = state.battler(mv.user);
    let (attack_stat, defense_stat) = if mv.is_physical() {
        (Stat::Atk, Stat::Def)
    } else {
        (Stat::Spa, Stat::Spd)
    };
    let power_mod = chain_all(state, |effect, view| effect.base_power_multiplier(view, mv));
    let power = apply_modifier(mv.data.power as u32, chain_modifier(power_mod, power_bonus)).max(1) as u16;
    let attack = staged_stat(state, mv.user, attack_stat, mv.critical, true);
    let attack_mod = chain_all(state, |effect, view| effect.attack_multiplier(view, mv));
    let defense = staged_stat(state, mv.target, defense_stat, mv.critical, false);
    let defense_mod = chain_all(state, |effect, view| effect.defense_multiplier(view, mv));
    let inputs = DamageInputs {
        level: user.level,
        attack: apply_modifier(attack as u32, attack_mod).max(1) as u16,
        defense: apply_modifier(defense as u32, defense_mod).max(1) as u16,
        power,
        spread: mv.spread,
        mod1: chain_all(state, |effect, view| effect.mod1_multiplier(view, mv)),
        critical: mv.critical,
        mod2: chain_all(state, |effect, view| effect.mod2_multiplier(view, mv)),
        random,
        stab: user.has_type(mv.move_type),
        effectiveness: mv.effectiveness,
        mod3: chain_all(state, |effect, view| effect.mod3_multiplier(view, mv)),
    };
    damage_from_inputs(&inputs)
}

/// Self-hit from confusion: typeless 40 power physical, no crit.
pub fn confusion_damage(state: &BattleState, id: BattlerId, random: u32) -> u16 {
    let battler = state.battler(id);
    damage_from_inputs(&DamageInputs {
        level: battler.level,
        attack: staged_stat(state, id, Stat::Atk, false, true),
        defense: staged_stat(state, id, Stat::Def, false, false),
        power: 40,
        random,
        ..DamageInputs::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::POKEDEX;
    use crate::data::types::{effectiveness_dual, Type};
    use crate::sim::stats::{Nature, StatsSet};

    fn stats(species: &str, level: u8) -> StatsSet {
        let base = POKEDEX.get(species).unwrap().base_stats;
        StatsSet::compute(&base, level, [0; 6], [31; 6], Nature::Hardy)
    }

    #[test]
    fn test_damage_calc_thunderbolt() {
        let damage = damage_from_inputs(&DamageInputs {
            attack: 120,
            defense: 100,
            power: 90,
            ..DamageInputs::default()
        });
        assert_eq!(damage, 49);
    }

    #[test]
    fn test_stab_bonus() {
        let damage = damage_from_inputs(&DamageInputs {
            attack: 120,
            defense: 100,
            power: 90,
            stab: true,
            ..DamageInputs::default()
        });
        assert_eq!(damage, 73);
    }

    #[test]
    fn test_showdown_damage_garchomp_earthquake_heatran() {
        let attacker = stats("garchomp", 50);
        let defender = stats("heatran", 50);
        let inputs = DamageInputs {
            attack: attacker.atk,
            defense: defender.def,
            power: 100,
            stab: true,
            effectiveness: effectiveness_dual(Type::Ground, [Type::Fire, Type::Steel]),
            ..DamageInputs::default()
        };
        assert_eq!(damage_from_inputs(&inputs), 324);
        assert_eq!(damage_from_inputs(&DamageInputs { random: 85, ..inputs }), 268);
    }

    #[test]
    fn test_showdown_damage_pikachu_thunderbolt_gyarados() {
        let attacker = stats("pikachu", 100);
        let defender = stats("gyarados", 100);
        let inputs = DamageInputs {
            level: 100,
            attack: attacker.spa,
            defense: defender.spd,
            power: 90,
            stab: true,
            effectiveness: effectiveness_dual(Type::Electric, [Type::Water, Type::Flying]),
            ..DamageInputs::default()
        };
        assert_eq!(damage_from_inputs(&inputs), 268);
        assert_eq!(damage_from_inputs(&DamageInputs { random: 85, ..inputs }), 228);
    }

    #[test]
    fn immune_deals_nothing_and_minimum_is_one() {
        let immune = DamageInputs {
            effectiveness: 0.0,
            ..DamageInputs::default()
        };
        assert_eq!(damage_from_inputs(&immune), 0);
        let feeble = DamageInputs {
            level: 1,
            attack: 1,
            defense: 500,
            power: 10,
            effectiveness: 0.25,
            ..DamageInputs::default()
        };
        assert_eq!(damage_from_inputs(&feeble), 1);
    }

    #[test]
    fn chain_modifier_matches_4096_rounding() {
        assert_eq!(chain_modifier(1.5, 1.5), 2.25);
        assert_eq!(apply_modifier(100, 0.5), 50);
    }
}
