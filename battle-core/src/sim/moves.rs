//! One battler using one move: prevention, PP, targeting, accuracy, damage,
//! secondary effects and the user-side part of the move.

use tracing::{debug, trace};

use crate::data::moves::{get_move, MoveBehavior, MoveData, MoveTarget, STRUGGLE_MOVE};
use crate::data::types::{effectiveness_dual, Type};
use crate::sim::action::TargetRef;
use crate::sim::battler::{BattlerId, MoveRecord};
use crate::sim::damage::{calc_damage, roll_critical};
use crate::sim::effects::volatile::{Confusion, Endure, Flinch, Protect, Trapped};
use crate::sim::effects::{AccuracyCheck, DamageCause, DamageKind, MoveContext};
use crate::sim::handlers::{damage, field, item_change, stat_change, status};
use crate::sim::logic::{BattleLogic, SwitchReason};
use crate::sim::message::BattleMessage;
use crate::sim::state::{BattleState, SweepScope};
use crate::sim::stats::{accuracy_multiplier, fraction_floor, fraction_round, MajorStatus, StageStat};

pub fn struggle() -> &'static MoveData {
    &STRUGGLE_MOVE
}

/// The battler a single-target move aims at. Falls back to the first living
/// foe when the chosen slot is empty or fainted.
pub fn chosen_target(state: &BattleState, user: BattlerId, target: Option<TargetRef>) -> Option<BattlerId> {
    target
        .and_then(|t| state.battler_at(t.bank, t.position))
        .filter(|id| *id != user && !state.battler(*id).is_fainted())
        .or_else(|| state.foes_of(user).first().copied())
}

fn resolve_targets(state: &BattleState, user: BattlerId, data: &MoveData, target: Option<TargetRef>) -> Vec<BattlerId> {
    match data.target {
        MoveTarget::Normal => chosen_target(state, user, target).into_iter().collect(),
        MoveTarget::AllAdjacentFoes => state.foes_of(user),
        MoveTarget::AllAdjacent => {
            let mut targets = state.allies_of(user);
            targets.extend(state.foes_of(user));
            targets
        }
        MoveTarget::User | MoveTarget::AllySide | MoveTarget::FoeSide | MoveTarget::Field => Vec::new(),
    }
}

fn needs_target(data: &MoveData) -> bool {
    matches!(
        data.target,
        MoveTarget::Normal | MoveTarget::AllAdjacentFoes | MoveTarget::AllAdjacent
    )
}

fn record(logic: &mut BattleLogic, user: BattlerId, data: &'static MoveData, succeeded: bool) {
    let turn = logic.state.turn;
    logic.state.battler_mut(user).move_history.push(MoveRecord {
        turn,
        move_id: data.id,
        succeeded,
    });
}

fn fail(logic: &mut BattleLogic, user: BattlerId) {
    logic.emit(BattleMessage::MoveFailed { user });
}

/// Successful Protect/Endure uses on consecutive turns, counting back from
/// last turn. Any turn without one ends the streak.
fn protect_streak(logic: &BattleLogic, user: BattlerId) -> u32 {
    let mut expected_turn = logic.state.turn;
    let mut streak = 0;
    for record in logic.state.battler(user).move_history().iter().rev() {
        let protected = record.succeeded
            && get_move(record.move_id)
                .is_some_and(|data| matches!(data.behavior, MoveBehavior::Protect | MoveBehavior::Endure));
        if !protected || record.turn + 1 != expected_turn {
            break;
        }
        streak += 1;
        expected_turn = record.turn;
    }
    streak
}

fn accuracy_hits(logic: &mut BattleLogic, mv: &MoveContext) -> bool {
    let Some(accuracy) = mv.data.accuracy else {
        return true;
    };
    let forced = logic
        .state
        .effects()
        .find_map(|(view, effect)| effect.on_pre_accuracy_check(view, mv));
    match forced {
        Some(AccuracyCheck::AlwaysHit) => true,
        Some(AccuracyCheck::AlwaysMiss) => false,
        None => {
            let stage = logic.state.battler(mv.user).stage(StageStat::Accuracy)
                - logic.state.battler(mv.target).stage(StageStat::Evasion);
            let chance = (accuracy as f32 * accuracy_multiplier(stage)) as u32;
            logic.rng.range(1, 100) <= chance
        }
    }
}

/// Runs a move from the queue. `move_index` falls back to Struggle when the
/// battler has nothing usable left.
pub fn execute_attack(
    logic: &mut BattleLogic,
    user: BattlerId,
    move_index: usize,
    target: Option<TargetRef>,
    power_bonus: f32,
) {
    let (data, slot) = if !logic.has_usable_move(user) {
        (struggle(), None)
    } else {
        match logic.move_usable(user, move_index) {
            Ok(data) => (data, Some(move_index)),
            Err(rejected) => {
                debug!(user = user.0, %rejected, "move became unusable");
                fail(logic, user);
                return;
            }
        }
    };

    let prevented = logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_move_prevention_user(ctx, user, data)
    });
    if let Some(prevention) = prevented {
        let message = prevention.message.unwrap_or(BattleMessage::MovePrevented {
            battler: user,
            by: prevention.source,
        });
        logic.emit(message);
        record(logic, user, data, false);
        return;
    }
    if logic.state.battler(user).is_fainted() {
        return;
    }

    if let Some(index) = slot {
        logic.state.battler_mut(user).deduct_pp(index);
    }
    logic.emit(BattleMessage::UsedMove { user, move_id: data.id });
    logic.animate(user, data.id);

    if data.behavior == MoveBehavior::FakeOut && logic.state.battler(user).turns_on_field() > 0 {
        fail(logic, user);
        record(logic, user, data, false);
        return;
    }

    let targets = resolve_targets(&logic.state, user, data, target);
    if needs_target(data) && targets.is_empty() {
        fail(logic, user);
        record(logic, user, data, false);
        return;
    }

    let spread = targets.len() > 1;
    let mut total_damage = 0u16;
    let mut hit_any = false;
    for target in targets {
        if logic.state.battler(target).is_fainted() {
            continue;
        }
        let Some(dealt) = hit_target(logic, user, target, data, spread, power_bonus) else {
            continue;
        };
        hit_any = true;
        total_damage = total_damage.saturating_add(dealt);
    }

    let succeeded = if needs_target(data) {
        if hit_any {
            user_side_after_hit(logic, user, data, total_damage);
        }
        hit_any
    } else {
        user_side_move(logic, user, data)
    };

    logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_move_launched(ctx, user, data, total_damage);
        None::<()>
    });
    trace!(user = user.0, move_id = data.id, total_damage, succeeded, "move resolved");
    record(logic, user, data, succeeded);
}

/// Resolves the move against one target. `None` when it did not connect.
fn hit_target(
    logic: &mut BattleLogic,
    user: BattlerId,
    target: BattlerId,
    data: &'static MoveData,
    spread: bool,
    power_bonus: f32,
) -> Option<u16> {
    let effectiveness = if data.is_damaging() {
        effectiveness_dual(data.move_type, logic.state.battler(target).types())
    } else {
        1.0
    };
    let mut mv = MoveContext {
        user,
        target,
        data,
        move_type: data.move_type,
        critical: false,
        effectiveness,
        spread,
    };

    let prevented = logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_move_prevention_target(ctx, &mv)
    });
    if let Some(prevention) = prevented {
        let message = prevention.message.unwrap_or(BattleMessage::EffectTriggered {
            battler: prevention.holder.unwrap_or(target),
            effect: prevention.source,
        });
        logic.emit(message);
        return None;
    }
    let ungrounded = data.move_type == Type::Ground && !logic.state.is_grounded(target);
    if data.is_damaging() && (effectiveness == 0.0 || ungrounded) {
        logic.emit(BattleMessage::NoEffect { target });
        return None;
    }
    if !accuracy_hits(logic, &mv) {
        logic.emit(BattleMessage::Missed { user, target });
        return None;
    }

    let mut dealt = 0;
    if data.is_damaging() {
        mv.critical = roll_critical(&logic.state, &mut logic.rng, user, data);
        let random = logic.rng.damage_roll();
        let knock_off = data.behavior == MoveBehavior::KnockOff && logic.state.battler(target).item().is_some();
        let bonus = if knock_off { power_bonus * 1.5 } else { power_bonus };
        let amount = calc_damage(&logic.state, &mv, random, bonus);
        if mv.critical {
            logic.emit(BattleMessage::CriticalHit { target });
        }
        dealt = damage::damage_change(logic, target, amount, DamageCause::by_move(user, data));
        if effectiveness > 1.0 {
            logic.emit(BattleMessage::SuperEffective { target });
        } else if effectiveness < 1.0 {
            logic.emit(BattleMessage::NotVeryEffective { target });
        }
    }
    target_effects(logic, user, target, data);
    Some(dealt)
}

/// Part of the move that lands on the target after damage.
fn target_effects(logic: &mut BattleLogic, user: BattlerId, target: BattlerId, data: &'static MoveData) {
    let damaging = data.is_damaging();
    let target_alive = !logic.state.battler(target).is_fainted();
    match data.behavior {
        MoveBehavior::Status { status: new, chance } if target_alive => {
            if damaging {
                if logic.rng.chance(chance) {
                    if let Err(block) = status::status_change(logic, target, Some(new), Some(user)) {
                        trace!(target = target.0, status = new.name(), ?block, "secondary status blocked");
                    }
                }
            } else if let Err(block) = status::status_change(logic, target, Some(new), Some(user)) {
                status::report_block(logic, target, block);
            }
        }
        MoveBehavior::Boost {
            stats,
            to_user: false,
            chance,
        } if target_alive => {
            if logic.rng.chance(chance) {
                for (stat, delta) in stats {
                    stat_change::stat_change_with_process(logic, target, *stat, *delta, Some(user));
                }
            }
        }
        MoveBehavior::Flinch { chance } if target_alive => {
            if logic.rng.chance(chance) {
                status::attach_volatile(logic, target, Box::new(Flinch));
            }
        }
        MoveBehavior::FakeOut if target_alive => {
            status::attach_volatile(logic, target, Box::new(Flinch));
        }
        MoveBehavior::Confuse { chance } if target_alive => {
            if logic.rng.chance(chance) {
                let turns = logic.rng.range(2, 5) as u8;
                status::attach_volatile(logic, target, Box::new(Confusion::new(turns)));
            }
        }
        MoveBehavior::Trap if target_alive => {
            status::attach_volatile(logic, target, Box::new(Trapped::new(user)));
        }
        MoveBehavior::ForceSwitch if target_alive => {
            let bank = logic.state.battler(target).bank;
            if logic.state.bench(bank).is_empty() {
                fail(logic, user);
            } else {
                logic.queue_switch(target, SwitchReason::Dragged);
            }
        }
        MoveBehavior::SwapItems if target_alive => {
            let user_item = logic.state.battler(user).item();
            let target_item = logic.state.battler(target).item();
            if user_item.is_none() && target_item.is_none() {
                fail(logic, user);
            } else {
                item_change::change_item(logic, user, target_item, false);
                item_change::change_item(logic, target, user_item, false);
            }
        }
        MoveBehavior::KnockOff if target_alive => {
            if logic.state.battler(target).item().is_some() {
                logic.emit(BattleMessage::EffectTriggered {
                    battler: user,
                    effect: "knockoff",
                });
                item_change::change_item(logic, target, None, false);
            }
        }
        _ => {}
    }
}

/// Recoil, drain and self boosts of a move that connected.
fn user_side_after_hit(logic: &mut BattleLogic, user: BattlerId, data: &'static MoveData, total_damage: u16) {
    if logic.state.battler(user).is_fainted() {
        return;
    }
    match data.behavior {
        MoveBehavior::Recoil { num, den } if total_damage > 0 => {
            let amount = fraction_round(total_damage, num as u32, den as u32);
            damage::damage_change(logic, user, amount, DamageCause::of(DamageKind::Recoil, Some(user)));
        }
        MoveBehavior::Struggle => {
            let amount = fraction_floor(logic.state.battler(user).max_hp(), 1, 4);
            damage::damage_change(logic, user, amount, DamageCause::of(DamageKind::Recoil, Some(user)));
        }
        MoveBehavior::Drain { num, den } if total_damage > 0 => {
            let amount = fraction_round(total_damage, num as u32, den as u32);
            damage::heal_change(logic, user, amount);
        }
        MoveBehavior::Boost {
            stats,
            to_user: true,
            chance,
        } => {
            if logic.rng.chance(chance) {
                for (stat, delta) in stats {
                    stat_change::stat_change_with_process(logic, user, *stat, *delta, Some(user));
                }
            }
        }
        MoveBehavior::SelfSwitch => logic.queue_switch(user, SwitchReason::Forced),
        _ => {}
    }
}

/// Moves without a battler target. Returns whether the move succeeded.
fn user_side_move(logic: &mut BattleLogic, user: BattlerId, data: &'static MoveData) -> bool {
    let succeeded = match data.behavior {
        MoveBehavior::Boost { stats, .. } => {
            let mut changed = false;
            for (stat, delta) in stats {
                changed |= stat_change::stat_change_with_process(logic, user, *stat, *delta, Some(user)) != 0;
            }
            changed
        }
        MoveBehavior::Protect | MoveBehavior::Endure => {
            let streak = protect_streak(logic, user).min(6);
            if logic.rng.ratio(1, 3u32.pow(streak)) {
                if data.behavior == MoveBehavior::Protect {
                    status::attach_volatile(logic, user, Box::new(Protect))
                } else {
                    status::attach_volatile(logic, user, Box::new(Endure))
                }
            } else {
                false
            }
        }
        MoveBehavior::Heal { num, den } => {
            let battler = logic.state.battler(user);
            let amount = fraction_floor(battler.max_hp(), num as u32, den as u32);
            damage::heal_change(logic, user, amount) > 0
        }
        MoveBehavior::Rest => {
            let battler = logic.state.battler(user);
            if battler.at_full_hp() || battler.status() == Some(MajorStatus::Sleep) {
                false
            } else {
                match status::force_status(logic, user, MajorStatus::Sleep, Some(user)) {
                    Ok(()) => {
                        status::set_status_count(logic, user, 2);
                        let max_hp = logic.state.battler(user).max_hp();
                        damage::heal_change(logic, user, max_hp);
                        true
                    }
                    Err(block) => {
                        status::report_block(logic, user, block);
                        false
                    }
                }
            }
        }
        MoveBehavior::Weather(weather) => field::set_weather(logic, Some(weather), 5),
        MoveBehavior::Terrain(terrain) => field::set_terrain(logic, Some(terrain), 5),
        MoveBehavior::SideCondition(kind) => {
            let bank = logic.condition_bank(user, data);
            field::add_side_condition(logic, bank, kind)
        }
        MoveBehavior::TrickRoom => {
            field::toggle_trick_room(logic);
            true
        }
        _ => true,
    };
    if !succeeded {
        fail(logic, user);
    }
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
    use crate::sim::message::BattleEvent;

    fn logic(player: Vec<PartyMember>, opponent: Vec<PartyMember>, seed: u64) -> BattleLogic {
        let side = |name: &str, party| BattleSide {
            name: name.into(),
            party,
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(seed)).unwrap();
        logic.start();
        logic.drain_events();
        logic
    }

    fn messages(logic: &mut BattleLogic) -> Vec<BattleMessage> {
        logic
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                BattleEvent::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn ground_moves_miss_levitating_targets() {
        let mut logic = logic(
            vec![PartyMember::new("garchomp", 50, &["earthquake"])],
            vec![PartyMember::new("gengar", 50, &["shadowball"])],
            1,
        );
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        assert!(messages(&mut logic).contains(&BattleMessage::NoEffect { target: BattlerId(1) }));
        let gengar = logic.state().battler(BattlerId(1));
        assert!(gengar.at_full_hp());
        assert_eq!(logic.state().battler(BattlerId(0)).moves()[0].pp, 9);
    }

    #[test]
    fn status_move_reports_type_immunity() {
        let mut logic = logic(
            vec![PartyMember::new("pikachu", 50, &["thunderwave"])],
            vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
            2,
        );
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        let messages = messages(&mut logic);
        assert_eq!(logic.state().battler(BattlerId(1)).status(), None);
        assert!(!messages.iter().any(|m| matches!(m, BattleMessage::StatusApplied { .. })));
    }

    #[test]
    fn swords_dance_raises_attack_twice() {
        let mut logic = logic(
            vec![PartyMember::new("garchomp", 50, &["swordsdance"])],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
            3,
        );
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        assert_eq!(logic.state().battler(BattlerId(0)).stage(StageStat::Atk), 2);
        assert!(logic.state().battler(BattlerId(0)).last_move().is_some_and(|m| m.succeeded));
    }

    #[test]
    fn out_of_pp_falls_back_to_struggle() {
        let mut member = PartyMember::new("snorlax", 50, &["tackle"]);
        member.move_pp = vec![0];
        let mut logic = logic(vec![member], vec![PartyMember::new("blissey", 50, &["protect"])], 4);
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        let messages = messages(&mut logic);
        assert!(messages.contains(&BattleMessage::UsedMove {
            user: BattlerId(0),
            move_id: "struggle",
        }));
        let snorlax = logic.state().battler(BattlerId(0));
        assert_eq!(snorlax.max_hp() - snorlax.hp(), snorlax.max_hp() / 4);
    }

    #[test]
    fn fake_out_only_works_on_the_first_turn() {
        let mut logic = logic(
            vec![PartyMember::new("machamp", 50, &["fakeout"])],
            vec![PartyMember::new("blissey", 50, &["protect"])],
            5,
        );
        logic.state.battler_mut(BattlerId(0)).turns_on_field = 1;
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        assert!(messages(&mut logic).contains(&BattleMessage::MoveFailed { user: BattlerId(0) }));
        assert!(logic.state().battler(BattlerId(1)).at_full_hp());
    }

    #[test]
    fn protect_streak_breaks_on_a_turn_without_protect() {
        let mut logic = logic(
            vec![PartyMember::new("blissey", 50, &["protect"])],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
            8,
        );
        let blissey = BattlerId(0);
        execute_attack(&mut logic, blissey, 0, None, 1.0);
        assert!(logic.state().battler(blissey).last_move().is_some_and(|m| m.succeeded));

        logic.state.turn = 2;
        assert_eq!(protect_streak(&logic, blissey), 1);
        // Turn 2 was a pass or a switch: nothing was recorded for it.
        logic.state.turn = 3;
        assert_eq!(protect_streak(&logic, blissey), 0);
    }

    #[test]
    fn rest_sleeps_over_a_burn_and_heals_fully() {
        let mut logic = logic(
            vec![PartyMember::new("snorlax", 50, &["rest"])],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
            9,
        );
        let snorlax = BattlerId(0);
        status::status_change(&mut logic, snorlax, Some(MajorStatus::Burn), None).unwrap();
        let max_hp = logic.state().battler(snorlax).max_hp();
        logic.state.battler_mut(snorlax).set_hp(max_hp / 3);
        execute_attack(&mut logic, snorlax, 0, None, 1.0);
        let battler = logic.state().battler(snorlax);
        assert_eq!(battler.status(), Some(MajorStatus::Sleep));
        assert_eq!(battler.status_count(), 2);
        assert!(battler.at_full_hp());
        assert!(!battler.effects().contains("burn"));
    }

    #[test]
    fn spore_puts_the_target_to_sleep() {
        let mut logic = logic(
            vec![PartyMember::new("snorlax", 50, &["spore"])],
            vec![PartyMember::new("blissey", 50, &["protect"])],
            6,
        );
        execute_attack(&mut logic, BattlerId(0), 0, None, 1.0);
        assert_eq!(logic.state().battler(BattlerId(1)).status(), Some(MajorStatus::Sleep));
    }
}
