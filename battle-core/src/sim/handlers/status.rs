use tracing::trace;

use crate::data::types::Type;
use crate::sim::battler::BattlerId;
use crate::sim::effects::status::status_effect;
use crate::sim::effects::{first_prevention, Effect, EffectCategory, Prevention};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleMessage;
use crate::sim::state::{BattleState, SweepScope};
use crate::sim::stats::MajorStatus;

/// Why a major status could not be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusBlock {
    Fainted,
    AlreadyStatused,
    TypeImmune,
    Prevented(Prevention),
}

fn type_immune(state: &BattleState, target: BattlerId, status: MajorStatus) -> bool {
    let battler = state.battler(target);
    match status {
        MajorStatus::Burn => battler.has_type(Type::Fire),
        MajorStatus::Freeze => battler.has_type(Type::Ice),
        MajorStatus::Paralysis => battler.has_type(Type::Electric),
        MajorStatus::Poison | MajorStatus::Toxic => battler.has_type(Type::Poison) || battler.has_type(Type::Steel),
        MajorStatus::Sleep => false,
    }
}

pub fn status_appliable(
    state: &BattleState,
    target: BattlerId,
    status: MajorStatus,
    launcher: Option<BattlerId>,
) -> Result<(), StatusBlock> {
    if state.battler(target).status().is_some() {
        return Err(StatusBlock::AlreadyStatused);
    }
    replacement_appliable(state, target, status, launcher)
}

/// Same checks minus the one-status-at-a-time rule.
fn replacement_appliable(
    state: &BattleState,
    target: BattlerId,
    status: MajorStatus,
    launcher: Option<BattlerId>,
) -> Result<(), StatusBlock> {
    if state.battler(target).is_fainted() {
        return Err(StatusBlock::Fainted);
    }
    if type_immune(state, target, status) {
        return Err(StatusBlock::TypeImmune);
    }
    match first_prevention(state, |effect, view| {
        effect.on_status_prevention(view, status, target, launcher)
    }) {
        Some(prevention) => Err(StatusBlock::Prevented(prevention)),
        None => Ok(()),
    }
}

/// Player-facing message for a failed status move.
pub fn report_block(logic: &mut BattleLogic, target: BattlerId, block: StatusBlock) {
    let message = match block {
        StatusBlock::Fainted => return,
        StatusBlock::AlreadyStatused => BattleMessage::AlreadyStatused { target },
        StatusBlock::TypeImmune => BattleMessage::NoEffect { target },
        StatusBlock::Prevented(prevention) => prevention.message.unwrap_or(BattleMessage::StatusPrevented {
            target,
            by: prevention.source,
        }),
    };
    logic.emit(message);
}

/// Sets or cures (`None`) a major status. The matching status effect is
/// attached to or detached from the battler's list.
pub fn status_change(
    logic: &mut BattleLogic,
    target: BattlerId,
    status: Option<MajorStatus>,
    launcher: Option<BattlerId>,
) -> Result<(), StatusBlock> {
    match status {
        None => {
            let battler = logic.state.battler_mut(target);
            let Some(old) = battler.status() else {
                return Ok(());
            };
            battler.set_status(None, 0);
            battler
                .effects
                .detach_where(|category| matches!(category, EffectCategory::Status(_)));
            logic.emit(BattleMessage::StatusCured { target, status: old });
        }
        Some(new) => {
            status_appliable(&logic.state, target, new, launcher)?;
            inflict(logic, target, new);
        }
    }
    post_status_change(logic, target, status, launcher);
    Ok(())
}

/// Sets a major status over whatever the target already has (Rest). The
/// old status is replaced without a cure message.
pub fn force_status(
    logic: &mut BattleLogic,
    target: BattlerId,
    status: MajorStatus,
    launcher: Option<BattlerId>,
) -> Result<(), StatusBlock> {
    replacement_appliable(&logic.state, target, status, launcher)?;
    logic
        .state
        .battler_mut(target)
        .effects
        .detach_where(|category| matches!(category, EffectCategory::Status(_)));
    inflict(logic, target, status);
    post_status_change(logic, target, Some(status), launcher);
    Ok(())
}

fn inflict(logic: &mut BattleLogic, target: BattlerId, new: MajorStatus) {
    let count = match new {
        MajorStatus::Sleep => logic.rng.range(1, 3) as u8,
        MajorStatus::Toxic => 1,
        _ => 0,
    };
    let battler = logic.state.battler_mut(target);
    battler.set_status(Some(new), count);
    battler.effects.attach(status_effect(new));
    trace!(target = target.0, status = new.name(), count, "status applied");
    logic.emit(BattleMessage::StatusApplied { target, status: new });
}

fn post_status_change(
    logic: &mut BattleLogic,
    target: BattlerId,
    status: Option<MajorStatus>,
    launcher: Option<BattlerId>,
) {
    logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_post_status_change(ctx, status, target, launcher);
        None::<()>
    });
}

pub fn set_status_count(logic: &mut BattleLogic, target: BattlerId, count: u8) {
    logic.state.battler_mut(target).set_status_count(count);
}

/// Attaches a volatile condition unless the target already has it or an
/// effect prevents it. True if attached.
pub fn attach_volatile(logic: &mut BattleLogic, target: BattlerId, effect: Box<dyn Effect>) -> bool {
    let name = effect.name();
    let battler = logic.state.battler(target);
    if battler.is_fainted() || !battler.is_active() || battler.effects.contains(name) {
        return false;
    }
    if let Some(prevention) = first_prevention(&logic.state, |effect, view| {
        effect.on_volatile_prevention(view, name, target)
    }) {
        let message = prevention.message.unwrap_or(BattleMessage::StatusPrevented {
            target,
            by: prevention.source,
        });
        logic.emit(message);
        return false;
    }
    logic.state.battler_mut(target).effects.attach(effect);
    logic.emit(BattleMessage::VolatileStarted { target, volatile: name });
    true
}

pub fn detach_volatile(logic: &mut BattleLogic, target: BattlerId, name: &'static str) {
    if logic.state.battler_mut(target).effects.detach(name).is_some() {
        logic.emit(BattleMessage::VolatileEnded { target, volatile: name });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::volatile::{Confusion, CONFUSION};
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    fn logic(player: PartyMember, opponent: PartyMember) -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(11)).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn only_one_major_status_at_a_time() {
        let mut logic = logic(
            PartyMember::new("snorlax", 50, &["tackle"]),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        status_change(&mut logic, BattlerId(0), Some(MajorStatus::Burn), None).unwrap();
        assert_eq!(
            status_change(&mut logic, BattlerId(0), Some(MajorStatus::Paralysis), None),
            Err(StatusBlock::AlreadyStatused)
        );
        assert!(logic.state().battler(BattlerId(0)).effects().contains("burn"));
        status_change(&mut logic, BattlerId(0), None, None).unwrap();
        let snorlax = logic.state().battler(BattlerId(0));
        assert_eq!(snorlax.status(), None);
        assert!(!snorlax.effects().contains("burn"));
    }

    #[test]
    fn forced_status_replaces_the_current_one() {
        let mut logic = logic(
            PartyMember::new("snorlax", 50, &["rest"]),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        let snorlax = BattlerId(0);
        status_change(&mut logic, snorlax, Some(MajorStatus::Burn), None).unwrap();
        force_status(&mut logic, snorlax, MajorStatus::Sleep, None).unwrap();
        let battler = logic.state().battler(snorlax);
        assert_eq!(battler.status(), Some(MajorStatus::Sleep));
        assert!(!battler.effects().contains("burn"));
        assert!(battler.effects().contains("sleep"));

        logic.state.battler_mut(snorlax).set_hp(0);
        assert_eq!(
            force_status(&mut logic, snorlax, MajorStatus::Paralysis, None),
            Err(StatusBlock::Fainted)
        );
    }

    #[test]
    fn type_immunities() {
        let mut logic = logic(
            PartyMember::new("pikachu", 50, &["thunderbolt"]),
            PartyMember::new("skarmory", 50, &["spikes"]),
        );
        assert_eq!(
            status_change(&mut logic, BattlerId(0), Some(MajorStatus::Paralysis), None),
            Err(StatusBlock::TypeImmune)
        );
        assert_eq!(
            status_change(&mut logic, BattlerId(1), Some(MajorStatus::Toxic), None),
            Err(StatusBlock::TypeImmune)
        );
    }

    #[test]
    fn sleep_lasts_one_to_three_turns() {
        let mut logic = logic(
            PartyMember::new("snorlax", 50, &["tackle"]),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        status_change(&mut logic, BattlerId(1), Some(MajorStatus::Sleep), Some(BattlerId(0))).unwrap();
        assert!((1..=3).contains(&logic.state().battler(BattlerId(1)).status_count()));
    }

    #[test]
    fn volatiles_do_not_stack() {
        let mut logic = logic(
            PartyMember::new("snorlax", 50, &["tackle"]),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        assert!(attach_volatile(&mut logic, BattlerId(1), Box::new(Confusion::new(3))));
        assert!(!attach_volatile(&mut logic, BattlerId(1), Box::new(Confusion::new(3))));
        detach_volatile(&mut logic, BattlerId(1), CONFUSION);
        assert!(!logic.state().battler(BattlerId(1)).effects().contains(CONFUSION));
    }
}
