use crate::sim::battler::BattlerId;
use crate::sim::effects::{first_prevention, Prevention};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleMessage;
use crate::sim::state::{BattleState, SweepScope};
use crate::sim::stats::{apply_stage_change, StageChange, StageStat};

/// A drop caused by someone other than the target can be vetoed by effects.
pub fn stat_change_possible(
    state: &BattleState,
    target: BattlerId,
    stat: StageStat,
    delta: i8,
    launcher: Option<BattlerId>,
) -> Result<StageChange, Prevention> {
    if delta < 0 && launcher != Some(target) {
        if let Some(prevention) = first_prevention(state, |effect, view| {
            effect.on_stat_decrease_prevention(view, stat, target, launcher)
        }) {
            return Err(prevention);
        }
    }
    Ok(apply_stage_change(state.battler(target).stage(stat), delta))
}

/// Applies a stage change and reports it. Returns the delta actually applied.
pub fn stat_change_with_process(
    logic: &mut BattleLogic,
    target: BattlerId,
    stat: StageStat,
    delta: i8,
    launcher: Option<BattlerId>,
) -> i8 {
    let battler = logic.state.battler(target);
    if delta == 0 || battler.is_fainted() || !battler.is_active() {
        return 0;
    }
    match stat_change_possible(&logic.state, target, stat, delta, launcher) {
        Err(prevention) => {
            let message = prevention.message.unwrap_or(BattleMessage::EffectTriggered {
                battler: prevention.holder.unwrap_or(target),
                effect: prevention.source,
            });
            logic.emit(message);
            0
        }
        Ok(StageChange::NoEffect) => {
            logic.emit(BattleMessage::StageUnchanged {
                target,
                stat,
                rising: delta > 0,
            });
            0
        }
        Ok(StageChange::Changed { stage, delta }) => {
            logic.state.battler_mut(target).set_stage(stat, stage);
            logic.emit(BattleMessage::StageChanged { target, stat, delta });
            logic.sweep(SweepScope::default(), |effect, ctx| {
                effect.on_stat_change_post(ctx, stat, delta, target, launcher);
                None::<()>
            });
            delta
        }
    }
}

pub fn reset(logic: &mut BattleLogic, target: BattlerId) {
    logic.state.battler_mut(target).reset_stages();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    fn logic(player: PartyMember, opponent: PartyMember) -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(5)).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn stages_clamp_at_six() {
        let mut logic = logic(
            PartyMember::new("garchomp", 50, &["swordsdance"]),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        let user = BattlerId(0);
        assert_eq!(stat_change_with_process(&mut logic, user, StageStat::Atk, 2, Some(user)), 2);
        assert_eq!(stat_change_with_process(&mut logic, user, StageStat::Atk, 6, Some(user)), 4);
        assert_eq!(stat_change_with_process(&mut logic, user, StageStat::Atk, 2, Some(user)), 0);
        assert_eq!(logic.state().battler(user).stage(StageStat::Atk), 6);
        reset(&mut logic, user);
        assert_eq!(logic.state().battler(user).stage(StageStat::Atk), 0);
    }

    #[test]
    fn clear_body_blocks_foe_drops_only() {
        let mut logic = logic(
            PartyMember::new("metagross", 50, &["ironhead"]),
            PartyMember::new("rattata", 20, &["growl"]),
        );
        let metagross = BattlerId(0);
        assert_eq!(
            stat_change_with_process(&mut logic, metagross, StageStat::Atk, -1, Some(BattlerId(1))),
            0
        );
        assert_eq!(
            stat_change_with_process(&mut logic, metagross, StageStat::Spe, -1, Some(metagross)),
            -1
        );
    }
}
