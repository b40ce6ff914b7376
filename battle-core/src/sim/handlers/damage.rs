use tracing::debug;

use crate::sim::battler::BattlerId;
use crate::sim::effects::{DamageCause, DamagePrevention, EffectCategory};
use crate::sim::logic::{BattleLogic, SwitchReason};
use crate::sim::message::BattleMessage;
use crate::sim::state::SweepScope;

/// Applies damage after the prevention hooks had their say. Returns the HP
/// actually lost.
pub fn damage_change(logic: &mut BattleLogic, target: BattlerId, amount: u16, cause: DamageCause) -> u16 {
    let battler = logic.state.battler(target);
    if amount == 0 || battler.is_fainted() || !battler.is_active() {
        return 0;
    }
    let prevention = logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_damage_prevention(ctx, amount, target, &cause)
    });
    let amount = match prevention {
        Some(DamagePrevention::Prevent) => return 0,
        Some(DamagePrevention::Reduce(reduced)) => reduced.min(amount),
        None => amount,
    };
    let battler = logic.state.battler_mut(target);
    let dealt = amount.min(battler.hp());
    if dealt == 0 {
        return 0;
    }
    let hp = battler.hp() - dealt;
    battler.set_hp(hp);
    battler.last_damage_taken = battler.last_damage_taken.saturating_add(dealt);
    let max_hp = battler.max_hp();
    debug!(target = target.0, dealt, hp, kind = ?cause.kind, "damage");
    logic.emit(BattleMessage::Damaged {
        target,
        amount: dealt,
        hp,
        max_hp,
    });
    if hp == 0 {
        faint(logic, target, dealt, &cause);
    } else {
        logic.sweep(SweepScope::default(), |effect, ctx| {
            effect.on_post_damage(ctx, dealt, target, &cause);
            None::<()>
        });
    }
    dealt
}

fn faint(logic: &mut BattleLogic, target: BattlerId, amount: u16, cause: &DamageCause) {
    logic.emit(BattleMessage::Fainted { battler: target });
    logic.animate(target, "faint");
    logic.sweep(SweepScope::with_fainted(), |effect, ctx| {
        effect.on_post_damage_death(ctx, amount, target, cause);
        None::<()>
    });
    let battler = logic.state.battler_mut(target);
    battler.set_status(None, 0);
    battler.reset_stages();
    battler
        .effects
        .detach_where(|category| matches!(category, EffectCategory::Status(_) | EffectCategory::Volatile));
    logic.award_evs(target);
    logic.queue_switch(target, SwitchReason::Fainted);
}

/// Restores HP up to the maximum. Returns the HP actually gained.
pub fn heal_change(logic: &mut BattleLogic, target: BattlerId, amount: u16) -> u16 {
    let battler = logic.state.battler_mut(target);
    if amount == 0 || battler.is_fainted() || battler.at_full_hp() {
        return 0;
    }
    let healed = amount.min(battler.max_hp() - battler.hp());
    let hp = battler.hp() + healed;
    battler.set_hp(hp);
    let max_hp = battler.max_hp();
    logic.emit(BattleMessage::Healed {
        target,
        amount: healed,
        hp,
        max_hp,
    });
    healed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::DamageKind;
    use crate::sim::handlers::switch;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
    use crate::sim::message::BattleEvent;

    fn logic(player: PartyMember, opponent: PartyMember) -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(3)).unwrap();
        logic.start();
        logic.drain_events();
        logic
    }

    #[test]
    fn damage_never_goes_below_zero() {
        let mut logic = logic(
            PartyMember::new("pikachu", 50, &["thunderbolt"]),
            PartyMember::new("rattata", 5, &["tackle"]),
        );
        let dealt = damage_change(&mut logic, BattlerId(1), u16::MAX, DamageCause::residual());
        let rattata = logic.state().battler(BattlerId(1));
        assert_eq!(dealt, rattata.max_hp());
        assert!(rattata.is_fainted());
        assert!(logic
            .drain_events()
            .contains(&BattleEvent::Message(BattleMessage::Fainted { battler: BattlerId(1) })));
        assert_eq!(logic.pending_switches().len(), 1);
    }

    #[test]
    fn sturdy_leaves_one_hp_from_full() {
        let mut logic = logic(
            PartyMember::new("pikachu", 50, &["thunderbolt"]),
            PartyMember::new("skarmory", 50, &["spikes"]).with_ability("sturdy"),
        );
        let full = logic.state().battler(BattlerId(1)).max_hp();
        let cause = DamageCause::of(DamageKind::Move, Some(BattlerId(0)));
        damage_change(&mut logic, BattlerId(1), full + 50, cause);
        assert_eq!(logic.state().battler(BattlerId(1)).hp(), 1);
    }

    #[test]
    fn neutralizing_gas_is_rechecked_on_every_hit() {
        let side = |name: &str, party| BattleSide {
            name: name.into(),
            party,
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(
            side(
                "red",
                vec![
                    PartyMember::new("weezing", 50, &["sludgebomb"]).with_ability("neutralizinggas"),
                    PartyMember::new("pikachu", 50, &["thunderbolt"]),
                ],
            ),
            side("blue", vec![PartyMember::new("skarmory", 50, &["spikes"]).with_ability("sturdy")]),
        );
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(3)).unwrap();
        logic.start();
        let (weezing, pikachu, skarmory) = (BattlerId(0), BattlerId(1), BattlerId(2));
        let full = logic.state().battler(skarmory).max_hp();
        let hit = |attacker| DamageCause::of(DamageKind::Move, Some(attacker));
        assert!(!logic.state().ability_active(skarmory));

        switch::execute_switch(&mut logic, weezing, pikachu, SwitchReason::Forced);
        assert!(logic.state().ability_active(skarmory));
        damage_change(&mut logic, skarmory, full + 50, hit(pikachu));
        assert_eq!(logic.state().battler(skarmory).hp(), 1);

        heal_change(&mut logic, skarmory, full);
        switch::execute_switch(&mut logic, pikachu, weezing, SwitchReason::Forced);
        damage_change(&mut logic, skarmory, full + 50, hit(weezing));
        assert!(logic.state().battler(skarmory).is_fainted());
    }

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut logic = logic(
            PartyMember::new("pikachu", 50, &["thunderbolt"]),
            PartyMember::new("rattata", 5, &["tackle"]),
        );
        damage_change(&mut logic, BattlerId(0), 10, DamageCause::residual());
        assert_eq!(heal_change(&mut logic, BattlerId(0), 500), 10);
        assert_eq!(heal_change(&mut logic, BattlerId(0), 5), 0);
    }
}
