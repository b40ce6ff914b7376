use tracing::debug;

use crate::sim::battler::BattlerId;
use crate::sim::effects::status::status_effect;
use crate::sim::effects::{any_effect, first_prevention, Prevention, REGISTRY};
use crate::sim::logic::{BattleLogic, SwitchReason};
use crate::sim::message::BattleMessage;
use crate::sim::state::{BattleState, SweepScope};

/// Shed Shell style passthroughs win over every trapping effect.
pub fn can_switch(state: &BattleState, battler: BattlerId) -> Result<(), Prevention> {
    if any_effect(state, |effect, view| effect.on_switch_passthrough(view, battler)) {
        return Ok(());
    }
    match first_prevention(state, |effect, view| effect.on_switch_prevention(view, battler)) {
        Some(prevention) => Err(prevention),
        None => Ok(()),
    }
}

/// Puts a battler into a field slot and rebuilds its ability, item and status
/// effects. Runs no hooks and emits nothing.
pub(crate) fn place(logic: &mut BattleLogic, bank: usize, position: usize, incoming: BattlerId) {
    let battler = logic.state.battler_mut(incoming);
    battler.position = Some(position);
    battler.switching = false;
    battler.turns_on_field = 0;
    battler.effects.clear();
    if let Some(effect) = REGISTRY.ability(battler.ability()) {
        battler.effects.attach(effect);
    }
    if let Some(effect) = battler.item().and_then(|item| REGISTRY.item(item)) {
        battler.effects.attach(effect);
    }
    if let Some(status) = battler.status() {
        battler.effects.attach(status_effect(status));
    }
    logic.state.sides[bank].active[position] = Some(incoming);
    logic.note_matchups();
}

/// Clears a battler's field slot, its effects and its stat stages.
fn withdraw(logic: &mut BattleLogic, outgoing: BattlerId, position: usize) {
    let bank = logic.state.battler(outgoing).bank;
    logic.state.sides[bank].active[position] = None;
    let battler = logic.state.battler_mut(outgoing);
    battler.position = None;
    battler.switching = false;
    battler.reset_stages();
}

/// Leaves the slot empty when a fainted battler has no replacement.
pub(crate) fn vacate(logic: &mut BattleLogic, outgoing: BattlerId, position: usize) {
    withdraw(logic, outgoing, position);
    logic.state.battler_mut(outgoing).effects.clear();
}

/// Swaps `incoming` into `outgoing`'s slot. The outgoing battler's effects
/// take part in the switch hooks unless it fainted.
pub fn execute_switch(logic: &mut BattleLogic, outgoing: BattlerId, incoming: BattlerId, reason: SwitchReason) {
    let battler = logic.state.battler(outgoing);
    let Some(position) = battler.position() else {
        return;
    };
    let bank = battler.bank;
    let fainted = battler.is_fainted();
    debug!(outgoing = outgoing.0, incoming = incoming.0, ?reason, "switch");
    logic.pending_switches.retain(|pending| pending.battler != outgoing);
    if !fainted {
        logic.emit(BattleMessage::Withdrew { battler: outgoing });
    }
    withdraw(logic, outgoing, position);
    place(logic, bank, position, incoming);
    if reason == SwitchReason::Dragged {
        logic.emit(BattleMessage::DraggedOut { battler: incoming });
    } else {
        logic.emit(BattleMessage::SentOut { battler: incoming });
    }
    let scope = if fainted {
        SweepScope::default()
    } else {
        SweepScope::including(outgoing)
    };
    logic.sweep(scope, |effect, ctx| {
        effect.on_switch_event(ctx, Some(outgoing), incoming);
        None::<()>
    });
    logic.state.battler_mut(outgoing).effects.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
    use crate::sim::stats::{MajorStatus, StageStat};

    fn logic(player: Vec<PartyMember>, opponent: Vec<PartyMember>) -> BattleLogic {
        let side = |name: &str, party| BattleSide {
            name: name.into(),
            party,
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(9)).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn switching_out_drops_stages_and_volatiles() {
        let mut logic = logic(
            vec![
                PartyMember::new("garchomp", 50, &["swordsdance"]),
                PartyMember::new("pikachu", 50, &["thunderbolt"]),
            ],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
        );
        let garchomp = BattlerId(0);
        logic.state.battler_mut(garchomp).set_stage(StageStat::Atk, 2);
        execute_switch(&mut logic, garchomp, BattlerId(1), SwitchReason::Forced);
        let battler = logic.state().battler(garchomp);
        assert!(!battler.is_active());
        assert_eq!(battler.stage(StageStat::Atk), 0);
        assert!(battler.effects().is_empty());
        assert_eq!(logic.state().battler_at(0, 0), Some(BattlerId(1)));
    }

    #[test]
    fn natural_cure_heals_status_on_the_way_out() {
        let mut blissey = PartyMember::new("blissey", 50, &["protect"]);
        blissey.status = Some(MajorStatus::Burn);
        let mut logic = logic(
            vec![blissey, PartyMember::new("pikachu", 50, &["thunderbolt"])],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
        );
        assert!(logic.state().battler(BattlerId(0)).effects().contains("burn"));
        execute_switch(&mut logic, BattlerId(0), BattlerId(1), SwitchReason::Forced);
        assert_eq!(logic.state().battler(BattlerId(0)).status(), None);
    }

    #[test]
    fn stealth_rock_hits_the_incoming_battler() {
        let mut logic = logic(
            vec![
                PartyMember::new("pikachu", 50, &["thunderbolt"]),
                PartyMember::new("charizard", 50, &["flamethrower"]),
            ],
            vec![PartyMember::new("rattata", 20, &["tackle"])],
        );
        super::super::field::add_side_condition(
            &mut logic,
            0,
            crate::sim::effects::field::SideConditionKind::StealthRock,
        );
        execute_switch(&mut logic, BattlerId(0), BattlerId(1), SwitchReason::Forced);
        let charizard = logic.state().battler(BattlerId(1));
        assert_eq!(charizard.max_hp() - charizard.hp(), charizard.max_hp() / 2);
    }
}
