use tracing::{debug, warn};

use crate::sim::battler::BattlerId;
use crate::sim::effects::{EffectCategory, EffectOwner, REGISTRY};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleMessage;

/// Replaces the battler's ability effect and runs the new ability's entry
/// hook, as if it had just switched in.
pub fn change_ability(logic: &mut BattleLogic, battler: BattlerId, ability: &'static str) {
    let Some(effect) = REGISTRY.ability(ability) else {
        warn!(ability, "ability has no effect, keeping the old one");
        return;
    };
    let target = logic.state.battler_mut(battler);
    target.effects.detach_where(|category| category == EffectCategory::Ability);
    target.set_ability(ability);
    target.effects.attach(effect);
    logic.emit(BattleMessage::AbilityChanged { battler, ability });
    let slots = logic
        .state
        .slots_of(EffectOwner::Battler(battler), false)
        .into_iter()
        .filter(|slot| slot.name == ability)
        .collect();
    logic.sweep_slots(slots, |effect, ctx| {
        effect.on_switch_event(ctx, None, battler);
        None::<()>
    });
}

/// Transforms into the mega form. Once per side per battle.
pub fn mega_evolve(logic: &mut BattleLogic, battler: BattlerId) {
    let Some(form) = logic.mega_form(battler) else {
        return;
    };
    let bank = logic.state.battler(battler).bank;
    if logic.state.sides[bank].mega_used || logic.state.battler(battler).is_mega() {
        return;
    }
    debug!(battler = battler.0, form = form.id, "mega evolution");
    let target = logic.state.battler_mut(battler);
    target.set_form(form);
    target.mega_evolved = true;
    logic.state.sides[bank].mega_used = true;
    logic.animate(battler, "mega");
    logic.emit(BattleMessage::MegaEvolved { battler, form: form.id });
    if let Some(ability) = form.abilities.first().copied() {
        if ability != logic.state.battler(battler).ability() {
            change_ability(logic, battler, ability);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
    use crate::sim::stats::StageStat;

    fn logic(player: PartyMember, opponent: PartyMember) -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(8)).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn new_ability_fires_its_entry_hook() {
        let mut logic = logic(
            PartyMember::new("pikachu", 50, &["thunderbolt"]),
            PartyMember::new("garchomp", 50, &["earthquake"]),
        );
        change_ability(&mut logic, BattlerId(0), "intimidate");
        assert_eq!(logic.state().battler(BattlerId(0)).ability(), "intimidate");
        assert_eq!(logic.state().battler(BattlerId(1)).stage(StageStat::Atk), -1);
    }

    #[test]
    fn mega_evolution_needs_the_stone_and_happens_once() {
        let mut logic = logic(
            PartyMember::new("lucario", 50, &["closecombat"]).with_item("lucarionite"),
            PartyMember::new("rattata", 20, &["tackle"]),
        );
        assert!(logic.can_mega_evolve(BattlerId(0)));
        mega_evolve(&mut logic, BattlerId(0));
        let lucario = logic.state().battler(BattlerId(0));
        assert!(lucario.is_mega());
        assert_eq!(lucario.species().id, "lucariomega");
        assert_eq!(lucario.ability(), "adaptability");
        assert!(!logic.can_mega_evolve(BattlerId(0)));
    }
}
