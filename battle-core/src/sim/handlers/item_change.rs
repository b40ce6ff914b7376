use tracing::trace;

use crate::sim::battler::BattlerId;
use crate::sim::effects::{EffectCategory, REGISTRY};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleMessage;
use crate::sim::state::SweepScope;

/// Replaces the held item and its effect. `consumed` marks the old item as
/// used up (berries, Focus Sash) so it can be restored after the battle.
pub fn change_item(logic: &mut BattleLogic, holder: BattlerId, item: Option<&'static str>, consumed: bool) {
    let battler = logic.state.battler_mut(holder);
    let old = battler.item();
    if old == item {
        return;
    }
    battler.set_item(item);
    battler.effects.detach_where(|category| category == EffectCategory::Item);
    if let Some(effect) = item.and_then(|id| REGISTRY.item(id)) {
        battler.effects.attach(effect);
    }
    if consumed {
        battler.item_consumed_this_turn = true;
        if battler.consumed_item.is_none() {
            battler.consumed_item = old;
        }
    }
    trace!(holder = holder.0, ?old, ?item, consumed, "item changed");
    logic.emit(BattleMessage::ItemChanged {
        holder,
        old,
        new: item,
        consumed,
    });
    logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_post_item_change(ctx, holder, old, item);
        None::<()>
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    #[test]
    fn swapping_items_swaps_effects() {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(
            side("red", PartyMember::new("gengar", 50, &["shadowball"]).with_item("lifeorb")),
            side("blue", PartyMember::new("rattata", 20, &["tackle"])),
        );
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(2)).unwrap();
        logic.start();
        let gengar = BattlerId(0);
        assert!(logic.state().battler(gengar).effects().contains("lifeorb"));
        change_item(&mut logic, gengar, Some("leftovers"), false);
        let battler = logic.state().battler(gengar);
        assert!(!battler.effects().contains("lifeorb"));
        assert!(battler.effects().contains("leftovers"));
        change_item(&mut logic, gengar, None, true);
        let battler = logic.state().battler(gengar);
        assert_eq!(battler.item(), None);
        assert!(battler.item_consumed_this_turn());
        assert_eq!(battler.effects().len(), 1);
    }
}
