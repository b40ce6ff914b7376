use crate::data::types::Type;
use crate::error::ActionRejected;
use crate::sim::battler::BattlerId;
use crate::sim::effects::any_effect;
use crate::sim::handlers::switch::can_switch;
use crate::sim::logic::BattleLogic;

/// Only the player may run, and only from wild battles.
pub fn can_flee(logic: &BattleLogic, actor: BattlerId) -> Result<(), ActionRejected> {
    let state = &logic.state;
    if !state.wild || !logic.config.allow_flee || state.battler(actor).bank != 0 {
        return Err(ActionRejected::FleeNotAllowed);
    }
    if state.battler(actor).has_type(Type::Ghost)
        || any_effect(state, |effect, view| effect.on_flee_passthrough(view, actor))
    {
        return Ok(());
    }
    can_switch(state, actor).map_err(|prevention| ActionRejected::Trapped(prevention.source))
}

/// Escape roll. A battler at least as fast as every foe always escapes;
/// otherwise the odds grow with each attempt this battle.
pub fn attempt_flee(logic: &mut BattleLogic, actor: BattlerId) -> bool {
    logic.flee_attempts += 1;
    if any_effect(&logic.state, |effect, view| effect.on_flee_passthrough(view, actor)) {
        return true;
    }
    let speed = logic.effective_speed(actor);
    let foe_speed = logic
        .state
        .foes_of(actor)
        .into_iter()
        .map(|foe| logic.effective_speed(foe))
        .max()
        .unwrap_or(0);
    if speed >= foe_speed {
        return true;
    }
    let odds = (speed * 128 / foe_speed.max(1) + 30 * logic.flee_attempts) % 256;
    logic.rng.range(0, 255) < odds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    fn wild(player: PartyMember, wild: PartyMember, config: BattleConfig) -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let mut info = BattleInfo::singles(side("red", player), side("wild", wild));
        info.wild = true;
        let mut logic = BattleLogic::new(&info, config).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn faster_battler_always_escapes() {
        let mut logic = wild(
            PartyMember::new("jolteon", 50, &["thunderbolt"]),
            PartyMember::new("snorlax", 50, &["tackle"]),
            BattleConfig::with_seed(4),
        );
        assert_eq!(can_flee(&logic, BattlerId(0)), Ok(()));
        assert!(attempt_flee(&mut logic, BattlerId(0)));
    }

    #[test]
    fn shadow_tag_traps_unless_ghost() {
        let logic = wild(
            PartyMember::new("snorlax", 50, &["tackle"]),
            PartyMember::new("wobbuffet", 50, &["splash"]),
            BattleConfig::with_seed(4),
        );
        assert_eq!(can_flee(&logic, BattlerId(0)), Err(ActionRejected::Trapped("shadowtag")));
        let logic = wild(
            PartyMember::new("gengar", 50, &["shadowball"]),
            PartyMember::new("wobbuffet", 50, &["splash"]),
            BattleConfig::with_seed(4),
        );
        assert_eq!(can_flee(&logic, BattlerId(0)), Ok(()));
    }

    #[test]
    fn opponent_side_cannot_flee() {
        let logic = wild(
            PartyMember::new("snorlax", 50, &["tackle"]),
            PartyMember::new("rattata", 5, &["tackle"]),
            BattleConfig::with_seed(4),
        );
        assert_eq!(can_flee(&logic, BattlerId(1)), Err(ActionRejected::FleeNotAllowed));
    }
}
