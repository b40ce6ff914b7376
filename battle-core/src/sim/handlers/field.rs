use crate::sim::effects::field::{SideConditionKind, TerrainEffect, TrickRoom, WeatherEffect, TRICK_ROOM};
use crate::sim::effects::{Effect, EffectCategory, EffectOwner};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleMessage;
use crate::sim::state::{SweepScope, Terrain, Weather};

/// Sets or clears the weather. Re-setting the active weather fails.
pub fn set_weather(logic: &mut BattleLogic, weather: Option<Weather>, turns: u8) -> bool {
    if logic.state.weather() == weather {
        return false;
    }
    let effects = &mut logic.state.field.effects;
    effects.detach_where(|category| matches!(category, EffectCategory::Weather(_)));
    if let Some(weather) = weather {
        effects.attach(Box::new(WeatherEffect::new(weather, turns)));
    }
    logic.emit(BattleMessage::WeatherChanged { weather });
    logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_post_weather_change(ctx, weather);
        None::<()>
    });
    true
}

pub fn set_terrain(logic: &mut BattleLogic, terrain: Option<Terrain>, turns: u8) -> bool {
    if logic.state.terrain() == terrain {
        return false;
    }
    let effects = &mut logic.state.field.effects;
    effects.detach_where(|category| matches!(category, EffectCategory::Terrain(_)));
    if let Some(terrain) = terrain {
        effects.attach(Box::new(TerrainEffect::new(terrain, turns)));
    }
    logic.emit(BattleMessage::TerrainChanged { terrain });
    logic.sweep(SweepScope::default(), |effect, ctx| {
        effect.on_post_fterrain_change(ctx, terrain);
        None::<()>
    });
    true
}

/// Adds a side condition or another layer of a stackable one.
pub fn add_side_condition(logic: &mut BattleLogic, bank: usize, kind: SideConditionKind) -> bool {
    let condition = kind.name();
    let effects = &mut logic.state.sides[bank].effects;
    let added = match effects.get_mut(condition) {
        Some(existing) => existing.try_stack(),
        None => {
            effects.attach(kind.create());
            true
        }
    };
    if added {
        logic.emit(BattleMessage::SideConditionStarted { bank, condition });
    }
    added
}

/// Trick Room used while active ends it instead.
pub fn toggle_trick_room(logic: &mut BattleLogic) {
    let effects = &mut logic.state.field.effects;
    if effects.detach(TRICK_ROOM).is_some() {
        logic.emit(BattleMessage::FieldConditionEnded { condition: TRICK_ROOM });
    } else {
        effects.attach(Box::new(TrickRoom::new()));
        logic.emit(BattleMessage::FieldConditionStarted { condition: TRICK_ROOM });
    }
}

/// End-of-turn countdown for every timed effect. Expired field and side
/// effects are announced; per-turn volatiles just drop off.
pub(crate) fn tick_effects(logic: &mut BattleLogic) {
    let expired = logic.state.field.effects.tick();
    for effect in expired {
        announce_expiry(logic, EffectOwner::Field, effect.as_ref());
    }
    for bank in 0..2 {
        let expired = logic.state.sides[bank].effects.tick();
        for effect in expired {
            announce_expiry(logic, EffectOwner::Side(bank), effect.as_ref());
        }
    }
    for id in logic.state.active_battlers() {
        logic.state.battler_mut(id).effects.tick();
    }
}

fn announce_expiry(logic: &mut BattleLogic, owner: EffectOwner, effect: &dyn Effect) {
    match (owner, effect.category()) {
        (_, EffectCategory::Weather(_)) => {
            logic.emit(BattleMessage::WeatherChanged { weather: None });
            logic.sweep(SweepScope::default(), |effect, ctx| {
                effect.on_post_weather_change(ctx, None);
                None::<()>
            });
        }
        (_, EffectCategory::Terrain(_)) => {
            logic.emit(BattleMessage::TerrainChanged { terrain: None });
            logic.sweep(SweepScope::default(), |effect, ctx| {
                effect.on_post_fterrain_change(ctx, None);
                None::<()>
            });
        }
        (EffectOwner::Side(bank), _) => logic.emit(BattleMessage::SideConditionEnded {
            bank,
            condition: effect.name(),
        }),
        _ => logic.emit(BattleMessage::FieldConditionEnded {
            condition: effect.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    fn logic() -> BattleLogic {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(
            side("red", PartyMember::new("snorlax", 50, &["tackle"])),
            side("blue", PartyMember::new("blissey", 50, &["protect"])),
        );
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(1)).unwrap();
        logic.start();
        logic
    }

    #[test]
    fn weather_replaces_weather_and_expires() {
        let mut logic = logic();
        assert!(set_weather(&mut logic, Some(Weather::Rain), 5));
        assert!(!set_weather(&mut logic, Some(Weather::Rain), 5));
        assert!(set_weather(&mut logic, Some(Weather::Sun), 2));
        assert_eq!(logic.state().weather(), Some(Weather::Sun));
        tick_effects(&mut logic);
        assert_eq!(logic.state().weather(), Some(Weather::Sun));
        tick_effects(&mut logic);
        assert_eq!(logic.state().weather(), None);
    }

    #[test]
    fn spikes_stack_to_three_layers() {
        let mut logic = logic();
        for _ in 0..3 {
            assert!(add_side_condition(&mut logic, 1, SideConditionKind::Spikes));
        }
        assert!(!add_side_condition(&mut logic, 1, SideConditionKind::Spikes));
        assert!(add_side_condition(&mut logic, 1, SideConditionKind::StealthRock));
    }

    #[test]
    fn trick_room_toggles() {
        let mut logic = logic();
        toggle_trick_room(&mut logic);
        assert!(logic.state().trick_room());
        toggle_trick_room(&mut logic);
        assert!(!logic.state().trick_room());
    }
}
