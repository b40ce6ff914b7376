use creature_battle_core::prelude::*;
use creature_battle_core::sim::damage::{damage_from_inputs, DamageInputs};
use creature_battle_core::sim::effects::DamageCause;
use creature_battle_core::sim::handlers::damage::{damage_change, heal_change};
use creature_battle_core::sim::stats::{apply_stage_change, StageChange, MAX_STAGE, MIN_STAGE};
use proptest::prelude::*;

fn duel() -> BattleLogic {
    let side = |name: &str, species: &str| BattleSide {
        name: name.to_string(),
        party: vec![PartyMember::new(species, 50, &["tackle"])],
        ..BattleSide::default()
    };
    let info = BattleInfo::singles(side("a", "blissey"), side("b", "rattata"));
    let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(0)).unwrap();
    logic.start();
    logic
}

proptest! {
    #[test]
    fn prop_damage_is_at_least_one_unless_immune(
        level in 1u8..=100,
        attack in 1u16..=999,
        defense in 1u16..=999,
        power in 1u16..=250,
        random in 85u32..=100,
        critical in any::<bool>(),
        stab in any::<bool>(),
        effectiveness in prop::sample::select(vec![0.0f32, 0.25, 0.5, 1.0, 2.0, 4.0]),
    ) {
        let damage = damage_from_inputs(&DamageInputs {
            level,
            attack,
            defense,
            power,
            random,
            critical,
            stab,
            effectiveness,
            ..DamageInputs::default()
        });
        if effectiveness == 0.0 {
            prop_assert_eq!(damage, 0);
        } else {
            prop_assert!(damage >= 1);
        }
    }

    #[test]
    fn prop_hp_stays_within_bounds(hits in proptest::collection::vec((any::<bool>(), 0u16..=400), 1..12)) {
        let mut logic = duel();
        let target = BattlerId(0);
        let max_hp = logic.state().battler(target).max_hp();
        for (is_heal, amount) in hits {
            let before = logic.state().battler(target).hp();
            if is_heal {
                let healed = heal_change(&mut logic, target, amount);
                prop_assert!(healed <= max_hp - before);
            } else {
                let dealt = damage_change(&mut logic, target, amount, DamageCause::residual());
                prop_assert!(dealt <= before);
            }
            prop_assert!(logic.state().battler(target).hp() <= max_hp);
        }
    }

    #[test]
    fn prop_stage_changes_clamp(current in MIN_STAGE..=MAX_STAGE, requested in -12i8..=12) {
        match apply_stage_change(current, requested) {
            StageChange::NoEffect => {
                prop_assert!(requested == 0 || (requested > 0 && current == MAX_STAGE) || (requested < 0 && current == MIN_STAGE));
            }
            StageChange::Changed { stage, delta } => {
                prop_assert!((MIN_STAGE..=MAX_STAGE).contains(&stage));
                prop_assert_eq!(stage - current, delta);
                prop_assert_eq!(delta.signum(), requested.signum());
                prop_assert!(delta.abs() <= requested.abs());
            }
        }
    }
}

#[test]
fn stage_clamp_examples() {
    assert_eq!(apply_stage_change(2, 6), StageChange::Changed { stage: 6, delta: 4 });
    assert_eq!(apply_stage_change(6, 1), StageChange::NoEffect);
    assert_eq!(apply_stage_change(-6, -2), StageChange::NoEffect);
}
