use super::abilities::ABILITIES;
use super::items::{BagUse, ItemPocket, ITEMS};
use super::moves::{MoveBehavior, MoveCategory, MOVES};
use super::species::POKEDEX;
use super::to_id;
use super::types::{effectiveness, effectiveness_dual, Type};

#[test]
fn charizard_stats() {
    let charizard = POKEDEX
        .get("charizard")
        .expect("Charizard should exist in the Pokedex");
    assert_eq!(charizard.base_stats.hp, 78);
    assert_eq!(charizard.base_stats.atk, 84);
    assert_eq!(charizard.types, [Type::Fire, Type::Flying]);
    let mega = charizard.mega.expect("Charizard has a mega form");
    assert_eq!(mega.stone, "charizarditex");
    assert!(POKEDEX.contains_key(mega.form));
}

#[test]
fn every_species_ability_is_known() {
    for species in POKEDEX.values() {
        for ability in species.abilities {
            assert!(
                ABILITIES.contains_key(ability),
                "{} lists unknown ability {}",
                species.id,
                ability
            );
        }
    }
}

#[test]
fn mega_stones_are_items() {
    for species in POKEDEX.values() {
        if let Some(mega) = species.mega {
            let stone = ITEMS.get(mega.stone).expect("stone registered");
            assert_eq!(stone.pocket, ItemPocket::MegaStone);
        }
    }
}

#[test]
fn thunderbolt_secondary_paralysis() {
    let thunderbolt = MOVES
        .get("thunderbolt")
        .expect("Thunderbolt must be present");
    assert_eq!(thunderbolt.power, 90);
    assert_eq!(thunderbolt.category, MoveCategory::Special);
    match thunderbolt.behavior {
        MoveBehavior::Status { chance, .. } => assert_eq!(chance, 10),
        other => panic!("unexpected behavior {other:?}"),
    }
}

#[test]
fn status_moves_have_no_power() {
    for data in MOVES.values() {
        if data.category == MoveCategory::Status {
            assert_eq!(data.power, 0, "{}", data.id);
        }
    }
}

#[test]
fn balls_carry_bonus() {
    let ultra = ITEMS.get("ultraball").unwrap();
    assert_eq!(ultra.bag_use, BagUse::Ball { bonus: 20 });
}

#[test]
fn type_chart_matchups() {
    assert_eq!(effectiveness(Type::Fire, Type::Grass), 2.0);
    assert_eq!(effectiveness(Type::Normal, Type::Ghost), 0.0);
    assert_eq!(effectiveness_dual(Type::Ice, [Type::Dragon, Type::Ground]), 4.0);
    assert_eq!(effectiveness_dual(Type::Fire, [Type::Fire, Type::Fire]), 0.5);
    assert_eq!(effectiveness_dual(Type::Ground, [Type::Fire, Type::Flying]), 0.0);
}

#[test]
fn ids_are_normalized() {
    assert_eq!(to_id("Choice Band"), "choiceband");
    assert_eq!(to_id("U-turn"), "uturn");
}
