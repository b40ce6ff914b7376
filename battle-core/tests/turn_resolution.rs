use creature_battle_core::error::ActionRejected;
use creature_battle_core::prelude::*;
use creature_battle_core::sim::effects::{DamageCause, DamageKind};
use creature_battle_core::sim::handlers::damage::damage_change;
use creature_battle_core::sim::handlers::status::status_change;
use creature_battle_core::sim::logic::{PendingSwitch, SwitchReason};
use creature_battle_core::sim::stats::MajorStatus;

fn side(name: &str, party: Vec<PartyMember>) -> BattleSide {
    BattleSide {
        name: name.to_string(),
        party,
        ..BattleSide::default()
    }
}

fn attack(move_index: usize) -> Action {
    Action::Attack {
        move_index,
        target: None,
    }
}

fn started(info: &BattleInfo, seed: u64) -> BattleLogic {
    let mut logic = BattleLogic::new(info, BattleConfig::with_seed(seed)).expect("valid battle");
    logic.start();
    logic
}

#[test]
fn faster_battler_acts_first() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("jolteon", 50, &["thunderbolt"])]),
        side("b", vec![PartyMember::new("snorlax", 50, &["bodyslam"])]),
    );
    let mut logic = started(&info, 5);
    let (fast, slow) = (BattlerId(0), BattlerId(1));
    assert!(logic.effective_speed(fast) > logic.effective_speed(slow));

    // Submission order must not matter.
    logic.submit_action(slow, attack(0)).unwrap();
    logic.submit_action(fast, attack(0)).unwrap();
    logic.order_actions();
    let order: Vec<BattlerId> = logic.queued().map(|queued| queued.actor).collect();
    assert_eq!(order, vec![fast, slow]);

    logic.drain_events();
    assert!(logic.execute_next());
    let first_move = logic.drain_events().into_iter().find_map(|event| match event {
        BattleEvent::Message(BattleMessage::UsedMove { user, .. }) => Some(user),
        _ => None,
    });
    assert_eq!(first_move, Some(fast));
}

#[test]
fn speed_ties_are_reproducible_per_seed() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("jolteon", 50, &["thunderbolt"])]),
        side("b", vec![PartyMember::new("jolteon", 50, &["thunderbolt"])]),
    );
    let leader = |seed: u64| {
        let mut logic = started(&info, seed);
        logic.submit_action(BattlerId(0), attack(0)).unwrap();
        logic.submit_action(BattlerId(1), attack(0)).unwrap();
        logic.order_actions();
        let actor = logic.queued().next().map(|queued| queued.actor);
        actor
    };
    for seed in 0..16 {
        assert_eq!(leader(seed), leader(seed));
    }
    let leaders: Vec<_> = (0..64).map(leader).collect();
    assert!(leaders.contains(&Some(BattlerId(0))));
    assert!(leaders.contains(&Some(BattlerId(1))));
}

#[test]
fn oran_berry_heals_once_below_half() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("snorlax", 50, &["bodyslam"]).with_item("oranberry")]),
        side("b", vec![PartyMember::new("pidgey", 50, &["tackle"])]),
    );
    let mut logic = started(&info, 1);
    let holder = BattlerId(0);
    let max_hp = logic.state().battler(holder).max_hp();
    let sixty = max_hp * 60 / 100;
    let forty = max_hp * 40 / 100;

    damage_change(&mut logic, holder, max_hp - sixty, DamageCause::residual());
    assert_eq!(logic.state().battler(holder).hp(), sixty);
    assert_eq!(logic.state().battler(holder).item(), Some("oranberry"));

    logic.drain_events();
    damage_change(&mut logic, holder, sixty - forty, DamageCause::of(DamageKind::Residual, None));
    let battler = logic.state().battler(holder);
    assert_eq!(battler.hp(), forty + 10);
    assert_eq!(battler.item(), None);
    assert!(battler.item_consumed_this_turn());
    assert!(!battler.effects().contains("oranberry"));
    let events = logic.drain_events();
    assert!(events.contains(&BattleEvent::Message(BattleMessage::ItemChanged {
        holder,
        old: Some("oranberry"),
        new: None,
        consumed: true,
    })));

    // A later end of turn finds no berry left to trigger.
    logic.submit_action(BattlerId(0), Action::Pass).unwrap();
    logic.submit_action(BattlerId(1), Action::Pass).unwrap();
    logic.order_actions();
    while logic.execute_next() {}
    logic.end_turn();
    let battler = logic.state().battler(holder);
    assert_eq!(battler.hp(), forty + 10);
    assert_eq!(battler.item(), None);
    assert!(!battler.item_consumed_this_turn());

    let snapshot = logic.party_snapshot(0);
    assert_eq!(snapshot[0].item, None);
}

#[test]
fn berry_fires_once_when_residual_damage_and_end_of_turn_meet() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("blissey", 50, &["recover"]).with_item("sitrusberry")]),
        side("b", vec![PartyMember::new("rattata", 20, &["tackle"])]),
    );
    let mut logic = started(&info, 3);
    let holder = BattlerId(0);
    let max_hp = logic.state().battler(holder).max_hp();
    let start_hp = max_hp / 2 + 5;
    damage_change(&mut logic, holder, max_hp - start_hp, DamageCause::residual());
    status_change(&mut logic, holder, Some(MajorStatus::Poison), None).unwrap();
    assert_eq!(logic.state().battler(holder).item(), Some("sitrusberry"));

    logic.submit_action(BattlerId(0), Action::Pass).unwrap();
    logic.submit_action(BattlerId(1), Action::Pass).unwrap();
    logic.order_actions();
    while logic.execute_next() {}
    logic.drain_events();
    logic.end_turn();

    // Poison drops the holder to half, the berry reacts to that damage and
    // the held-item pass of the same end of turn finds nothing left.
    let heals = logic
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, BattleEvent::Message(BattleMessage::Healed { target, .. }) if *target == holder))
        .count();
    assert_eq!(heals, 1);
    let battler = logic.state().battler(holder);
    assert_eq!(battler.hp(), start_hp - max_hp / 8 + max_hp / 4);
    assert_eq!(battler.item(), None);
}

#[test]
fn focus_sash_holds_on_from_full_hp_only() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("pikachu", 50, &["thunderbolt"]).with_item("focussash")]),
        side("b", vec![PartyMember::new("garchomp", 50, &["earthquake"])]),
    );
    let mut logic = started(&info, 4);
    let (holder, foe) = (BattlerId(0), BattlerId(1));
    let hit = DamageCause::of(DamageKind::Move, Some(foe));

    damage_change(&mut logic, holder, u16::MAX, hit);
    let battler = logic.state().battler(holder);
    assert_eq!(battler.hp(), 1);
    assert_eq!(battler.item(), None);
    assert!(battler.item_consumed_this_turn());

    damage_change(&mut logic, holder, 5, hit);
    assert!(logic.state().battler(holder).is_fainted());
}

#[test]
fn focus_sash_ignores_residual_damage() {
    let info = BattleInfo::singles(
        side("a", vec![PartyMember::new("pikachu", 50, &["thunderbolt"]).with_item("focussash")]),
        side("b", vec![PartyMember::new("garchomp", 50, &["earthquake"])]),
    );
    let mut logic = started(&info, 4);
    damage_change(&mut logic, BattlerId(0), u16::MAX, DamageCause::residual());
    assert!(logic.state().battler(BattlerId(0)).is_fainted());
}

#[test]
fn eject_button_queues_a_switch_for_its_holder() {
    let info = BattleInfo::singles(
        side(
            "a",
            vec![
                PartyMember::new("pikachu", 50, &["thunderbolt"]).with_item("ejectbutton"),
                PartyMember::new("snorlax", 50, &["bodyslam"]),
            ],
        ),
        side("b", vec![PartyMember::new("garchomp", 50, &["earthquake"])]),
    );
    let mut logic = started(&info, 6);
    let (holder, bench, foe) = (BattlerId(0), BattlerId(1), BattlerId(2));

    damage_change(&mut logic, holder, 10, DamageCause::of(DamageKind::Move, Some(foe)));
    assert_eq!(logic.state().battler(holder).item(), None);
    assert_eq!(
        logic.pending_switches(),
        &[PendingSwitch {
            battler: holder,
            reason: SwitchReason::Forced
        }]
    );
    assert!(logic.state().battler(holder).is_switching());

    logic.apply_pending_switches(&mut |_: &BattleState, _: BattlerId, bench: &[BattlerId]| bench[0]);
    assert!(logic.pending_switches().is_empty());
    assert_eq!(logic.state().battler_at(0, 0), Some(bench));
    assert!(!logic.state().battler(holder).is_active());
    assert!(!logic.state().battler(holder).is_switching());
}

#[test]
fn choice_lock_holds_until_switch_out() {
    let info = BattleInfo::singles(
        side(
            "a",
            vec![
                PartyMember::new("garchomp", 50, &["earthquake", "dragonclaw"]).with_item("choiceband"),
                PartyMember::new("pikachu", 50, &["thunderbolt"]),
            ],
        ),
        side("b", vec![PartyMember::new("skarmory", 50, &["splash"])]),
    );
    let logic = BattleLogic::new(&info, BattleConfig::with_seed(9)).unwrap();
    let mut scene = BattleScene::headless(logic);
    let (garchomp, pikachu, foe) = (BattlerId(0), BattlerId(1), BattlerId(2));
    assert_eq!(scene.run_turn(), Phase::Collect);

    // Turn 1: earthquake misses the flyer but still sets the lock.
    scene.submit_action(garchomp, attack(0)).unwrap();
    scene.submit_action(foe, Action::Pass).unwrap();
    assert_eq!(scene.run_turn(), Phase::Collect);

    assert_eq!(
        scene.submit_action(garchomp, attack(1)),
        Err(ActionRejected::MoveDisabled {
            move_id: "dragonclaw",
            by: "choiceband"
        })
    );
    scene.submit_action(garchomp, attack(0)).unwrap();
    assert_eq!(scene.retract_action(garchomp), Some(attack(0)));

    // Turn 2: switch out, turn 3: come back.
    scene.submit_action(garchomp, Action::Switch { incoming: pikachu }).unwrap();
    scene.submit_action(foe, Action::Pass).unwrap();
    assert_eq!(scene.run_turn(), Phase::Collect);
    assert!(!scene.state().battler(garchomp).is_active());
    scene.submit_action(pikachu, Action::Switch { incoming: garchomp }).unwrap();
    scene.submit_action(foe, Action::Pass).unwrap();
    assert_eq!(scene.run_turn(), Phase::Collect);

    assert!(scene.state().battler(garchomp).is_active());
    assert_eq!(scene.submit_action(garchomp, attack(1)), Ok(()));
}

#[test]
fn drive_finishes_a_doubles_battle() {
    let party = |moves: &[&str]| {
        vec![
            PartyMember::new("tyranitar", 50, moves),
            PartyMember::new("dragonite", 50, moves),
            PartyMember::new("metagross", 50, moves),
        ]
    };
    let info = BattleInfo {
        battle_size: 2,
        ..BattleInfo::singles(
            side("a", party(&["crunch", "earthquake", "protect"])),
            side("b", party(&["ironhead", "stoneedge", "tackle"])),
        )
    };
    let report = simulate_battle(&info, BattleConfig::with_seed(2024), true).unwrap();
    assert!(matches!(report.outcome, BattleOutcome::Won(_) | BattleOutcome::Draw));
    assert!(report.turns >= 1);
    assert!(report.log.iter().any(|line| line.starts_with("|switch|p1b: ")));
    for party in &report.parties {
        for member in party {
            let hp = member.hp.unwrap_or_default();
            assert!(hp <= 500);
        }
    }
}
