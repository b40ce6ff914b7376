//! One-call battle simulation for batch callers.

use serde::Serialize;
use tracing::debug;

use crate::battle_logger::BattleLogger;
use crate::error::LoadError;
use crate::scene::BattleScene;
use crate::sim::ai::{ActionProvider, RandomAI};
use crate::sim::info::{BattleConfig, BattleInfo, PartyMember};
use crate::sim::logic::BattleLogic;
use crate::sim::message::BattleOutcome;

/// Result of a finished battle, with both rosters copied back.
#[derive(Clone, Debug, Serialize)]
pub struct BattleReport {
    pub seed: u64,
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub parties: [Vec<PartyMember>; 2],
    /// The wild battler, when the battle ended with a capture.
    pub caught: Option<PartyMember>,
    /// Protocol log; empty unless requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

impl BattleReport {
    pub fn winner(&self) -> Option<usize> {
        match self.outcome {
            BattleOutcome::Won(bank) => Some(bank),
            _ => None,
        }
    }
}

/// Runs a battle to completion with the given providers.
pub fn simulate_with(
    info: &BattleInfo,
    config: BattleConfig,
    providers: &mut [&mut dyn ActionProvider; 2],
    keep_log: bool,
) -> Result<BattleReport, LoadError> {
    let seed = config.seed;
    let logic = BattleLogic::new(info, config)?;
    let mut logger = BattleLogger::new();
    let (outcome, logic) = if keep_log {
        let mut scene = BattleScene::new(logic, &mut logger);
        let outcome = scene.drive(providers);
        (outcome, scene.into_logic())
    } else {
        let mut scene = BattleScene::headless(logic);
        let outcome = scene.drive(providers);
        (outcome, scene.into_logic())
    };
    debug!(seed, ?outcome, turns = logic.turn(), "simulation finished");
    Ok(BattleReport {
        seed,
        outcome,
        turns: logic.turn(),
        parties: [logic.party_snapshot(0), logic.party_snapshot(1)],
        caught: logic.caught_member(),
        log: logger.into_lines(),
    })
}

/// Random-vs-random battle; both providers are seeded from `config.seed`.
pub fn simulate_battle(info: &BattleInfo, config: BattleConfig, keep_log: bool) -> Result<BattleReport, LoadError> {
    let mut player = RandomAI::new(config.seed.wrapping_mul(2).wrapping_add(1));
    let mut opponent = RandomAI::new(config.seed.wrapping_mul(2).wrapping_add(2));
    simulate_with(info, config, &mut [&mut player, &mut opponent], keep_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::BattleSide;

    fn info() -> BattleInfo {
        let side = |name: &str, party| BattleSide {
            name: name.into(),
            party,
            ..BattleSide::default()
        };
        BattleInfo::singles(
            side(
                "red",
                vec![
                    PartyMember::new("charizard", 50, &["flamethrower", "dragonclaw"]),
                    PartyMember::new("blastoise", 50, &["surf", "icebeam"]),
                ],
            ),
            side(
                "blue",
                vec![
                    PartyMember::new("venusaur", 50, &["gigadrain", "sludgebomb"]),
                    PartyMember::new("pikachu", 50, &["thunderbolt", "quickattack"]),
                ],
            ),
        )
    }

    #[test]
    fn same_seed_same_report() {
        let a = simulate_battle(&info(), BattleConfig::with_seed(42), true).unwrap();
        let b = simulate_battle(&info(), BattleConfig::with_seed(42), true).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.log, b.log);
        assert_eq!(a.parties, b.parties);
    }

    #[test]
    fn loser_party_is_all_fainted() {
        let report = simulate_battle(&info(), BattleConfig::with_seed(7), false).unwrap();
        assert!(report.log.is_empty());
        let loser = match report.outcome {
            BattleOutcome::Won(bank) => 1 - bank,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert!(report.parties[loser].iter().all(|m| m.hp == Some(0)));
        assert_eq!(report.winner(), Some(1 - loser));
    }

    #[test]
    fn load_errors_surface() {
        let mut bad = info();
        bad.sides[1].party[0].species = "missingno".into();
        let err = simulate_battle(&bad, BattleConfig::default(), false).unwrap_err();
        assert_eq!(err, LoadError::UnknownSpecies("missingno".into()));
    }
}
