//! Action selection seam. The engine never decides for a trainer; a provider
//! does, one battler at a time.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::sim::action::Action;
use crate::sim::battler::BattlerId;
use crate::sim::logic::BattleLogic;
use crate::sim::state::BattleState;

pub trait ActionProvider {
    /// Picks an action for `actor` during Collect. Rejected choices fall back
    /// to `Pass`.
    fn choose_action(&mut self, logic: &BattleLogic, actor: BattlerId) -> Action;

    /// Picks the battler that replaces `outgoing`. `bench` is never empty.
    fn choose_replacement(&mut self, _state: &BattleState, outgoing: BattlerId, bench: &[BattlerId]) -> BattlerId {
        bench.first().copied().unwrap_or(outgoing)
    }
}

/// Uniformly random attacker, the runner's default policy. Switches, items
/// and fleeing are only used when no move is legal.
#[derive(Clone, Debug)]
pub struct RandomAI {
    rng: SmallRng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl ActionProvider for RandomAI {
    fn choose_action(&mut self, logic: &BattleLogic, actor: BattlerId) -> Action {
        let legal = logic.legal_actions(actor);
        let attacks: Vec<Action> = legal
            .iter()
            .copied()
            .filter(|action| matches!(action, Action::Attack { .. }))
            .collect();
        let pool = if attacks.is_empty() { &legal } else { &attacks };
        *pool.choose(&mut self.rng).unwrap_or(&Action::Pass)
    }

    fn choose_replacement(&mut self, _state: &BattleState, outgoing: BattlerId, bench: &[BattlerId]) -> BattlerId {
        *bench.choose(&mut self.rng).unwrap_or(&outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};

    #[test]
    fn random_ai_only_picks_legal_attacks() {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let mut member = PartyMember::new("pikachu", 50, &["thunderbolt", "quickattack"]);
        member.move_pp = vec![0, 30];
        let info = BattleInfo::singles(side("red", member), side("blue", PartyMember::new("rattata", 5, &["tackle"])));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(1)).unwrap();
        logic.start();
        let mut ai = RandomAI::new(99);
        for _ in 0..20 {
            assert_eq!(
                ai.choose_action(&logic, BattlerId(0)),
                Action::Attack {
                    move_index: 1,
                    target: None
                }
            );
        }
    }
}
