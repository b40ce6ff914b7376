use serde::{Deserialize, Serialize};

use crate::sim::battler::BattlerId;

/// Field slot chosen as a move target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub bank: usize,
    pub position: usize,
}

/// What a battler does this turn. Only lives for one turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Action {
    Attack { move_index: usize, target: Option<TargetRef> },
    UseItem { item: &'static str, target: BattlerId },
    Switch { incoming: BattlerId },
    Flee,
    MegaEvolve { move_index: usize, target: Option<TargetRef> },
    Pass,
}

impl Action {
    /// Kind precedence within a turn; lower goes first.
    pub fn kind_rank(&self) -> u8 {
        match self {
            Action::Flee => 0,
            Action::UseItem { .. } => 1,
            Action::Switch { .. } => 2,
            Action::MegaEvolve { .. } => 3,
            Action::Attack { .. } => 4,
            Action::Pass => 5,
        }
    }

    pub fn move_index(&self) -> Option<usize> {
        match self {
            Action::Attack { move_index, .. } | Action::MegaEvolve { move_index, .. } => Some(*move_index),
            _ => None,
        }
    }
}

/// One step of the execute phase. A mega evolution is queued as its own step
/// ahead of the attack that was chosen with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Act(Action),
    MegaEvolve,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueuedAction {
    pub actor: BattlerId,
    pub step: Step,
    pub priority: i8,
    pub speed: u32,
    pub tiebreak: u64,
    /// Power multiplier granted by the queue (Pursuit on a switching target).
    pub power_bonus: f32,
}

impl QueuedAction {
    pub fn kind_rank(&self) -> u8 {
        match self.step {
            Step::Act(action) => action.kind_rank(),
            Step::MegaEvolve => 3,
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self.step, Step::Act(Action::Attack { .. }))
    }

    /// Same kind and priority tier.
    pub fn same_bracket(&self, other: &QueuedAction) -> bool {
        self.kind_rank() == other.kind_rank() && self.priority == other.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_precedence() {
        let mut kinds = vec![
            Action::Pass,
            Action::Attack {
                move_index: 0,
                target: None,
            },
            Action::Switch { incoming: BattlerId(1) },
            Action::Flee,
            Action::UseItem {
                item: "potion",
                target: BattlerId(0),
            },
        ];
        kinds.sort_by_key(Action::kind_rank);
        assert_eq!(kinds[0], Action::Flee);
        assert!(matches!(kinds[1], Action::UseItem { .. }));
        assert!(matches!(kinds[2], Action::Switch { .. }));
        assert_eq!(kinds[4], Action::Pass);
    }
}
