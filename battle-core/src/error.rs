use thiserror::Error;

use crate::sim::battler::BattlerId;

/// Malformed static input, reported before the first turn.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("unknown species `{0}`")]
    UnknownSpecies(String),
    #[error("{species} knows unknown move `{id}`")]
    UnknownMove { species: String, id: String },
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("unknown ability `{0}`")]
    UnknownAbility(String),
    #[error("ability `{0}` has no registered effect")]
    UnregisteredAbility(String),
    #[error("side {0} has an empty party")]
    EmptyParty(usize),
    #[error("{species} has {count} moves (at most 4)")]
    TooManyMoves { species: String, count: usize },
    #[error("{0} has no moves")]
    NoMoves(String),
    #[error("{species} has invalid level {level}")]
    InvalidLevel { species: String, level: u8 },
    #[error("battle size must be 1 or 2, got {0}")]
    InvalidBattleSize(usize),
}

/// Why an action was refused at collect time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("actions are only accepted while collecting")]
    NotCollecting,
    #[error("battler {0:?} is not on the field")]
    NotActive(BattlerId),
    #[error("battler {0:?} has fainted")]
    Fainted(BattlerId),
    #[error("no move in slot {0}")]
    NoSuchMove(usize),
    #[error("{0} has no PP left")]
    NoPp(&'static str),
    #[error("{move_id} is disabled by {by}")]
    MoveDisabled { move_id: &'static str, by: &'static str },
    #[error("invalid target")]
    InvalidTarget,
    #[error("switching is blocked by {0}")]
    SwitchBlocked(&'static str),
    #[error("cannot switch to {0:?}")]
    InvalidSwitch(BattlerId),
    #[error("{0} is not in the bag")]
    NotInBag(String),
    #[error("{0} cannot be used here")]
    ItemNotUsable(String),
    #[error("cannot flee this battle")]
    FleeNotAllowed,
    #[error("escape is blocked by {0}")]
    Trapped(&'static str),
    #[error("cannot mega evolve")]
    MegaUnavailable,
    #[error("action cancelled")]
    Cancelled,
}
