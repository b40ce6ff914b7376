//! Turn resolution engine for creature battles.
//!
//! [`sim::logic::BattleLogic`] resolves turns; [`scene::BattleScene`] wraps it
//! in a phase state machine that reports to a [`scene::BattlePresenter`].
//! Batch callers usually want [`engine::simulate_battle`].

pub mod battle_logger;
pub mod data;
pub mod engine;
pub mod error;
pub mod scene;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle_logger::BattleLogger;
    pub use crate::engine::{simulate_battle, simulate_with, BattleReport};
    pub use crate::error::{ActionRejected, LoadError};
    pub use crate::scene::{BattlePresenter, BattleScene, NullPresenter, Phase};
    pub use crate::sim::{
        Action, ActionProvider, BattleConfig, BattleEvent, BattleInfo, BattleLogic, BattleMessage, BattleOutcome,
        BattleSide, BattleState, BattlerId, PartyMember, RandomAI, TargetRef,
    };
}
