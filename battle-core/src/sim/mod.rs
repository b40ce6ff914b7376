//! Turn resolution: battler model, effect hooks, handlers and the turn
//! controller.

pub mod action;
pub mod ai;
pub mod battler;
pub mod damage;
pub mod effects;
pub mod handlers;
pub mod info;
pub mod logic;
pub mod message;
pub mod moves;
pub mod rng;
pub mod state;
pub mod stats;

pub use action::{Action, TargetRef};
pub use ai::{ActionProvider, RandomAI};
pub use battler::{Battler, BattlerId};
pub use info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
pub use logic::BattleLogic;
pub use message::{BattleEvent, BattleMessage, BattleOutcome};
pub use state::BattleState;
