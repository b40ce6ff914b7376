use serde::{Deserialize, Serialize};

use crate::sim::battler::BattlerId;
use crate::sim::state::{Terrain, Weather};
use crate::sim::stats::{MajorStatus, StageStat};

/// Player-visible battle text as typed data. Templating is the presenter's job.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleMessage {
    TurnStarted { turn: u32 },
    SentOut { battler: BattlerId },
    Withdrew { battler: BattlerId },
    DraggedOut { battler: BattlerId },
    UsedMove { user: BattlerId, move_id: &'static str },
    MoveFailed { user: BattlerId },
    Missed { user: BattlerId, target: BattlerId },
    NoEffect { target: BattlerId },
    SuperEffective { target: BattlerId },
    NotVeryEffective { target: BattlerId },
    CriticalHit { target: BattlerId },
    Damaged { target: BattlerId, amount: u16, hp: u16, max_hp: u16 },
    Healed { target: BattlerId, amount: u16, hp: u16, max_hp: u16 },
    Fainted { battler: BattlerId },
    StatusApplied { target: BattlerId, status: MajorStatus },
    StatusCured { target: BattlerId, status: MajorStatus },
    AlreadyStatused { target: BattlerId },
    StatusPrevented { target: BattlerId, by: &'static str },
    StageChanged { target: BattlerId, stat: StageStat, delta: i8 },
    StageUnchanged { target: BattlerId, stat: StageStat, rising: bool },
    ItemChanged { holder: BattlerId, old: Option<&'static str>, new: Option<&'static str>, consumed: bool },
    AbilityChanged { battler: BattlerId, ability: &'static str },
    MegaEvolved { battler: BattlerId, form: &'static str },
    MovePrevented { battler: BattlerId, by: &'static str },
    EffectTriggered { battler: BattlerId, effect: &'static str },
    VolatileStarted { target: BattlerId, volatile: &'static str },
    VolatileEnded { target: BattlerId, volatile: &'static str },
    WeatherChanged { weather: Option<Weather> },
    TerrainChanged { terrain: Option<Terrain> },
    SideConditionStarted { bank: usize, condition: &'static str },
    SideConditionEnded { bank: usize, condition: &'static str },
    FieldConditionStarted { condition: &'static str },
    FieldConditionEnded { condition: &'static str },
    ItemUsed { bank: usize, item: &'static str, target: BattlerId },
    FleeSucceeded { battler: BattlerId },
    FleeFailed { battler: BattlerId },
    CatchShakes { target: BattlerId, shakes: u8 },
    Caught { target: BattlerId },
    /// Yes/no question; the presenter answers with a choice index (0 = yes).
    ConfirmFlee { battler: BattlerId },
}

/// Outbound notifications, drained to the presenter after every tick.
#[derive(Clone, Debug, PartialEq)]
pub enum BattleEvent {
    Message(BattleMessage),
    ShowEffect { battler: BattlerId, symbol: &'static str },
    Animation { battler: BattlerId, animation: &'static str },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Won(usize),
    Draw,
    Fled,
    Caught(BattlerId),
}
