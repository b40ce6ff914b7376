//! Effect hook system.
//!
//! Items, abilities, statuses, volatiles and field conditions are all
//! [`Effect`] trait objects attached to an owner's [`EffectList`]. The engine
//! dispatches named hooks over every enabled effect in a fixed scan order and
//! never matches on a concrete effect. Query hooks only read state. Event hooks
//! get an [`EffectContext`] that exposes the state read-only together with the
//! battle RNG and a request queue; the dispatching handler applies queued
//! [`Request`]s after the sweep.

use std::fmt;

use crate::data::moves::{MoveCategory, MoveData};
use crate::data::types::Type;
use crate::sim::battler::BattlerId;
use crate::sim::damage::chain_modifier;
use crate::sim::message::BattleMessage;
use crate::sim::rng::BattleRng;
use crate::sim::state::{BattleState, Terrain, Weather};
use crate::sim::stats::{MajorStatus, StageStat};

pub mod abilities;
pub mod field;
pub mod items;
mod list;
pub mod registry;
pub mod status;
pub mod volatile;

pub use list::EffectList;
pub use registry::{EffectRegistry, REGISTRY};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EffectOwner {
    Field,
    Side(usize),
    Battler(BattlerId),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectCategory {
    Ability,
    Item,
    Status(MajorStatus),
    Volatile,
    SideCondition,
    Weather(Weather),
    Terrain(Terrain),
    FieldCondition,
}

impl EffectCategory {
    /// Categories that allow a single effect per owner.
    pub fn is_exclusive_with(self, other: EffectCategory) -> bool {
        use EffectCategory::*;
        matches!(
            (self, other),
            (Ability, Ability)
                | (Item, Item)
                | (Status(_), Status(_))
                | (Weather(_), Weather(_))
                | (Terrain(_), Terrain(_))
        )
    }
}

/// Whether an effect survives the end-of-turn tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectLifetime {
    Persistent,
    Expired,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderChange {
    First,
    Last,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccuracyCheck {
    AlwaysHit,
    AlwaysMiss,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DamagePrevention {
    /// Substitute a smaller amount (e.g. leave the target at 1 HP).
    Reduce(u16),
    Prevent,
}

/// A veto returned by a prevention hook.
#[derive(Clone, Debug, PartialEq)]
pub struct Prevention {
    pub source: &'static str,
    pub holder: Option<BattlerId>,
    pub message: Option<BattleMessage>,
}

impl Prevention {
    pub fn by(source: &'static str) -> Self {
        Self {
            source,
            holder: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: BattleMessage) -> Self {
        self.message = Some(message);
        self
    }

    fn from_owner(mut self, owner: EffectOwner) -> Self {
        if let (None, EffectOwner::Battler(id)) = (self.holder, owner) {
            self.holder = Some(id);
        }
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DamageKind {
    Move,
    Recoil,
    Residual,
    Hazard,
    Confusion,
    Item,
    Ability,
}

#[derive(Clone, Copy, Debug)]
pub struct DamageCause {
    pub kind: DamageKind,
    pub launcher: Option<BattlerId>,
    pub move_data: Option<&'static MoveData>,
}

impl DamageCause {
    pub fn residual() -> Self {
        Self::of(DamageKind::Residual, None)
    }

    pub fn of(kind: DamageKind, launcher: Option<BattlerId>) -> Self {
        Self {
            kind,
            launcher,
            move_data: None,
        }
    }

    pub fn by_move(launcher: BattlerId, move_data: &'static MoveData) -> Self {
        Self {
            kind: DamageKind::Move,
            launcher: Some(launcher),
            move_data: Some(move_data),
        }
    }

    pub fn is_contact(&self) -> bool {
        self.kind == DamageKind::Move && self.move_data.is_some_and(|m| m.has_flag("contact"))
    }
}

/// One move hitting one target, as seen by damage and accuracy hooks.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext {
    pub user: BattlerId,
    pub target: BattlerId,
    pub data: &'static MoveData,
    pub move_type: Type,
    pub critical: bool,
    pub effectiveness: f32,
    pub spread: bool,
}

impl MoveContext {
    pub fn is_physical(&self) -> bool {
        self.data.category == MoveCategory::Physical
    }

    pub fn is_special(&self) -> bool {
        self.data.category == MoveCategory::Special
    }

    pub fn makes_contact(&self) -> bool {
        self.data.has_flag("contact")
    }
}

/// Read-only access for hooks, tagged with the effect's owner.
#[derive(Clone, Copy)]
pub struct HookView<'a> {
    pub state: &'a BattleState,
    pub owner: EffectOwner,
}

impl<'a> HookView<'a> {
    pub fn new(state: &'a BattleState, owner: EffectOwner) -> Self {
        Self { state, owner }
    }

    pub fn holder(&self) -> Option<BattlerId> {
        match self.owner {
            EffectOwner::Battler(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_holder(&self, id: BattlerId) -> bool {
        self.holder() == Some(id)
    }

    /// Bank owning the effect, for side and battler owners.
    pub fn bank(&self) -> Option<usize> {
        match self.owner {
            EffectOwner::Field => None,
            EffectOwner::Side(bank) => Some(bank),
            EffectOwner::Battler(id) => Some(self.state.battler(id).bank),
        }
    }

    pub fn is_foe_of_holder(&self, id: BattlerId) -> bool {
        self.holder()
            .is_some_and(|holder| self.state.battler(holder).bank != self.state.battler(id).bank)
    }
}

/// Deferred state change produced by an event hook.
#[derive(Debug)]
pub enum Request {
    Damage { target: BattlerId, amount: u16, cause: DamageCause },
    Heal { target: BattlerId, amount: u16 },
    Status { target: BattlerId, status: Option<MajorStatus>, launcher: Option<BattlerId> },
    StatusCount { target: BattlerId, count: u8 },
    Stage { target: BattlerId, stat: StageStat, delta: i8, launcher: Option<BattlerId> },
    ChangeItem { holder: BattlerId, item: Option<&'static str>, consumed: bool },
    AttachVolatile { target: BattlerId, effect: Box<dyn Effect> },
    DetachVolatile { target: BattlerId, name: &'static str },
    Weather { weather: Option<Weather>, turns: u8 },
    Terrain { terrain: Option<Terrain>, turns: u8 },
    ForceSwitch { target: BattlerId },
    ShowEffect { battler: BattlerId, symbol: &'static str },
    Message(BattleMessage),
}

/// Event-hook context: read-only state, the battle RNG and a request queue.
pub struct EffectContext<'a> {
    view: HookView<'a>,
    rng: &'a mut BattleRng,
    requests: &'a mut Vec<Request>,
}

impl<'a> EffectContext<'a> {
    pub(crate) fn new(
        state: &'a BattleState,
        owner: EffectOwner,
        rng: &'a mut BattleRng,
        requests: &'a mut Vec<Request>,
    ) -> Self {
        Self {
            view: HookView::new(state, owner),
            rng,
            requests,
        }
    }

    pub fn state(&self) -> &'a BattleState {
        self.view.state
    }

    pub fn view(&self) -> HookView<'a> {
        self.view
    }

    pub fn holder(&self) -> Option<BattlerId> {
        self.view.holder()
    }

    pub fn is_holder(&self, id: BattlerId) -> bool {
        self.view.is_holder(id)
    }

    pub fn rng(&mut self) -> &mut BattleRng {
        &mut *self.rng
    }

    pub fn chance(&mut self, percent: u8) -> bool {
        self.rng.chance(percent)
    }

    pub fn push(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub fn damage(&mut self, target: BattlerId, amount: u16, cause: DamageCause) {
        self.push(Request::Damage { target, amount, cause });
    }

    pub fn heal(&mut self, target: BattlerId, amount: u16) {
        self.push(Request::Heal { target, amount });
    }

    pub fn change_status(&mut self, target: BattlerId, status: Option<MajorStatus>, launcher: Option<BattlerId>) {
        self.push(Request::Status { target, status, launcher });
    }

    pub fn change_stage(&mut self, target: BattlerId, stat: StageStat, delta: i8, launcher: Option<BattlerId>) {
        self.push(Request::Stage { target, stat, delta, launcher });
    }

    pub fn change_item(&mut self, holder: BattlerId, item: Option<&'static str>, consumed: bool) {
        self.push(Request::ChangeItem { holder, item, consumed });
    }

    pub fn attach_volatile(&mut self, target: BattlerId, effect: Box<dyn Effect>) {
        self.push(Request::AttachVolatile { target, effect });
    }

    pub fn detach_volatile(&mut self, target: BattlerId, name: &'static str) {
        self.push(Request::DetachVolatile { target, name });
    }

    pub fn force_switch(&mut self, target: BattlerId) {
        self.push(Request::ForceSwitch { target });
    }

    pub fn show_effect(&mut self, battler: BattlerId, symbol: &'static str) {
        self.push(Request::ShowEffect { battler, symbol });
    }

    pub fn message(&mut self, message: BattleMessage) {
        self.push(Request::Message(message));
    }
}

/// A pluggable battle modifier. Every hook defaults to pass-through.
#[allow(unused_variables)]
pub trait Effect: fmt::Debug + Send {
    fn name(&self) -> &'static str;
    fn category(&self) -> EffectCategory;

    /// Called once per end of turn; expired effects are detached.
    fn on_turn_tick(&mut self) -> EffectLifetime {
        EffectLifetime::Persistent
    }

    /// Re-applying a stackable condition (Spikes layers). True if it stacked.
    fn try_stack(&mut self) -> bool {
        false
    }

    fn on_move_disabled_check(&self, view: HookView<'_>, user: BattlerId, data: &'static MoveData) -> Option<Prevention> {
        None
    }

    fn on_status_prevention(
        &self,
        view: HookView<'_>,
        status: MajorStatus,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) -> Option<Prevention> {
        None
    }

    fn on_volatile_prevention(&self, view: HookView<'_>, volatile: &'static str, target: BattlerId) -> Option<Prevention> {
        None
    }

    fn on_stat_decrease_prevention(
        &self,
        view: HookView<'_>,
        stat: StageStat,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) -> Option<Prevention> {
        None
    }

    fn on_switch_prevention(&self, view: HookView<'_>, battler: BattlerId) -> Option<Prevention> {
        None
    }

    fn on_switch_passthrough(&self, view: HookView<'_>, battler: BattlerId) -> bool {
        false
    }

    fn on_flee_passthrough(&self, view: HookView<'_>, battler: BattlerId) -> bool {
        false
    }

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        1.0
    }

    fn priority_modifier(&self, view: HookView<'_>, user: BattlerId, data: &'static MoveData) -> i8 {
        0
    }

    fn on_pre_accuracy_check(&self, view: HookView<'_>, mv: &MoveContext) -> Option<AccuracyCheck> {
        None
    }

    fn critical_rate_bonus(&self, view: HookView<'_>, user: BattlerId, data: &'static MoveData) -> u8 {
        0
    }

    fn base_power_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    fn defense_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    /// Weather, screens, burn: applied to the base damage before the crit.
    fn mod1_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    /// Applied after the critical hit multiplier.
    fn mod2_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    /// Applied after type effectiveness.
    fn mod3_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        1.0
    }

    fn suppresses_abilities_of(&self, view: HookView<'_>, target: BattlerId) -> bool {
        false
    }

    fn grounded_override(&self, view: HookView<'_>, battler: BattlerId) -> Option<bool> {
        None
    }

    fn on_order_change(&mut self, ctx: &mut EffectContext<'_>, actor: BattlerId) -> Option<OrderChange> {
        None
    }

    fn on_move_prevention_user(
        &mut self,
        ctx: &mut EffectContext<'_>,
        user: BattlerId,
        data: &'static MoveData,
    ) -> Option<Prevention> {
        None
    }

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        None
    }

    fn on_damage_prevention(
        &mut self,
        ctx: &mut EffectContext<'_>,
        amount: u16,
        target: BattlerId,
        cause: &DamageCause,
    ) -> Option<DamagePrevention> {
        None
    }

    fn on_post_damage(&mut self, ctx: &mut EffectContext<'_>, amount: u16, target: BattlerId, cause: &DamageCause) {}

    fn on_post_damage_death(
        &mut self,
        ctx: &mut EffectContext<'_>,
        amount: u16,
        target: BattlerId,
        cause: &DamageCause,
    ) {
    }

    fn on_post_status_change(
        &mut self,
        ctx: &mut EffectContext<'_>,
        status: Option<MajorStatus>,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) {
    }

    fn on_stat_change_post(
        &mut self,
        ctx: &mut EffectContext<'_>,
        stat: StageStat,
        delta: i8,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) {
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, outgoing: Option<BattlerId>, incoming: BattlerId) {}

    fn on_post_item_change(
        &mut self,
        ctx: &mut EffectContext<'_>,
        holder: BattlerId,
        old: Option<&'static str>,
        new: Option<&'static str>,
    ) {
    }

    fn on_post_weather_change(&mut self, ctx: &mut EffectContext<'_>, weather: Option<Weather>) {}

    fn on_post_fterrain_change(&mut self, ctx: &mut EffectContext<'_>, terrain: Option<Terrain>) {}

    /// After a move finished resolving, with the total damage it dealt.
    fn on_move_launched(&mut self, ctx: &mut EffectContext<'_>, user: BattlerId, data: &'static MoveData, damage: u16) {}

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {}

    fn on_post_action_event(&mut self, ctx: &mut EffectContext<'_>, actor: BattlerId) {}
}

/// Product of a multiplier hook across every enabled effect, chained in
/// 4096ths.
pub fn chain_all(state: &BattleState, hook: impl Fn(&dyn Effect, HookView<'_>) -> f32) -> f32 {
    state.effects().fold(1.0, |acc, (view, effect)| {
        let modifier = hook(effect, view);
        if (modifier - 1.0).abs() < f32::EPSILON {
            acc
        } else {
            chain_modifier(acc, modifier)
        }
    })
}

/// First veto from a prevention query hook.
pub fn first_prevention(
    state: &BattleState,
    hook: impl Fn(&dyn Effect, HookView<'_>) -> Option<Prevention>,
) -> Option<Prevention> {
    state
        .effects()
        .find_map(|(view, effect)| hook(effect, view).map(|p| p.from_owner(view.owner)))
}

pub fn any_effect(state: &BattleState, hook: impl Fn(&dyn Effect, HookView<'_>) -> bool) -> bool {
    state.effects().any(|(view, effect)| hook(effect, view))
}
