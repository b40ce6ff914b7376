use std::collections::{BTreeMap, VecDeque};
use std::mem;

use tracing::{debug, trace, warn};

use crate::data::items::{get_item, BagUse, ITEMS};
use crate::data::moves::{MoveBehavior, MoveData, MoveTarget};
use crate::data::species::{get_species, SpeciesData};
use crate::data::to_id;
use crate::error::{ActionRejected, LoadError};
use crate::sim::action::{Action, QueuedAction, Step, TargetRef};
use crate::sim::battler::{Battler, BattlerId};
use crate::sim::damage::apply_modifier;
use crate::sim::effects::{
    chain_all, first_prevention, Effect, EffectCategory, EffectContext, EffectOwner, OrderChange, Request, REGISTRY,
};
use crate::sim::handlers::{ability_change, catch, damage, field, flee, item_change, stat_change, status, switch};
use crate::sim::info::{BattleConfig, BattleInfo, PartyMember};
use crate::sim::message::{BattleEvent, BattleMessage, BattleOutcome};
use crate::sim::moves;
use crate::sim::rng::BattleRng;
use crate::sim::state::{BattleState, EffectSlot, FieldState, SideState, SweepScope};
use crate::sim::stats::{apply_stage, StageStat, Stat};

/// Nested request chains deeper than this are dropped.
pub const MAX_CHAIN_DEPTH: u8 = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchReason {
    /// Replacement for a fainted battler, chosen by its trainer.
    Fainted,
    /// Self-switch or item-triggered switch, chosen by its trainer.
    Forced,
    /// Dragged out by a foe; the replacement is random.
    Dragged,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PendingSwitch {
    pub battler: BattlerId,
    pub reason: SwitchReason,
}

/// Turn controller: collects and orders actions, executes them through the
/// handlers and runs the end-of-turn sequence. Phase sequencing lives in
/// [`crate::scene::BattleScene`].
pub struct BattleLogic {
    pub(crate) state: BattleState,
    pub(crate) rng: BattleRng,
    pub(crate) config: BattleConfig,
    choices: BTreeMap<BattlerId, Action>,
    queue: VecDeque<QueuedAction>,
    pub(crate) pending_switches: Vec<PendingSwitch>,
    pub(crate) events: Vec<BattleEvent>,
    pub(crate) outcome: Option<BattleOutcome>,
    pub(crate) flee_attempts: u32,
    chain_depth: u8,
}

impl BattleLogic {
    /// Builds the battle, validating every symbol up front.
    pub fn new(info: &BattleInfo, config: BattleConfig) -> Result<Self, LoadError> {
        if !(1..=2).contains(&info.battle_size) {
            return Err(LoadError::InvalidBattleSize(info.battle_size));
        }
        let mut battlers = Vec::new();
        let mut sides = Vec::with_capacity(2);
        for (bank, side) in info.sides.iter().enumerate() {
            if side.party.is_empty() {
                return Err(LoadError::EmptyParty(bank));
            }
            let mut party = Vec::with_capacity(side.party.len());
            for (party_index, member) in side.party.iter().enumerate() {
                let id = BattlerId(battlers.len());
                let battler = Battler::from_member(member, id, bank, party_index)?;
                if !REGISTRY.has_ability(battler.ability()) {
                    return Err(LoadError::UnregisteredAbility(battler.ability().to_string()));
                }
                party.push(id);
                battlers.push(battler);
            }
            let mut bag = BTreeMap::new();
            for (name, count) in &side.bag {
                let (key, _) = ITEMS
                    .get_entry(to_id(name).as_str())
                    .ok_or_else(|| LoadError::UnknownItem(name.clone()))?;
                *bag.entry(*key).or_insert(0) += *count;
            }
            sides.push(SideState {
                bank,
                name: side.name.clone(),
                party,
                active: vec![None; info.battle_size],
                effects: Default::default(),
                bag,
                ai_level: side.ai_level.clone(),
                mega_used: false,
            });
        }
        let [player, opponent]: [SideState; 2] = sides
            .try_into()
            .map_err(|_| LoadError::EmptyParty(1))?;
        debug!(seed = config.seed, battlers = battlers.len(), "battle created");
        Ok(Self {
            state: BattleState {
                battlers,
                sides: [player, opponent],
                field: FieldState::default(),
                turn: 0,
                wild: info.wild,
                battle_size: info.battle_size,
            },
            rng: BattleRng::new(config.seed),
            config,
            choices: BTreeMap::new(),
            queue: VecDeque::new(),
            pending_switches: Vec::new(),
            events: Vec::new(),
            outcome: None,
            flee_attempts: 0,
            chain_depth: 0,
        })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, message: BattleMessage) {
        trace!(?message, "battle message");
        self.events.push(BattleEvent::Message(message));
    }

    pub(crate) fn show_effect(&mut self, battler: BattlerId, symbol: &'static str) {
        self.events.push(BattleEvent::ShowEffect { battler, symbol });
    }

    pub(crate) fn animate(&mut self, battler: BattlerId, animation: &'static str) {
        self.events.push(BattleEvent::Animation { battler, animation });
    }

    /// Sends out the lead battlers and runs their entry hooks, fastest first.
    pub fn start(&mut self) {
        for bank in 0..2 {
            for position in 0..self.state.battle_size {
                let lead = self.state.sides[bank]
                    .party
                    .iter()
                    .copied()
                    .find(|id| {
                        let battler = self.state.battler(*id);
                        !battler.is_fainted() && !battler.is_active()
                    });
                if let Some(id) = lead {
                    switch::place(self, bank, position, id);
                    self.emit(BattleMessage::SentOut { battler: id });
                }
            }
        }
        for id in self.speed_order() {
            self.sweep(SweepScope::default(), |effect, ctx| {
                effect.on_switch_event(ctx, None, id);
                None::<()>
            });
        }
        self.check_terminal();
        self.begin_turn();
    }

    pub(crate) fn begin_turn(&mut self) {
        self.state.turn += 1;
        let turn = self.state.turn;
        debug!(turn, "turn started");
        self.emit(BattleMessage::TurnStarted { turn });
    }

    /// Speed after stages and every speed modifier hook.
    pub fn effective_speed(&self, id: BattlerId) -> u32 {
        let battler = self.state.battler(id);
        let base = apply_stage(battler.stat(Stat::Spe), battler.stage(StageStat::Spe)) as u32;
        let modifier = chain_all(&self.state, |effect, view| effect.speed_modifier(view, id));
        apply_modifier(base, modifier)
    }

    /// Living active battlers, fastest first (slowest first under Trick Room).
    /// Ties keep field order.
    pub fn speed_order(&self) -> Vec<BattlerId> {
        let mut order: Vec<(BattlerId, u32)> = self
            .state
            .living_active()
            .into_iter()
            .map(|id| (id, self.effective_speed(id)))
            .collect();
        if self.state.trick_room() {
            order.sort_by_key(|(_, speed)| *speed);
        } else {
            order.sort_by(|a, b| b.1.cmp(&a.1));
        }
        order.into_iter().map(|(id, _)| id).collect()
    }

    // ---- hook dispatch ----

    /// Runs an event hook over every enabled effect in dispatch order. The
    /// requests of each invocation are applied right after it. Stops at the
    /// first `Some`.
    pub(crate) fn sweep<R>(
        &mut self,
        scope: SweepScope,
        hook: impl FnMut(&mut dyn Effect, &mut EffectContext<'_>) -> Option<R>,
    ) -> Option<R> {
        let slots = self.state.effect_slots(scope);
        self.sweep_slots(slots, hook)
    }

    pub(crate) fn sweep_slots<R>(
        &mut self,
        slots: Vec<EffectSlot>,
        mut hook: impl FnMut(&mut dyn Effect, &mut EffectContext<'_>) -> Option<R>,
    ) -> Option<R> {
        for slot in slots {
            let Some(index) = self.state.locate(&slot) else {
                continue;
            };
            let slot = EffectSlot { index, ..slot };
            if !self.state.hook_enabled(&slot) {
                continue;
            }
            let Some(mut effect) = self.state.take_effect(&slot) else {
                continue;
            };
            let mut requests = Vec::new();
            let result = {
                let mut ctx = EffectContext::new(&self.state, slot.owner, &mut self.rng, &mut requests);
                hook(effect.as_mut(), &mut ctx)
            };
            self.state.restore_effect(&slot, effect);
            self.apply_requests(requests);
            if result.is_some() {
                return result;
            }
        }
        None
    }

    pub(crate) fn apply_requests(&mut self, requests: Vec<Request>) {
        if requests.is_empty() {
            return;
        }
        if self.chain_depth >= MAX_CHAIN_DEPTH {
            for request in &requests {
                warn!(depth = self.chain_depth, ?request, "effect chain too deep, request dropped");
            }
            return;
        }
        self.chain_depth += 1;
        for request in requests {
            self.apply_request(request);
        }
        self.chain_depth -= 1;
    }

    fn apply_request(&mut self, request: Request) {
        match request {
            Request::Damage { target, amount, cause } => {
                damage::damage_change(self, target, amount, cause);
            }
            Request::Heal { target, amount } => {
                damage::heal_change(self, target, amount);
            }
            Request::Status {
                target,
                status: new_status,
                launcher,
            } => {
                if let Err(block) = status::status_change(self, target, new_status, launcher) {
                    debug!(target = target.0, status = ?new_status, ?block, "requested status blocked");
                }
            }
            Request::StatusCount { target, count } => status::set_status_count(self, target, count),
            Request::Stage {
                target,
                stat,
                delta,
                launcher,
            } => {
                stat_change::stat_change_with_process(self, target, stat, delta, launcher);
            }
            Request::ChangeItem { holder, item, consumed } => item_change::change_item(self, holder, item, consumed),
            Request::AttachVolatile { target, effect } => {
                status::attach_volatile(self, target, effect);
            }
            Request::DetachVolatile { target, name } => status::detach_volatile(self, target, name),
            Request::Weather { weather, turns } => {
                field::set_weather(self, weather, turns);
            }
            Request::Terrain { terrain, turns } => {
                field::set_terrain(self, terrain, turns);
            }
            Request::ForceSwitch { target } => self.queue_switch(target, SwitchReason::Forced),
            Request::ShowEffect { battler, symbol } => self.show_effect(battler, symbol),
            Request::Message(message) => self.emit(message),
        }
    }

    // ---- collect ----

    /// Living active battlers that still need an action this turn.
    pub fn awaiting_actions(&self) -> Vec<BattlerId> {
        self.state
            .living_active()
            .into_iter()
            .filter(|id| !self.choices.contains_key(id))
            .collect()
    }

    pub fn chosen_action(&self, actor: BattlerId) -> Option<Action> {
        self.choices.get(&actor).copied()
    }

    pub fn submit_action(&mut self, actor: BattlerId, action: Action) -> Result<(), ActionRejected> {
        self.validate_action(actor, action)?;
        trace!(actor = actor.0, ?action, "action accepted");
        self.choices.insert(actor, action);
        Ok(())
    }

    pub fn retract_action(&mut self, actor: BattlerId) -> Option<Action> {
        self.choices.remove(&actor)
    }

    /// Checks a move slot: it exists, has PP and no effect disables it.
    pub fn move_usable(&self, actor: BattlerId, move_index: usize) -> Result<&'static MoveData, ActionRejected> {
        let slot = self
            .state
            .battler(actor)
            .moves()
            .get(move_index)
            .copied()
            .ok_or(ActionRejected::NoSuchMove(move_index))?;
        if slot.pp == 0 {
            return Err(ActionRejected::NoPp(slot.data.id));
        }
        if let Some(prevention) =
            first_prevention(&self.state, |effect, view| effect.on_move_disabled_check(view, actor, slot.data))
        {
            return Err(ActionRejected::MoveDisabled {
                move_id: slot.data.id,
                by: prevention.source,
            });
        }
        Ok(slot.data)
    }

    /// False when every move is out of PP or disabled, which forces Struggle.
    pub fn has_usable_move(&self, actor: BattlerId) -> bool {
        (0..self.state.battler(actor).moves().len()).any(|i| self.move_usable(actor, i).is_ok())
    }

    pub fn can_mega_evolve(&self, actor: BattlerId) -> bool {
        let battler = self.state.battler(actor);
        let side = &self.state.sides[battler.bank];
        let stone_held = battler
            .species()
            .mega
            .as_ref()
            .is_some_and(|mega| battler.item() == Some(mega.stone));
        let claimed = self.choices.iter().any(|(other, action)| {
            *other != actor
                && self.state.battler(*other).bank == battler.bank
                && matches!(action, Action::MegaEvolve { .. })
        });
        stone_held && !battler.is_mega() && !side.mega_used && !claimed
    }

    fn validate_target(&self, actor: BattlerId, target: Option<TargetRef>) -> Result<(), ActionRejected> {
        match target {
            None => Ok(()),
            Some(target) => match self.state.battler_at(target.bank, target.position) {
                Some(id) if id != actor => Ok(()),
                _ => Err(ActionRejected::InvalidTarget),
            },
        }
    }

    fn validate_attack(&self, actor: BattlerId, move_index: usize, target: Option<TargetRef>) -> Result<(), ActionRejected> {
        if move_index >= self.state.battler(actor).moves().len() {
            return Err(ActionRejected::NoSuchMove(move_index));
        }
        if self.has_usable_move(actor) {
            self.move_usable(actor, move_index)?;
        }
        self.validate_target(actor, target)
    }

    /// Collect-phase legality check. Rejected actions never reach the queue.
    pub fn validate_action(&self, actor: BattlerId, action: Action) -> Result<(), ActionRejected> {
        let battler = self.state.battler(actor);
        if battler.is_fainted() {
            return Err(ActionRejected::Fainted(actor));
        }
        if !battler.is_active() {
            return Err(ActionRejected::NotActive(actor));
        }
        match action {
            Action::Attack { move_index, target } => self.validate_attack(actor, move_index, target),
            Action::MegaEvolve { move_index, target } => {
                if !self.can_mega_evolve(actor) {
                    return Err(ActionRejected::MegaUnavailable);
                }
                self.validate_attack(actor, move_index, target)
            }
            Action::Switch { incoming } => {
                let candidate = self.state.battlers.get(incoming.0).ok_or(ActionRejected::InvalidSwitch(incoming))?;
                let claimed = self
                    .choices
                    .iter()
                    .any(|(other, chosen)| *other != actor && *chosen == Action::Switch { incoming });
                if candidate.bank != battler.bank || candidate.is_active() || candidate.is_fainted() || claimed {
                    return Err(ActionRejected::InvalidSwitch(incoming));
                }
                switch::can_switch(&self.state, actor).map_err(|p| ActionRejected::SwitchBlocked(p.source))
            }
            Action::UseItem { item, target } => self.validate_bag_item(actor, item, target),
            Action::Flee => flee::can_flee(self, actor),
            Action::Pass => Ok(()),
        }
    }

    fn validate_bag_item(&self, actor: BattlerId, item: &'static str, target: BattlerId) -> Result<(), ActionRejected> {
        let bank = self.state.battler(actor).bank;
        let reserved = self
            .choices
            .iter()
            .filter(|(other, chosen)| {
                **other != actor
                    && self.state.battler(**other).bank == bank
                    && matches!(chosen, Action::UseItem { item: used, .. } if *used == item)
            })
            .count() as u16;
        if self.state.sides[bank].bag_count(item) <= reserved {
            return Err(ActionRejected::NotInBag(item.to_string()));
        }
        let data = get_item(item).ok_or_else(|| ActionRejected::NotInBag(item.to_string()))?;
        let Some(target_battler) = self.state.battlers.get(target.0) else {
            return Err(ActionRejected::InvalidTarget);
        };
        let usable = match data.bag_use {
            BagUse::Ball { .. } => {
                self.config.allow_catch
                    && self.state.wild
                    && bank == 0
                    && target_battler.bank != bank
                    && target_battler.is_active()
                    && !target_battler.is_fainted()
            }
            BagUse::Heal(_) => target_battler.bank == bank && !target_battler.is_fainted() && !target_battler.at_full_hp(),
            BagUse::CureStatus => target_battler.bank == bank && target_battler.status().is_some(),
            BagUse::None => false,
        };
        if usable {
            Ok(())
        } else {
            Err(ActionRejected::ItemNotUsable(item.to_string()))
        }
    }

    /// Every action the battler could submit right now.
    pub fn legal_actions(&self, actor: BattlerId) -> Vec<Action> {
        let battler = self.state.battler(actor);
        let mut candidates = Vec::new();
        for move_index in 0..battler.moves().len() {
            candidates.push(Action::Attack { move_index, target: None });
            candidates.push(Action::MegaEvolve { move_index, target: None });
        }
        if !self.has_usable_move(actor) {
            candidates.retain(|action| action.move_index() == Some(0));
        }
        for incoming in self.state.bench(battler.bank) {
            candidates.push(Action::Switch { incoming });
        }
        for item in self.state.sides[battler.bank].bag.keys().copied() {
            for target in self.state.battlers.iter().map(|b| b.id) {
                candidates.push(Action::UseItem { item, target });
            }
        }
        candidates.push(Action::Flee);
        candidates
            .into_iter()
            .filter(|action| self.validate_action(actor, *action).is_ok())
            .collect()
    }

    // ---- order ----

    fn move_for(&self, actor: BattlerId, move_index: usize) -> &'static MoveData {
        let battler = self.state.battler(actor);
        match battler.moves().get(move_index) {
            Some(slot) if self.has_usable_move(actor) => slot.data,
            _ => moves::struggle(),
        }
    }

    fn action_priority(&self, actor: BattlerId, step: Step) -> i8 {
        let Step::Act(Action::Attack { move_index, .. }) = step else {
            return 0;
        };
        let data = self.move_for(actor, move_index);
        let bonus: i8 = self
            .state
            .effects()
            .map(|(view, effect)| effect.priority_modifier(view, actor, data))
            .sum();
        data.priority.saturating_add(bonus)
    }

    /// Builds the execution queue from the collected actions.
    pub fn order_actions(&mut self) {
        let choices = mem::take(&mut self.choices);
        let mut queue = Vec::with_capacity(choices.len() + 1);
        for (actor, action) in choices {
            let steps = match action {
                Action::MegaEvolve { move_index, target } => {
                    vec![Step::MegaEvolve, Step::Act(Action::Attack { move_index, target })]
                }
                other => vec![Step::Act(other)],
            };
            for step in steps {
                queue.push(QueuedAction {
                    actor,
                    step,
                    priority: self.action_priority(actor, step),
                    speed: self.effective_speed(actor),
                    tiebreak: self.rng.tiebreak(),
                    power_bonus: 1.0,
                });
            }
        }
        let trick_room = self.state.trick_room();
        queue.sort_by(|a, b| {
            a.kind_rank()
                .cmp(&b.kind_rank())
                .then(b.priority.cmp(&a.priority))
                .then_with(|| if trick_room { a.speed.cmp(&b.speed) } else { b.speed.cmp(&a.speed) })
                .then(a.tiebreak.cmp(&b.tiebreak))
        });

        let attackers: Vec<BattlerId> = queue.iter().filter(|q| q.is_attack()).map(|q| q.actor).collect();
        for actor in attackers {
            let change = self.sweep(SweepScope::default(), |effect, ctx| effect.on_order_change(ctx, actor));
            if let Some(change) = change {
                debug!(actor = actor.0, ?change, "order changed");
                reposition(&mut queue, actor, change);
                revalidate(&mut queue);
            }
        }
        for entry in &queue {
            if matches!(entry.step, Step::Act(Action::Switch { .. })) {
                self.state.battler_mut(entry.actor).switching = true;
            }
        }
        self.pull_pursuit(&mut queue);
        self.queue = queue.into();
    }

    /// A Pursuit aimed at a switching battler runs right before the switch.
    fn pull_pursuit(&self, queue: &mut Vec<QueuedAction>) {
        loop {
            let found = queue.iter().enumerate().find_map(|(i, entry)| {
                let Step::Act(Action::Attack { move_index, target }) = entry.step else {
                    return None;
                };
                if entry.power_bonus != 1.0 || self.move_for(entry.actor, move_index).behavior != MoveBehavior::Pursuit {
                    return None;
                }
                let target = moves::chosen_target(&self.state, entry.actor, target)
                    .filter(|id| self.state.battler(*id).is_switching())?;
                let switch_at = queue[..i]
                    .iter()
                    .position(|q| q.actor == target && matches!(q.step, Step::Act(Action::Switch { .. })))?;
                Some((i, switch_at))
            });
            let Some((from, to)) = found else {
                return;
            };
            let mut entry = queue.remove(from);
            entry.power_bonus = 2.0;
            queue.insert(to, entry);
        }
    }

    pub fn queued(&self) -> impl Iterator<Item = &QueuedAction> + '_ {
        self.queue.iter()
    }

    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    // ---- execute ----

    /// Runs the next queued action. Returns false once the queue is empty.
    pub fn execute_next(&mut self) -> bool {
        if self.outcome.is_some() {
            self.queue.clear();
            return false;
        }
        let Some(entry) = self.queue.pop_front() else {
            return false;
        };
        let actor = self.state.battler(entry.actor);
        if actor.is_fainted() || !actor.is_active() {
            trace!(actor = entry.actor.0, "skipping action of absent battler");
            return true;
        }
        match entry.step {
            Step::MegaEvolve => ability_change::mega_evolve(self, entry.actor),
            Step::Act(Action::Attack { move_index, target }) => {
                moves::execute_attack(self, entry.actor, move_index, target, entry.power_bonus)
            }
            Step::Act(Action::MegaEvolve { move_index, target }) => {
                moves::execute_attack(self, entry.actor, move_index, target, entry.power_bonus)
            }
            Step::Act(Action::Switch { incoming }) => {
                if self.state.bench(self.state.battler(entry.actor).bank).contains(&incoming) {
                    switch::execute_switch(self, entry.actor, incoming, SwitchReason::Forced);
                }
            }
            Step::Act(Action::UseItem { item, target }) => self.use_bag_item(entry.actor, item, target),
            Step::Act(Action::Flee) => {
                if flee::attempt_flee(self, entry.actor) {
                    self.emit(BattleMessage::FleeSucceeded { battler: entry.actor });
                    self.outcome = Some(BattleOutcome::Fled);
                } else {
                    self.emit(BattleMessage::FleeFailed { battler: entry.actor });
                }
            }
            Step::Act(Action::Pass) => {}
        }
        let actor = entry.actor;
        self.sweep(SweepScope::default(), |effect, ctx| {
            effect.on_post_action_event(ctx, actor);
            None::<()>
        });
        self.check_terminal();
        true
    }

    fn use_bag_item(&mut self, actor: BattlerId, item: &'static str, target: BattlerId) {
        let bank = self.state.battler(actor).bank;
        let bag = &mut self.state.sides[bank].bag;
        match bag.get_mut(item) {
            Some(count) if *count > 0 => *count -= 1,
            _ => {
                warn!(item, "bag item missing at use time");
                return;
            }
        }
        bag.retain(|_, count| *count > 0);
        self.emit(BattleMessage::ItemUsed { bank, item, target });
        let Some(data) = get_item(item) else {
            return;
        };
        match data.bag_use {
            BagUse::Heal(amount) => {
                damage::heal_change(self, target, amount);
            }
            BagUse::CureStatus => {
                if let Err(block) = status::status_change(self, target, None, None) {
                    status::report_block(self, target, block);
                }
            }
            BagUse::Ball { bonus } => catch::attempt_catch(self, target, bonus),
            BagUse::None => {}
        }
    }

    // ---- end of turn ----

    fn end_turn_slots(&self, order: &[BattlerId], filter: impl Fn(EffectCategory) -> bool) -> Vec<EffectSlot> {
        let mut owners = vec![EffectOwner::Field, EffectOwner::Side(0), EffectOwner::Side(1)];
        owners.extend(order.iter().copied().map(EffectOwner::Battler));
        owners
            .into_iter()
            .flat_map(|owner| self.state.slots_of(owner, false))
            .filter(|slot| {
                self.state
                    .effect_at(slot)
                    .is_some_and(|effect| filter(effect.category()))
            })
            .collect()
    }

    /// Weather, then statuses, held items, abilities and volatiles (battlers
    /// in speed order), then expiry of timed effects.
    pub fn end_turn(&mut self) {
        let order = self.speed_order();
        let phases: [fn(EffectCategory) -> bool; 4] = [
            |c| matches!(c, EffectCategory::Weather(_) | EffectCategory::Terrain(_)),
            |c| matches!(c, EffectCategory::Status(_)),
            |c| c == EffectCategory::Item,
            |c| {
                matches!(
                    c,
                    EffectCategory::Ability
                        | EffectCategory::Volatile
                        | EffectCategory::SideCondition
                        | EffectCategory::FieldCondition
                )
            },
        ];
        for filter in phases {
            if self.outcome.is_some() {
                break;
            }
            let slots = self.end_turn_slots(&order, filter);
            self.sweep_slots(slots, |effect, ctx| {
                effect.on_end_turn_event(ctx);
                None::<()>
            });
        }
        field::tick_effects(self);

        for id in self.state.active_battlers() {
            let leaving = self.pending_switches.iter().any(|pending| pending.battler == id);
            let battler = self.state.battler_mut(id);
            battler.item_consumed_this_turn = false;
            battler.switching = leaving;
            battler.last_damage_taken = 0;
            if !battler.is_fainted() {
                battler.turns_on_field += 1;
            }
        }
        self.check_terminal();
        if self.outcome.is_none() && self.state.turn >= self.config.max_turns {
            debug!(turn = self.state.turn, "turn cap reached");
            self.outcome = Some(BattleOutcome::Draw);
        }
    }

    // ---- switches ----

    pub(crate) fn queue_switch(&mut self, battler: BattlerId, reason: SwitchReason) {
        let target = self.state.battler(battler);
        if !target.is_active() || self.pending_switches.iter().any(|p| p.battler == battler) {
            return;
        }
        if reason != SwitchReason::Fainted && self.state.bench(target.bank).is_empty() {
            return;
        }
        self.pending_switches.push(PendingSwitch { battler, reason });
        self.state.battler_mut(battler).switching = true;
    }

    pub fn pending_switches(&self) -> &[PendingSwitch] {
        &self.pending_switches
    }

    /// Applies queued replacements. `choose` picks the incoming battler for
    /// trainer-chosen switches; dragged-out replacements are random.
    pub fn apply_pending_switches(&mut self, choose: &mut dyn FnMut(&BattleState, BattlerId, &[BattlerId]) -> BattlerId) {
        let mut guard = 0;
        while !self.pending_switches.is_empty() && self.outcome.is_none() && guard < 32 {
            guard += 1;
            let pending = self.pending_switches.remove(0);
            let battler = self.state.battler(pending.battler);
            let Some(position) = battler.position() else {
                continue;
            };
            let bank = battler.bank;
            let bench = self.state.bench(bank);
            if bench.is_empty() {
                if battler.is_fainted() {
                    switch::vacate(self, pending.battler, position);
                }
                continue;
            }
            let incoming = match pending.reason {
                SwitchReason::Dragged => bench[self.rng.index(bench.len())],
                SwitchReason::Fainted | SwitchReason::Forced => {
                    let chosen = choose(&self.state, pending.battler, &bench);
                    if bench.contains(&chosen) {
                        chosen
                    } else {
                        warn!(chosen = chosen.0, "invalid replacement, using first bench member");
                        bench[0]
                    }
                }
            };
            switch::execute_switch(self, pending.battler, incoming, pending.reason);
            self.check_terminal();
        }
    }

    // ---- terminal ----

    pub fn check_terminal(&mut self) -> Option<BattleOutcome> {
        if self.outcome.is_none() {
            self.outcome = match (self.state.able_to_fight(0), self.state.able_to_fight(1)) {
                (false, false) => Some(BattleOutcome::Draw),
                (false, true) => Some(BattleOutcome::Won(1)),
                (true, false) => Some(BattleOutcome::Won(0)),
                (true, true) => None,
            };
            if let Some(outcome) = self.outcome {
                debug!(?outcome, turn = self.state.turn, "battle decided");
            }
        }
        self.outcome
    }

    /// Post-battle roster of one side: hp, status, PP, held item and EVs.
    pub fn party_snapshot(&self, bank: usize) -> Vec<PartyMember> {
        self.state.sides[bank]
            .party
            .iter()
            .map(|id| self.state.battler(*id).copy_back(self.config.restore_consumed_items))
            .collect()
    }

    /// Roster record of the caught creature, if the battle ended in a capture.
    pub fn caught_member(&self) -> Option<PartyMember> {
        match self.outcome {
            Some(BattleOutcome::Caught(id)) => Some(self.state.battler(id).copy_back(self.config.restore_consumed_items)),
            _ => None,
        }
    }

    /// Foe species EV yield, shared out among the player battlers that faced it.
    pub(crate) fn award_evs(&mut self, fainted: BattlerId) {
        let foe = self.state.battler(fainted);
        if !self.config.ev_gain || foe.bank != 1 {
            return;
        }
        let ev_yield = foe.species().ev_yield;
        let participants: Vec<BattlerId> = foe
            .faced
            .iter()
            .copied()
            .filter(|id| !self.state.battler(*id).is_fainted())
            .collect();
        if participants.is_empty() {
            return;
        }
        let share = participants.len() as u32;
        for id in participants {
            let battler = self.state.battler_mut(id);
            for (stat, amount) in ev_yield.iter().enumerate() {
                let amount = (*amount as u32).div_ceil(share) as u16;
                let total: u16 = battler
                    .evs
                    .iter()
                    .zip(battler.ev_gained.iter())
                    .map(|(a, b)| *a as u16 + *b as u16)
                    .sum();
                let current = battler.evs[stat] as u16 + battler.ev_gained[stat] as u16;
                let room = (252 - current.min(252)).min(510 - total.min(510));
                battler.ev_gained[stat] += amount.min(room) as u8;
            }
        }
    }

    /// Records which player battlers each foe on the field has seen.
    pub(crate) fn note_matchups(&mut self) {
        let active = self.state.living_active();
        let (players, foes): (Vec<BattlerId>, Vec<BattlerId>) =
            active.into_iter().partition(|id| self.state.battler(*id).bank == 0);
        for foe in foes {
            let faced = &mut self.state.battler_mut(foe).faced;
            for player in &players {
                if !faced.contains(player) {
                    faced.push(*player);
                }
            }
        }
    }

    pub(crate) fn mega_form(&self, actor: BattlerId) -> Option<&'static SpeciesData> {
        let mega = self.state.battler(actor).species().mega.as_ref()?;
        get_species(mega.form)
    }

    /// Side a move's condition lands on.
    pub(crate) fn condition_bank(&self, user: BattlerId, data: &MoveData) -> usize {
        let bank = self.state.battler(user).bank;
        if data.target == MoveTarget::FoeSide {
            1 - bank
        } else {
            bank
        }
    }
}

fn reposition(queue: &mut Vec<QueuedAction>, actor: BattlerId, change: OrderChange) {
    let Some(from) = queue.iter().position(|q| q.actor == actor && q.is_attack()) else {
        return;
    };
    let entry = queue.remove(from);
    let bracket: Vec<usize> = (0..queue.len()).filter(|i| queue[*i].same_bracket(&entry)).collect();
    let to = match (change, bracket.first(), bracket.last()) {
        (OrderChange::First, Some(first), _) => *first,
        (OrderChange::Last, _, Some(last)) => last + 1,
        _ => from,
    };
    queue.insert(to.min(queue.len()), entry);
}

/// Kind precedence and priority tiers must survive order changes.
fn revalidate(queue: &mut [QueuedAction]) {
    let consistent = queue
        .windows(2)
        .all(|w| (w[0].kind_rank(), -(w[0].priority as i16)) <= (w[1].kind_rank(), -(w[1].priority as i16)));
    if !consistent {
        warn!("order change broke the queue brackets, re-sorting");
        queue.sort_by_key(|q| (q.kind_rank(), -(q.priority as i16)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::DamageCause;
    use crate::sim::info::BattleSide;

    fn side(name: &str, party: Vec<PartyMember>) -> BattleSide {
        BattleSide {
            name: name.to_string(),
            party,
            ..BattleSide::default()
        }
    }

    fn seeded(player: Vec<PartyMember>, opponent: Vec<PartyMember>, seed: u64) -> BattleLogic {
        let info = BattleInfo::singles(side("red", player), side("blue", opponent));
        let mut logic = BattleLogic::new(&info, BattleConfig::with_seed(seed)).unwrap();
        logic.start();
        logic
    }

    fn logic(player: Vec<PartyMember>, opponent: Vec<PartyMember>) -> BattleLogic {
        seeded(player, opponent, 7)
    }

    fn attack(move_index: usize) -> Action {
        Action::Attack { move_index, target: None }
    }

    #[test]
    fn rejects_unknown_item_in_bag() {
        let mut player = side("red", vec![PartyMember::new("pikachu", 50, &["thunderbolt"])]);
        player.bag.insert("rare candy".into(), 1);
        let info = BattleInfo::singles(player, side("blue", vec![PartyMember::new("rattata", 5, &["tackle"])]));
        assert_eq!(
            BattleLogic::new(&info, BattleConfig::default()).err(),
            Some(LoadError::UnknownItem("rare candy".into()))
        );
    }

    #[test]
    fn rejects_empty_party_and_bad_size() {
        let info = BattleInfo::singles(side("red", vec![]), side("blue", vec![PartyMember::new("rattata", 5, &["tackle"])]));
        assert_eq!(BattleLogic::new(&info, BattleConfig::default()).err(), Some(LoadError::EmptyParty(0)));
        let mut info = BattleInfo::singles(
            side("red", vec![PartyMember::new("pikachu", 50, &["thunderbolt"])]),
            side("blue", vec![PartyMember::new("rattata", 5, &["tackle"])]),
        );
        info.battle_size = 3;
        assert_eq!(BattleLogic::new(&info, BattleConfig::default()).err(), Some(LoadError::InvalidBattleSize(3)));
    }

    #[test]
    fn leads_are_sent_out_and_turn_one_begins() {
        let logic = logic(
            vec![PartyMember::new("pikachu", 50, &["thunderbolt"])],
            vec![PartyMember::new("rattata", 5, &["tackle"])],
        );
        assert_eq!(logic.turn(), 1);
        assert_eq!(logic.state().battler_at(0, 0), Some(BattlerId(0)));
        assert_eq!(logic.state().battler_at(1, 0), Some(BattlerId(1)));
        assert_eq!(logic.awaiting_actions(), vec![BattlerId(0), BattlerId(1)]);
    }

    #[test]
    fn switch_outranks_attack_regardless_of_speed() {
        let mut logic = logic(
            vec![
                PartyMember::new("snorlax", 50, &["tackle"]),
                PartyMember::new("pikachu", 50, &["thunderbolt"]),
            ],
            vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
        );
        logic.submit_action(BattlerId(0), Action::Switch { incoming: BattlerId(1) }).unwrap();
        logic
            .submit_action(BattlerId(2), Action::Attack { move_index: 0, target: None })
            .unwrap();
        logic.order_actions();
        let order: Vec<BattlerId> = logic.queued().map(|q| q.actor).collect();
        assert_eq!(order, vec![BattlerId(0), BattlerId(2)]);
    }

    #[test]
    fn retracted_action_leaves_the_slot_open() {
        let mut logic = logic(
            vec![PartyMember::new("pikachu", 50, &["thunderbolt"])],
            vec![PartyMember::new("rattata", 5, &["tackle"])],
        );
        logic.submit_action(BattlerId(0), Action::Pass).unwrap();
        assert_eq!(logic.retract_action(BattlerId(0)), Some(Action::Pass));
        assert!(logic.awaiting_actions().contains(&BattlerId(0)));
    }

    #[test]
    fn flee_is_rejected_in_trainer_battles() {
        let mut logic = logic(
            vec![PartyMember::new("pikachu", 50, &["thunderbolt"])],
            vec![PartyMember::new("rattata", 5, &["tackle"])],
        );
        assert_eq!(
            logic.submit_action(BattlerId(0), Action::Flee),
            Err(ActionRejected::FleeNotAllowed)
        );
    }

    #[test]
    fn quick_claw_moves_its_holder_to_the_front_of_its_bracket() {
        let (snorlax, jolteon) = (BattlerId(0), BattlerId(1));
        let mut jumped = 0;
        for seed in 0..64 {
            let mut logic = seeded(
                vec![PartyMember::new("snorlax", 50, &["bodyslam"]).with_item("quickclaw")],
                vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
                seed,
            );
            logic.submit_action(snorlax, attack(0)).unwrap();
            logic.submit_action(jolteon, attack(0)).unwrap();
            logic.drain_events();
            logic.order_actions();
            let triggered = logic.drain_events().contains(&BattleEvent::ShowEffect {
                battler: snorlax,
                symbol: "quickclaw",
            });
            let first = logic.queued().next().map(|q| q.actor);
            assert_eq!(first, Some(if triggered { snorlax } else { jolteon }), "seed {seed}");
            jumped += usize::from(triggered);
        }
        assert!(jumped > 0 && jumped < 64);
    }

    #[test]
    fn pursuit_runs_before_its_target_switches_out() {
        let mut logic = logic(
            vec![
                PartyMember::new("snorlax", 50, &["tackle"]),
                PartyMember::new("pikachu", 50, &["thunderbolt"]),
            ],
            vec![PartyMember::new("tyranitar", 50, &["pursuit"])],
        );
        let (snorlax, pikachu, tyranitar) = (BattlerId(0), BattlerId(1), BattlerId(2));
        logic.submit_action(snorlax, Action::Switch { incoming: pikachu }).unwrap();
        logic.submit_action(tyranitar, attack(0)).unwrap();
        assert!(!logic.state().battler(snorlax).is_switching());
        logic.order_actions();
        assert!(logic.state().battler(snorlax).is_switching());
        assert!(!logic.state().battler(tyranitar).is_switching());
        let order: Vec<(BattlerId, f32)> = logic.queued().map(|q| (q.actor, q.power_bonus)).collect();
        assert_eq!(order, vec![(tyranitar, 2.0), (snorlax, 1.0)]);

        while logic.execute_next() {}
        let battler = logic.state().battler(snorlax);
        assert!(!battler.at_full_hp());
        assert!(!battler.is_active());
        assert!(!battler.is_switching());
        assert_eq!(logic.state().battler_at(0, 0), Some(pikachu));
    }

    #[test]
    fn pursuit_stays_in_place_without_a_switch() {
        let mut logic = logic(
            vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
            vec![PartyMember::new("tyranitar", 50, &["pursuit"])],
        );
        let (jolteon, tyranitar) = (BattlerId(0), BattlerId(1));
        logic.submit_action(jolteon, attack(0)).unwrap();
        logic.submit_action(tyranitar, attack(0)).unwrap();
        logic.order_actions();
        let order: Vec<(BattlerId, f32)> = logic.queued().map(|q| (q.actor, q.power_bonus)).collect();
        assert_eq!(order, vec![(jolteon, 1.0), (tyranitar, 1.0)]);
    }

    #[test]
    fn trick_room_puts_the_slower_battler_first() {
        let mut logic = logic(
            vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
            vec![PartyMember::new("snorlax", 50, &["bodyslam"])],
        );
        let (jolteon, snorlax) = (BattlerId(0), BattlerId(1));
        assert_eq!(logic.speed_order(), vec![jolteon, snorlax]);
        field::toggle_trick_room(&mut logic);
        assert!(logic.state().trick_room());
        assert_eq!(logic.speed_order(), vec![snorlax, jolteon]);

        logic.submit_action(jolteon, attack(0)).unwrap();
        logic.submit_action(snorlax, attack(0)).unwrap();
        logic.order_actions();
        let order: Vec<BattlerId> = logic.queued().map(|q| q.actor).collect();
        assert_eq!(order, vec![snorlax, jolteon]);
    }

    #[test]
    fn actions_of_battlers_fainted_before_their_turn_are_skipped() {
        let mut logic = logic(
            vec![PartyMember::new("jolteon", 50, &["thunderbolt"])],
            vec![
                PartyMember::new("rattata", 5, &["tackle"]),
                PartyMember::new("pidgey", 5, &["tackle"]),
            ],
        );
        let (jolteon, rattata) = (BattlerId(0), BattlerId(1));
        logic.submit_action(jolteon, attack(0)).unwrap();
        logic.submit_action(rattata, attack(0)).unwrap();
        logic.order_actions();
        damage::damage_change(&mut logic, rattata, u16::MAX, DamageCause::residual());
        logic.drain_events();

        while logic.execute_next() {}
        let rattata_moved = logic.drain_events().iter().any(|event| {
            matches!(event, BattleEvent::Message(BattleMessage::UsedMove { user, .. }) if *user == rattata)
        });
        assert!(!rattata_moved);
        assert!(logic.queue_is_empty());
        assert!(!logic.is_over());
        assert_eq!(logic.state().battler(rattata).moves()[0].pp, logic.state().battler(rattata).moves()[0].max_pp);
    }

    #[test]
    fn order_changes_cannot_cross_kind_or_priority_brackets() {
        let entry = |actor: usize, step: Step, priority: i8| QueuedAction {
            actor: BattlerId(actor),
            step,
            priority,
            speed: 100,
            tiebreak: 0,
            power_bonus: 1.0,
        };
        let mut queue = vec![
            entry(0, Step::Act(attack(0)), 0),
            entry(1, Step::Act(attack(0)), 1),
            entry(2, Step::Act(Action::Switch { incoming: BattlerId(3) }), 0),
        ];
        revalidate(&mut queue);
        let actors: Vec<usize> = queue.iter().map(|q| q.actor.0).collect();
        assert_eq!(actors, vec![2, 1, 0]);

        // A change inside one bracket is left alone.
        let mut queue = vec![entry(4, Step::Act(attack(0)), 0), entry(5, Step::Act(attack(0)), 0)];
        reposition(&mut queue, BattlerId(5), OrderChange::First);
        revalidate(&mut queue);
        let actors: Vec<usize> = queue.iter().map(|q| q.actor.0).collect();
        assert_eq!(actors, vec![5, 4]);
    }

    #[test]
    fn requests_past_the_chain_cap_are_dropped() {
        let mut logic = logic(
            vec![PartyMember::new("pikachu", 50, &["thunderbolt"])],
            vec![PartyMember::new("rattata", 5, &["tackle"])],
        );
        let pikachu = BattlerId(0);
        damage::damage_change(&mut logic, pikachu, 20, DamageCause::residual());
        let hp = logic.state().battler(pikachu).hp();

        logic.chain_depth = MAX_CHAIN_DEPTH;
        logic.apply_requests(vec![Request::Heal {
            target: pikachu,
            amount: 10,
        }]);
        assert_eq!(logic.state().battler(pikachu).hp(), hp);

        logic.chain_depth = 0;
        logic.apply_requests(vec![Request::Heal {
            target: pikachu,
            amount: 10,
        }]);
        assert_eq!(logic.state().battler(pikachu).hp(), hp + 10);
    }

    #[test]
    fn turn_cap_ends_in_a_draw() {
        let info = BattleInfo::singles(
            side("red", vec![PartyMember::new("blissey", 50, &["protect"])]),
            side("blue", vec![PartyMember::new("blissey", 50, &["protect"])]),
        );
        let config = BattleConfig {
            max_turns: 3,
            ..BattleConfig::with_seed(1)
        };
        let mut logic = BattleLogic::new(&info, config).unwrap();
        logic.start();
        while !logic.is_over() {
            logic.submit_action(BattlerId(0), Action::Pass).unwrap();
            logic.submit_action(BattlerId(1), Action::Pass).unwrap();
            logic.order_actions();
            while logic.execute_next() {}
            logic.end_turn();
            if !logic.is_over() {
                logic.begin_turn();
            }
        }
        assert_eq!(logic.outcome(), Some(BattleOutcome::Draw));
        assert_eq!(logic.turn(), 3);
    }
}
