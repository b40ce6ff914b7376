//! Phase state machine around [`BattleLogic`].
//!
//! The scene owns the logic and a presenter. Every [`BattleScene::tick`]
//! advances one step and drains the events it produced to the presenter, so
//! a frontend can interleave animations between actions. Headless callers
//! use [`BattleScene::drive`] with one [`ActionProvider`] per side.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::ActionRejected;
use crate::sim::action::Action;
use crate::sim::ai::ActionProvider;
use crate::sim::battler::BattlerId;
use crate::sim::logic::BattleLogic;
use crate::sim::message::{BattleEvent, BattleMessage, BattleOutcome};
use crate::sim::state::BattleState;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Start,
    Collect,
    Order,
    Execute,
    EndOfTurn,
    Switches,
    Ended,
}

/// Outbound side of the engine: everything a player would see or hear.
pub trait BattlePresenter {
    fn show_effect_used(&mut self, _state: &BattleState, _battler: BattlerId, _symbol: &'static str) {}

    fn play_animation(&mut self, _state: &BattleState, _battler: BattlerId, _animation: &'static str) {}

    /// Shows a message and waits for it to be acknowledged. Questions
    /// return the chosen option index.
    fn display_message(&mut self, _state: &BattleState, _message: &BattleMessage) -> Option<usize> {
        None
    }

    fn battle_ended(&mut self, _state: &BattleState, _outcome: BattleOutcome) {}
}

impl<P: BattlePresenter + ?Sized> BattlePresenter for &mut P {
    fn show_effect_used(&mut self, state: &BattleState, battler: BattlerId, symbol: &'static str) {
        (**self).show_effect_used(state, battler, symbol)
    }

    fn play_animation(&mut self, state: &BattleState, battler: BattlerId, animation: &'static str) {
        (**self).play_animation(state, battler, animation)
    }

    fn display_message(&mut self, state: &BattleState, message: &BattleMessage) -> Option<usize> {
        (**self).display_message(state, message)
    }

    fn battle_ended(&mut self, state: &BattleState, outcome: BattleOutcome) {
        (**self).battle_ended(state, outcome)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl BattlePresenter for NullPresenter {}

pub struct BattleScene<'p> {
    logic: BattleLogic,
    phase: Phase,
    presenter: Box<dyn BattlePresenter + 'p>,
    replacements: BTreeMap<BattlerId, BattlerId>,
}

impl<'p> BattleScene<'p> {
    pub fn new(logic: BattleLogic, presenter: impl BattlePresenter + 'p) -> Self {
        Self {
            logic,
            phase: Phase::Start,
            presenter: Box::new(presenter),
            replacements: BTreeMap::new(),
        }
    }

    pub fn headless(logic: BattleLogic) -> Self {
        Self::new(logic, NullPresenter)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn logic(&self) -> &BattleLogic {
        &self.logic
    }

    pub fn state(&self) -> &BattleState {
        self.logic.state()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.logic.outcome()
    }

    pub fn into_logic(self) -> BattleLogic {
        self.logic
    }

    /// Battlers still waiting for an action. Empty outside Collect.
    pub fn needs_actions(&self) -> Vec<BattlerId> {
        match self.phase {
            Phase::Collect => self.logic.awaiting_actions(),
            _ => Vec::new(),
        }
    }

    pub fn submit_action(&mut self, actor: BattlerId, action: Action) -> Result<(), ActionRejected> {
        if self.phase != Phase::Collect {
            return Err(ActionRejected::NotCollecting);
        }
        if action == Action::Flee && self.logic.config().confirm_flee {
            self.logic.validate_action(actor, action)?;
            let question = BattleMessage::ConfirmFlee { battler: actor };
            if self.presenter.display_message(self.logic.state(), &question) != Some(0) {
                return Err(ActionRejected::Cancelled);
            }
        }
        self.logic.submit_action(actor, action)
    }

    pub fn retract_action(&mut self, actor: BattlerId) -> Option<Action> {
        match self.phase {
            Phase::Collect => self.logic.retract_action(actor),
            _ => None,
        }
    }

    /// Pre-selects the replacement for a battler that must leave the field.
    /// Unset or invalid picks fall back to the first bench member.
    pub fn submit_replacement(&mut self, outgoing: BattlerId, incoming: BattlerId) {
        self.replacements.insert(outgoing, incoming);
    }

    /// Advances one step. Collect only moves on once every action is in.
    pub fn tick(&mut self) -> Phase {
        let next = match self.phase {
            Phase::Start => {
                self.logic.start();
                Phase::Collect
            }
            Phase::Collect => {
                if self.logic.awaiting_actions().is_empty() {
                    Phase::Order
                } else {
                    Phase::Collect
                }
            }
            Phase::Order => {
                self.logic.order_actions();
                Phase::Execute
            }
            Phase::Execute => {
                if self.logic.execute_next() {
                    Phase::Execute
                } else {
                    Phase::EndOfTurn
                }
            }
            Phase::EndOfTurn => {
                self.logic.end_turn();
                Phase::Switches
            }
            Phase::Switches => {
                let replacements = &mut self.replacements;
                self.logic.apply_pending_switches(&mut |_: &BattleState, outgoing: BattlerId, bench: &[BattlerId]| {
                    replacements
                        .remove(&outgoing)
                        .filter(|incoming| bench.contains(incoming))
                        .unwrap_or(bench[0])
                });
                self.finish_switches()
            }
            Phase::Ended => Phase::Ended,
        };
        self.advance(next)
    }

    /// Ticks until the next Collect (or the end) and returns the phase
    /// reached. Stops early if actions are still missing.
    pub fn run_turn(&mut self) -> Phase {
        let mut phase = self.tick();
        while !matches!(phase, Phase::Collect | Phase::Ended) {
            phase = self.tick();
        }
        phase
    }

    /// Runs the battle to completion, asking `providers[bank]` for every
    /// action and replacement.
    pub fn drive(&mut self, providers: &mut [&mut dyn ActionProvider; 2]) -> BattleOutcome {
        loop {
            match self.phase {
                Phase::Ended => break,
                Phase::Collect => {
                    for actor in self.logic.awaiting_actions() {
                        let bank = self.logic.state().battler(actor).bank;
                        let action = providers[bank].choose_action(&self.logic, actor);
                        if let Err(err) = self.submit_action(actor, action) {
                            warn!(actor = actor.0, ?action, %err, "provider action rejected, passing");
                            if let Err(err) = self.logic.submit_action(actor, Action::Pass) {
                                warn!(actor = actor.0, %err, "pass rejected");
                            }
                        }
                    }
                    self.tick();
                }
                Phase::Switches => {
                    self.logic.apply_pending_switches(&mut |state: &BattleState, outgoing: BattlerId, bench: &[BattlerId]| {
                        let bank = state.battler(outgoing).bank;
                        providers[bank].choose_replacement(state, outgoing, bench)
                    });
                    let next = self.finish_switches();
                    self.advance(next);
                }
                _ => {
                    self.tick();
                }
            }
        }
        self.outcome().unwrap_or(BattleOutcome::Draw)
    }

    fn finish_switches(&mut self) -> Phase {
        self.replacements.clear();
        if !self.logic.is_over() {
            self.logic.begin_turn();
        }
        Phase::Collect
    }

    fn advance(&mut self, next: Phase) -> Phase {
        let next = if self.logic.is_over() { Phase::Ended } else { next };
        self.flush();
        if next == Phase::Ended && self.phase != Phase::Ended {
            let outcome = self.logic.outcome().unwrap_or(BattleOutcome::Draw);
            debug!(?outcome, turn = self.logic.turn(), "battle ended");
            self.presenter.battle_ended(self.logic.state(), outcome);
        }
        self.phase = next;
        next
    }

    fn flush(&mut self) {
        for event in self.logic.drain_events() {
            let state = self.logic.state();
            match event {
                BattleEvent::Message(message) => {
                    self.presenter.display_message(state, &message);
                }
                BattleEvent::ShowEffect { battler, symbol } => self.presenter.show_effect_used(state, battler, symbol),
                BattleEvent::Animation { battler, animation } => self.presenter.play_animation(state, battler, animation),
            }
        }
    }
}
