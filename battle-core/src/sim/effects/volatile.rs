//! Volatile conditions. Dropped when the holder switches out or faints.

use super::{
    DamageCause, DamageKind, DamagePrevention, Effect, EffectCategory, EffectContext, EffectLifetime, HookView,
    MoveContext, Prevention,
};
use crate::data::moves::MoveData;
use crate::sim::battler::BattlerId;
use crate::sim::damage::confusion_damage;
use crate::sim::message::BattleMessage;

pub const CONFUSION: &str = "confusion";
pub const FLINCH: &str = "flinch";
pub const PROTECT: &str = "protect";
pub const ENDURE: &str = "endure";
pub const TRAPPED: &str = "trapped";

#[derive(Debug)]
pub struct Confusion {
    turns: u8,
}

impl Confusion {
    pub fn new(turns: u8) -> Self {
        Self { turns }
    }
}

impl Effect for Confusion {
    fn name(&self) -> &'static str {
        CONFUSION
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }

    fn on_move_prevention_user(
        &mut self,
        ctx: &mut EffectContext<'_>,
        user: BattlerId,
        _data: &'static MoveData,
    ) -> Option<Prevention> {
        if !ctx.is_holder(user) {
            return None;
        }
        self.turns = self.turns.saturating_sub(1);
        if self.turns == 0 {
            ctx.detach_volatile(user, CONFUSION);
            return None;
        }
        if !ctx.rng().ratio(1, 3) {
            return None;
        }
        let roll = ctx.rng().damage_roll();
        let amount = confusion_damage(ctx.state(), user, roll);
        ctx.damage(user, amount, DamageCause::of(DamageKind::Confusion, Some(user)));
        Some(Prevention::by(CONFUSION).with_message(BattleMessage::MovePrevented {
            battler: user,
            by: CONFUSION,
        }))
    }
}

#[derive(Debug)]
pub struct Flinch;

impl Effect for Flinch {
    fn name(&self) -> &'static str {
        FLINCH
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        EffectLifetime::Expired
    }

    fn on_move_prevention_user(
        &mut self,
        ctx: &mut EffectContext<'_>,
        user: BattlerId,
        _data: &'static MoveData,
    ) -> Option<Prevention> {
        ctx.is_holder(user).then(|| {
            Prevention::by(FLINCH).with_message(BattleMessage::MovePrevented {
                battler: user,
                by: FLINCH,
            })
        })
    }
}

#[derive(Debug)]
pub struct Protect;

impl Effect for Protect {
    fn name(&self) -> &'static str {
        PROTECT
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        EffectLifetime::Expired
    }

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        if !ctx.is_holder(mv.target) || mv.user == mv.target || !mv.data.has_flag("protect") {
            return None;
        }
        Some(Prevention::by(PROTECT).with_message(BattleMessage::MovePrevented {
            battler: mv.target,
            by: PROTECT,
        }))
    }
}

#[derive(Debug)]
pub struct Endure;

impl Effect for Endure {
    fn name(&self) -> &'static str {
        ENDURE
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        EffectLifetime::Expired
    }

    fn on_damage_prevention(
        &mut self,
        ctx: &mut EffectContext<'_>,
        amount: u16,
        target: BattlerId,
        _cause: &DamageCause,
    ) -> Option<DamagePrevention> {
        let hp = ctx.state().battler(target).hp();
        if !ctx.is_holder(target) || amount < hp {
            return None;
        }
        ctx.message(BattleMessage::EffectTriggered {
            battler: target,
            effect: ENDURE,
        });
        Some(DamagePrevention::Reduce(hp - 1))
    }
}

/// Cannot switch out while the trapper stays on the field.
#[derive(Debug)]
pub struct Trapped {
    by: BattlerId,
}

impl Trapped {
    pub fn new(by: BattlerId) -> Self {
        Self { by }
    }
}

impl Effect for Trapped {
    fn name(&self) -> &'static str {
        TRAPPED
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Volatile
    }

    fn on_switch_prevention(&self, view: HookView<'_>, battler: BattlerId) -> Option<Prevention> {
        let trapper = view.state.battler(self.by);
        (view.is_holder(battler) && trapper.is_active() && !trapper.is_fainted()).then(|| Prevention::by(TRAPPED))
    }
}
