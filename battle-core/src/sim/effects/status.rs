//! Major status effects. Each is tied to the battler's status slot: the
//! status handler attaches it when the status is set and detaches it on cure.

use super::{DamageCause, Effect, EffectCategory, EffectContext, HookView, MoveContext, Prevention};
use crate::data::moves::MoveData;
use crate::sim::battler::BattlerId;
use crate::sim::message::BattleMessage;
use crate::sim::stats::{fraction_floor, MajorStatus};

pub fn status_effect(status: MajorStatus) -> Box<dyn Effect> {
    match status {
        MajorStatus::Burn => Box::new(Burn),
        MajorStatus::Poison => Box::new(Poison),
        MajorStatus::Toxic => Box::new(Toxic),
        MajorStatus::Paralysis => Box::new(Paralysis),
        MajorStatus::Sleep => Box::new(Sleep),
        MajorStatus::Freeze => Box::new(Freeze),
    }
}

fn residual(ctx: &mut EffectContext<'_>, num: u32, den: u32) {
    let Some(holder) = ctx.holder() else {
        return;
    };
    let battler = ctx.state().battler(holder);
    if battler.is_fainted() {
        return;
    }
    let amount = fraction_floor(battler.max_hp(), num, den);
    ctx.damage(holder, amount, DamageCause::residual());
}

#[derive(Debug)]
pub struct Burn;

impl Effect for Burn {
    fn name(&self) -> &'static str {
        "burn"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Burn)
    }

    fn mod1_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) && mv.is_physical() && !view.state.has_active_ability(mv.user, "guts") {
            0.5
        } else {
            1.0
        }
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        residual(ctx, 1, 16);
    }
}

#[derive(Debug)]
pub struct Poison;

impl Effect for Poison {
    fn name(&self) -> &'static str {
        "poison"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Poison)
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        residual(ctx, 1, 8);
    }
}

/// Badly poisoned: n/16 of max HP, n growing each turn (kept in the status
/// counter).
#[derive(Debug)]
pub struct Toxic;

impl Effect for Toxic {
    fn name(&self) -> &'static str {
        "toxic"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Toxic)
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        let severity = ctx.state().battler(holder).status_count().clamp(1, 15);
        residual(ctx, severity as u32, 16);
        ctx.push(super::Request::StatusCount {
            target: holder,
            count: (severity + 1).min(15),
        });
    }
}

#[derive(Debug)]
pub struct Paralysis;

impl Effect for Paralysis {
    fn name(&self) -> &'static str {
        "paralysis"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Paralysis)
    }

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        if view.is_holder(battler) {
            0.5
        } else {
            1.0
        }
    }

    fn on_move_prevention_user(
        &mut self,
        ctx: &mut EffectContext<'_>,
        user: BattlerId,
        _data: &'static MoveData,
    ) -> Option<Prevention> {
        if !ctx.is_holder(user) || !ctx.chance(25) {
            return None;
        }
        Some(Prevention::by("paralysis").with_message(BattleMessage::MovePrevented {
            battler: user,
            by: "paralysis",
        }))
    }
}

/// The status counter holds the remaining turns asleep.
#[derive(Debug)]
pub struct Sleep;

impl Effect for Sleep {
    fn name(&self) -> &'static str {
        "sleep"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Sleep)
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
        let remaining = ctx.state().battler(user).status_count();
        if remaining == 0 {
            ctx.change_status(user, None, None);
            return None;
        }
        ctx.push(super::Request::StatusCount {
            target: user,
            count: remaining - 1,
        });
        Some(Prevention::by("sleep").with_message(BattleMessage::MovePrevented {
            battler: user,
            by: "sleep",
        }))
    }
}

#[derive(Debug)]
pub struct Freeze;

impl Effect for Freeze {
    fn name(&self) -> &'static str {
        "freeze"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Status(MajorStatus::Freeze)
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
        if ctx.chance(20) {
            ctx.change_status(user, None, None);
            return None;
        }
        Some(Prevention::by("freeze").with_message(BattleMessage::MovePrevented {
            battler: user,
            by: "freeze",
        }))
    }
}
