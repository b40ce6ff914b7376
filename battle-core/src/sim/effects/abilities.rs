use super::{
    AccuracyCheck, DamageCause, DamageKind, DamagePrevention, Effect, EffectCategory, EffectContext, HookView,
    MoveContext, Prevention, Request,
};
use crate::data::moves::{MoveCategory, MoveData};
use crate::data::types::Type;
use crate::sim::battler::BattlerId;
use crate::sim::effects::volatile::{CONFUSION, FLINCH};
use crate::sim::message::BattleMessage;
use crate::sim::state::{Terrain, Weather};
use crate::sim::stats::{fraction_floor, MajorStatus, StageStat};

macro_rules! ability {
    ($id:literal) => {
        fn name(&self) -> &'static str {
            $id
        }

        fn category(&self) -> EffectCategory {
            EffectCategory::Ability
        }
    };
}

fn entered(ctx: &EffectContext<'_>, incoming: BattlerId) -> bool {
    ctx.is_holder(incoming)
}

fn left(ctx: &EffectContext<'_>, outgoing: Option<BattlerId>) -> bool {
    outgoing.is_some_and(|id| ctx.is_holder(id))
}

#[derive(Debug)]
pub struct Intimidate;

impl Effect for Intimidate {
    ability!("intimidate");

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        if !entered(ctx, incoming) {
            return;
        }
        ctx.show_effect(incoming, "intimidate");
        for foe in ctx.state().foes_of(incoming) {
            ctx.change_stage(foe, StageStat::Atk, -1, Some(incoming));
        }
    }
}

/// Drought, Drizzle and Sand Stream.
#[derive(Debug)]
pub struct WeatherSetter {
    id: &'static str,
    weather: Weather,
}

impl WeatherSetter {
    pub fn new(id: &'static str, weather: Weather) -> Self {
        Self { id, weather }
    }
}

impl Effect for WeatherSetter {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        if entered(ctx, incoming) && ctx.state().weather() != Some(self.weather) {
            ctx.show_effect(incoming, self.id);
            ctx.push(Request::Weather {
                weather: Some(self.weather),
                turns: 5,
            });
        }
    }
}

#[derive(Debug)]
pub struct TerrainSetter {
    id: &'static str,
    terrain: Terrain,
}

impl TerrainSetter {
    pub fn new(id: &'static str, terrain: Terrain) -> Self {
        Self { id, terrain }
    }
}

impl Effect for TerrainSetter {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        if entered(ctx, incoming) && ctx.state().terrain() != Some(self.terrain) {
            ctx.show_effect(incoming, self.id);
            ctx.push(Request::Terrain {
                terrain: Some(self.terrain),
                turns: 5,
            });
        }
    }
}

#[derive(Debug)]
pub struct NaturalCure;

impl Effect for NaturalCure {
    ability!("naturalcure");

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, outgoing: Option<BattlerId>, _incoming: BattlerId) {
        let Some(holder) = outgoing.filter(|_| left(ctx, outgoing)) else {
            return;
        };
        if ctx.state().battler(holder).status().is_some() {
            ctx.change_status(holder, None, None);
        }
    }
}

#[derive(Debug)]
pub struct Regenerator;

impl Effect for Regenerator {
    ability!("regenerator");

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, outgoing: Option<BattlerId>, _incoming: BattlerId) {
        let Some(holder) = outgoing.filter(|_| left(ctx, outgoing)) else {
            return;
        };
        let battler = ctx.state().battler(holder);
        if !battler.is_fainted() && !battler.at_full_hp() {
            let amount = fraction_floor(battler.max_hp(), 1, 3);
            ctx.heal(holder, amount);
        }
    }
}

/// Every other battler's ability is inert while the holder is on the field.
#[derive(Debug)]
pub struct NeutralizingGas;

impl Effect for NeutralizingGas {
    ability!("neutralizinggas");

    fn suppresses_abilities_of(&self, view: HookView<'_>, target: BattlerId) -> bool {
        !view.is_holder(target)
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        if entered(ctx, incoming) {
            ctx.show_effect(incoming, "neutralizinggas");
        }
    }
}

#[derive(Debug)]
pub struct Sturdy;

impl Effect for Sturdy {
    ability!("sturdy");

    fn on_damage_prevention(
        &mut self,
        ctx: &mut EffectContext<'_>,
        amount: u16,
        target: BattlerId,
        cause: &DamageCause,
    ) -> Option<DamagePrevention> {
        let battler = ctx.state().battler(target);
        if !ctx.is_holder(target) || cause.kind != DamageKind::Move || !battler.at_full_hp() || amount < battler.hp() {
            return None;
        }
        ctx.show_effect(target, "sturdy");
        Some(DamagePrevention::Reduce(battler.hp() - 1))
    }
}

#[derive(Debug)]
pub struct Levitate;

impl Effect for Levitate {
    ability!("levitate");

    fn grounded_override(&self, view: HookView<'_>, battler: BattlerId) -> Option<bool> {
        view.is_holder(battler).then_some(false)
    }
}

/// Electric moves aimed at the holder heal it instead.
#[derive(Debug)]
pub struct VoltAbsorb;

impl Effect for VoltAbsorb {
    ability!("voltabsorb");

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        if !ctx.is_holder(mv.target) || mv.user == mv.target || mv.move_type != Type::Electric {
            return None;
        }
        ctx.show_effect(mv.target, "voltabsorb");
        let battler = ctx.state().battler(mv.target);
        if !battler.at_full_hp() {
            let amount = fraction_floor(battler.max_hp(), 1, 4);
            ctx.heal(mv.target, amount);
        }
        Some(Prevention::by("voltabsorb"))
    }
}

/// Absorbs Fire moves and powers up the holder's own Fire moves afterwards.
#[derive(Debug, Default)]
pub struct FlashFire {
    activated: bool,
}

impl Effect for FlashFire {
    ability!("flashfire");

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        if !ctx.is_holder(mv.target) || mv.user == mv.target || mv.move_type != Type::Fire {
            return None;
        }
        self.activated = true;
        ctx.show_effect(mv.target, "flashfire");
        Some(Prevention::by("flashfire"))
    }

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if self.activated && view.is_holder(mv.user) && mv.move_type == Type::Fire {
            1.5
        } else {
            1.0
        }
    }
}

/// Limber and Immunity.
#[derive(Debug)]
pub struct StatusImmunity {
    id: &'static str,
    statuses: &'static [MajorStatus],
}

impl StatusImmunity {
    pub fn new(id: &'static str, statuses: &'static [MajorStatus]) -> Self {
        Self { id, statuses }
    }
}

impl Effect for StatusImmunity {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn on_status_prevention(
        &self,
        view: HookView<'_>,
        status: MajorStatus,
        target: BattlerId,
        _launcher: Option<BattlerId>,
    ) -> Option<Prevention> {
        (view.is_holder(target) && self.statuses.contains(&status)).then(|| Prevention::by(self.id))
    }
}

/// Inner Focus and Own Tempo.
#[derive(Debug)]
pub struct VolatileImmunity {
    id: &'static str,
    volatile: &'static str,
}

impl VolatileImmunity {
    pub fn inner_focus() -> Self {
        Self {
            id: "innerfocus",
            volatile: FLINCH,
        }
    }

    pub fn own_tempo() -> Self {
        Self {
            id: "owntempo",
            volatile: CONFUSION,
        }
    }
}

impl Effect for VolatileImmunity {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn on_volatile_prevention(&self, view: HookView<'_>, volatile: &'static str, target: BattlerId) -> Option<Prevention> {
        (view.is_holder(target) && volatile == self.volatile).then(|| Prevention::by(self.id))
    }
}

/// Clear Body blocks every drop from others, Keen Eye only accuracy drops.
#[derive(Debug)]
pub struct StatDropImmunity {
    id: &'static str,
    only: Option<StageStat>,
}

impl StatDropImmunity {
    pub fn clear_body() -> Self {
        Self {
            id: "clearbody",
            only: None,
        }
    }

    pub fn keen_eye() -> Self {
        Self {
            id: "keeneye",
            only: Some(StageStat::Accuracy),
        }
    }
}

impl Effect for StatDropImmunity {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn on_stat_decrease_prevention(
        &self,
        view: HookView<'_>,
        stat: StageStat,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) -> Option<Prevention> {
        let from_other = launcher.is_some_and(|l| l != target);
        let covered = self.only.map_or(true, |only| only == stat);
        (view.is_holder(target) && from_other && covered).then(|| Prevention::by(self.id))
    }
}

#[derive(Debug)]
pub struct Multiscale;

impl Effect for Multiscale {
    ability!("multiscale");

    fn mod3_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.target) && view.state.battler(mv.target).at_full_hp() {
            0.5
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
pub struct ThickFat;

impl Effect for ThickFat {
    ability!("thickfat");

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.target) && matches!(mv.move_type, Type::Fire | Type::Ice) {
            0.5
        } else {
            1.0
        }
    }
}

/// Only super-effective moves land on the holder.
#[derive(Debug)]
pub struct WonderGuard;

impl Effect for WonderGuard {
    ability!("wonderguard");

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        let applies = ctx.is_holder(mv.target) && mv.user != mv.target && mv.data.is_damaging();
        (applies && mv.effectiveness <= 1.0).then(|| {
            Prevention::by("wonderguard").with_message(BattleMessage::NoEffect { target: mv.target })
        })
    }
}

#[derive(Debug)]
pub struct Guts;

impl Effect for Guts {
    ability!("guts");

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) && mv.is_physical() && view.state.battler(mv.user).status().is_some() {
            1.5
        } else {
            1.0
        }
    }
}

/// Blaze, Overgrow and Torrent: 1.5x attack for one type at a third of HP.
#[derive(Debug)]
pub struct Pinch {
    id: &'static str,
    move_type: Type,
}

impl Pinch {
    pub fn new(id: &'static str, move_type: Type) -> Self {
        Self { id, move_type }
    }
}

impl Effect for Pinch {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        let user = view.state.battler(mv.user);
        let low = user.hp() as u32 * 3 <= user.max_hp() as u32;
        if view.is_holder(mv.user) && mv.move_type == self.move_type && low {
            1.5
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
pub struct ToughClaws;

impl Effect for ToughClaws {
    ability!("toughclaws");

    fn base_power_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) && mv.makes_contact() {
            1.3
        } else {
            1.0
        }
    }
}

/// Same-type bonus goes from 1.5x to 2x.
#[derive(Debug)]
pub struct Adaptability;

impl Effect for Adaptability {
    ability!("adaptability");

    fn mod2_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) && view.state.battler(mv.user).has_type(mv.move_type) {
            4.0 / 3.0
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
pub struct Static;

impl Effect for Static {
    ability!("static");

    fn on_post_damage(&mut self, ctx: &mut EffectContext<'_>, amount: u16, target: BattlerId, cause: &DamageCause) {
        let Some(attacker) = cause.launcher else {
            return;
        };
        if amount == 0 || !ctx.is_holder(target) || !cause.is_contact() || attacker == target {
            return;
        }
        if ctx.state().battler(attacker).is_fainted() || !ctx.chance(30) {
            return;
        }
        ctx.show_effect(target, "static");
        ctx.change_status(attacker, Some(MajorStatus::Paralysis), Some(target));
    }
}

#[derive(Debug)]
pub struct RoughSkin;

impl Effect for RoughSkin {
    ability!("roughskin");

    fn on_post_damage(&mut self, ctx: &mut EffectContext<'_>, amount: u16, target: BattlerId, cause: &DamageCause) {
        let Some(attacker) = cause.launcher else {
            return;
        };
        if amount == 0 || !ctx.is_holder(target) || !cause.is_contact() || attacker == target {
            return;
        }
        let battler = ctx.state().battler(attacker);
        if battler.is_fainted() {
            return;
        }
        let amount = fraction_floor(battler.max_hp(), 1, 8);
        ctx.show_effect(target, "roughskin");
        ctx.damage(attacker, amount, DamageCause::of(DamageKind::Ability, Some(target)));
    }
}

/// Knocked out by contact: the attacker loses a quarter of its max HP.
#[derive(Debug)]
pub struct Aftermath;

impl Effect for Aftermath {
    ability!("aftermath");

    fn on_post_damage_death(
        &mut self,
        ctx: &mut EffectContext<'_>,
        _amount: u16,
        target: BattlerId,
        cause: &DamageCause,
    ) {
        let Some(attacker) = cause.launcher else {
            return;
        };
        if !ctx.is_holder(target) || !cause.is_contact() || attacker == target {
            return;
        }
        let battler = ctx.state().battler(attacker);
        if battler.is_fainted() {
            return;
        }
        let amount = fraction_floor(battler.max_hp(), 1, 4);
        ctx.show_effect(target, "aftermath");
        ctx.damage(attacker, amount, DamageCause::of(DamageKind::Ability, Some(target)));
    }
}

#[derive(Debug)]
pub struct Moxie;

impl Effect for Moxie {
    ability!("moxie");

    fn on_post_damage_death(
        &mut self,
        ctx: &mut EffectContext<'_>,
        _amount: u16,
        target: BattlerId,
        cause: &DamageCause,
    ) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        if cause.kind == DamageKind::Move && cause.launcher == Some(holder) && target != holder {
            ctx.change_stage(holder, StageStat::Atk, 1, Some(holder));
        }
    }
}

/// Sharply raises Attack when a foe lowers one of the holder's stats.
#[derive(Debug)]
pub struct Defiant;

impl Effect for Defiant {
    ability!("defiant");

    fn on_stat_change_post(
        &mut self,
        ctx: &mut EffectContext<'_>,
        _stat: StageStat,
        delta: i8,
        target: BattlerId,
        launcher: Option<BattlerId>,
    ) {
        let by_foe = launcher.is_some_and(|l| ctx.view().is_foe_of_holder(l));
        if delta < 0 && ctx.is_holder(target) && by_foe {
            ctx.show_effect(target, "defiant");
            ctx.change_stage(target, StageStat::Atk, 2, Some(target));
        }
    }
}

#[derive(Debug)]
pub struct SpeedBoost;

impl Effect for SpeedBoost {
    ability!("speedboost");

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        let battler = ctx.state().battler(holder);
        if !battler.is_fainted() && battler.turns_on_field() > 0 {
            ctx.change_stage(holder, StageStat::Spe, 1, Some(holder));
        }
    }
}

#[derive(Debug)]
pub struct Prankster;

impl Effect for Prankster {
    ability!("prankster");

    fn priority_modifier(&self, view: HookView<'_>, user: BattlerId, data: &'static MoveData) -> i8 {
        i8::from(view.is_holder(user) && data.category == MoveCategory::Status)
    }
}

/// Swift Swim and Chlorophyll.
#[derive(Debug)]
pub struct WeatherSpeed {
    id: &'static str,
    weather: Weather,
}

impl WeatherSpeed {
    pub fn new(id: &'static str, weather: Weather) -> Self {
        Self { id, weather }
    }
}

impl Effect for WeatherSpeed {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Ability
    }

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        if view.is_holder(battler) && view.state.weather() == Some(self.weather) {
            2.0
        } else {
            1.0
        }
    }
}

/// Doubles speed once the held item is lost, until the holder leaves.
#[derive(Debug, Default)]
pub struct Unburden {
    active: bool,
}

impl Effect for Unburden {
    ability!("unburden");

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        if self.active && view.is_holder(battler) && view.state.battler(battler).item().is_none() {
            2.0
        } else {
            1.0
        }
    }

    fn on_post_item_change(
        &mut self,
        ctx: &mut EffectContext<'_>,
        holder: BattlerId,
        old: Option<&'static str>,
        new: Option<&'static str>,
    ) {
        if ctx.is_holder(holder) && old.is_some() && new.is_none() {
            self.active = true;
        }
    }
}

/// Foes cannot switch out unless they share the ability or are Ghost-typed.
#[derive(Debug)]
pub struct ShadowTag;

impl Effect for ShadowTag {
    ability!("shadowtag");

    fn on_switch_prevention(&self, view: HookView<'_>, battler: BattlerId) -> Option<Prevention> {
        let other = view.state.battler(battler);
        let escapes = other.ability() == "shadowtag" || other.has_type(Type::Ghost);
        (view.is_foe_of_holder(battler) && !escapes).then(|| Prevention::by("shadowtag"))
    }
}

#[derive(Debug)]
pub struct RunAway;

impl Effect for RunAway {
    ability!("runaway");

    fn on_flee_passthrough(&self, view: HookView<'_>, battler: BattlerId) -> bool {
        view.is_holder(battler)
    }
}

#[derive(Debug)]
pub struct NoGuard;

impl Effect for NoGuard {
    ability!("noguard");

    fn on_pre_accuracy_check(&self, view: HookView<'_>, mv: &MoveContext) -> Option<AccuracyCheck> {
        (view.is_holder(mv.user) || view.is_holder(mv.target)).then_some(AccuracyCheck::AlwaysHit)
    }
}

#[derive(Debug)]
pub struct RainDish;

impl Effect for RainDish {
    ability!("raindish");

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        let battler = ctx.state().battler(holder);
        if ctx.state().weather() == Some(Weather::Rain) && !battler.is_fainted() && !battler.at_full_hp() {
            let amount = fraction_floor(battler.max_hp(), 1, 16);
            ctx.heal(holder, amount);
        }
    }
}
