//! Held item effects. The item change handler recreates an item's effect
//! whenever the held item changes, so per-holding state (choice locks, used
//! flags) lives here and is reset by a switch.

use super::{
    DamageCause, DamageKind, DamagePrevention, Effect, EffectCategory, EffectContext, HookView, MoveContext,
    OrderChange, Prevention,
};
use crate::data::moves::{MoveData, STRUGGLE};
use crate::data::types::Type;
use crate::sim::battler::BattlerId;
use crate::sim::message::BattleMessage;
use crate::sim::state::Terrain;
use crate::sim::stats::{fraction_floor, MajorStatus, StageStat};

/// Shows the item, then drops it as consumed.
fn consume(ctx: &mut EffectContext<'_>, holder: BattlerId, item: &'static str) {
    ctx.show_effect(holder, item);
    ctx.change_item(holder, None, true);
}

fn still_held(ctx: &EffectContext<'_>, holder: BattlerId, item: &str) -> bool {
    let battler = ctx.state().battler(holder);
    !battler.is_fainted() && battler.item() == Some(item)
}

#[derive(Clone, Copy, Debug)]
enum BerryHeal {
    Fixed(u16),
    Fraction(u32),
}

/// Oran and Sitrus Berry: heal once the holder drops to half HP or below.
#[derive(Debug)]
pub struct HealingBerry {
    id: &'static str,
    heal: BerryHeal,
    used: bool,
}

impl HealingBerry {
    pub fn oran() -> Self {
        Self {
            id: "oranberry",
            heal: BerryHeal::Fixed(10),
            used: false,
        }
    }

    pub fn sitrus() -> Self {
        Self {
            id: "sitrusberry",
            heal: BerryHeal::Fraction(4),
            used: false,
        }
    }

    fn process_effect(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        if self.used || !still_held(ctx, holder, self.id) {
            return;
        }
        let battler = ctx.state().battler(holder);
        if battler.hp() as u32 * 2 > battler.max_hp() as u32 {
            return;
        }
        let amount = match self.heal {
            BerryHeal::Fixed(amount) => amount,
            BerryHeal::Fraction(den) => fraction_floor(battler.max_hp(), 1, den),
        };
        self.used = true;
        tracing::debug!(holder = holder.0, berry = self.id, amount, "berry triggered");
        ctx.show_effect(holder, self.id);
        ctx.heal(holder, amount);
        ctx.change_item(holder, None, true);
    }
}

impl Effect for HealingBerry {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_post_damage(&mut self, ctx: &mut EffectContext<'_>, _amount: u16, target: BattlerId, _cause: &DamageCause) {
        if ctx.is_holder(target) {
            self.process_effect(ctx);
        }
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        self.process_effect(ctx);
    }
}

/// Lum Berry cures any status, Chesto Berry only sleep.
#[derive(Debug)]
pub struct CureBerry {
    id: &'static str,
    cures: Option<MajorStatus>,
    used: bool,
}

impl CureBerry {
    pub fn lum() -> Self {
        Self {
            id: "lumberry",
            cures: None,
            used: false,
        }
    }

    pub fn chesto() -> Self {
        Self {
            id: "chestoberry",
            cures: Some(MajorStatus::Sleep),
            used: false,
        }
    }

    fn process_effect(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        if self.used || !still_held(ctx, holder, self.id) {
            return;
        }
        let Some(status) = ctx.state().battler(holder).status() else {
            return;
        };
        if self.cures.is_some_and(|cures| cures != status) {
            return;
        }
        self.used = true;
        ctx.show_effect(holder, self.id);
        ctx.change_status(holder, None, None);
        ctx.change_item(holder, None, true);
    }
}

impl Effect for CureBerry {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_post_status_change(
        &mut self,
        ctx: &mut EffectContext<'_>,
        status: Option<MajorStatus>,
        target: BattlerId,
        _launcher: Option<BattlerId>,
    ) {
        if status.is_some() && ctx.is_holder(target) {
            self.process_effect(ctx);
        }
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        self.process_effect(ctx);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChoiceKind {
    Band,
    Specs,
    Scarf,
}

/// Boosts one stat by half and locks the holder into the first move used.
#[derive(Debug)]
pub struct ChoiceItem {
    kind: ChoiceKind,
    locked: Option<&'static str>,
}

impl ChoiceItem {
    pub fn new(kind: ChoiceKind) -> Self {
        Self { kind, locked: None }
    }
}

impl Effect for ChoiceItem {
    fn name(&self) -> &'static str {
        match self.kind {
            ChoiceKind::Band => "choiceband",
            ChoiceKind::Specs => "choicespecs",
            ChoiceKind::Scarf => "choicescarf",
        }
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_move_disabled_check(&self, view: HookView<'_>, user: BattlerId, data: &'static MoveData) -> Option<Prevention> {
        let locked = self.locked?;
        (view.is_holder(user) && data.id != locked && data.id != STRUGGLE).then(|| Prevention::by(self.name()))
    }

    fn attack_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        let boosted = match self.kind {
            ChoiceKind::Band => mv.is_physical(),
            ChoiceKind::Specs => mv.is_special(),
            ChoiceKind::Scarf => false,
        };
        if boosted && view.is_holder(mv.user) {
            1.5
        } else {
            1.0
        }
    }

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        if self.kind == ChoiceKind::Scarf && view.is_holder(battler) {
            1.5
        } else {
            1.0
        }
    }

    fn on_move_launched(&mut self, ctx: &mut EffectContext<'_>, user: BattlerId, data: &'static MoveData, _damage: u16) {
        if ctx.is_holder(user) && self.locked.is_none() && data.id != STRUGGLE {
            tracing::trace!(holder = user.0, locked = data.id, "choice lock set");
            self.locked = Some(data.id);
        }
    }
}

/// Survives a hit from full HP with 1 HP left.
#[derive(Debug)]
pub struct FocusSash;

impl Effect for FocusSash {
    fn name(&self) -> &'static str {
        "focussash"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

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
        consume(ctx, target, "focussash");
        Some(DamagePrevention::Reduce(battler.hp() - 1))
    }
}

/// Leftovers and Black Sludge.
#[derive(Debug)]
pub struct ResidualHeal {
    id: &'static str,
    poison_only: bool,
}

impl ResidualHeal {
    pub fn leftovers() -> Self {
        Self {
            id: "leftovers",
            poison_only: false,
        }
    }

    pub fn black_sludge() -> Self {
        Self {
            id: "blacksludge",
            poison_only: true,
        }
    }
}

impl Effect for ResidualHeal {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        let battler = ctx.state().battler(holder);
        if battler.is_fainted() {
            return;
        }
        if self.poison_only && !battler.has_type(Type::Poison) {
            let amount = fraction_floor(battler.max_hp(), 1, 8);
            ctx.show_effect(holder, self.id);
            ctx.damage(holder, amount, DamageCause::of(DamageKind::Item, None));
        } else if !battler.at_full_hp() {
            let amount = fraction_floor(battler.max_hp(), 1, 16);
            ctx.show_effect(holder, self.id);
            ctx.heal(holder, amount);
        }
    }
}

#[derive(Debug)]
pub struct LifeOrb;

impl Effect for LifeOrb {
    fn name(&self) -> &'static str {
        "lifeorb"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn mod2_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) {
            1.3
        } else {
            1.0
        }
    }

    fn on_move_launched(&mut self, ctx: &mut EffectContext<'_>, user: BattlerId, _data: &'static MoveData, damage: u16) {
        let battler = ctx.state().battler(user);
        if !ctx.is_holder(user) || damage == 0 || battler.is_fainted() {
            return;
        }
        let amount = fraction_floor(battler.max_hp(), 1, 10);
        ctx.damage(user, amount, DamageCause::of(DamageKind::Item, None));
    }
}

#[derive(Debug)]
pub struct ExpertBelt;

impl Effect for ExpertBelt {
    fn name(&self) -> &'static str {
        "expertbelt"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn mod3_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if view.is_holder(mv.user) && mv.effectiveness > 1.0 {
            1.2
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
pub struct ShedShell;

impl Effect for ShedShell {
    fn name(&self) -> &'static str {
        "shedshell"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_switch_passthrough(&self, view: HookView<'_>, battler: BattlerId) -> bool {
        view.is_holder(battler)
    }
}

#[derive(Debug)]
pub struct SmokeBall;

impl Effect for SmokeBall {
    fn name(&self) -> &'static str {
        "smokeball"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_flee_passthrough(&self, view: HookView<'_>, battler: BattlerId) -> bool {
        view.is_holder(battler)
    }
}

#[derive(Debug)]
pub struct QuickClaw;

impl Effect for QuickClaw {
    fn name(&self) -> &'static str {
        "quickclaw"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_order_change(&mut self, ctx: &mut EffectContext<'_>, actor: BattlerId) -> Option<OrderChange> {
        if !ctx.is_holder(actor) || !ctx.chance(20) {
            return None;
        }
        ctx.show_effect(actor, "quickclaw");
        Some(OrderChange::First)
    }
}

/// Restores lowered stages once, right after the drop.
#[derive(Debug)]
pub struct WhiteHerb {
    used: bool,
}

impl WhiteHerb {
    pub fn new() -> Self {
        Self { used: false }
    }
}

impl Effect for WhiteHerb {
    fn name(&self) -> &'static str {
        "whiteherb"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_stat_change_post(
        &mut self,
        ctx: &mut EffectContext<'_>,
        _stat: StageStat,
        delta: i8,
        target: BattlerId,
        _launcher: Option<BattlerId>,
    ) {
        if self.used || delta >= 0 || !ctx.is_holder(target) || !still_held(ctx, target, "whiteherb") {
            return;
        }
        self.used = true;
        let battler = ctx.state().battler(target);
        for stat in StageStat::ALL {
            let stage = battler.stage(stat);
            if stage < 0 {
                ctx.change_stage(target, stat, -stage, Some(target));
            }
        }
        consume(ctx, target, "whiteherb");
    }
}

/// Electric and Grassy Seed: +1 Defense when the matching terrain is up.
#[derive(Debug)]
pub struct TerrainSeed {
    id: &'static str,
    terrain: Terrain,
    used: bool,
}

impl TerrainSeed {
    pub fn electric() -> Self {
        Self {
            id: "electricseed",
            terrain: Terrain::Electric,
            used: false,
        }
    }

    pub fn grassy() -> Self {
        Self {
            id: "grassyseed",
            terrain: Terrain::Grassy,
            used: false,
        }
    }

    fn process_effect(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(holder) = ctx.holder() else {
            return;
        };
        if self.used || ctx.state().terrain() != Some(self.terrain) || !still_held(ctx, holder, self.id) {
            return;
        }
        self.used = true;
        ctx.change_stage(holder, StageStat::Def, 1, Some(holder));
        consume(ctx, holder, self.id);
    }
}

impl Effect for TerrainSeed {
    fn name(&self) -> &'static str {
        self.id
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        if ctx.is_holder(incoming) {
            self.process_effect(ctx);
        }
    }

    fn on_post_fterrain_change(&mut self, ctx: &mut EffectContext<'_>, _terrain: Option<Terrain>) {
        self.process_effect(ctx);
    }
}

/// Switches the holder out after it is hit by a move.
#[derive(Debug)]
pub struct EjectButton {
    used: bool,
}

impl EjectButton {
    pub fn new() -> Self {
        Self { used: false }
    }
}

impl Effect for EjectButton {
    fn name(&self) -> &'static str {
        "ejectbutton"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Item
    }

    fn on_post_damage(&mut self, ctx: &mut EffectContext<'_>, amount: u16, target: BattlerId, cause: &DamageCause) {
        if self.used || amount == 0 || cause.kind != DamageKind::Move || !ctx.is_holder(target) {
            return;
        }
        if !still_held(ctx, target, "ejectbutton") || ctx.state().bench(ctx.state().battler(target).bank).is_empty() {
            return;
        }
        self.used = true;
        consume(ctx, target, "ejectbutton");
        ctx.message(BattleMessage::EffectTriggered {
            battler: target,
            effect: "ejectbutton",
        });
        ctx.force_switch(target);
    }
}
