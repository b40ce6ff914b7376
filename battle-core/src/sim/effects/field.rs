use serde::{Deserialize, Serialize};

use super::{
    DamageCause, DamageKind, Effect, EffectCategory, EffectContext, EffectLifetime, HookView, MoveContext, Prevention,
};
use crate::data::types::{effectiveness_dual, Type};
use crate::sim::battler::BattlerId;
use crate::sim::state::{Terrain, Weather};
use crate::sim::stats::{fraction_floor, MajorStatus};

pub const TRICK_ROOM: &str = "trickroom";

fn tick(turns: &mut u8) -> EffectLifetime {
    *turns = turns.saturating_sub(1);
    if *turns == 0 {
        EffectLifetime::Expired
    } else {
        EffectLifetime::Persistent
    }
}

#[derive(Debug)]
pub struct WeatherEffect {
    weather: Weather,
    turns: u8,
}

impl WeatherEffect {
    pub fn new(weather: Weather, turns: u8) -> Self {
        Self { weather, turns }
    }
}

impl Effect for WeatherEffect {
    fn name(&self) -> &'static str {
        match self.weather {
            Weather::Sun => "sunnyday",
            Weather::Rain => "raindance",
            Weather::Sand => "sandstorm",
            Weather::Hail => "hail",
        }
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Weather(self.weather)
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        tick(&mut self.turns)
    }

    fn mod1_multiplier(&self, _view: HookView<'_>, mv: &MoveContext) -> f32 {
        match (self.weather, mv.move_type) {
            (Weather::Sun, Type::Fire) | (Weather::Rain, Type::Water) => 1.5,
            (Weather::Sun, Type::Water) | (Weather::Rain, Type::Fire) => 0.5,
            _ => 1.0,
        }
    }

    fn defense_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        if self.weather == Weather::Sand && mv.is_special() && view.state.battler(mv.target).has_type(Type::Rock) {
            1.5
        } else {
            1.0
        }
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        let immune: &[Type] = match self.weather {
            Weather::Sand => &[Type::Rock, Type::Ground, Type::Steel],
            Weather::Hail => &[Type::Ice],
            Weather::Sun | Weather::Rain => return,
        };
        for id in ctx.state().living_active() {
            let battler = ctx.state().battler(id);
            if immune.iter().any(|kind| battler.has_type(*kind)) {
                continue;
            }
            let amount = fraction_floor(battler.max_hp(), 1, 16);
            ctx.damage(id, amount, DamageCause::residual());
        }
    }
}

#[derive(Debug)]
pub struct TerrainEffect {
    terrain: Terrain,
    turns: u8,
}

impl TerrainEffect {
    pub fn new(terrain: Terrain, turns: u8) -> Self {
        Self { terrain, turns }
    }
}

impl Effect for TerrainEffect {
    fn name(&self) -> &'static str {
        match self.terrain {
            Terrain::Electric => "electricterrain",
            Terrain::Grassy => "grassyterrain",
            Terrain::Misty => "mistyterrain",
            Terrain::Psychic => "psychicterrain",
        }
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::Terrain(self.terrain)
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        tick(&mut self.turns)
    }

    fn base_power_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        let boosted = match self.terrain {
            Terrain::Electric => Type::Electric,
            Terrain::Grassy => Type::Grass,
            Terrain::Psychic => Type::Psychic,
            Terrain::Misty => {
                return if mv.move_type == Type::Dragon && view.state.is_grounded(mv.target) {
                    0.5
                } else {
                    1.0
                }
            }
        };
        if mv.move_type == boosted && view.state.is_grounded(mv.user) {
            1.3
        } else {
            1.0
        }
    }

    fn on_status_prevention(
        &self,
        view: HookView<'_>,
        status: MajorStatus,
        target: BattlerId,
        _launcher: Option<BattlerId>,
    ) -> Option<Prevention> {
        let blocked = match self.terrain {
            Terrain::Electric => status == MajorStatus::Sleep,
            Terrain::Misty => true,
            Terrain::Grassy | Terrain::Psychic => false,
        };
        (blocked && view.state.is_grounded(target)).then(|| Prevention::by(self.name()))
    }

    fn on_move_prevention_target(&mut self, ctx: &mut EffectContext<'_>, mv: &MoveContext) -> Option<Prevention> {
        let state = ctx.state();
        let priority_hit = mv.data.priority > 0 && state.battler(mv.user).bank != state.battler(mv.target).bank;
        (self.terrain == Terrain::Psychic && priority_hit && state.is_grounded(mv.target))
            .then(|| Prevention::by(self.name()))
    }

    fn on_end_turn_event(&mut self, ctx: &mut EffectContext<'_>) {
        if self.terrain != Terrain::Grassy {
            return;
        }
        for id in ctx.state().living_active() {
            let battler = ctx.state().battler(id);
            if ctx.state().is_grounded(id) && !battler.at_full_hp() {
                let amount = fraction_floor(battler.max_hp(), 1, 16);
                ctx.heal(id, amount);
            }
        }
    }
}

#[derive(Debug)]
pub struct TrickRoom {
    turns: u8,
}

impl TrickRoom {
    pub fn new() -> Self {
        Self { turns: 5 }
    }
}

impl Effect for TrickRoom {
    fn name(&self) -> &'static str {
        TRICK_ROOM
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::FieldCondition
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        tick(&mut self.turns)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SideConditionKind {
    Reflect,
    LightScreen,
    Tailwind,
    StealthRock,
    Spikes,
}

impl SideConditionKind {
    pub fn create(self) -> Box<dyn Effect> {
        match self {
            SideConditionKind::Reflect => Box::new(Screen { kind: self, turns: 5 }),
            SideConditionKind::LightScreen => Box::new(Screen { kind: self, turns: 5 }),
            SideConditionKind::Tailwind => Box::new(Tailwind { turns: 4 }),
            SideConditionKind::StealthRock => Box::new(StealthRock),
            SideConditionKind::Spikes => Box::new(Spikes { layers: 1 }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SideConditionKind::Reflect => "reflect",
            SideConditionKind::LightScreen => "lightscreen",
            SideConditionKind::Tailwind => "tailwind",
            SideConditionKind::StealthRock => "stealthrock",
            SideConditionKind::Spikes => "spikes",
        }
    }
}

#[derive(Debug)]
struct Screen {
    kind: SideConditionKind,
    turns: u8,
}

impl Effect for Screen {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::SideCondition
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        tick(&mut self.turns)
    }

    fn mod1_multiplier(&self, view: HookView<'_>, mv: &MoveContext) -> f32 {
        let covers = match self.kind {
            SideConditionKind::Reflect => mv.is_physical(),
            _ => mv.is_special(),
        };
        if covers && !mv.critical && view.bank() == Some(view.state.battler(mv.target).bank) {
            0.5
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
struct Tailwind {
    turns: u8,
}

impl Effect for Tailwind {
    fn name(&self) -> &'static str {
        "tailwind"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::SideCondition
    }

    fn on_turn_tick(&mut self) -> EffectLifetime {
        tick(&mut self.turns)
    }

    fn speed_modifier(&self, view: HookView<'_>, battler: BattlerId) -> f32 {
        if view.bank() == Some(view.state.battler(battler).bank) {
            2.0
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
struct StealthRock;

impl Effect for StealthRock {
    fn name(&self) -> &'static str {
        "stealthrock"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::SideCondition
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        let battler = ctx.state().battler(incoming);
        if ctx.view().bank() != Some(battler.bank) {
            return;
        }
        let multiplier = effectiveness_dual(Type::Rock, battler.types());
        let amount = ((battler.max_hp() as f32 * multiplier / 8.0).floor() as u16).max(1);
        ctx.damage(incoming, amount, DamageCause::of(DamageKind::Hazard, None));
    }
}

#[derive(Debug)]
struct Spikes {
    layers: u8,
}

impl Effect for Spikes {
    fn name(&self) -> &'static str {
        "spikes"
    }

    fn category(&self) -> EffectCategory {
        EffectCategory::SideCondition
    }

    fn try_stack(&mut self) -> bool {
        if self.layers >= 3 {
            return false;
        }
        self.layers += 1;
        true
    }

    fn on_switch_event(&mut self, ctx: &mut EffectContext<'_>, _outgoing: Option<BattlerId>, incoming: BattlerId) {
        let battler = ctx.state().battler(incoming);
        if ctx.view().bank() != Some(battler.bank) || !ctx.state().is_grounded(incoming) {
            return;
        }
        let den = match self.layers {
            1 => 8,
            2 => 6,
            _ => 4,
        };
        let amount = fraction_floor(battler.max_hp(), 1, den);
        ctx.damage(incoming, amount, DamageCause::of(DamageKind::Hazard, None));
    }
}
