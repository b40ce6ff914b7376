use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::abilities::*;
use super::items::*;
use super::Effect;
use crate::data::types::Type;
use crate::sim::state::{Terrain, Weather};
use crate::sim::stats::MajorStatus;

type Constructor = fn() -> Box<dyn Effect>;

/// Maps item and ability ids to effect constructors. Items without an entry
/// are inert (mega stones, bag-only items); every ability must be registered.
pub struct EffectRegistry {
    items: HashMap<&'static str, Constructor>,
    abilities: HashMap<&'static str, Constructor>,
}

impl EffectRegistry {
    fn new() -> Self {
        let mut items: HashMap<&'static str, Constructor> = HashMap::new();
        items.insert("oranberry", || Box::new(HealingBerry::oran()));
        items.insert("sitrusberry", || Box::new(HealingBerry::sitrus()));
        items.insert("lumberry", || Box::new(CureBerry::lum()));
        items.insert("chestoberry", || Box::new(CureBerry::chesto()));
        items.insert("choiceband", || Box::new(ChoiceItem::new(ChoiceKind::Band)));
        items.insert("choicespecs", || Box::new(ChoiceItem::new(ChoiceKind::Specs)));
        items.insert("choicescarf", || Box::new(ChoiceItem::new(ChoiceKind::Scarf)));
        items.insert("focussash", || Box::new(FocusSash));
        items.insert("leftovers", || Box::new(ResidualHeal::leftovers()));
        items.insert("blacksludge", || Box::new(ResidualHeal::black_sludge()));
        items.insert("lifeorb", || Box::new(LifeOrb));
        items.insert("expertbelt", || Box::new(ExpertBelt));
        items.insert("shedshell", || Box::new(ShedShell));
        items.insert("smokeball", || Box::new(SmokeBall));
        items.insert("quickclaw", || Box::new(QuickClaw));
        items.insert("whiteherb", || Box::new(WhiteHerb::new()));
        items.insert("electricseed", || Box::new(TerrainSeed::electric()));
        items.insert("grassyseed", || Box::new(TerrainSeed::grassy()));
        items.insert("ejectbutton", || Box::new(EjectButton::new()));

        let mut abilities: HashMap<&'static str, Constructor> = HashMap::new();
        abilities.insert("intimidate", || Box::new(Intimidate));
        abilities.insert("drought", || Box::new(WeatherSetter::new("drought", Weather::Sun)));
        abilities.insert("drizzle", || Box::new(WeatherSetter::new("drizzle", Weather::Rain)));
        abilities.insert("sandstream", || Box::new(WeatherSetter::new("sandstream", Weather::Sand)));
        abilities.insert("electricsurge", || Box::new(TerrainSetter::new("electricsurge", Terrain::Electric)));
        abilities.insert("naturalcure", || Box::new(NaturalCure));
        abilities.insert("regenerator", || Box::new(Regenerator));
        abilities.insert("neutralizinggas", || Box::new(NeutralizingGas));
        abilities.insert("sturdy", || Box::new(Sturdy));
        abilities.insert("levitate", || Box::new(Levitate));
        abilities.insert("voltabsorb", || Box::new(VoltAbsorb));
        abilities.insert("flashfire", || Box::new(FlashFire::default()));
        abilities.insert("limber", || Box::new(StatusImmunity::new("limber", &[MajorStatus::Paralysis])));
        abilities.insert("immunity", || {
            Box::new(StatusImmunity::new("immunity", &[MajorStatus::Poison, MajorStatus::Toxic]))
        });
        abilities.insert("innerfocus", || Box::new(VolatileImmunity::inner_focus()));
        abilities.insert("owntempo", || Box::new(VolatileImmunity::own_tempo()));
        abilities.insert("clearbody", || Box::new(StatDropImmunity::clear_body()));
        abilities.insert("keeneye", || Box::new(StatDropImmunity::keen_eye()));
        abilities.insert("multiscale", || Box::new(Multiscale));
        abilities.insert("thickfat", || Box::new(ThickFat));
        abilities.insert("wonderguard", || Box::new(WonderGuard));
        abilities.insert("guts", || Box::new(Guts));
        abilities.insert("blaze", || Box::new(Pinch::new("blaze", Type::Fire)));
        abilities.insert("overgrow", || Box::new(Pinch::new("overgrow", Type::Grass)));
        abilities.insert("torrent", || Box::new(Pinch::new("torrent", Type::Water)));
        abilities.insert("toughclaws", || Box::new(ToughClaws));
        abilities.insert("adaptability", || Box::new(Adaptability));
        abilities.insert("static", || Box::new(Static));
        abilities.insert("roughskin", || Box::new(RoughSkin));
        abilities.insert("aftermath", || Box::new(Aftermath));
        abilities.insert("moxie", || Box::new(Moxie));
        abilities.insert("defiant", || Box::new(Defiant));
        abilities.insert("speedboost", || Box::new(SpeedBoost));
        abilities.insert("prankster", || Box::new(Prankster));
        abilities.insert("swiftswim", || Box::new(WeatherSpeed::new("swiftswim", Weather::Rain)));
        abilities.insert("chlorophyll", || Box::new(WeatherSpeed::new("chlorophyll", Weather::Sun)));
        abilities.insert("unburden", || Box::new(Unburden::default()));
        abilities.insert("shadowtag", || Box::new(ShadowTag));
        abilities.insert("runaway", || Box::new(RunAway));
        abilities.insert("noguard", || Box::new(NoGuard));
        abilities.insert("raindish", || Box::new(RainDish));

        Self { items, abilities }
    }

    pub fn item(&self, id: &str) -> Option<Box<dyn Effect>> {
        self.items.get(id).map(|make| make())
    }

    pub fn ability(&self, id: &str) -> Option<Box<dyn Effect>> {
        self.abilities.get(id).map(|make| make())
    }

    pub fn has_ability(&self, id: &str) -> bool {
        self.abilities.contains_key(id)
    }
}

pub static REGISTRY: Lazy<EffectRegistry> = Lazy::new(EffectRegistry::new);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::abilities::ABILITIES;
    use crate::sim::effects::EffectCategory;

    #[test]
    fn every_known_ability_is_registered() {
        for id in ABILITIES.keys() {
            assert!(REGISTRY.has_ability(id), "{id} has no effect");
        }
    }

    #[test]
    fn constructors_report_their_own_id() {
        let effect = REGISTRY.ability("swiftswim").unwrap();
        assert_eq!(effect.name(), "swiftswim");
        assert_eq!(effect.category(), EffectCategory::Ability);
        let effect = REGISTRY.item("choicescarf").unwrap();
        assert_eq!(effect.name(), "choicescarf");
        assert_eq!(effect.category(), EffectCategory::Item);
    }

    #[test]
    fn bag_items_have_no_effect() {
        assert!(REGISTRY.item("potion").is_none());
        assert!(REGISTRY.item("lucarionite").is_none());
    }
}
