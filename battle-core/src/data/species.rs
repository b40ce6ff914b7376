use phf::phf_map;

use super::types::Type;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl BaseStats {
    /// Stats in `[hp, atk, def, spa, spd, spe]` order, matching IV/EV arrays.
    pub fn as_array(&self) -> [u16; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MegaEvolution {
    pub stone: &'static str,
    pub form: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub id: &'static str,
    pub name: &'static str,
    /// Mono-typed species repeat their primary type.
    pub types: [Type; 2],
    pub base_stats: BaseStats,
    pub abilities: &'static [&'static str],
    pub catch_rate: u8,
    pub ev_yield: [u8; 6],
    pub mega: Option<MegaEvolution>,
    pub base_form: Option<&'static str>,
}

pub static POKEDEX: phf::Map<&'static str, SpeciesData> = phf_map! {
    "charizard" => SpeciesData {
        id: "charizard",
        name: "Charizard",
        types: [Type::Fire, Type::Flying],
        base_stats: BaseStats { hp: 78, atk: 84, def: 78, spa: 109, spd: 85, spe: 100 },
        abilities: &["blaze"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 3, 0, 0],
        mega: Some(MegaEvolution { stone: "charizarditex", form: "charizardmegax" }),
        base_form: None,
    },
    "charizardmegax" => SpeciesData {
        id: "charizardmegax",
        name: "Charizard-Mega-X",
        types: [Type::Fire, Type::Dragon],
        base_stats: BaseStats { hp: 78, atk: 130, def: 111, spa: 130, spd: 85, spe: 100 },
        abilities: &["toughclaws"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 3, 0, 0],
        mega: None,
        base_form: Some("charizard"),
    },
    "venusaur" => SpeciesData {
        id: "venusaur",
        name: "Venusaur",
        types: [Type::Grass, Type::Poison],
        base_stats: BaseStats { hp: 80, atk: 82, def: 83, spa: 100, spd: 100, spe: 80 },
        abilities: &["overgrow", "chlorophyll"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 2, 1, 0],
        mega: None,
        base_form: None,
    },
    "blastoise" => SpeciesData {
        id: "blastoise",
        name: "Blastoise",
        types: [Type::Water, Type::Water],
        base_stats: BaseStats { hp: 79, atk: 83, def: 100, spa: 85, spd: 105, spe: 78 },
        abilities: &["torrent", "raindish"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 0, 3, 0],
        mega: None,
        base_form: None,
    },
    "pikachu" => SpeciesData {
        id: "pikachu",
        name: "Pikachu",
        types: [Type::Electric, Type::Electric],
        base_stats: BaseStats { hp: 35, atk: 55, def: 40, spa: 50, spd: 50, spe: 90 },
        abilities: &["static"],
        catch_rate: 190,
        ev_yield: [0, 0, 0, 0, 0, 2],
        mega: None,
        base_form: None,
    },
    "jolteon" => SpeciesData {
        id: "jolteon",
        name: "Jolteon",
        types: [Type::Electric, Type::Electric],
        base_stats: BaseStats { hp: 65, atk: 65, def: 60, spa: 110, spd: 95, spe: 130 },
        abilities: &["voltabsorb"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 0, 0, 2],
        mega: None,
        base_form: None,
    },
    "gyarados" => SpeciesData {
        id: "gyarados",
        name: "Gyarados",
        types: [Type::Water, Type::Flying],
        base_stats: BaseStats { hp: 95, atk: 125, def: 79, spa: 60, spd: 100, spe: 81 },
        abilities: &["intimidate", "moxie"],
        catch_rate: 45,
        ev_yield: [0, 2, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "garchomp" => SpeciesData {
        id: "garchomp",
        name: "Garchomp",
        types: [Type::Dragon, Type::Ground],
        base_stats: BaseStats { hp: 108, atk: 130, def: 95, spa: 80, spd: 85, spe: 102 },
        abilities: &["roughskin"],
        catch_rate: 45,
        ev_yield: [0, 3, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "blissey" => SpeciesData {
        id: "blissey",
        name: "Blissey",
        types: [Type::Normal, Type::Normal],
        base_stats: BaseStats { hp: 255, atk: 10, def: 10, spa: 75, spd: 135, spe: 55 },
        abilities: &["naturalcure"],
        catch_rate: 30,
        ev_yield: [3, 0, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "dragonite" => SpeciesData {
        id: "dragonite",
        name: "Dragonite",
        types: [Type::Dragon, Type::Flying],
        base_stats: BaseStats { hp: 91, atk: 134, def: 95, spa: 100, spd: 100, spe: 80 },
        abilities: &["innerfocus", "multiscale"],
        catch_rate: 45,
        ev_yield: [0, 3, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "gengar" => SpeciesData {
        id: "gengar",
        name: "Gengar",
        types: [Type::Ghost, Type::Poison],
        base_stats: BaseStats { hp: 60, atk: 65, def: 60, spa: 130, spd: 75, spe: 110 },
        abilities: &["levitate"],
        catch_rate: 45,
        ev_yield: [0, 0, 0, 3, 0, 0],
        mega: None,
        base_form: None,
    },
    "snorlax" => SpeciesData {
        id: "snorlax",
        name: "Snorlax",
        types: [Type::Normal, Type::Normal],
        base_stats: BaseStats { hp: 160, atk: 110, def: 65, spa: 65, spd: 110, spe: 30 },
        abilities: &["immunity", "thickfat"],
        catch_rate: 25,
        ev_yield: [2, 0, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "tyranitar" => SpeciesData {
        id: "tyranitar",
        name: "Tyranitar",
        types: [Type::Rock, Type::Dark],
        base_stats: BaseStats { hp: 100, atk: 134, def: 110, spa: 95, spd: 100, spe: 61 },
        abilities: &["sandstream"],
        catch_rate: 45,
        ev_yield: [0, 3, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "lucario" => SpeciesData {
        id: "lucario",
        name: "Lucario",
        types: [Type::Fighting, Type::Steel],
        base_stats: BaseStats { hp: 70, atk: 110, def: 70, spa: 115, spd: 70, spe: 90 },
        abilities: &["innerfocus"],
        catch_rate: 45,
        ev_yield: [0, 1, 0, 1, 0, 0],
        mega: Some(MegaEvolution { stone: "lucarionite", form: "lucariomega" }),
        base_form: None,
    },
    "lucariomega" => SpeciesData {
        id: "lucariomega",
        name: "Lucario-Mega",
        types: [Type::Fighting, Type::Steel],
        base_stats: BaseStats { hp: 70, atk: 145, def: 88, spa: 140, spd: 70, spe: 112 },
        abilities: &["adaptability"],
        catch_rate: 45,
        ev_yield: [0, 1, 0, 1, 0, 0],
        mega: None,
        base_form: Some("lucario"),
    },
    "rattata" => SpeciesData {
        id: "rattata",
        name: "Rattata",
        types: [Type::Normal, Type::Normal],
        base_stats: BaseStats { hp: 30, atk: 56, def: 35, spa: 25, spd: 35, spe: 72 },
        abilities: &["runaway", "guts"],
        catch_rate: 255,
        ev_yield: [0, 0, 0, 0, 0, 1],
        mega: None,
        base_form: None,
    },
    "pidgey" => SpeciesData {
        id: "pidgey",
        name: "Pidgey",
        types: [Type::Normal, Type::Flying],
        base_stats: BaseStats { hp: 40, atk: 45, def: 40, spa: 35, spd: 35, spe: 56 },
        abilities: &["keeneye"],
        catch_rate: 255,
        ev_yield: [0, 0, 0, 0, 0, 1],
        mega: None,
        base_form: None,
    },
    "magikarp" => SpeciesData {
        id: "magikarp",
        name: "Magikarp",
        types: [Type::Water, Type::Water],
        base_stats: BaseStats { hp: 20, atk: 10, def: 55, spa: 15, spd: 20, spe: 80 },
        abilities: &["swiftswim"],
        catch_rate: 255,
        ev_yield: [0, 0, 0, 0, 0, 1],
        mega: None,
        base_form: None,
    },
    "shedinja" => SpeciesData {
        id: "shedinja",
        name: "Shedinja",
        types: [Type::Bug, Type::Ghost],
        base_stats: BaseStats { hp: 1, atk: 90, def: 45, spa: 30, spd: 30, spe: 40 },
        abilities: &["wonderguard"],
        catch_rate: 45,
        ev_yield: [2, 0, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "heatran" => SpeciesData {
        id: "heatran",
        name: "Heatran",
        types: [Type::Fire, Type::Steel],
        base_stats: BaseStats { hp: 91, atk: 90, def: 106, spa: 130, spd: 106, spe: 77 },
        abilities: &["flashfire"],
        catch_rate: 3,
        ev_yield: [0, 0, 0, 3, 0, 0],
        mega: None,
        base_form: None,
    },
    "weezing" => SpeciesData {
        id: "weezing",
        name: "Weezing",
        types: [Type::Poison, Type::Poison],
        base_stats: BaseStats { hp: 65, atk: 90, def: 120, spa: 85, spd: 70, spe: 60 },
        abilities: &["levitate", "neutralizinggas"],
        catch_rate: 60,
        ev_yield: [0, 0, 2, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "wobbuffet" => SpeciesData {
        id: "wobbuffet",
        name: "Wobbuffet",
        types: [Type::Psychic, Type::Psychic],
        base_stats: BaseStats { hp: 190, atk: 33, def: 58, spa: 33, spd: 58, spe: 33 },
        abilities: &["shadowtag"],
        catch_rate: 45,
        ev_yield: [2, 0, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "skarmory" => SpeciesData {
        id: "skarmory",
        name: "Skarmory",
        types: [Type::Steel, Type::Flying],
        base_stats: BaseStats { hp: 65, atk: 80, def: 140, spa: 40, spd: 70, spe: 70 },
        abilities: &["keeneye", "sturdy"],
        catch_rate: 25,
        ev_yield: [0, 0, 2, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "machamp" => SpeciesData {
        id: "machamp",
        name: "Machamp",
        types: [Type::Fighting, Type::Fighting],
        base_stats: BaseStats { hp: 90, atk: 130, def: 80, spa: 65, spd: 85, spe: 55 },
        abilities: &["guts", "noguard"],
        catch_rate: 45,
        ev_yield: [0, 3, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "blaziken" => SpeciesData {
        id: "blaziken",
        name: "Blaziken",
        types: [Type::Fire, Type::Fighting],
        base_stats: BaseStats { hp: 80, atk: 120, def: 70, spa: 110, spd: 70, spe: 80 },
        abilities: &["blaze", "speedboost"],
        catch_rate: 45,
        ev_yield: [0, 3, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "sableye" => SpeciesData {
        id: "sableye",
        name: "Sableye",
        types: [Type::Dark, Type::Ghost],
        base_stats: BaseStats { hp: 50, atk: 75, def: 75, spa: 65, spd: 65, spe: 50 },
        abilities: &["keeneye", "prankster"],
        catch_rate: 45,
        ev_yield: [0, 1, 1, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "ninetales" => SpeciesData {
        id: "ninetales",
        name: "Ninetales",
        types: [Type::Fire, Type::Fire],
        base_stats: BaseStats { hp: 73, atk: 76, def: 75, spa: 81, spd: 100, spe: 100 },
        abilities: &["flashfire", "drought"],
        catch_rate: 75,
        ev_yield: [0, 0, 0, 0, 1, 1],
        mega: None,
        base_form: None,
    },
    "pelipper" => SpeciesData {
        id: "pelipper",
        name: "Pelipper",
        types: [Type::Water, Type::Flying],
        base_stats: BaseStats { hp: 60, atk: 50, def: 100, spa: 95, spd: 70, spe: 65 },
        abilities: &["keeneye", "drizzle"],
        catch_rate: 45,
        ev_yield: [0, 0, 2, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "tapukoko" => SpeciesData {
        id: "tapukoko",
        name: "Tapu Koko",
        types: [Type::Electric, Type::Fairy],
        base_stats: BaseStats { hp: 70, atk: 115, def: 85, spa: 95, spd: 75, spe: 130 },
        abilities: &["electricsurge"],
        catch_rate: 3,
        ev_yield: [0, 0, 0, 0, 0, 3],
        mega: None,
        base_form: None,
    },
    "metagross" => SpeciesData {
        id: "metagross",
        name: "Metagross",
        types: [Type::Steel, Type::Psychic],
        base_stats: BaseStats { hp: 80, atk: 135, def: 130, spa: 95, spd: 90, spe: 70 },
        abilities: &["clearbody"],
        catch_rate: 3,
        ev_yield: [0, 0, 3, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "hawlucha" => SpeciesData {
        id: "hawlucha",
        name: "Hawlucha",
        types: [Type::Fighting, Type::Flying],
        base_stats: BaseStats { hp: 78, atk: 92, def: 75, spa: 74, spd: 63, spe: 118 },
        abilities: &["limber", "unburden"],
        catch_rate: 100,
        ev_yield: [0, 2, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "slowbro" => SpeciesData {
        id: "slowbro",
        name: "Slowbro",
        types: [Type::Water, Type::Psychic],
        base_stats: BaseStats { hp: 95, atk: 75, def: 110, spa: 100, spd: 80, spe: 30 },
        abilities: &["owntempo", "regenerator"],
        catch_rate: 75,
        ev_yield: [0, 0, 2, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "drifblim" => SpeciesData {
        id: "drifblim",
        name: "Drifblim",
        types: [Type::Ghost, Type::Flying],
        base_stats: BaseStats { hp: 150, atk: 80, def: 44, spa: 90, spd: 54, spe: 80 },
        abilities: &["aftermath"],
        catch_rate: 60,
        ev_yield: [2, 0, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
    "bisharp" => SpeciesData {
        id: "bisharp",
        name: "Bisharp",
        types: [Type::Dark, Type::Steel],
        base_stats: BaseStats { hp: 65, atk: 125, def: 100, spa: 60, spd: 70, spe: 70 },
        abilities: &["defiant", "innerfocus"],
        catch_rate: 45,
        ev_yield: [0, 2, 0, 0, 0, 0],
        mega: None,
        base_form: None,
    },
};

pub fn get_species(id: &str) -> Option<&'static SpeciesData> {
    POKEDEX.get(id)
}
