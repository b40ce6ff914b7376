use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct AbilityData {
    pub id: &'static str,
    pub name: &'static str,
}

pub static ABILITIES: phf::Map<&'static str, AbilityData> = phf_map! {
    "blaze" => AbilityData { id: "blaze", name: "Blaze" },
    "toughclaws" => AbilityData { id: "toughclaws", name: "Tough Claws" },
    "overgrow" => AbilityData { id: "overgrow", name: "Overgrow" },
    "chlorophyll" => AbilityData { id: "chlorophyll", name: "Chlorophyll" },
    "torrent" => AbilityData { id: "torrent", name: "Torrent" },
    "raindish" => AbilityData { id: "raindish", name: "Rain Dish" },
    "static" => AbilityData { id: "static", name: "Static" },
    "voltabsorb" => AbilityData { id: "voltabsorb", name: "Volt Absorb" },
    "intimidate" => AbilityData { id: "intimidate", name: "Intimidate" },
    "moxie" => AbilityData { id: "moxie", name: "Moxie" },
    "roughskin" => AbilityData { id: "roughskin", name: "Rough Skin" },
    "naturalcure" => AbilityData { id: "naturalcure", name: "Natural Cure" },
    "innerfocus" => AbilityData { id: "innerfocus", name: "Inner Focus" },
    "multiscale" => AbilityData { id: "multiscale", name: "Multiscale" },
    "levitate" => AbilityData { id: "levitate", name: "Levitate" },
    "immunity" => AbilityData { id: "immunity", name: "Immunity" },
    "thickfat" => AbilityData { id: "thickfat", name: "Thick Fat" },
    "sandstream" => AbilityData { id: "sandstream", name: "Sand Stream" },
    "adaptability" => AbilityData { id: "adaptability", name: "Adaptability" },
    "runaway" => AbilityData { id: "runaway", name: "Run Away" },
    "guts" => AbilityData { id: "guts", name: "Guts" },
    "keeneye" => AbilityData { id: "keeneye", name: "Keen Eye" },
    "swiftswim" => AbilityData { id: "swiftswim", name: "Swift Swim" },
    "wonderguard" => AbilityData { id: "wonderguard", name: "Wonder Guard" },
    "flashfire" => AbilityData { id: "flashfire", name: "Flash Fire" },
    "neutralizinggas" => AbilityData { id: "neutralizinggas", name: "Neutralizing Gas" },
    "shadowtag" => AbilityData { id: "shadowtag", name: "Shadow Tag" },
    "sturdy" => AbilityData { id: "sturdy", name: "Sturdy" },
    "noguard" => AbilityData { id: "noguard", name: "No Guard" },
    "speedboost" => AbilityData { id: "speedboost", name: "Speed Boost" },
    "prankster" => AbilityData { id: "prankster", name: "Prankster" },
    "drought" => AbilityData { id: "drought", name: "Drought" },
    "drizzle" => AbilityData { id: "drizzle", name: "Drizzle" },
    "electricsurge" => AbilityData { id: "electricsurge", name: "Electric Surge" },
    "clearbody" => AbilityData { id: "clearbody", name: "Clear Body" },
    "limber" => AbilityData { id: "limber", name: "Limber" },
    "unburden" => AbilityData { id: "unburden", name: "Unburden" },
    "owntempo" => AbilityData { id: "owntempo", name: "Own Tempo" },
    "regenerator" => AbilityData { id: "regenerator", name: "Regenerator" },
    "aftermath" => AbilityData { id: "aftermath", name: "Aftermath" },
    "defiant" => AbilityData { id: "defiant", name: "Defiant" },
};

pub fn get_ability(id: &str) -> Option<&'static AbilityData> {
    ABILITIES.get(id)
}
