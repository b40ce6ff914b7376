use phf::phf_map;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemPocket {
    Held,
    Berry,
    Ball,
    Medicine,
    MegaStone,
}

/// What happens when the item is used from the bag instead of held.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BagUse {
    None,
    Heal(u16),
    CureStatus,
    /// Catch-rate bonus in tenths (10 = x1.0).
    Ball { bonus: u16 },
}

#[derive(Clone, Copy, Debug)]
pub struct ItemData {
    pub id: &'static str,
    pub name: &'static str,
    pub pocket: ItemPocket,
    pub bag_use: BagUse,
}

impl ItemData {
    pub fn is_berry(&self) -> bool {
        self.pocket == ItemPocket::Berry
    }
}

pub static ITEMS: phf::Map<&'static str, ItemData> = phf_map! {
    "potion" => ItemData { id: "potion", name: "Potion", pocket: ItemPocket::Medicine, bag_use: BagUse::Heal(20) },
    "superpotion" => ItemData { id: "superpotion", name: "Super Potion", pocket: ItemPocket::Medicine, bag_use: BagUse::Heal(60) },
    "hyperpotion" => ItemData { id: "hyperpotion", name: "Hyper Potion", pocket: ItemPocket::Medicine, bag_use: BagUse::Heal(120) },
    "fullheal" => ItemData { id: "fullheal", name: "Full Heal", pocket: ItemPocket::Medicine, bag_use: BagUse::CureStatus },
    "pokeball" => ItemData { id: "pokeball", name: "Poke Ball", pocket: ItemPocket::Ball, bag_use: BagUse::Ball { bonus: 10 } },
    "greatball" => ItemData { id: "greatball", name: "Great Ball", pocket: ItemPocket::Ball, bag_use: BagUse::Ball { bonus: 15 } },
    "ultraball" => ItemData { id: "ultraball", name: "Ultra Ball", pocket: ItemPocket::Ball, bag_use: BagUse::Ball { bonus: 20 } },
    "masterball" => ItemData { id: "masterball", name: "Master Ball", pocket: ItemPocket::Ball, bag_use: BagUse::Ball { bonus: 2550 } },
    "oranberry" => ItemData { id: "oranberry", name: "Oran Berry", pocket: ItemPocket::Berry, bag_use: BagUse::None },
    "sitrusberry" => ItemData { id: "sitrusberry", name: "Sitrus Berry", pocket: ItemPocket::Berry, bag_use: BagUse::None },
    "lumberry" => ItemData { id: "lumberry", name: "Lum Berry", pocket: ItemPocket::Berry, bag_use: BagUse::None },
    "chestoberry" => ItemData { id: "chestoberry", name: "Chesto Berry", pocket: ItemPocket::Berry, bag_use: BagUse::None },
    "choiceband" => ItemData { id: "choiceband", name: "Choice Band", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "choicespecs" => ItemData { id: "choicespecs", name: "Choice Specs", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "choicescarf" => ItemData { id: "choicescarf", name: "Choice Scarf", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "focussash" => ItemData { id: "focussash", name: "Focus Sash", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "leftovers" => ItemData { id: "leftovers", name: "Leftovers", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "blacksludge" => ItemData { id: "blacksludge", name: "Black Sludge", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "lifeorb" => ItemData { id: "lifeorb", name: "Life Orb", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "expertbelt" => ItemData { id: "expertbelt", name: "Expert Belt", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "shedshell" => ItemData { id: "shedshell", name: "Shed Shell", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "smokeball" => ItemData { id: "smokeball", name: "Smoke Ball", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "quickclaw" => ItemData { id: "quickclaw", name: "Quick Claw", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "whiteherb" => ItemData { id: "whiteherb", name: "White Herb", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "electricseed" => ItemData { id: "electricseed", name: "Electric Seed", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "grassyseed" => ItemData { id: "grassyseed", name: "Grassy Seed", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "ejectbutton" => ItemData { id: "ejectbutton", name: "Eject Button", pocket: ItemPocket::Held, bag_use: BagUse::None },
    "charizarditex" => ItemData { id: "charizarditex", name: "Charizardite X", pocket: ItemPocket::MegaStone, bag_use: BagUse::None },
    "lucarionite" => ItemData { id: "lucarionite", name: "Lucarionite", pocket: ItemPocket::MegaStone, bag_use: BagUse::None },
};

pub fn get_item(id: &str) -> Option<&'static ItemData> {
    ITEMS.get(id)
}
