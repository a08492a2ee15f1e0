//! Price-index buckets and other economy identifiers.

use crate::enums::{AvatarBoxIndex, CardPriceIndex, ExpansionSeries, ItemType, TreasureChestIndex};
use crate::expansion::{Expansion, ExpansionRegistry};
use crate::flags::ExpansionFlags;
use crate::ids::ItemId;
use crate::series;

const INDEX_BUCKETS: [(ExpansionFlags, CardPriceIndex); 6] = [
    (ExpansionFlags::INDEX_COMMON_POKEMON, CardPriceIndex::CommonPokemon),
    (ExpansionFlags::INDEX_COMMON_TRAINER, CardPriceIndex::CommonTrainer),
    (ExpansionFlags::INDEX_UNCOMMON_POKEMON, CardPriceIndex::UncommonPokemon),
    (ExpansionFlags::INDEX_UNCOMMON_TRAINER, CardPriceIndex::UncommonTrainer),
    (ExpansionFlags::INDEX_RARE, CardPriceIndex::Rare),
    (ExpansionFlags::INDEX_ENERGY, CardPriceIndex::Energy),
];

/// Price indexes used by an expansion, from its index flags.
pub fn expansion_price_indexes(expansion: &Expansion<'_>) -> Vec<ItemId> {
    let mut indexes = Vec::new();
    for (flag, bucket) in INDEX_BUCKETS {
        if !expansion.has_flag(flag) {
            continue;
        }
        let index = u16::from(bucket.code());
        indexes.push(expansion.item(index, ItemType::Card, true));
        indexes.push(expansion.item(index, ItemType::ReverseCard, true));
        // Only rares have a holo bucket.
        if bucket == CardPriceIndex::Rare {
            indexes.push(expansion.item(index, ItemType::HoloCard, true));
        }
    }
    indexes
}

/// Readable bucket name, e.g. "Reverse Common Pokémon". `None` for concrete items.
pub fn price_index_name(id: ItemId) -> Option<String> {
    if !id.is_price_index() {
        return None;
    }
    let prefix = match id.item_kind()? {
        ItemType::HoloCard => "Holo ",
        ItemType::ReverseCard => "Reverse ",
        _ => "",
    };
    let bucket = u8::try_from(id.index())
        .ok()
        .and_then(|index| CardPriceIndex::try_from(index).ok())?;
    let name = match bucket {
        CardPriceIndex::CommonPokemon => "Common Pokémon",
        CardPriceIndex::UncommonPokemon => "Uncommon Pokémon",
        CardPriceIndex::CommonTrainer => "Common Trainer",
        CardPriceIndex::UncommonTrainer => "Uncommon Trainer",
        CardPriceIndex::Rare => "Rare",
        CardPriceIndex::Energy => "Energy",
    };
    Some(format!("{prefix}{name}"))
}

pub fn treasure_chest(index: TreasureChestIndex) -> ItemId {
    ItemId::new(
        ExpansionSeries::Ptcgo.code(),
        series::PTCGO_TREASURE_CHEST,
        ItemType::Card.code(),
        u16::from(index.code()),
    )
}

pub fn avatar_box(index: AvatarBoxIndex) -> ItemId {
    ItemId::new(
        ExpansionSeries::Ptcgo.code(),
        series::PTCGO_AVATAR_COLLECTION_BOX,
        ItemType::Card.code(),
        u16::from(index.code()),
    )
}

/// Items that act as currency in trades: every booster, the uncommon chest and the Pikachu box.
pub fn currency_items(registry: &ExpansionRegistry) -> Vec<ItemId> {
    let mut items: Vec<ItemId> = registry
        .all()
        .filter(Expansion::has_boosters)
        .map(|expansion| expansion.booster())
        .collect();
    items.push(treasure_chest(TreasureChestIndex::UncommonChest));
    items.push(avatar_box(AvatarBoxIndex::PikachuBox));
    items
}
