//! Currency releases: items that exist only as fixed PTCGO identifiers.

use dex_model::price_index::{avatar_box, treasure_chest};
use dex_model::{AttributeCode, AttributeMap, AvatarBoxIndex, ItemId, TreasureChestIndex};

use crate::error::{CatalogError, Result};
use crate::guid_map::GuidMap;

/// Releases whose records map straight to identifiers instead of definitions.
pub const CURRENCY_RELEASES: [&str; 2] = ["AvatarItems", "RewardItems"];

pub fn currency_item(asset: &str) -> Option<ItemId> {
    match asset {
        "AvatarCharizardPack" => Some(avatar_box(AvatarBoxIndex::CharizardBox)),
        "AvatarPikachuPack" => Some(avatar_box(AvatarBoxIndex::PikachuBox)),
        "TreasureBoxPack" => Some(treasure_chest(TreasureChestIndex::UncommonChest)),
        "TreasureBoxPack_Shiny" => Some(treasure_chest(TreasureChestIndex::HoloChest)),
        _ => None,
    }
}

/// Maps the GUID of every currency record. Unknown assets are fatal.
pub fn define_currency(records: &[AttributeMap], guids: &mut GuidMap) -> Result<usize> {
    let mut defined = 0;
    for record in records {
        let asset = record.text(AttributeCode::ASSET_CLASS).unwrap_or_default();
        let id = currency_item(asset).ok_or_else(|| CatalogError::UnknownCurrency {
            asset: asset.to_string(),
        })?;
        if let Some(guid) = record.non_empty_text(AttributeCode::GUID) {
            guids.define_id(guid, id);
            defined += 1;
        }
    }
    Ok(defined)
}
