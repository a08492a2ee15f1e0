//! URL slugs for items, and parsing them back.
//!
//! ```text
//! UNB/Booster-Pack
//! XYEnergy/Water-Energy-9
//! SUM/Typical-Reverse-Common-Trainer
//! ```

use crate::definition::Definition;
use crate::enums::{BoosterPackIndex, CardPriceIndex, ItemType};
use crate::expansion::ExpansionRegistry;
use crate::ids::ItemId;
use crate::price_index::price_index_name;

/// Slug for an item. `None` for invalid items or definitions that do not match the id.
pub fn slugify(id: ItemId, definition: Option<&Definition>, registry: &ExpansionRegistry) -> Option<String> {
    if !id.is_valid(registry) {
        return None;
    }
    if id.is_price_index() {
        return slugify_price_index(id);
    }
    let definition = definition.filter(|definition| definition.id() == id)?;
    if id.item_kind() == Some(ItemType::BoosterPack) {
        let pack = u8::try_from(id.index())
            .ok()
            .and_then(|index| BoosterPackIndex::try_from(index).ok())?;
        return Some(pack.slug().to_string());
    }

    let suffix = id.item_kind().and_then(ItemType::suffix).unwrap_or_default();
    let mut parts = Vec::new();
    let name = definition.name().replace(' ', "-");
    if !name.is_empty() {
        parts.push(name);
    }
    if let Some(col_no) = definition.card().and_then(|card| card.col_no.clone()) {
        parts.push(col_no);
    }
    parts.push(format!("{}{suffix}", id.index()));
    Some(parts.join("-"))
}

/// `Typical-<bucket>` slug of a price index.
pub fn slugify_price_index(id: ItemId) -> Option<String> {
    let name = price_index_name(id)?.replace('é', "e");
    let mut parts = vec!["Typical"];
    parts.extend(name.split(' '));
    Some(parts.join("-"))
}

/// Parses `<expansion code>/<slug>` back into an identifier.
pub fn item_from_slug(url: &str, registry: &ExpansionRegistry) -> Option<ItemId> {
    let (code, name) = url.split_once('/')?;
    if code.is_empty() || name.is_empty() {
        return None;
    }
    let expansion = registry.by_code(code);
    if !expansion.is_valid() {
        return None;
    }

    let lower = name.to_lowercase();
    if let Some(pack) = BoosterPackIndex::ALL
        .iter()
        .find(|pack| pack.slug().to_lowercase() == lower)
    {
        if !expansion.has_boosters() {
            return None;
        }
        return Some(expansion.item(u16::from(pack.code()), ItemType::BoosterPack, false));
    }

    let parts: Vec<&str> = name.split('-').collect();
    if parts[0].eq_ignore_ascii_case("typical") && (2..=4).contains(&parts.len()) {
        let (item_type, bucket) = match parts[1].to_lowercase().as_str() {
            "holo" => (ItemType::HoloCard, &parts[2..]),
            "reverse" => (ItemType::ReverseCard, &parts[2..]),
            _ => (ItemType::Card, &parts[1..]),
        };
        let bucket: String = bucket.iter().map(|part| capitalize(part)).collect();
        let bucket = bucket.parse::<CardPriceIndex>().ok()?;
        return Some(expansion.item(u16::from(bucket.code()), item_type, true));
    }

    // `9`, `72a`, `14p`
    let specifier = parts.last()?;
    let digits = specifier.len() - specifier.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let index: u16 = specifier[..digits].parse().ok()?;
    if index > 0x3ff {
        return None;
    }
    let suffix = specifier[digits..].to_lowercase();
    let item_type = ItemType::from_suffix(&suffix).unwrap_or(ItemType::Card);
    Some(expansion.item(index, item_type, false))
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
