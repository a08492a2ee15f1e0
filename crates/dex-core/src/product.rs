//! Product classification: packs and gameplay items.
//!
//! Booster and prerelease packs get identifiers in the expansion's
//! `BoosterPack` slot. Every other product is keyed by its asset name and
//! shares the expansion's `Gameplay` identifier.

use dex_model::raw::RawProductType;
use dex_model::{
    AttributeCode, AttributeMap, BoosterPackIndex, ExpansionSeries, ItemCategory, ItemType,
    ProductDefinition,
};
use serde_json::json;

use crate::base::ItemBase;
use crate::context::ClassifyContext;
use crate::error::Result;
use crate::fatal;
use crate::inconsistency::InconsistencyLog;
use crate::translate::strip_html;

/// Asset suffixes of prerelease packs: SM7 onwards, SM6, and older sets.
const PRERELEASE_SUFFIXES: [&str; 3] = ["EvolutionPack", "EvolutionPackBundle", "PrereleasePack"];

/// Packs with fewer cards are minor packs.
const MAJOR_PACK_CARDS: i64 = 10;

pub(crate) fn classify_product(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    base: &ItemBase<'_>,
    log: &mut InconsistencyLog,
) -> Result<ProductDefinition> {
    let expansion = base.expansion;
    let asset = base.asset.as_deref().unwrap_or_default();
    let cards = attributes
        .int(AttributeCode::NUMBER_OF_CARDS_IN_BOOSTER)
        .filter(|cards| *cards != 0);

    let product_type: Option<RawProductType> = attributes.parse(AttributeCode::PRODUCT_TYPE)?;
    let mut category = product_type.and_then(RawProductType::category);
    match attributes.text(AttributeCode::UNLOCK_PRODUCT_TYPE) {
        Some("ThemeDeck") => category = Some(ItemCategory::ThemeDeck),
        Some("Tin") => category = Some(ItemCategory::Tin),
        _ => {}
    }

    let prerelease = PRERELEASE_SUFFIXES
        .iter()
        .any(|suffix| asset.ends_with(suffix));
    let expansion_item = expansion.series() != ExpansionSeries::Ptcgo.code();
    let booster = prerelease
        || (expansion_item
            && !matches!(
                category,
                Some(ItemCategory::ThemeDeck | ItemCategory::Tin | ItemCategory::Bundle)
            ));

    let id = if booster {
        let pack = match cards {
            Some(_) if category != Some(ItemCategory::Booster) => {
                return Err(fatal!(
                    "NumberOfCardsInBooster defined for non-booster category {}",
                    category.map_or("(none)", ItemCategory::as_str)
                ));
            }
            Some(count) if count >= MAJOR_PACK_CARDS => BoosterPackIndex::MajorPack,
            Some(_) => BoosterPackIndex::MinorPack,
            None if prerelease => {
                category = Some(ItemCategory::PrereleasePack);
                BoosterPackIndex::Prerelease
            }
            None => return Err(fatal!("Expansion item that isn’t a booster")),
        };
        expansion.item(u16::from(pack.code()), ItemType::BoosterPack, false)
    } else {
        if cards.is_some() {
            return Err(fatal!("NumberOfCardsInBooster defined for non-expansion item"));
        }
        expansion.item(0, ItemType::Gameplay, false)
    };

    let Some(category) = category else {
        return Err(fatal!("Product {} has no catalog category", base.name));
    };
    if category == ItemCategory::Booster && cards.is_none() {
        return Err(fatal!("NumberOfCardsInBooster not defined for ItemCategory.Booster"));
    }

    let asset = if booster {
        None
    } else if asset.is_empty() {
        return Err(fatal!("Product {} has no asset name", base.name));
    } else {
        Some(asset.to_string())
    };

    let cards = cards
        .map(u32::try_from)
        .transpose()
        .map_err(|_| fatal!("Product {} has a negative card count", base.name))?;

    let mut product = ProductDefinition {
        asset,
        id,
        name: base.name.clone(),
        cat: category,
        cards,
        description: None,
    };
    product.description = description(attributes, ctx, &product, base, log);
    Ok(product)
}

fn description(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    product: &ProductDefinition,
    base: &ItemBase<'_>,
    log: &mut InconsistencyLog,
) -> Option<String> {
    let key = attributes.non_empty_text(AttributeCode::PRODUCT_DESCRIPTION)?;
    match ctx.translate(key) {
        Some(text) => Some(strip_html(&text)),
        None => {
            let expansion = if base.expansion.is_valid() {
                base.expansion.code()
            } else {
                "NoSet"
            };
            log.record_with(
                format!(
                    "Product {} (#{}) from expansion {expansion} has missing description text",
                    product.name,
                    product.asset.as_deref().unwrap_or_default()
                ),
                json!({ "key": key }),
            );
            None
        }
    }
}
