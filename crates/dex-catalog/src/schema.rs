//! Per-expansion schema: every definition of one expansion, deduplicated.

use std::collections::{BTreeMap, BTreeSet};

use dex_core::{BuiltItem, InconsistencyLog};
use dex_model::{
    CardDefinition, CardFlags, CardKind, Definition, DefinitionKey, ExpansionFlags, ItemCategory,
    Rarity,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::json;

use crate::error::{CatalogError, Result};
use crate::guid_map::GuidMap;
use crate::ordered::OrderedMap;

/// Radiant Collection numbers (`RC5`) count as secret cards.
const RADIANT_COLLECTION_PREFIX: &str = "RC";

/// Statistics computed from a finished schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionStats {
    /// Highest number among regular cards.
    pub cards: u32,
    /// Distinct numbers of secret cards.
    pub secret: u32,
    pub max_collection_no: u32,
    /// Price-index buckets that occur.
    pub flags: ExpansionFlags,
}

/// Cards and packs keyed by identifier, other products keyed by asset name.
#[derive(Debug, Clone, Default)]
pub struct ExpansionSchema {
    expansion: String,
    cards: BTreeMap<i32, Definition>,
    packs: BTreeMap<i32, Definition>,
    products: BTreeMap<String, Definition>,
}

impl ExpansionSchema {
    pub fn new(expansion: impl Into<String>) -> Self {
        Self {
            expansion: expansion.into(),
            ..Self::default()
        }
    }

    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    pub fn cards(&self) -> impl Iterator<Item = &Definition> {
        self.cards.values()
    }

    pub fn packs(&self) -> impl Iterator<Item = &Definition> {
        self.packs.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Definition> {
        self.products.values()
    }

    /// Every definition: cards, then packs, then products.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.cards().chain(self.packs()).chain(self.products())
    }

    pub fn len(&self) -> usize {
        self.cards.len() + self.packs.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a built item and maps its GUID.
    ///
    /// Redefining a key is fatal unless the item is a known true duplicate,
    /// which is logged and replaces the earlier definition.
    pub fn insert(
        &mut self,
        item: BuiltItem,
        log: &mut InconsistencyLog,
        guids: &mut GuidMap,
    ) -> Result<()> {
        let BuiltItem {
            definition,
            guid,
            true_duplicate,
        } = item;
        let guid_label = guid.as_deref().unwrap_or("none");

        let key = definition.key();
        if definition.asset().is_none() && definition.id().is_zero() {
            return Err(CatalogError::fatal(
                "Definition has neither an asset nor an identifier",
                json!({ "definition": definition }),
            ));
        }

        let existing = match &key {
            DefinitionKey::Id(id) if definition.is_pack() => self.packs.get(id),
            DefinitionKey::Id(id) => self.cards.get(id),
            DefinitionKey::Asset(asset) => self.products.get(asset),
        };

        if true_duplicate {
            log.record(format!(
                "Encountered true duplicate item {key} (GUID: {guid_label}) [this message should appear twice for this itemid]"
            ));
        } else if let Some(existing) = existing {
            let old = serde_json::to_string(existing).unwrap_or_default();
            let new = serde_json::to_string(&definition).unwrap_or_default();
            let context = json!({ "old": existing, "new": definition });
            let message = if old == new {
                format!(
                    "Overriding {key} (with new GUID: {guid_label}) but the generated definition is equivalent"
                )
            } else {
                format!("Overriding {key} (New GUID: {guid_label})\n{old}\n===>\n{new}")
            };
            return Err(CatalogError::fatal(message, context));
        }

        if let Some(guid) = guid.as_deref() {
            guids.define(guid, &definition);
        }
        tracing::trace!(expansion = %self.expansion, %key, "defined item");
        match key {
            DefinitionKey::Id(id) if definition.is_pack() => self.packs.insert(id, definition),
            DefinitionKey::Id(id) => self.cards.insert(id, definition),
            DefinitionKey::Asset(asset) => self.products.insert(asset, definition),
        };
        Ok(())
    }

    fn card_definitions(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter_map(Definition::card)
    }

    /// Cards counted toward the regular and secret totals.
    fn countable_cards(&self) -> impl Iterator<Item = &CardDefinition> {
        self.card_definitions().filter(|card| !card.id.is_yellow_a())
    }

    /// Highest number among cards that are neither secret nor Radiant Collection.
    pub fn card_count(&self) -> u32 {
        self.countable_cards()
            .filter(|card| !is_radiant_collection(card) && !card.rarity.is_secret())
            .map(|card| card.no)
            .max()
            .unwrap_or(0)
    }

    /// Distinct numbers of secret and Radiant Collection cards. Shining
    /// cards are secret-rarity but sit inside the regular numbering.
    pub fn secret_count(&self) -> u32 {
        let secret: BTreeSet<u32> = self
            .countable_cards()
            .filter(|card| !card.flags.contains(CardFlags::SHINING))
            .filter(|card| card.rarity.is_secret() || is_radiant_collection(card))
            .map(|card| card.no)
            .collect();
        u32::try_from(secret.len()).unwrap_or(u32::MAX)
    }

    pub fn max_collection_no(&self) -> u32 {
        self.card_definitions().map(|card| card.no).max().unwrap_or(0)
    }

    /// Price-index buckets present in the expansion.
    pub fn index_flags(&self) -> ExpansionFlags {
        let mut flags = ExpansionFlags::empty();
        for card in self.card_definitions() {
            flags |= if card.rarity == Rarity::Rare {
                ExpansionFlags::INDEX_RARE
            } else if card.kind == CardKind::BasicEnergy {
                ExpansionFlags::INDEX_ENERGY
            } else {
                match (card.rarity, card.cat) {
                    (Rarity::Common, ItemCategory::Pokemon) => ExpansionFlags::INDEX_COMMON_POKEMON,
                    (Rarity::Common, ItemCategory::Trainer) => ExpansionFlags::INDEX_COMMON_TRAINER,
                    (Rarity::Uncommon, ItemCategory::Pokemon) => {
                        ExpansionFlags::INDEX_UNCOMMON_POKEMON
                    }
                    (Rarity::Uncommon, ItemCategory::Trainer) => {
                        ExpansionFlags::INDEX_UNCOMMON_TRAINER
                    }
                    _ => ExpansionFlags::empty(),
                }
            };
        }
        flags
    }

    pub fn stats(&self) -> ExpansionStats {
        ExpansionStats {
            cards: self.card_count(),
            secret: self.secret_count(),
            max_collection_no: self.max_collection_no(),
            flags: self.index_flags(),
        }
    }
}

fn is_radiant_collection(card: &CardDefinition) -> bool {
    card.col_no
        .as_deref()
        .is_some_and(|no| no.starts_with(RADIANT_COLLECTION_PREFIX))
}

/// Number first, identifier second. Packs carry no number and sort by id.
fn by_number(map: &BTreeMap<i32, Definition>) -> OrderedMap<i32, &Definition> {
    let mut entries: Vec<(i32, &Definition)> = map.iter().map(|(id, def)| (*id, def)).collect();
    entries.sort_by_key(|(id, definition)| (definition.card().map_or(0, |card| card.no), *id));
    OrderedMap(entries)
}

impl Serialize for ExpansionSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExpansionSchema", 4)?;
        state.serialize_field("expansion", &self.expansion)?;
        state.serialize_field("items", &by_number(&self.cards))?;
        state.serialize_field("packs", &by_number(&self.packs))?;
        state.serialize_field("products", &self.products)?;
        state.end()
    }
}
