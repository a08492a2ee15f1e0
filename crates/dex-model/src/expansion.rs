//! Expansion definitions and the registry that resolves identifiers to them.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::enums::{BoosterPackIndex, ExpansionSeries, ItemType};
use crate::flags::{ExpansionFlags, Formats};
use crate::ids::ItemId;
use crate::series;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionDefinition {
    pub name: String,
    pub code: String,
    /// Internal release key. Only kept in the source catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub series: ExpansionSeries,
    pub formats: Formats,
    pub cards: u32,
    pub secret: u32,
    /// Unix seconds.
    pub legal: i64,
    pub flags: ExpansionFlags,
    /// Collection numbers reused for energy in some trainer kits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holes: Option<Vec<u32>>,
}

/// All known expansion definitions, newest first, indexed by code.
#[derive(Debug, Clone, Default)]
pub struct ExpansionRegistry {
    definitions: Vec<ExpansionDefinition>,
    by_code: HashMap<String, usize>,
}

impl ExpansionRegistry {
    pub fn new(definitions: Vec<ExpansionDefinition>) -> Self {
        let by_code = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (definition.code.to_uppercase(), index))
            .collect();
        Self {
            definitions,
            by_code,
        }
    }

    pub fn definitions(&self) -> &[ExpansionDefinition] {
        &self.definitions
    }

    pub fn into_definitions(self) -> Vec<ExpansionDefinition> {
        self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Case-insensitive lookup by expansion code.
    pub fn get(&self, code: &str) -> Option<&ExpansionDefinition> {
        self.by_code
            .get(&code.to_uppercase())
            .map(|&index| &self.definitions[index])
    }

    /// Expansion for a raw (series, expansion id) pair. Not necessarily valid.
    pub fn resolve(&self, series: u8, expansion: u8) -> Expansion<'_> {
        let definition = series::expansion_code(series, expansion).and_then(|code| self.get(code));
        Expansion {
            series,
            id: expansion,
            definition,
        }
    }

    /// Expansion for a code. Not necessarily valid.
    pub fn by_code(&self, code: &str) -> Expansion<'_> {
        let definition = self.get(code);
        let (series, id) = definition.map_or((0, 0), |definition| {
            let id = series::expansion_id(definition.series, &definition.code).unwrap_or(0);
            (definition.series.code(), id)
        });
        Expansion {
            series,
            id,
            definition,
        }
    }

    pub fn in_series(&self, series: ExpansionSeries) -> impl Iterator<Item = Expansion<'_>> {
        self.definitions
            .iter()
            .filter(move |definition| definition.series == series)
            .map(|definition| self.by_code(&definition.code))
    }

    pub fn all(&self) -> impl Iterator<Item = Expansion<'_>> {
        self.definitions
            .iter()
            .map(|definition| self.by_code(&definition.code))
    }
}

/// A (series, expansion id) pair and the definition it resolved to, if any.
#[derive(Debug, Clone, Copy)]
pub struct Expansion<'a> {
    series: u8,
    id: u8,
    definition: Option<&'a ExpansionDefinition>,
}

impl<'a> Expansion<'a> {
    pub fn series(&self) -> u8 {
        self.series
    }

    pub fn series_kind(&self) -> Option<ExpansionSeries> {
        ExpansionSeries::try_from(self.series).ok()
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn definition(&self) -> Option<&'a ExpansionDefinition> {
        self.definition
    }

    pub fn is_valid(&self) -> bool {
        self.definition.is_some() && self.id != 0
    }

    /// Expansion code, or the empty string for an unresolved expansion.
    pub fn code(&self) -> &'a str {
        self.definition.map_or("", |definition| definition.code.as_str())
    }

    pub fn flags(&self) -> ExpansionFlags {
        self.definition
            .map_or(ExpansionFlags::empty(), |definition| definition.flags)
    }

    pub fn has_flag(&self, flag: ExpansionFlags) -> bool {
        self.flags().intersects(flag)
    }

    pub fn is_promo(&self) -> bool {
        self.has_flag(ExpansionFlags::PROMO)
    }

    pub fn is_trainer_kit(&self) -> bool {
        self.has_flag(ExpansionFlags::TRAINER_KIT)
    }

    pub fn has_boosters(&self) -> bool {
        let is_kss = self.series == ExpansionSeries::Xy.code() && self.id == series::XY_KSS;
        !self.is_promo() && !is_kss && !self.is_trainer_kit()
    }

    /// Formats of the whole expansion. Prefer [`ItemId::formats`] for a single item.
    pub fn formats(&self) -> Formats {
        self.definition
            .map_or(Formats::empty(), |definition| definition.formats)
    }

    pub fn item(&self, index: u16, item_type: ItemType, price_index: bool) -> ItemId {
        ItemId::new(self.series, self.id, item_type.code(), index).with_price_index(price_index)
    }

    /// Regular booster pack of this expansion.
    pub fn booster(&self) -> ItemId {
        let pack = if self.has_flag(ExpansionFlags::MINOR) {
            BoosterPackIndex::MinorPack
        } else {
            BoosterPackIndex::MajorPack
        };
        self.item(u16::from(pack.code()), ItemType::BoosterPack, false)
    }
}

/// Release key to expansion code, built once from the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseMap(BTreeMap<String, String>);

impl ReleaseMap {
    pub fn from_registry(registry: &ExpansionRegistry) -> Self {
        Self(
            registry
                .definitions()
                .iter()
                .filter_map(|definition| {
                    definition
                        .key
                        .as_ref()
                        .map(|key| (key.clone(), definition.code.clone()))
                })
                .collect(),
        )
    }

    pub fn insert(&mut self, key: impl Into<String>, code: impl Into<String>) {
        self.0.insert(key.into(), code.into());
    }

    pub fn code_for(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
