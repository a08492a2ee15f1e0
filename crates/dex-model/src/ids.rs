#![deny(unsafe_code)]

//! Packed item identifiers.
//!
//! ```text
//! | sign | series (6) | expansion (6) | reserved (3) | item type (6) | item index (10) |
//! ```
//!
//! A negative identifier denotes a price-index bucket rather than a printed
//! item. Zero is the "unset" sentinel.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::enums::{ExpansionSeries, ItemType};
use crate::expansion::{Expansion, ExpansionRegistry};
use crate::flags::Formats;
use crate::series;

const SERIES_SHIFT: u32 = 25;
// Six bits (25..=30): bit 31 is the sign, which marks price indexes.
const SERIES_MASK: u32 = 0x3f;
const EXPANSION_SHIFT: u32 = 19;
const EXPANSION_MASK: u32 = 0x3f;
const ITEM_TYPE_SHIFT: u32 = 10;
const ITEM_TYPE_MASK: u32 = 0x3f;
const ITEM_INDEX_MASK: u32 = 0x3ff;

/// Promos of the SM series numbered below this are no longer Standard legal.
const STANDARD_PROMO_MINIMUM: u16 = 94;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemId {
    series: u8,
    expansion: u8,
    item_type: u8,
    index: u16,
    price_index: bool,
}

impl ItemId {
    pub const ZERO: Self = Self {
        series: 0,
        expansion: 0,
        item_type: 0,
        index: 0,
        price_index: false,
    };

    /// Builds an identifier from raw fields, masking each to its bit width.
    pub const fn new(series: u8, expansion: u8, item_type: u8, index: u16) -> Self {
        Self {
            series: (series as u32 & SERIES_MASK) as u8,
            expansion: (expansion as u32 & EXPANSION_MASK) as u8,
            item_type: (item_type as u32 & ITEM_TYPE_MASK) as u8,
            index: (index as u32 & ITEM_INDEX_MASK) as u16,
            price_index: false,
        }
    }

    pub const fn with_price_index(mut self, price_index: bool) -> Self {
        self.price_index = price_index;
        self
    }

    /// Decodes a packed identifier.
    pub const fn from_value(value: i32) -> Self {
        let magnitude = value.unsigned_abs();
        Self {
            series: ((magnitude >> SERIES_SHIFT) & SERIES_MASK) as u8,
            expansion: ((magnitude >> EXPANSION_SHIFT) & EXPANSION_MASK) as u8,
            item_type: ((magnitude >> ITEM_TYPE_SHIFT) & ITEM_TYPE_MASK) as u8,
            index: (magnitude & ITEM_INDEX_MASK) as u16,
            price_index: value < 0,
        }
    }

    /// Lenient decode: non-finite or out-of-range numbers yield [`ItemId::ZERO`].
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        let truncated = value.trunc();
        if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
            return Self::ZERO;
        }
        Self::from_value(truncated as i32)
    }

    /// Lenient decode of a JSON value: anything but a number yields [`ItemId::ZERO`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(number) => number
                .as_i64()
                .and_then(|integer| i32::try_from(integer).ok())
                .map(Self::from_value)
                .or_else(|| number.as_f64().map(Self::from_f64))
                .unwrap_or(Self::ZERO),
            _ => Self::ZERO,
        }
    }

    /// Packs the fields back into an integer.
    pub const fn value(self) -> i32 {
        let packed = ((self.series as u32) << SERIES_SHIFT)
            | ((self.expansion as u32) << EXPANSION_SHIFT)
            | ((self.item_type as u32) << ITEM_TYPE_SHIFT)
            | self.index as u32;
        // Bit 31 is never set by the fields, so the cast is lossless.
        let packed = packed as i32;
        if self.price_index { -packed } else { packed }
    }

    pub const fn series(self) -> u8 {
        self.series
    }

    pub const fn expansion_id(self) -> u8 {
        self.expansion
    }

    pub const fn item_type(self) -> u8 {
        self.item_type
    }

    pub const fn index(self) -> u16 {
        self.index
    }

    pub const fn is_price_index(self) -> bool {
        self.price_index
    }

    pub fn is_zero(self) -> bool {
        self.value() == 0
    }

    pub fn series_kind(self) -> Option<ExpansionSeries> {
        ExpansionSeries::try_from(self.series).ok()
    }

    pub fn item_kind(self) -> Option<ItemType> {
        ItemType::try_from(self.item_type).ok()
    }

    pub fn is_card(self) -> bool {
        ItemType::CARD_RANGE.contains(&self.item_type)
    }

    pub fn is_league(self) -> bool {
        ItemType::LEAGUE_RANGE.contains(&self.item_type)
    }

    pub fn is_yellow_a(self) -> bool {
        ItemType::YELLOW_A_RANGE.contains(&self.item_type)
    }

    pub fn is_alt(self) -> bool {
        ItemType::ALT_RANGE.contains(&self.item_type)
    }

    pub fn has_language(self) -> bool {
        ItemType::LANGUAGE_RANGE.contains(&self.item_type)
    }

    pub fn expansion<'a>(self, registry: &'a ExpansionRegistry) -> Expansion<'a> {
        registry.resolve(self.series, self.expansion)
    }

    /// True when the identifier names a known expansion with a non-zero id.
    pub fn is_valid(self, registry: &ExpansionRegistry) -> bool {
        self.expansion(registry).is_valid()
    }

    pub fn formats(self, registry: &ExpansionRegistry) -> Formats {
        if self.series == ExpansionSeries::Sm.code()
            && self.expansion == series::SM_PROMO
            && self.index < STANDARD_PROMO_MINIMUM
        {
            return Formats::EXPANDED;
        }
        self.expansion(registry).formats()
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        Self::from_value(value)
    }
}

impl From<ItemId> for i32 {
    fn from(id: ItemId) -> Self {
        id.value()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(Self::from_value)
    }
}
