//! Bitmask types carried by definitions and expansions.
//!
//! All three serialize as their raw integer value.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Per-card traits. Omitted from a definition when empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CardFlags: u32 {
        const FULL_ART = 1 << 0;
        const PRIME = 1 << 1;
        const ACE_SPEC = 1 << 2;
        /// Some cards are both YellowA and League prints.
        const LEAGUE = 1 << 3;
        const ULTRA_BEAST = 1 << 4;
        const PRISM_STAR = 1 << 5;
        const SHINING = 1 << 6;
        const TAG_TEAM = 1 << 7;
        const SHINY_POKEMON = 1 << 8;

        // Art styles, from the asset path suffix. At most one is set.
        const OP_ART = 1 << 11;
        const XY_ART = 1 << 12;
        const YELLOW_A_ART = 1 << 13;
        const ALT_ART = 1 << 14;
        const SILVER_ART = 1 << 15;
        const GOLD_ART = 1 << 16;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExpansionFlags: u32 {
        const MINOR = 1 << 0;
        const PROMO = 1 << 1;
        const ENERGY = 1 << 2;
        const TRAINER_KIT = 1 << 3;

        // Price-index buckets that occur in the expansion.
        const INDEX_COMMON_POKEMON = 1 << 6;
        const INDEX_COMMON_TRAINER = 1 << 7;
        const INDEX_UNCOMMON_POKEMON = 1 << 8;
        const INDEX_UNCOMMON_TRAINER = 1 << 9;
        const INDEX_RARE = 1 << 10;
        const INDEX_ENERGY = 1 << 11;
    }
}

bitflags! {
    /// Play formats an expansion or item is legal in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Formats: u32 {
        const STANDARD = 1 << 0;
        const EXPANDED = 1 << 1;
        const LEGACY = 1 << 2;
        const THEME_DECK = 1 << 3;
    }
}

impl Formats {
    /// Format for a format GUID found in set data.
    pub fn from_guid(guid: &str) -> Option<Self> {
        match guid {
            "6b33d420-73cc-40d4-ada5-88a7d68063a9" => Some(Self::LEGACY),
            "98c83df9-ec82-4193-84a8-104115ce4e25" => Some(Self::EXPANDED),
            "6402e830-7fed-4cd1-b172-2a320047c2bb" => Some(Self::STANDARD),
            _ => None,
        }
    }
}

macro_rules! bits_serde {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_u32(self.bits())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    u32::deserialize(deserializer).map(Self::from_bits_retain)
                }
            }
        )+
    };
}

bits_serde!(CardFlags, ExpansionFlags, Formats);
