#[macro_use]
mod macros;

pub mod attributes;
pub mod definition;
pub mod enums;
pub mod error;
pub mod expansion;
pub mod flags;
pub mod ids;
pub mod price_index;
pub mod raw;
pub mod series;
pub mod slug;

pub use attributes::{AttributeCode, AttributeMap, AttributeShape, AttributeValue};
pub use definition::{
    AbilityDefinition, AttackDefinition, CardDefinition, Definition, DefinitionKey, EnergyCard,
    PokemonCard, ProductDefinition, TrainerCard,
};
pub use enums::{
    AbilityType, AvatarBoxIndex, BoosterPackIndex, CardKind, CardPriceIndex, ExpansionSeries,
    ItemCategory, ItemType, PokemonType, Rarity, TreasureChestIndex,
};
pub use error::{ModelError, Result};
pub use expansion::{Expansion, ExpansionDefinition, ExpansionRegistry, ReleaseMap};
pub use flags::{CardFlags, ExpansionFlags, Formats};
pub use ids::ItemId;
