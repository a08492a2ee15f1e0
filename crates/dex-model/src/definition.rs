//! Normalized item definitions.
//!
//! Field order is part of the output contract: the aggregation key comes
//! first, then the fields shared by every card, then variant fields. Optional
//! fields are omitted rather than written as null.

use std::fmt;

use serde::Serialize;

use crate::enums::{AbilityType, CardKind, ItemCategory, PokemonType, Rarity};
use crate::flags::CardFlags;
use crate::ids::ItemId;

/// Fields every card carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    pub id: ItemId,
    pub name: String,
    pub cat: ItemCategory,
    pub kind: CardKind,
    /// Number in the expansion.
    pub no: u32,
    /// Printed collection number when it differs from `no` (promos, alternate arts).
    #[serde(rename = "colNo", skip_serializing_if = "Option::is_none")]
    pub col_no: Option<String>,
    pub rarity: Rarity,
    #[serde(skip_serializing_if = "CardFlags::is_empty")]
    pub flags: CardFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: AbilityType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<i64>,
    /// `+` or `x`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cost: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonCard {
    #[serde(flatten)]
    pub card: CardDefinition,
    pub family: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preevo: Option<String>,
    pub hp: i64,
    /// Set when the Pokémon has exactly one weakness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakness: Option<PokemonType>,
    /// Set instead of `weakness` for multiple weaknesses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<Vec<PokemonType>>,
    /// Omitted when it is the usual ×2.
    #[serde(rename = "weaknessAmt", skip_serializing_if = "Option::is_none")]
    pub weakness_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<PokemonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resist: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<AbilityDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attacks: Vec<AttackDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainerCard {
    #[serde(flatten)]
    pub card: CardDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Z-crystal items grant attacks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attacks: Vec<AttackDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnergyCard {
    #[serde(flatten)]
    pub card: CardDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub energy: Vec<PokemonType>,
}

/// Booster packs, prerelease packs and gameplay products.
///
/// Packs are keyed by `id` and have no `asset`; every other product is keyed by `asset`.
/// Both serialize `id` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDefinition {
    pub id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    pub name: String,
    pub cat: ItemCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Definition {
    Pokemon(PokemonCard),
    Trainer(TrainerCard),
    Energy(EnergyCard),
    Product(ProductDefinition),
}

/// Key a definition is aggregated under. Serializes as the bare id or asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum DefinitionKey {
    Id(i32),
    Asset(String),
}

impl fmt::Display for DefinitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Asset(asset) => f.write_str(asset),
        }
    }
}

impl Definition {
    pub fn card(&self) -> Option<&CardDefinition> {
        match self {
            Self::Pokemon(pokemon) => Some(&pokemon.card),
            Self::Trainer(trainer) => Some(&trainer.card),
            Self::Energy(energy) => Some(&energy.card),
            Self::Product(_) => None,
        }
    }

    pub fn product(&self) -> Option<&ProductDefinition> {
        match self {
            Self::Product(product) => Some(product),
            _ => None,
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            Self::Product(product) => product.id,
            _ => self.card().map_or(ItemId::ZERO, |card| card.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Product(product) => &product.name,
            _ => self.card().map_or("", |card| card.name.as_str()),
        }
    }

    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Pokemon(_) => ItemCategory::Pokemon,
            Self::Trainer(_) => ItemCategory::Trainer,
            Self::Energy(_) => ItemCategory::Energy,
            Self::Product(product) => product.cat,
        }
    }

    pub fn asset(&self) -> Option<&str> {
        self.product().and_then(|product| product.asset.as_deref())
    }

    pub fn is_pack(&self) -> bool {
        self.category().is_pack()
    }

    /// Asset name for products that have one, identifier otherwise.
    pub fn key(&self) -> DefinitionKey {
        match self.asset() {
            Some(asset) => DefinitionKey::Asset(asset.to_string()),
            None => DefinitionKey::Id(self.id().value()),
        }
    }

    /// Every string field at the top level and in nested attacks and abilities.
    pub fn text_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        if let Some(card) = self.card() {
            fields.push(card.name.as_str());
            fields.extend(card.col_no.as_deref());
        }
        match self {
            Self::Pokemon(pokemon) => {
                fields.extend(pokemon.preevo.as_deref());
                for ability in &pokemon.abilities {
                    fields.push(&ability.name);
                    fields.extend(ability.text.as_deref());
                }
                push_attacks(&mut fields, &pokemon.attacks);
            }
            Self::Trainer(trainer) => {
                fields.extend(trainer.text.as_deref());
                push_attacks(&mut fields, &trainer.attacks);
            }
            Self::Energy(energy) => fields.extend(energy.text.as_deref()),
            Self::Product(product) => {
                fields.extend(product.asset.as_deref());
                fields.push(&product.name);
                fields.extend(product.description.as_deref());
            }
        }
        fields
    }

    /// Line understood by the game's deck import.
    pub fn export_line(&self, expansion_code: &str) -> Option<String> {
        let card = self.card()?;
        let number = card.col_no.clone().unwrap_or_else(|| card.no.to_string());
        Some(format!("{} {} {}", card.name, expansion_code, number))
    }
}

fn push_attacks<'a>(fields: &mut Vec<&'a str>, attacks: &'a [AttackDefinition]) {
    for attack in attacks {
        fields.push(&attack.name);
        fields.extend(attack.text.as_deref());
    }
}
