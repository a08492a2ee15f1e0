//! Enumerations and structures as they appear in raw attribute values.
//!
//! Raw enum attributes carry variant names, never codes. Each type knows how
//! it maps onto the normalized enums in [`crate::enums`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::enums::{ItemCategory, ItemType, PokemonType, Rarity};

name_enum! {
    pub enum RawRarity {
        Common => "Common",
        Uncommon => "Uncommon",
        Rare => "Rare",
        RareHolo => "RareHolo",
        RareHoloEx => "RareHoloEX",
        RareHoloGx => "RareHoloGX",
        RareHoloV => "RareHoloV",
        RareHoloVmax => "RareHoloVMAX",
        RarePrime => "RarePrime",
        Legendary => "Legendary",
        Ace => "Ace",
        RareUltra => "RareUltra",
        RareSecret => "RareSecret",
        RareRainbow => "RareRainbow",
        DisplayNone => "DisplayNone",
        Medium => "medium",
        PromoExclusive => "PromoExclusive",
        RarePromo => "RarePromo",
        Token => "Token",
        ExtraRare => "ExtraRare",
        VeryRare => "VeryRare",
        Unassigned => "Unassigned",
        BreakRare => "BreakRare",
        Shining => "Shining",
        Prism => "Prism",
    }
}

impl RawRarity {
    /// Normalized rarity. `None` for rarities no card carries.
    pub fn normalized(self) -> Option<Rarity> {
        let rarity = match self {
            Self::Common => Rarity::Common,
            Self::Uncommon => Rarity::Uncommon,
            Self::Rare => Rarity::Rare,
            Self::RareHolo
            | Self::RareHoloEx
            | Self::RareHoloGx
            | Self::RareHoloV
            | Self::RareHoloVmax
            | Self::RarePrime
            | Self::Legendary
            | Self::Ace
            | Self::BreakRare
            | Self::Prism => Rarity::HoloRare,
            Self::RareUltra => Rarity::UltraRare,
            Self::RareSecret | Self::Shining => Rarity::SecretRare,
            Self::RareRainbow => Rarity::RainbowRare,
            Self::RarePromo => Rarity::Promo,
            Self::DisplayNone
            | Self::Medium
            | Self::PromoExclusive
            | Self::Token
            | Self::ExtraRare
            | Self::VeryRare
            | Self::Unassigned => return None,
        };
        Some(rarity)
    }
}

name_enum! {
    pub enum FoilMask {
        None => "None",
        Holo => "Holo",
        Reverse => "Reverse",
        Thatch => "Thatch",
        Etched => "Etched",
    }
}

name_enum! {
    pub enum FoilEffect {
        None => "None",
        Cosmos => "Cosmos",
        Galaxy => "Galaxy",
        Rainbow => "Rainbow",
        CrackedIce => "Cracked_Ice",
        Lithograph => "Lithograph",
        Tinsel => "Tinsel",
        FlatSilver => "FlatSilver",
        Etched => "Etched",
        EtchedSunPillar => "EtchedSunPillar",
        AngledPillars => "AngledPillars",
        Squares => "Squares",
        SunLava => "SunLava",
        SunPillar => "SunPillar",
        SunBeam => "SunBeam",
        SolgaleoEtch => "SolgaleoEtch",
        LunalaEtch => "LunalaEtch",
        XyEtch => "XYEtch",
        BwEtch => "BWEtch",
        TapuFiniEtch => "TapuFiniEtch",
        TapuBuluEtch => "TapuBuluEtch",
        TapuKokoEtch => "TapuKokoEtch",
        TapuLeleEtch => "TapuLeleEtch",
        SolgaleoHfEtch => "SolgaleoHFEtch",
        LunalaHfEtch => "LunalaHFEtch",
        SwHolo => "SwHolo",
        SwSecret => "SwSecret",
    }
}

impl FoilEffect {
    /// Alternate-print slot for an `alt` issue with this effect.
    pub fn alt_item_type(self) -> Option<ItemType> {
        match self {
            Self::Cosmos => Some(ItemType::AltCosmos),
            Self::Rainbow => Some(ItemType::AltRainbow),
            Self::CrackedIce => Some(ItemType::AltCrackedIce),
            Self::Tinsel => Some(ItemType::AltTinsel),
            Self::AngledPillars => Some(ItemType::AltAngledPillars),
            Self::SunLava => Some(ItemType::AltSunLava),
            Self::SunBeam => Some(ItemType::AltSunBeam),
            Self::SwHolo => Some(ItemType::AltSwHolo),
            _ => None,
        }
    }
}

name_enum! {
    pub enum RawPokemonStage {
        Basic => "Basic",
        Stage1 => "Stage1",
        Stage2 => "Stage2",
        Restored => "Restored",
        LevelUp => "LevelUp",
        Legend => "Legend",
        Break => "Break",
        Vmax => "VMAX",
    }
}

name_enum! {
    pub enum RawTrainerType {
        Item => "Item",
        Stadium => "Stadium",
        Supporter => "Supporter",
        TechnicalMachine => "TechnicalMachine",
        PokemonTool => "PokemonTool",
        /// Team Flare tools.
        PokemonToolF => "PokemonToolF",
        Trainer => "Trainer",
    }
}

name_enum! {
    pub enum RawCardType {
        Pokemon => "Pokemon",
        LegendHalf => "LegendHalf",
        TrainerCard => "TrainerCard",
        Energy => "Energy",
    }
}

impl RawCardType {
    pub fn category(self) -> ItemCategory {
        match self {
            Self::Pokemon | Self::LegendHalf => ItemCategory::Pokemon,
            Self::TrainerCard => ItemCategory::Trainer,
            Self::Energy => ItemCategory::Energy,
        }
    }
}

name_enum! {
    pub enum RawProductType {
        Avatars => "Avatars",
        AvatarItems => "AvatarItems",
        AvatarProducts => "AvatarProducts",
        Bundles => "Bundles",
        Campaigns => "Campaigns",
        Coins => "Coins",
        Currency => "Currency",
        CustomProduct => "CustomProduct",
        CurrencyTransfer => "CurrencyTransfer",
        Collectibles => "Collectibles",
        CollectibleBases => "CollectibleBases",
        DeckBox => "DeckBox",
        Decks => "Decks",
        DraftEntry => "DraftEntry",
        ExternalProduct => "ExternalProduct",
        Extras => "Extras",
        FactionPacks => "FactionPacks",
        Gifts => "Gifts",
        Investment => "Investment",
        Item => "Item",
        Miscellaneous => "Miscellaneous",
        Packs => "Packs",
        Playmat => "Playmat",
        Powerups => "Powerups",
        Proofset => "Proofset",
        Resources => "Resources",
        Singles => "Singles",
        Sleeve => "Sleeve",
        TournamentEntry => "TournamentEntry",
        WorkshopRecipe => "WorkshopRecipe",
    }
}

impl RawProductType {
    /// Product types that only exist for the game's bookkeeping.
    pub fn is_internal(self) -> bool {
        matches!(self, Self::Currency | Self::Proofset | Self::Singles)
    }

    pub fn category(self) -> Option<ItemCategory> {
        match self {
            Self::Bundles | Self::Miscellaneous => Some(ItemCategory::Bundle),
            Self::Coins => Some(ItemCategory::Coin),
            Self::DeckBox => Some(ItemCategory::DeckBox),
            Self::Sleeve => Some(ItemCategory::CardSleeve),
            Self::Packs => Some(ItemCategory::Booster),
            Self::Decks => Some(ItemCategory::ThemeDeck),
            _ => None,
        }
    }
}

name_enum! {
    pub enum RawPokemonType {
        NoColor => "NoColor",
        Colorless => "Colorless",
        Darkness => "Darkness",
        Dragon => "Dragon",
        Fairy => "Fairy",
        Fighting => "Fighting",
        Fire => "Fire",
        Grass => "Grass",
        Lightning => "Lightning",
        Metal => "Metal",
        Psychic => "Psychic",
        Water => "Water",
        Strong => "Strong",
        Herbal => "Herbal",
    }
}

impl RawPokemonType {
    pub fn normalized(self) -> Option<PokemonType> {
        match self {
            Self::Colorless => Some(PokemonType::Colorless),
            Self::Darkness => Some(PokemonType::Darkness),
            Self::Dragon => Some(PokemonType::Dragon),
            Self::Fairy => Some(PokemonType::Fairy),
            Self::Fighting => Some(PokemonType::Fighting),
            Self::Fire => Some(PokemonType::Fire),
            Self::Grass => Some(PokemonType::Grass),
            Self::Lightning => Some(PokemonType::Lightning),
            Self::Metal => Some(PokemonType::Metal),
            Self::Psychic => Some(PokemonType::Psychic),
            Self::Water => Some(PokemonType::Water),
            Self::NoColor | Self::Strong | Self::Herbal => None,
        }
    }
}

/// Order of energy symbols in a printed attack cost.
pub const COST_ORDER: [PokemonType; 11] = [
    PokemonType::Grass,
    PokemonType::Fire,
    PokemonType::Water,
    PokemonType::Lightning,
    PokemonType::Psychic,
    PokemonType::Fighting,
    PokemonType::Darkness,
    PokemonType::Metal,
    PokemonType::Fairy,
    PokemonType::Dragon,
    PokemonType::Colorless,
];

name_enum! {
    pub enum RawAbilityType {
        Attack => "Attack",
        NonDamagingAttack => "NonDamagingAttack",
        PokeAbility => "PokeAbility",
        PokePower => "PokePower",
        PokeBody => "PokeBody",
        TechnicalMachine => "TechnicalMachine",
        EnergyAbility => "EnergyAbility",
        StadiumAbility => "StadiumAbility",
        TrainerAbility => "TrainerAbility",
        AncientTrait => "AncientTrait",
        PlayAbility => "PlayAbility",
        RetreatAbility => "RetreatAbility",
    }
}

name_enum! {
    /// Print variant of a card, carried in the asset class attribute.
    pub enum Issue {
        Standard => "std",
        /// League promo ("organized play").
        League => "op",
        YellowA => "yaa",
        ParallelHolo => "ph",
        PreconstructedDeck => "pcd",
        Alternate => "alt",
        Reflected => "ref",
    }
}

name_enum! {
    pub enum ItemTag {
        ShinyPokemon => "ShinyPokemon",
        UltraBeast => "UltraBeast",
        YellowA => "YellowA",
        TagTeam => "TAG",
        League => "League",
        PrismStar => "PrismStar",
        V => "V",
    }
}

/// One entry of a card's ability list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAbility {
    #[serde(default)]
    pub cost: BTreeMap<String, u32>,
    #[serde(default)]
    pub damage: i64,
    pub title: String,
    #[serde(default)]
    pub game_text: Option<String>,
    #[serde(default)]
    pub amount_operator: Option<String>,
    pub ability_type: String,
    #[serde(default)]
    pub ignore_in_filtering: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnergyProvided {
    #[serde(default)]
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_names_parse() {
        assert_eq!("Cracked_Ice".parse::<FoilEffect>().ok(), Some(FoilEffect::CrackedIce));
        assert_eq!("yaa".parse::<Issue>().ok(), Some(Issue::YellowA));
        assert!("Sparkly".parse::<FoilMask>().is_err());
    }

    #[test]
    fn rarity_mapping() {
        assert_eq!(RawRarity::Shining.normalized(), Some(Rarity::SecretRare));
        assert_eq!(RawRarity::Prism.normalized(), Some(Rarity::HoloRare));
        assert_eq!(RawRarity::Token.normalized(), None);
    }

    #[test]
    fn ability_deserializes_with_defaults() {
        let ability: RawAbility = serde_json::from_value(serde_json::json!({
            "title": "$$$attack.title$$$",
            "abilityType": "Attack",
            "cost": {"Colorless": 2},
        }))
        .unwrap();
        assert_eq!(ability.cost.get("Colorless"), Some(&2));
        assert!(!ability.ignore_in_filtering);
        assert_eq!(ability.damage, 0);
    }
}
