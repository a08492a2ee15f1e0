//! Closed enumerations of the normalized catalog.
//!
//! Every enum here is serialized as its numeric code; the names are the
//! canonical spellings used in logs and in the decode utility.

use std::ops::RangeInclusive;

code_enum! {
    /// Product line an expansion belongs to.
    pub enum ExpansionSeries {
        Unknown = 0 => "Unknown",
        /// Includes Gym Series and Legendary Collection.
        Base = 1 => "Base",
        Neo = 2 => "Neo",
        ECard = 3 => "ECard",
        Ex = 4 => "EX",
        Dp = 5 => "DP",
        Pt = 6 => "Pt",
        Hgss = 7 => "HGSS",
        Bw = 8 => "BW",
        Xy = 9 => "XY",
        Sm = 10 => "SM",
        Swsh = 11 => "SWSH",
        /// Items that only exist in the online game.
        Ptcgo = 63 => "PTCGO",
    }
}

impl ExpansionSeries {
    /// Series that have items in the online game, oldest first.
    pub const PLAYABLE: [Self; 6] = [
        Self::Hgss,
        Self::Bw,
        Self::Xy,
        Self::Sm,
        Self::Swsh,
        Self::Ptcgo,
    ];

    pub fn readable(self) -> Option<&'static str> {
        match self {
            Self::Hgss => Some("HeartGold & SoulSilver"),
            Self::Bw => Some("Black & White"),
            Self::Xy => Some("XY"),
            Self::Sm => Some("Sun & Moon"),
            Self::Swsh => Some("Sword & Shield"),
            Self::Ptcgo => Some("Gameplay"),
            _ => None,
        }
    }

    pub fn is_playable(self) -> bool {
        Self::PLAYABLE.contains(&self)
    }
}

code_enum! {
    /// Identifier sub-slot separating prints of the same card.
    pub enum ItemType {
        Card = 0 => "Card",
        /// Holofoil common, uncommon or rare.
        HoloCard = 1 => "HoloCard",
        /// Reverse holo common, uncommon or rare.
        ReverseCard = 2 => "ReverseCard",
        ThemeDeckCard = 3 => "ThemeDeckCard",
        League = 4 => "League",
        /// Second league print differing only in foil mask.
        LeagueAlternate = 5 => "LeagueAlternate",
        YellowAlternate = 10 => "YellowAlternate",
        YellowAlternateHolo = 11 => "YellowAlternateHolo",
        YellowAlternateB = 12 => "YellowAlternateB",
        YellowAlternateShiny = 13 => "YellowAlternateShiny",
        AlternateArt = 16 => "AlternateArt",
        AlternateArtReverse = 17 => "AlternateArtReverse",
        /// Alternate print without a foil effect.
        AltRegular = 25 => "AltRegular",
        AltCosmos = 26 => "AltCosmos",
        AltRainbow = 27 => "AltRainbow",
        AltCrackedIce = 28 => "AltCrackedIce",
        AltTinsel = 29 => "AltTinsel",
        AltAngledPillars = 30 => "AltAngledPillars",
        AltSunLava = 31 => "AltSunLava",
        AltSunBeam = 32 => "AltSunBeam",
        AltSwHolo = 33 => "AltSwHolo",
        LanguageDe = 40 => "Language_DE",
        LanguageEn = 41 => "Language_EN",
        LanguageEs = 42 => "Language_ES",
        LanguageFr = 43 => "Language_FR",
        LanguageIt = 44 => "Language_IT",
        LanguagePtBr = 45 => "Language_PTBR",
        BoosterPack = 55 => "BoosterPack",
        /// Item index is always 0.
        Gameplay = 56 => "Gameplay",
        /// Item index is always 0.
        Avatar = 57 => "Avatar",
    }
}

impl ItemType {
    pub const CARD_RANGE: RangeInclusive<u8> = 0..=45;
    pub const LEAGUE_RANGE: RangeInclusive<u8> = 4..=5;
    pub const YELLOW_A_RANGE: RangeInclusive<u8> = 10..=13;
    pub const ALT_RANGE: RangeInclusive<u8> = 25..=33;
    pub const LANGUAGE_RANGE: RangeInclusive<u8> = 40..=45;

    /// Item types that differ from another print only in their foil mask.
    pub const FOIL_ALTERNATES: [Self; 7] = [
        Self::HoloCard,
        Self::ReverseCard,
        Self::ThemeDeckCard,
        Self::LeagueAlternate,
        Self::YellowAlternateHolo,
        Self::AlternateArtReverse,
        Self::AltRegular,
    ];

    /// Collection-number suffix used in slugs (`72a`, `14p`).
    pub fn suffix(self) -> Option<&'static str> {
        let suffix = match self {
            Self::HoloCard => "h",
            Self::ReverseCard => "p",
            Self::ThemeDeckCard => "td",
            Self::YellowAlternate => "a",
            Self::YellowAlternateHolo => "ah",
            Self::YellowAlternateB => "b",
            Self::YellowAlternateShiny => "as",
            Self::AlternateArt => "aa",
            Self::AlternateArtReverse => "aap",
            Self::League => "l",
            Self::LeagueAlternate => "la",
            Self::AltRegular => "alt",
            Self::AltCosmos => "ec",
            Self::AltRainbow => "er",
            Self::AltCrackedIce => "eci",
            Self::AltTinsel => "et",
            Self::AltAngledPillars => "eap",
            Self::AltSunLava => "esl",
            Self::AltSunBeam => "esb",
            Self::AltSwHolo => "esw",
            Self::LanguageDe => "de",
            Self::LanguageEn => "en",
            Self::LanguageEs => "es",
            Self::LanguageFr => "fr",
            Self::LanguageIt => "it",
            Self::LanguagePtBr => "ptbr",
            Self::Card | Self::BoosterPack | Self::Gameplay | Self::Avatar => return None,
        };
        Some(suffix)
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|item_type| item_type.suffix() == Some(suffix))
    }

    /// Item type of a non-native-language reprint, by region code.
    pub fn from_region_code(region: &str) -> Option<Self> {
        match region {
            "DE" => Some(Self::LanguageDe),
            "EN" => Some(Self::LanguageEn),
            "ES" => Some(Self::LanguageEs),
            "FR" => Some(Self::LanguageFr),
            "IT" => Some(Self::LanguageIt),
            "PTBR" => Some(Self::LanguagePtBr),
            _ => None,
        }
    }

    pub fn is_yellow_a(self) -> bool {
        Self::YELLOW_A_RANGE.contains(&self.code())
    }
}

code_enum! {
    pub enum ItemCategory {
        Pokemon = 1 => "Pokemon",
        Trainer = 2 => "Trainer",
        Energy = 3 => "Energy",
        Booster = 10 => "Booster",
        Bundle = 11 => "Bundle",
        Coin = 12 => "Coin",
        DeckBox = 13 => "DeckBox",
        CardSleeve = 14 => "CardSleeve",
        ThemeDeck = 15 => "ThemeDeck",
        Tin = 16 => "Tin",
        PrereleasePack = 17 => "PrereleasePack",
    }
}

impl ItemCategory {
    pub fn is_card(self) -> bool {
        matches!(self, Self::Pokemon | Self::Trainer | Self::Energy)
    }

    /// Categories aggregated under the pack map of a schema.
    pub fn is_pack(self) -> bool {
        matches!(self, Self::Booster | Self::PrereleasePack)
    }
}

code_enum! {
    /// Normalized rarity.
    pub enum Rarity {
        None = 0 => "None",
        Common = 1 => "Common",
        Uncommon = 2 => "Uncommon",
        Rare = 3 => "Rare",
        /// EX, GX, V, VMAX, ACE SPEC, Prime, LEGEND, BREAK and Prism Star included.
        HoloRare = 4 => "HoloRare",
        /// Full art cards.
        UltraRare = 5 => "UltraRare",
        SecretRare = 6 => "SecretRare",
        RainbowRare = 7 => "RainbowRare",
        Promo = 8 => "Promo",
    }
}

impl Rarity {
    pub fn readable(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::HoloRare => "Holo Rare",
            Self::UltraRare => "Ultra Rare",
            Self::SecretRare => "Secret Rare",
            Self::RainbowRare => "Rainbow Rare",
            Self::Promo => "Promo",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::SecretRare | Self::RainbowRare)
    }
}

code_enum! {
    pub enum CardKind {
        Basic = 1 => "Basic",
        Stage1 = 2 => "Stage1",
        Stage2 = 3 => "Stage2",
        Restored = 4 => "Restored",
        Legend = 5 => "LEGEND",
        Ex = 6 => "EX",
        Break = 7 => "BREAK",
        Mega = 8 => "MEGA",
        BasicGx = 9 => "BasicGX",
        Stage1Gx = 10 => "Stage1GX",
        Stage2Gx = 11 => "Stage2GX",
        RestoredGx = 12 => "RestoredGX",
        TagTeam = 13 => "TAGTEAM",
        V = 14 => "V",
        Vmax = 15 => "VMAX",
        Item = 40 => "Item",
        Supporter = 41 => "Supporter",
        Stadium = 42 => "Stadium",
        PokemonTool = 43 => "PokemonTool",
        BasicEnergy = 50 => "BasicEnergy",
        SpecialEnergy = 51 => "SpecialEnergy",
    }
}

impl CardKind {
    pub fn readable(self) -> &'static str {
        match self {
            Self::Basic => "Basic Pokémon",
            Self::Stage1 => "Stage 1 Pokémon",
            Self::Stage2 => "Stage 2 Pokémon",
            Self::Restored => "Restored Pokémon",
            Self::Legend => "LEGEND Half",
            Self::Ex => "Pokémon-EX",
            Self::Break => "BREAK",
            Self::Mega => "M Pokémon-EX",
            Self::BasicGx => "Pokémon-GX",
            Self::Stage1Gx => "Stage 1 Pokémon-GX",
            Self::Stage2Gx => "Stage 2 Pokémon-GX",
            Self::RestoredGx => "Restored Pokémon-GX",
            Self::TagTeam => "Pokémon-TAG TEAM",
            Self::V => "Pokémon-V",
            Self::Vmax => "Pokémon-VMAX",
            Self::Item => "Item",
            Self::Supporter => "Supporter",
            Self::Stadium => "Stadium",
            Self::PokemonTool => "Pokémon Tool",
            Self::BasicEnergy => "Energy",
            Self::SpecialEnergy => "Special Energy",
        }
    }
}

code_enum! {
    pub enum AbilityType {
        PokePower = 1 => "PokePower",
        PokeBody = 2 => "PokeBody",
        Ability = 3 => "Ability",
        AncientTrait = 4 => "AncientTrait",
    }
}

impl AbilityType {
    pub fn readable(self) -> &'static str {
        match self {
            Self::PokePower => "Poké-POWER",
            Self::PokeBody => "Poké-BODY",
            Self::Ability => "Ability",
            Self::AncientTrait => "Ancient Trait",
        }
    }
}

code_enum! {
    /// Energy type of a card, attack cost, weakness or resistance.
    pub enum PokemonType {
        Colorless = 1 => "Colorless",
        Grass = 2 => "Grass",
        Fire = 3 => "Fire",
        Water = 4 => "Water",
        Lightning = 5 => "Lightning",
        Psychic = 6 => "Psychic",
        Fighting = 7 => "Fighting",
        Darkness = 8 => "Darkness",
        Metal = 9 => "Metal",
        Fairy = 10 => "Fairy",
        Dragon = 11 => "Dragon",
    }
}

impl PokemonType {
    /// Single-letter symbol used in attack cost notation.
    pub fn letter(self) -> char {
        match self {
            Self::Colorless => 'C',
            Self::Grass => 'G',
            Self::Fire => 'R',
            Self::Water => 'W',
            Self::Lightning => 'L',
            Self::Psychic => 'P',
            Self::Fighting => 'F',
            Self::Darkness => 'D',
            Self::Metal => 'M',
            Self::Fairy => 'Y',
            Self::Dragon => 'N',
        }
    }
}

code_enum! {
    /// Item index of a `BoosterPack` identifier.
    pub enum BoosterPackIndex {
        MajorPack = 1 => "MajorPack",
        MinorPack = 2 => "MinorPack",
        Prerelease = 3 => "Prerelease",
    }
}

impl BoosterPackIndex {
    pub fn slug(self) -> &'static str {
        match self {
            Self::MajorPack => "Booster-Pack",
            Self::MinorPack => "Booster-Pack-Minor",
            Self::Prerelease => "Prerelease-Pack",
        }
    }
}

code_enum! {
    /// Item index of a card price-index bucket.
    pub enum CardPriceIndex {
        CommonPokemon = 1 => "CommonPokemon",
        CommonTrainer = 2 => "CommonTrainer",
        Energy = 3 => "Energy",
        UncommonPokemon = 4 => "UncommonPokemon",
        UncommonTrainer = 5 => "UncommonTrainer",
        Rare = 6 => "Rare",
    }
}

code_enum! {
    pub enum TreasureChestIndex {
        UncommonChest = 1 => "UncommonChest",
        HoloChest = 2 => "HoloChest",
    }
}

code_enum! {
    pub enum AvatarBoxIndex {
        PikachuBox = 1 => "PikachuBox",
        CharizardBox = 2 => "CharizardBox",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() {
        for item_type in ItemType::ALL {
            assert_eq!(ItemType::try_from(item_type.code()).ok(), Some(*item_type));
        }
        assert!(ItemType::try_from(20).is_err());
    }

    #[test]
    fn suffixes_are_unique() {
        for item_type in ItemType::ALL {
            if let Some(suffix) = item_type.suffix() {
                assert_eq!(ItemType::from_suffix(suffix), Some(*item_type));
            }
        }
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("Language_PTBR".parse::<ItemType>().ok(), Some(ItemType::LanguagePtBr));
        assert_eq!("HGSS".parse::<ExpansionSeries>().ok(), Some(ExpansionSeries::Hgss));
        assert!("Mystery".parse::<Rarity>().is_err());
    }

    #[test]
    fn enums_serialize_as_codes() {
        let json = serde_json::to_string(&(CardKind::TagTeam, Rarity::HoloRare)).unwrap();
        assert_eq!(json, "[13,4]");
    }

    #[test]
    fn region_codes_map_to_language_slots() {
        assert_eq!(ItemType::from_region_code("FR"), Some(ItemType::LanguageFr));
        assert_eq!(ItemType::from_region_code("BR"), None);
    }
}
