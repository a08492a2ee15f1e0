//! Raw attribute vocabulary and the typed attribute map.
//!
//! Source records are dictionaries keyed by numeric attribute codes. The
//! vocabulary below declares the value shape of every known code; a record is
//! checked against it once, when it enters the system, and accessed through
//! typed getters afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Numeric attribute key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AttributeCode(pub i64);

impl AttributeCode {
    pub const GUID: Self = Self(10000);
    pub const ASSET_PATH: Self = Self(10020);
    pub const PRODUCT_DESCRIPTION: Self = Self(10060);
    pub const NAME: Self = Self(10140);
    pub const NUMBER_OF_CARDS_IN_BOOSTER: Self = Self(10200);
    pub const REGION_CODE: Self = Self(10300);
    pub const PRODUCT_TYPE: Self = Self(10540);
    pub const VALID_FOR_TRADE: Self = Self(10640);
    pub const FAMILY_ID: Self = Self(200260);
    pub const TRAINER_TYPE: Self = Self(200270);
    pub const PREVIOUS_EVOLUTION: Self = Self(200280);
    pub const CARD_TYPE: Self = Self(200300);
    pub const GAME_TEXT: Self = Self(200310);
    pub const HP: Self = Self(200490);
    pub const HAS_ALTERNATE_PRINT: Self = Self(200520);
    pub const POKEMON_STAGE: Self = Self(200540);
    pub const RARITY: Self = Self(200550);
    pub const RELEASE_CODE: Self = Self(200580);
    pub const WEAKNESSES: Self = Self(200590);
    pub const RESISTANCE: Self = Self(200600);
    pub const FOIL_EFFECT: Self = Self(200610);
    pub const FOIL_MASK: Self = Self(200620);
    pub const CARD_CODE: Self = Self(200630);
    pub const ABILITIES: Self = Self(200740);
    pub const COLLECTION_NUMBER: Self = Self(200780);
    pub const FANCY_COLLECTION_NUMBER: Self = Self(200790);
    pub const RETREAT_COST: Self = Self(200800);
    pub const WEAKNESS_AMOUNT: Self = Self(200820);
    pub const RESISTANCE_AMOUNT: Self = Self(200830);
    /// Card issue class for cards, asset name for products.
    pub const ASSET_CLASS: Self = Self(200871);
    pub const IS_SPECIAL_ENERGY: Self = Self(200970);
    pub const IS_FULL_ART: Self = Self(201000);
    pub const IS_POKEMON_EX: Self = Self(201010);
    pub const IS_LEGEND: Self = Self(201030);
    pub const ENERGY_PROVIDED: Self = Self(201040);
    /// Set on "basic" starter decks.
    pub const IS_TC_DECK: Self = Self(201280);
    pub const IS_MCD_PROMO: Self = Self(201414);
    pub const UNLOCK_PRODUCT_TYPE: Self = Self(201507);
    pub const UNLOCK_PRODUCT_TYPE_2: Self = Self(201508);
    pub const ORIGINAL_PRINT: Self = Self(201710);
    pub const CONTAINED_IN_DECKS: Self = Self(201730);
    pub const GX_ABILITIES: Self = Self(202120);
    pub const ITEM_TAGS: Self = Self(202200);

    pub fn info(self) -> Option<&'static AttributeInfo> {
        ATTRIBUTES
            .binary_search_by_key(&self, |info| info.code)
            .ok()
            .map(|index| &ATTRIBUTES[index])
    }

    pub fn name(self) -> &'static str {
        self.info().map_or("Unknown", |info| info.name)
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value shape an attribute code is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeShape {
    Integer,
    Boolean,
    Number,
    Text,
    TextList,
    IntegerList,
    /// Nested structure decoded by the consumer.
    Json,
    /// Shape varies between releases; kept as raw JSON.
    Any,
}

impl AttributeShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Text => "text",
            Self::TextList => "text list",
            Self::IntegerList => "integer list",
            Self::Json => "json",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for AttributeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttributeInfo {
    pub code: AttributeCode,
    pub name: &'static str,
    pub shape: AttributeShape,
}

const fn info(code: i64, name: &'static str, shape: AttributeShape) -> AttributeInfo {
    AttributeInfo {
        code: AttributeCode(code),
        name,
        shape,
    }
}

use AttributeShape as Shape;

/// Every known attribute code, sorted by code.
pub static ATTRIBUTES: &[AttributeInfo] = &[
    info(-1784319558, "Tokens", Shape::Integer),
    info(-992199324, "PromoTournamentTicket", Shape::Integer),
    info(-706482148, "VirtualCurrency", Shape::Integer),
    info(-698801547, "TournamentTicket", Shape::Integer),
    info(-605044899, "TicketCurrency", Shape::Integer),
    info(-306945826, "BoosterCred", Shape::Integer),
    info(10000, "ArchID", Shape::Text),
    info(10010, "Campaign", Shape::Text),
    info(10020, "CardImage", Shape::Text),
    info(10030, "CardNumber", Shape::Integer),
    info(10040, "CompletionRequirements", Shape::Json),
    info(10050, "CustomNumber", Shape::Integer),
    info(10060, "Description", Shape::Text),
    info(10070, "DisplayArchetype", Shape::Text),
    info(10080, "EntryRequirements", Shape::Json),
    info(10090, "Hidden", Shape::Boolean),
    info(10100, "RunOnce", Shape::Boolean),
    info(10110, "InPlay", Shape::Boolean),
    info(10120, "IsBase", Shape::Boolean),
    info(10130, "IsDeleted", Shape::Boolean),
    info(10140, "Name", Shape::Text),
    info(10150, "NumberOfGames", Shape::Integer),
    info(10160, "NumberOfGamesLost", Shape::Integer),
    info(10170, "Parent", Shape::Text),
    info(10180, "ScenID", Shape::Text),
    info(10190, "SetNumber", Shape::Integer),
    info(10200, "NumberOfCardsInBooster", Shape::Integer),
    info(10210, "SoliID", Shape::Text),
    info(10220, "Gender", Shape::Text),
    info(10230, "AccountSettings", Shape::Json),
    info(10240, "Administrator", Shape::Boolean),
    info(10250, "Banned", Shape::Boolean),
    info(10260, "CanTrade", Shape::Boolean),
    info(10270, "Mute", Shape::Boolean),
    info(10275, "MuteLevel", Shape::Integer),
    info(10280, "Catalog", Shape::Boolean),
    info(10290, "Birthdate", Shape::Text),
    info(10300, "CountryCode", Shape::Text),
    info(10310, "Email", Shape::Text),
    info(10315, "ParentEmail", Shape::Text),
    info(10320, "FriendList", Shape::TextList),
    info(10330, "Level", Shape::Integer),
    info(10340, "LocalAddress", Shape::Text),
    info(10350, "OnlineStatus", Shape::Boolean),
    info(10360, "ScreenName", Shape::Text),
    info(10370, "PreviousCollectionIDs", Shape::TextList),
    info(10380, "AccountLastLogoutTime", Shape::Integer),
    info(10390, "AccountXP", Shape::Integer),
    info(10400, "AccountLevelXP", Shape::Integer),
    info(10410, "AccountPreviousLevelXP", Shape::Integer),
    info(10420, "AccountLevel", Shape::Integer),
    info(10430, "AccountGuildID", Shape::Text),
    info(10440, "ClientStartsMission", Shape::Boolean),
    info(10450, "SniffingEnabled", Shape::Boolean),
    info(10460, "IPAddress", Shape::Text),
    info(10470, "LastCollectionLossTime", Shape::Integer),
    info(10480, "EulaVersion", Shape::Integer),
    info(10485, "ScheduledItemStatus", Shape::Json),
    info(10490, "Purchaseable", Shape::Boolean),
    info(10500, "ProductSortOrder", Shape::Integer),
    info(10510, "ImageURL", Shape::Text),
    info(10520, "ProductURL", Shape::Text),
    info(10530, "PlayerNumber", Shape::Integer),
    info(10540, "ProductType", Shape::Text),
    info(10550, "PauseClock", Shape::Integer),
    info(10560, "AvailableOnDate", Shape::Integer),
    info(10570, "CatalogID", Shape::Text),
    info(10580, "MaximumNumberOfPurchases", Shape::Integer),
    info(10590, "TempTarget", Shape::Text),
    info(10600, "TempInt", Shape::Integer),
    info(10610, "TempTargetList", Shape::TextList),
    info(10620, "IsNPC", Shape::Boolean),
    info(10630, "Rewards", Shape::Json),
    info(10640, "IsTradable", Shape::Boolean),
    info(10700, "DeliverableType", Shape::Text),
    info(10710, "ModifiesAttributes", Shape::Json),
    info(10720, "IsTutorial", Shape::Boolean),
    info(10730, "AccountMissionStatus", Shape::Json),
    info(10740, "EntryPacks", Shape::TextList),
    info(10750, "CannotDeleteDeck", Shape::Boolean),
    info(10760, "CannotEditDeck", Shape::Boolean),
    info(10770, "DeckEntryID", Shape::Text),
    info(10780, "DeckVersion", Shape::Integer),
    info(10790, "ThemeDeckVersion", Shape::Integer),
    info(10800, "DeckName", Shape::Text),
    info(10810, "DeckUnlockType", Shape::Text),
    info(10820, "DeckDefinitionID", Shape::Text),
    info(10830, "DeckArchetypeList", Shape::TextList),
    info(10840, "NoNameChange", Shape::Boolean),
    info(10850, "UnlockMap", Shape::Json),
    info(10860, "ValidatedFor", Shape::TextList),
    info(10870, "LastValidatedDate", Shape::Integer),
    info(10880, "GuildMessage", Shape::Text),
    info(10900, "StoreRegion", Shape::Text),
    info(10910, "DeckTags", Shape::TextList),
    info(10920, "SlotPosition", Shape::Integer),
    info(10930, "CannotRenameDeck", Shape::Boolean),
    info(10940, "CannotCloneDeck", Shape::Boolean),
    info(10950, "Timers", Shape::Json),
    info(200000, "CASID", Shape::Text),
    info(200003, "ScreenNameStatus", Shape::Text),
    info(200005, "GuestAccount", Shape::Boolean),
    info(200010, "SuspendTimestamp", Shape::Integer),
    info(200015, "AvatarLastSavedTimestamp", Shape::Integer),
    info(200020, "GreatestAttackDamageDealt", Shape::Integer),
    info(200030, "TotalCardsDrawn", Shape::Integer),
    info(200040, "TotalDamageDealt", Shape::Integer),
    info(200050, "TotalDamageTaken", Shape::Integer),
    info(200060, "TotalGamesPlayed", Shape::Integer),
    info(200070, "TotalGamesWon", Shape::Integer),
    info(200080, "TotalGameTime", Shape::Integer),
    info(200085, "TotalGameUpsets", Shape::Integer),
    info(200090, "LastUniqueLoginDate", Shape::Integer),
    info(200100, "UniqueLoginDateCount", Shape::Integer),
    info(200110, "LastUniquePVPDate", Shape::Integer),
    info(200120, "GamePoints", Shape::Integer),
    info(200125, "TournamentPoints", Shape::Integer),
    info(200126, "LastOpponentID", Shape::Text),
    info(200130, "MatchmakingSkillRating", Shape::Number),
    info(200140, "MatchmakingGames", Shape::Integer),
    info(200150, "MatchmakingPrizesDrawn", Shape::Integer),
    info(200160, "LastLoginDecksGranted", Shape::TextList),
    info(200170, "AccountIDAttribute", Shape::Text),
    info(200180, "RulesText", Shape::Text),
    info(200190, "AceSpecText", Shape::Text),
    info(200200, "PokeToolText", Shape::Text),
    info(200210, "IntCardKey", Shape::Integer),
    info(200215, "GenderMatch", Shape::Integer),
    info(200220, "PrototypeId", Shape::Integer),
    info(200230, "Height", Shape::Text),
    info(200240, "Weight", Shape::Text),
    info(200250, "Category", Shape::Text),
    info(200260, "PokemonFamily", Shape::Integer),
    info(200270, "TrainerType", Shape::Text),
    info(200280, "EvolvesFrom", Shape::Text),
    info(200290, "EvolvesFromBasic", Shape::Integer),
    info(200300, "CardType", Shape::Text),
    info(200310, "GameText", Shape::Text),
    info(200320, "FlavorText", Shape::Text),
    info(200330, "LevelText", Shape::Text),
    info(200340, "SpecialConditionsList", Shape::Json),
    info(200350, "RarityList", Shape::TextList),
    info(200360, "TeamList", Shape::TextList),
    info(200370, "SpecialVisualizationsList", Shape::Json),
    info(200380, "OutlineEffect", Shape::Boolean),
    info(200390, "Featured", Shape::Boolean),
    info(200400, "PromoOverlayText", Shape::Boolean),
    info(200410, "PoisonAmount", Shape::Integer),
    info(200420, "PoisonBonus", Shape::Integer),
    info(200430, "BurnAmount", Shape::Integer),
    info(200440, "BurnBonus", Shape::Integer),
    info(200450, "ParalyzeDuration", Shape::Integer),
    info(200460, "Illustrator", Shape::Text),
    info(200470, "SuppressEffectList", Shape::Json),
    info(200480, "AvailabilityZone", Shape::Text),
    info(200490, "HP", Shape::Integer),
    info(200500, "DeathRedirect", Shape::Text),
    info(200510, "CombatDamageTaken", Shape::Integer),
    info(200520, "ModifiedGameTypeWhiteList", Shape::Boolean),
    info(200530, "PrizeValue", Shape::Integer),
    info(200540, "PokemonStages", Shape::Text),
    info(200550, "Rarity", Shape::Text),
    info(200560, "SubRarity", Shape::Text),
    info(200570, "PokemonType", Shape::TextList),
    info(200580, "Set", Shape::Text),
    info(200590, "WeaknessList", Shape::TextList),
    info(200600, "Resistance", Shape::Text),
    info(200610, "FoilEffect", Shape::Text),
    info(200611, "AdditionalFoilEffects", Shape::Json),
    info(200620, "FoilMask", Shape::Text),
    info(200630, "CardName", Shape::Text),
    info(200640, "EvolvesFromPokemon", Shape::Text),
    info(200650, "ResistanceOperator", Shape::Text),
    info(200660, "WeaknessOperator", Shape::Text),
    info(200670, "Coin", Shape::Text),
    info(200680, "Sleeve", Shape::Text),
    info(200690, "DeckBox", Shape::Text),
    info(200700, "PlayAbilities", Shape::TextList),
    info(200710, "ResponseAbilities", Shape::TextList),
    info(200720, "TriggeredAbilities", Shape::TextList),
    info(200730, "OutOfPlayTriggered", Shape::TextList),
    info(200740, "AbilityDescriptions", Shape::Json),
    info(200750, "DisabledAttacks", Shape::TextList),
    info(200760, "RunOnceAbilities", Shape::TextList),
    info(200770, "AdvancedModeOnly", Shape::Boolean),
    info(200780, "CollectionNumber", Shape::Integer),
    info(200790, "CollectionNumberDisplay", Shape::Text),
    info(200800, "RetreatCost", Shape::Integer),
    info(200810, "Species", Shape::Integer),
    info(200820, "WeaknessAmount", Shape::Integer),
    info(200830, "ResistanceAmount", Shape::Integer),
    info(200840, "SpecialDmgModifier", Shape::Integer),
    info(200850, "PreventAttackDamageLessThan", Shape::Integer),
    info(200860, "LegendArchID", Shape::Text),
    info(200870, "AvailableInBooster", Shape::Boolean),
    info(200871, "AssetClass", Shape::Text),
    info(200872, "RegulationMark", Shape::Text),
    info(200880, "AvatarCollection", Shape::Text),
    info(200890, "AvatarGroup", Shape::Text),
    info(200900, "AvatarItemRarity", Shape::Text),
    info(200910, "AvatarPortrait", Shape::Boolean),
    info(200920, "Clear", Shape::Text),
    info(200930, "Clip", Shape::Text),
    info(200940, "DefaultAvatarItem", Shape::Boolean),
    info(200950, "Free", Shape::Boolean),
    info(200960, "SortBy", Shape::Text),
    info(200970, "SpecialEnergy", Shape::Boolean),
    info(200980, "Worth", Shape::Text),
    info(200990, "Reprints", Shape::IntegerList),
    info(201000, "IsFullArt", Shape::Boolean),
    info(201010, "IsEXCard", Shape::Boolean),
    info(201020, "IsSecret", Shape::Boolean),
    info(201030, "IsLegend", Shape::Boolean),
    info(201040, "EnergyProvided", Shape::Json),
    info(201050, "ExtraEnergy", Shape::Json),
    info(201060, "PlayedEnergy", Shape::Boolean),
    info(201070, "PlayedStadiums", Shape::Integer),
    info(201080, "PlayedSupporters", Shape::Integer),
    info(201090, "SupportersMax", Shape::Integer),
    info(201100, "ChessClockRate", Shape::Number),
    info(201110, "TurnNumber", Shape::Integer),
    info(201120, "NumOfTimesPoison", Shape::Integer),
    info(201130, "NumOfTimesBurn", Shape::Integer),
    info(201140, "NumOfTimesSleep", Shape::Integer),
    info(201150, "NumOfTimesConfuse", Shape::Integer),
    info(201160, "NumOfTimesParalyze", Shape::Integer),
    info(201170, "NumOfTrainersPlayed", Shape::Integer),
    info(201180, "Phase", Shape::Text),
    info(201190, "TurnSummoned", Shape::Integer),
    info(201200, "CanEvolve", Shape::Boolean),
    info(201210, "CombatKillOccurred", Shape::TextList),
    info(201220, "CoinFlipOverride", Shape::Integer),
    info(201230, "MustFlipToAttack", Shape::Boolean),
    info(201240, "HasRetreated", Shape::Boolean),
    info(201250, "DeckColor1", Shape::Text),
    info(201260, "DeckColor2", Shape::Text),
    info(201270, "DeckImage", Shape::Text),
    info(201280, "TrainerChallengeDeck", Shape::Boolean),
    info(201290, "ThemeDeck", Shape::Boolean),
    info(201300, "AvatarItemsDeck", Shape::Boolean),
    info(201310, "AvatarDefaultDeck", Shape::Boolean),
    info(201330, "UpgradeDeck", Shape::Text),
    info(201340, "PastScenariosMap", Shape::Json),
    info(201350, "LeagueScenariosScoreMap", Shape::Json),
    info(201360, "SortNumber", Shape::Integer),
    info(201370, "ReleaseDate", Shape::Integer),
    info(201380, "LastUsedTCDeck", Shape::Text),
    info(201390, "LastPlayedTCLeague", Shape::Text),
    info(201400, "DeckUnlockHistory", Shape::Json),
    info(201410, "SetName", Shape::Text),
    info(201414, "IsMCDPromo", Shape::Boolean),
    info(201420, "ScenarioNumber", Shape::Integer),
    info(201430, "PlayerWinText", Shape::Text),
    info(201440, "PlayerLoseText", Shape::Text),
    info(201450, "CampaignPreviewImage", Shape::Text),
    info(201460, "CampaignMapImage", Shape::Text),
    info(201470, "TCOpponent", Shape::Json),
    info(201480, "Interstitial", Shape::Text),
    info(201490, "CompletePCDs", Shape::TextList),
    info(201500, "TCOpponentDeck", Shape::Json),
    info(201505, "BundleIDs", Shape::TextList),
    info(201507, "UnlockProductType", Shape::Text),
    info(201508, "UnlockProductType2", Shape::Text),
    info(201510, "FriendChatMode", Shape::Text),
    info(201515, "OfferID", Shape::Text),
    info(201520, "FriendMode", Shape::Text),
    info(201530, "FriendTradeMode", Shape::Text),
    info(201535, "RealCurrencies", Shape::Json),
    info(201540, "GameChatMode", Shape::Text),
    info(201545, "Tags", Shape::TextList),
    info(201550, "PublicChatMode", Shape::Text),
    info(201555, "StarBurst", Shape::Text),
    info(201560, "ShoppingMode", Shape::Text),
    info(201570, "TradeMode", Shape::Text),
    info(201580, "PrivateMessaging", Shape::Text),
    info(201590, "DeckGamesPlayed", Shape::Integer),
    info(201600, "DeckGamesWon", Shape::Integer),
    info(201610, "PokemonToolMax", Shape::Integer),
    info(201620, "ErrataApplied", Shape::Integer),
    info(201630, "IsOverflowFrame", Shape::Boolean),
    info(201640, "PCDBundleContains", Shape::Text),
    info(201650, "DeckGamesPlayedSinceEdit", Shape::Integer),
    info(201660, "DeckGamesWonSinceEdit", Shape::Integer),
    info(201670, "LegendTopHalf", Shape::Text),
    info(201680, "LegendBottomHalf", Shape::Text),
    info(201690, "EndOfEvolutionChain", Shape::Boolean),
    info(201700, "PreloadedPackages", Shape::Json),
    info(201710, "OriginalPrint", Shape::Text),
    info(201720, "AsleepCoinFlips", Shape::Integer),
    info(201730, "ContainedInDecks", Shape::TextList),
    info(201740, "AvatarHairHasBack", Shape::Boolean),
    info(201750, "RestoredFromFossil", Shape::Text),
    info(201760, "MustFlipToPlayTrainer", Shape::Boolean),
    info(201890, "CoinBackImageName", Shape::Text),
    info(201930, "DeckBoxColorA", Shape::Text),
    info(201940, "DeckBoxColorB", Shape::Text),
    info(201941, "CompositeDeckBoxComponentB", Shape::Text),
    info(201970, "_UnusedLeftoverIsHGSS3Defender", Shape::Boolean),
    info(202060, "_UnusedLeftoverIsDeckBoxNotFromTin", Shape::Boolean),
    info(202080, "FoilIntensity", Shape::Integer),
    info(202110, "LegalityDate", Shape::Any),
    info(202120, "GXAbilities", Shape::Any),
    info(202200, "ItemTags", Shape::TextList),
    info(202220, "DateAdded", Shape::Any),
    info(202250, "BoosterDistribution", Shape::Any),
    info(2215716, "Gems", Shape::Integer),
    info(77381929, "Price", Shape::Json),
    info(1164969402, "ProductPrice", Shape::Json),
    info(2012906479, "RealCurrency", Shape::Integer),
];

/// One attribute value, typed by its declared shape.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Present but explicitly null.
    Null,
    Integer(i64),
    Boolean(bool),
    Number(f64),
    Text(String),
    TextList(Vec<String>),
    IntegerList(Vec<i64>),
    Json(Value),
}

impl AttributeValue {
    fn from_json(info: &AttributeInfo, value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::Null);
        }
        let typed = match info.shape {
            AttributeShape::Integer => json_integer(value).map(Self::Integer),
            AttributeShape::Boolean => value.as_bool().map(Self::Boolean),
            AttributeShape::Number => value.as_f64().map(Self::Number),
            AttributeShape::Text => value.as_str().map(|text| Self::Text(text.to_string())),
            AttributeShape::TextList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map(Self::TextList)
            }),
            AttributeShape::IntegerList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(json_integer)
                    .collect::<Option<Vec<_>>>()
                    .map(Self::IntegerList)
            }),
            AttributeShape::Json | AttributeShape::Any => Some(Self::Json(value.clone())),
        };
        typed.ok_or_else(|| ModelError::AttributeShape {
            code: info.code.0,
            name: info.name,
            expected: info.shape,
            found: json_kind(value).to_string(),
        })
    }
}

fn json_integer(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    // Whole floats show up in a handful of older releases.
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.is_finite())
        .map(|number| number as i64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One source record, checked against the attribute vocabulary.
///
/// Keys outside the vocabulary are not an error here; they are kept in
/// [`AttributeMap::unknown_keys`] so a whole run can report schema drift at once.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    values: BTreeMap<AttributeCode, AttributeValue>,
    unknown: Vec<String>,
    raw: Value,
}

impl AttributeMap {
    pub fn from_json(raw: Value) -> Result<Self> {
        let object = raw.as_object().ok_or(ModelError::NotAnObject)?;
        let mut values = BTreeMap::new();
        let mut unknown = Vec::new();
        for (key, value) in object {
            let info = key
                .parse::<i64>()
                .ok()
                .and_then(|code| AttributeCode(code).info());
            match info {
                Some(info) => {
                    values.insert(info.code, AttributeValue::from_json(info, value)?);
                }
                None => unknown.push(key.clone()),
            }
        }
        Ok(Self {
            values,
            unknown,
            raw,
        })
    }

    /// The record as it was read, for error context.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown
    }

    pub fn contains(&self, code: AttributeCode) -> bool {
        self.values.contains_key(&code)
    }

    pub fn get(&self, code: AttributeCode) -> Option<&AttributeValue> {
        self.values.get(&code)
    }

    pub fn int(&self, code: AttributeCode) -> Option<i64> {
        match self.get(code)? {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, code: AttributeCode) -> Option<bool> {
        match self.get(code)? {
            AttributeValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_true(&self, code: AttributeCode) -> bool {
        self.flag(code) == Some(true)
    }

    pub fn is_false(&self, code: AttributeCode) -> bool {
        self.flag(code) == Some(false)
    }

    pub fn text(&self, code: AttributeCode) -> Option<&str> {
        match self.get(code)? {
            AttributeValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Text value, treating the empty string as absent.
    pub fn non_empty_text(&self, code: AttributeCode) -> Option<&str> {
        self.text(code).filter(|text| !text.is_empty())
    }

    pub fn texts(&self, code: AttributeCode) -> &[String] {
        match self.get(code) {
            Some(AttributeValue::TextList(values)) => values,
            _ => &[],
        }
    }

    pub fn json(&self, code: AttributeCode) -> Option<&Value> {
        match self.get(code)? {
            AttributeValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Parses a text attribute holding an enum name.
    pub fn parse<T>(&self, code: AttributeCode) -> Result<Option<T>>
    where
        T: FromStr<Err = ModelError>,
    {
        self.text(code).map(str::parse).transpose()
    }
}
