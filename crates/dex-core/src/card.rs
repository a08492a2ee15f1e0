//! Card classification.
//!
//! Derived fields are resolved in dependency order: collection number, fancy
//! number, print issue, rarity, kind, flags and finally the item type that
//! picks the identifier slot. Kind and item type are decision tables so their
//! priority is visible in one place.

use dex_model::raw::{
    FoilEffect, FoilMask, Issue, ItemTag, RawAbility, RawEnergyProvided, RawPokemonStage,
    RawRarity, RawTrainerType,
};
use dex_model::{
    AttributeCode, AttributeMap, CardDefinition, CardFlags, CardKind, Definition, EnergyCard,
    ExpansionSeries, ItemCategory, ItemType, PokemonCard, Rarity, TrainerCard,
};
use serde::de::DeserializeOwned;

use crate::abilities::{Moves, parse_moves, pokemon_type};
use crate::base::ItemBase;
use crate::context::ClassifyContext;
use crate::error::{ClassifyError, Result};
use crate::fatal;
use crate::inconsistency::InconsistencyLog;
use crate::rules::{Rule, decide};
use crate::translate::{is_key, strip_html};

/// Generations numbers its Radiant Collection from 101 instead of continuing the main set.
const GENERATIONS: &str = "GEN";
const RADIANT_COLLECTION_OFFSET: u32 = 17;

/// The only `alt` print without a `std` counterpart.
const ALT_WITHOUT_STANDARD: &str = "BW25";

const MAX_ITEM_INDEX: u32 = 0x3ff;

/// A classified card and whether it duplicates another record exactly.
pub(crate) struct ClassifiedCard {
    pub definition: Definition,
    pub true_duplicate: bool,
}

struct KindFacts {
    stage: Option<RawPokemonStage>,
    trainer: Option<RawTrainerType>,
    energy: bool,
    special_energy: bool,
    legend: bool,
    ex: bool,
    gx: bool,
    tags: Vec<String>,
}

impl KindFacts {
    fn gather(attributes: &AttributeMap) -> Result<Self> {
        Ok(Self {
            stage: attributes.parse(AttributeCode::POKEMON_STAGE)?,
            trainer: attributes.parse(AttributeCode::TRAINER_TYPE)?,
            energy: attributes.contains(AttributeCode::ENERGY_PROVIDED),
            special_energy: attributes.is_true(AttributeCode::IS_SPECIAL_ENERGY),
            legend: attributes.is_true(AttributeCode::IS_LEGEND),
            ex: attributes.is_true(AttributeCode::IS_POKEMON_EX),
            gx: attributes.contains(AttributeCode::GX_ABILITIES),
            tags: attributes.texts(AttributeCode::ITEM_TAGS).to_vec(),
        })
    }

    fn has_tag(&self, tag: ItemTag) -> bool {
        self.tags.iter().any(|candidate| candidate == tag.as_str())
    }
}

const POKEMON_KIND_RULES: &[Rule<KindFacts, CardKind>] = &[
    Rule::new("legend", |f: &KindFacts| f.legend, |_| Some(CardKind::Legend)),
    Rule::new("ex", |f: &KindFacts| f.ex, |f: &KindFacts| {
        Some(if f.stage == Some(RawPokemonStage::Stage1) {
            CardKind::Mega
        } else {
            CardKind::Ex
        })
    }),
    Rule::new(
        "vmax",
        |f: &KindFacts| f.stage == Some(RawPokemonStage::Vmax),
        |_| Some(CardKind::Vmax),
    ),
    Rule::new("v", |f: &KindFacts| f.has_tag(ItemTag::V), |_| Some(CardKind::V)),
    Rule::new(
        "tag team",
        |f: &KindFacts| f.gx && f.has_tag(ItemTag::TagTeam),
        |_| Some(CardKind::TagTeam),
    ),
    Rule::new("gx", |f: &KindFacts| f.gx, |f: &KindFacts| match f.stage? {
        RawPokemonStage::Basic => Some(CardKind::BasicGx),
        RawPokemonStage::Stage1 => Some(CardKind::Stage1Gx),
        RawPokemonStage::Stage2 => Some(CardKind::Stage2Gx),
        RawPokemonStage::Restored => Some(CardKind::RestoredGx),
        _ => None,
    })
    .or_fatal("GXAbilities specified but could not determine CardKind"),
    Rule::new("stage", |_| true, |f: &KindFacts| match f.stage? {
        RawPokemonStage::Basic => Some(CardKind::Basic),
        RawPokemonStage::Stage1 => Some(CardKind::Stage1),
        RawPokemonStage::Stage2 => Some(CardKind::Stage2),
        RawPokemonStage::Restored => Some(CardKind::Restored),
        RawPokemonStage::Break => Some(CardKind::Break),
        _ => None,
    })
    .or_fatal("Unknown Pokemon CardKind"),
];

const OTHER_KIND_RULES: &[Rule<KindFacts, CardKind>] = &[
    Rule::new("trainer", |f: &KindFacts| f.trainer.is_some(), |f: &KindFacts| match f.trainer? {
        RawTrainerType::Item => Some(CardKind::Item),
        RawTrainerType::Stadium => Some(CardKind::Stadium),
        RawTrainerType::Supporter => Some(CardKind::Supporter),
        RawTrainerType::PokemonTool | RawTrainerType::PokemonToolF => Some(CardKind::PokemonTool),
        _ => None,
    })
    .or_fatal("Unknown trainerType"),
    Rule::new("energy", |f: &KindFacts| f.energy, |f: &KindFacts| {
        Some(if f.special_energy {
            CardKind::SpecialEnergy
        } else {
            CardKind::BasicEnergy
        })
    }),
    Rule::new("unknown", |_| true, |_| None).or_fatal("Could not determine card type"),
];

fn card_kind(facts: &KindFacts) -> Result<CardKind> {
    let (table, rules) = if facts.stage.is_some() {
        ("pokemon kind", POKEMON_KIND_RULES)
    } else {
        ("card kind", OTHER_KIND_RULES)
    };
    decide(table, rules, facts)
        .map(|decision| decision.outcome)
        .map_err(ClassifyError::fatal)
}

/// Everything the item-type table looks at.
struct CardFacts {
    name: String,
    expansion: String,
    series: u8,
    category: ItemCategory,
    no: u32,
    fancy_no: Option<String>,
    rarity: RawRarity,
    mask: Option<FoilMask>,
    effect: Option<FoilEffect>,
    /// Issue as declared.
    declared_issue: Option<Issue>,
    /// Issue after correcting mislabelled `std` prints.
    issue: Option<Issue>,
    tags: Vec<String>,
    region: Option<String>,
    asset_path: Option<String>,
    full_art: bool,
    kind: CardKind,
    card_code: Option<String>,
    in_decks: bool,
    has_alternate_print: bool,
}

impl CardFacts {
    fn has_tag(&self, tag: ItemTag) -> bool {
        self.tags.iter().any(|candidate| candidate == tag.as_str())
    }

    fn has_effect(&self) -> bool {
        self.effect.is_some_and(|effect| effect != FoilEffect::None)
    }

    fn is_yellow_a(&self) -> bool {
        self.has_tag(ItemTag::YellowA) || self.issue == Some(Issue::YellowA)
    }

    fn is_league(&self) -> bool {
        self.has_tag(ItemTag::League) || self.issue == Some(Issue::League)
    }

    fn issue_name(&self) -> &'static str {
        self.issue.map_or("", Issue::as_str)
    }

    /// BW league energies and Skyla have a thatched and a reverse rainbow
    /// league print; so does the XYEnergy Fairy Energy.
    fn is_league_alternate(&self) -> bool {
        let rainbow = self.effect == Some(FoilEffect::Rainbow);
        let bw = rainbow
            && self.mask == Some(FoilMask::Thatch)
            && self.series == ExpansionSeries::Bw.code()
            && ((self.kind == CardKind::Supporter && self.in_decks && !self.has_alternate_print)
                || self.category == ItemCategory::Energy);
        let xy_energy = rainbow
            && self.expansion == "XYEnergy"
            && self.mask == Some(FoilMask::Reverse)
            && self.card_code.as_deref() == Some("FairyEnergy");
        bw || xy_energy
    }
}

const ITEM_TYPE_RULES: &[Rule<CardFacts, ItemType>] = &[
    Rule::new("language", |f: &CardFacts| f.region.is_some(), |f: &CardFacts| {
        f.region.as_deref().and_then(ItemType::from_region_code)
    })
    .or_fatal("Unknown region code"),
    // YellowA wins over League; several SM2 and SM6 cards are both.
    Rule::new("yellow a", CardFacts::is_yellow_a, yellow_a_item_type).noting(|f: &CardFacts| {
        (!f.has_tag(ItemTag::YellowA)).then(|| {
            format!(
                "issue=yaa card {} (#{}) from expansion {} lacks tags:YellowA",
                f.name, f.no, f.expansion
            )
        })
    }),
    Rule::new("league", CardFacts::is_league, league_item_type),
    Rule::new(
        "theme deck",
        |f: &CardFacts| f.issue == Some(Issue::PreconstructedDeck),
        |_| Some(ItemType::ThemeDeckCard),
    ),
    Rule::new(
        "alternate",
        |f: &CardFacts| {
            f.issue == Some(Issue::Alternate)
                && f.fancy_no.as_deref() != Some(ALT_WITHOUT_STANDARD)
        },
        alternate_item_type,
    )
    .or_fatal("issue=alt card has no item type for its foil effect and rarity"),
    Rule::new(
        "alternate art",
        |f: &CardFacts| {
            f.asset_path.as_deref().is_some_and(|path| path.ends_with('a'))
                && matches!(f.issue, Some(Issue::Standard | Issue::ParallelHolo))
        },
        |f: &CardFacts| {
            Some(if f.issue == Some(Issue::Standard) {
                ItemType::AlternateArt
            } else {
                ItemType::AlternateArtReverse
            })
        },
    ),
    // ACE SPEC trainers are always marked Reverse.
    Rule::new(
        "reverse",
        |f: &CardFacts| {
            f.mask == Some(FoilMask::Reverse)
                && !matches!(f.rarity, RawRarity::Ace | RawRarity::RarePromo)
        },
        |_| Some(ItemType::ReverseCard),
    )
    .noting(|f: &CardFacts| {
        (f.issue != Some(Issue::ParallelHolo)).then(|| {
            format!(
                "Card {} (#{}) from expansion {} has FoilMask=Reverse but its issue is ’{}’ instead of ’ph’",
                f.name,
                f.no,
                f.expansion,
                f.issue_name()
            )
        })
    }),
    // GX cards are masked Holo too but stay plain cards.
    Rule::new(
        "holo",
        |f: &CardFacts| {
            f.rarity == RawRarity::RareHolo
                || (f.kind == CardKind::BasicEnergy && f.mask == Some(FoilMask::Holo))
        },
        |_| Some(ItemType::HoloCard),
    ),
    Rule::new("card", |_| true, |_| Some(ItemType::Card)),
];

fn yellow_a_item_type(f: &CardFacts) -> Option<ItemType> {
    let item_type = if f.has_tag(ItemTag::ShinyPokemon) {
        ItemType::YellowAlternateShiny
    } else if f.fancy_no.as_deref().is_some_and(|no| no.ends_with('b')) {
        ItemType::YellowAlternateB
    } else if !f.full_art && f.category == ItemCategory::Trainer && f.mask == Some(FoilMask::Holo) {
        ItemType::YellowAlternateHolo
    } else {
        ItemType::YellowAlternate
    };
    Some(item_type)
}

fn league_item_type(f: &CardFacts) -> Option<ItemType> {
    if f.is_league_alternate() {
        tracing::info!(
            "Marking card {} (#{}) from expansion {} as LeagueAlternate",
            f.name,
            f.no,
            f.expansion
        );
        return Some(ItemType::LeagueAlternate);
    }
    Some(ItemType::League)
}

fn alternate_item_type(f: &CardFacts) -> Option<ItemType> {
    if let Some(effect) = f.effect.filter(|effect| *effect != FoilEffect::None) {
        return effect.alt_item_type();
    }
    match f.rarity {
        // An alt RareHolo without a foil effect is a regular rare.
        RawRarity::RareHolo => Some(ItemType::Card),
        RawRarity::RarePromo => Some(ItemType::AltRegular),
        _ => None,
    }
}

pub(crate) fn classify_card(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    base: &ItemBase<'_>,
    category: ItemCategory,
    log: &mut InconsistencyLog,
) -> Result<ClassifiedCard> {
    let expansion = base.expansion;
    if !expansion.is_valid() {
        return Err(fatal!("Card with invalid expansion"));
    }

    let no = collection_number(attributes, expansion.code())?;
    let fancy_no = fancy_number(attributes, ctx, no)?;
    let kind = card_kind(&KindFacts::gather(attributes)?)?;
    let rarity: RawRarity = attributes
        .parse(AttributeCode::RARITY)?
        .ok_or_else(|| fatal!("Card is missing its rarity"))?;
    let mask: Option<FoilMask> = attributes.parse(AttributeCode::FOIL_MASK)?;
    let declared_issue: Option<Issue> = attributes.parse(AttributeCode::ASSET_CLASS)?;

    let mut facts = CardFacts {
        name: base.name.clone(),
        expansion: expansion.code().to_string(),
        series: expansion.series(),
        category,
        no,
        fancy_no,
        rarity,
        mask,
        effect: attributes.parse(AttributeCode::FOIL_EFFECT)?,
        declared_issue,
        issue: declared_issue,
        tags: attributes.texts(AttributeCode::ITEM_TAGS).to_vec(),
        region: attributes
            .non_empty_text(AttributeCode::REGION_CODE)
            .map(str::to_string),
        asset_path: attributes
            .text(AttributeCode::ASSET_PATH)
            .map(str::to_string),
        full_art: attributes.is_true(AttributeCode::IS_FULL_ART),
        kind,
        card_code: attributes.text(AttributeCode::CARD_CODE).map(str::to_string),
        in_decks: !attributes.texts(AttributeCode::CONTAINED_IN_DECKS).is_empty(),
        has_alternate_print: attributes.is_true(AttributeCode::HAS_ALTERNATE_PRINT),
    };
    correct_issue(&mut facts, attributes, log);

    let rarity = card_rarity(&facts)?;
    let flags = card_flags(&facts, attributes, log);
    let item_type = decide("item type", ITEM_TYPE_RULES, &facts).map_err(ClassifyError::fatal)?;
    if let Some(note) = item_type.note {
        log.record(note);
    }

    let yellow_a = facts.is_yellow_a();
    match &facts.fancy_no {
        Some(fancy) if fancy.ends_with('a') && !yellow_a => {
            return Err(fatal!("-a not parsed as YellowA"));
        }
        None if yellow_a => {
            return Err(fatal!("card lacking FancyCollectionNumber parsed as YellowA"));
        }
        _ => {}
    }

    let card = CardDefinition {
        // Fits: checked against MAX_ITEM_INDEX.
        id: expansion.item(no as u16, item_type.outcome, false),
        name: facts.name,
        cat: category,
        kind,
        no,
        col_no: facts.fancy_no,
        rarity,
        flags,
    };

    let definition = match category {
        ItemCategory::Pokemon => Definition::Pokemon(pokemon_card(attributes, ctx, card)?),
        ItemCategory::Trainer => {
            Definition::Trainer(trainer_card(attributes, ctx, card, expansion.code(), log)?)
        }
        ItemCategory::Energy => {
            Definition::Energy(energy_card(attributes, ctx, card, expansion.code(), log)?)
        }
        other => return Err(fatal!("Category {other} is not a card category")),
    };

    // XYEnergy's holo energies differ from another record only by GUID.
    let true_duplicate =
        expansion.code() == "XYEnergy" && declared_issue == Some(Issue::ParallelHolo);

    Ok(ClassifiedCard {
        definition,
        true_duplicate,
    })
}

fn collection_number(attributes: &AttributeMap, expansion: &str) -> Result<u32> {
    let raw = attributes
        .int(AttributeCode::COLLECTION_NUMBER)
        .ok_or_else(|| fatal!("Card is missing its collection number"))?;
    let mut no = u32::try_from(raw).map_err(|_| fatal!("Negative collection number {raw}"))?;
    if expansion == GENERATIONS && no > 100 {
        no -= RADIANT_COLLECTION_OFFSET;
    }
    if no > MAX_ITEM_INDEX {
        return Err(fatal!("Collection number {no} does not fit an item index"));
    }
    Ok(no)
}

fn fancy_number(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    no: u32,
) -> Result<Option<String>> {
    let Some(raw) = attributes.non_empty_text(AttributeCode::FANCY_COLLECTION_NUMBER) else {
        return Ok(None);
    };
    let mut fancy = if is_key(raw) {
        ctx.translate(raw)
            .ok_or_else(|| fatal!("Unresolved fancy collection number {raw}"))?
            .to_uppercase()
    } else {
        raw.to_string()
    };

    // `14/30`: the part after the slash is the collection size.
    if let Some((numerator, _)) = fancy.split_once('/') {
        if numerator.parse::<u32>().ok() == Some(no) {
            return Ok(None);
        }
        fancy = numerator.to_string();
    }
    Ok(Some(fancy).filter(|fancy| !fancy.is_empty()))
}

/// Holo (un)commons whose original print is another record are `alt`
/// prints labelled `std`. Radiant Collection cards point at records that do
/// not exist, so cards with a fancy number are left alone.
fn correct_issue(facts: &mut CardFacts, attributes: &AttributeMap, log: &mut InconsistencyLog) {
    let guid = attributes.text(AttributeCode::GUID);
    let original = attributes.text(AttributeCode::ORIGINAL_PRINT);
    if facts.issue == Some(Issue::Standard)
        && original != guid
        && facts.mask == Some(FoilMask::Holo)
        && matches!(facts.rarity, RawRarity::Common | RawRarity::Uncommon)
        && facts.fancy_no.is_none()
    {
        log.record(format!(
            "issue=std card {} (#{}) from expansion {} is a Holo (Un)common but its primary print does not refer to itself (should be ’alt’)",
            facts.name, facts.no, facts.expansion
        ));
        facts.issue = Some(Issue::Alternate);
    }
}

fn card_rarity(facts: &CardFacts) -> Result<Rarity> {
    if facts.rarity == RawRarity::RareHolo
        && !facts.has_effect()
        && facts.issue == Some(Issue::Alternate)
    {
        return Ok(Rarity::Rare);
    }
    facts
        .rarity
        .normalized()
        .ok_or_else(|| fatal!("Rarity {} has no catalog rarity", facts.rarity))
}

/// Art style by asset path suffix; the first match wins.
const ART_SUFFIXES: [(&str, CardFlags); 6] = [
    ("ya", CardFlags::YELLOW_A_ART),
    ("a", CardFlags::ALT_ART),
    ("op", CardFlags::OP_ART),
    ("xy", CardFlags::XY_ART),
    ("_silver", CardFlags::SILVER_ART),
    ("_gold", CardFlags::GOLD_ART),
];

fn card_flags(facts: &CardFacts, attributes: &AttributeMap, log: &mut InconsistencyLog) -> CardFlags {
    let mut flags = CardFlags::empty();
    flags.set(CardFlags::FULL_ART, facts.full_art);
    flags.set(CardFlags::PRIME, facts.rarity == RawRarity::RarePrime);
    flags.set(CardFlags::ACE_SPEC, facts.rarity == RawRarity::Ace);

    let league_tag = facts.has_tag(ItemTag::League);
    let league_issue = facts.declared_issue == Some(Issue::League);
    if league_tag || league_issue {
        flags |= CardFlags::LEAGUE;
        if !league_tag {
            log.record(format!(
                "Card {} is issue=\"op\" but does not have tags:League",
                facts.name
            ));
        } else if !league_issue {
            log.record(format!(
                "Card {} has tags:League but is not issue=\"op\"",
                facts.name
            ));
        }
    }

    flags.set(CardFlags::ULTRA_BEAST, facts.has_tag(ItemTag::UltraBeast));
    flags.set(CardFlags::PRISM_STAR, facts.has_tag(ItemTag::PrismStar));
    flags.set(CardFlags::SHINING, facts.rarity == RawRarity::Shining);
    flags.set(CardFlags::TAG_TEAM, facts.has_tag(ItemTag::TagTeam));
    flags.set(CardFlags::SHINY_POKEMON, facts.has_tag(ItemTag::ShinyPokemon));

    if let Some(path) = attributes.text(AttributeCode::ASSET_PATH)
        && let Some((_, art)) = ART_SUFFIXES.iter().find(|(suffix, _)| path.ends_with(suffix))
    {
        flags |= *art;
    }
    flags
}

fn json_attribute<T: DeserializeOwned>(
    attributes: &AttributeMap,
    code: AttributeCode,
) -> Result<Option<T>> {
    attributes
        .json(code)
        .map(|value| {
            serde_json::from_value(value.clone())
                .map_err(|err| fatal!("Attribute {} is malformed: {err}", code.name()))
        })
        .transpose()
}

fn moves(attributes: &AttributeMap, ctx: &ClassifyContext<'_>) -> Result<Option<Moves>> {
    let raw: Option<Vec<RawAbility>> = json_attribute(attributes, AttributeCode::ABILITIES)?;
    raw.map(|raw| parse_moves(&raw, ctx)).transpose()
}

fn pokemon_card(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    card: CardDefinition,
) -> Result<PokemonCard> {
    let family = attributes
        .int(AttributeCode::FAMILY_ID)
        .ok_or_else(|| fatal!("Pokémon {} has no family", card.name))?;
    let preevo = attributes
        .text(AttributeCode::PREVIOUS_EVOLUTION)
        .map(|key| {
            ctx.translate(key)
                .map(|name| strip_html(&name))
                .ok_or_else(|| fatal!("Pre-evolution {key} has no translation"))
        })
        .transpose()?;
    let hp = attributes
        .int(AttributeCode::HP)
        .ok_or_else(|| fatal!("Pokémon {} has no HP", card.name))?;

    let mut weaknesses = Vec::new();
    for name in attributes.texts(AttributeCode::WEAKNESSES) {
        weaknesses.extend(pokemon_type(name)?);
    }
    let weakness_amount = if weaknesses.is_empty() {
        None
    } else {
        let amount = attributes
            .int(AttributeCode::WEAKNESS_AMOUNT)
            .ok_or_else(|| fatal!("Pokémon {} has weaknesses but no weakness amount", card.name))?;
        (amount != 2).then_some(amount)
    };

    let resistance = match attributes.text(AttributeCode::RESISTANCE) {
        Some(name) => pokemon_type(name)?,
        None => None,
    };
    let resist = match resistance {
        Some(_) => Some(
            -attributes
                .int(AttributeCode::RESISTANCE_AMOUNT)
                .ok_or_else(|| fatal!("Pokémon {} has a resistance but no amount", card.name))?,
        ),
        None => None,
    };

    let Moves {
        mut attacks,
        abilities,
    } = moves(attributes, ctx)?.unwrap_or_default();
    // Cheaper attacks first; stable for equal costs.
    attacks.sort_by_key(|attack| attack.cost.len());

    let (weakness, weaknesses) = match weaknesses.len() {
        0 => (None, None),
        1 => (weaknesses.first().copied(), None),
        _ => (None, Some(weaknesses)),
    };

    Ok(PokemonCard {
        card,
        family,
        preevo,
        hp,
        weakness,
        weaknesses,
        weakness_amount,
        resistance,
        resist,
        retreat: attributes
            .int(AttributeCode::RETREAT_COST)
            .filter(|retreat| *retreat != 0),
        abilities,
        attacks,
    })
}

fn rules_text(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    card: &CardDefinition,
    expansion: &str,
    log: &mut InconsistencyLog,
) -> Option<String> {
    let key = attributes.text(AttributeCode::GAME_TEXT)?;
    match ctx.translate(key) {
        // Spirit Links wrap "EX" in <i>.
        Some(text) => Some(strip_html(&text)),
        None => {
            log.record(format!(
                "Card {} (#{}) from expansion {expansion} has missing rules text",
                card.name, card.no
            ));
            None
        }
    }
}

fn trainer_card(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    card: CardDefinition,
    expansion: &str,
    log: &mut InconsistencyLog,
) -> Result<TrainerCard> {
    let text = rules_text(attributes, ctx, &card, expansion, log);
    let Moves { attacks, abilities } = moves(attributes, ctx)?.unwrap_or_default();
    if !abilities.is_empty() {
        return Err(fatal!("Trainer card {} defined with an ability", card.name));
    }
    Ok(TrainerCard {
        card,
        text,
        attacks,
    })
}

fn energy_card(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    card: CardDefinition,
    expansion: &str,
    log: &mut InconsistencyLog,
) -> Result<EnergyCard> {
    let text = rules_text(attributes, ctx, &card, expansion, log);
    let provided: RawEnergyProvided = json_attribute(attributes, AttributeCode::ENERGY_PROVIDED)?
        .ok_or_else(|| fatal!("Energy card {} provides no energy", card.name))?;
    let mut energy = Vec::new();
    for name in &provided.options {
        let provided_type =
            pokemon_type(name)?.ok_or_else(|| fatal!("Energy card {} provides NoColor", card.name))?;
        energy.push(provided_type);
    }
    Ok(EnergyCard { card, text, energy })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_facts() -> KindFacts {
        KindFacts {
            stage: Some(RawPokemonStage::Basic),
            trainer: None,
            energy: false,
            special_energy: false,
            legend: false,
            ex: false,
            gx: false,
            tags: Vec::new(),
        }
    }

    #[test]
    fn pokemon_kind_priority() {
        let mut facts = kind_facts();
        assert_eq!(card_kind(&facts).unwrap(), CardKind::Basic);

        facts.gx = true;
        assert_eq!(card_kind(&facts).unwrap(), CardKind::BasicGx);

        facts.tags = vec!["TAG".into()];
        assert_eq!(card_kind(&facts).unwrap(), CardKind::TagTeam);

        facts.tags = vec!["V".into()];
        assert_eq!(card_kind(&facts).unwrap(), CardKind::V);

        facts.stage = Some(RawPokemonStage::Stage1);
        facts.ex = true;
        assert_eq!(card_kind(&facts).unwrap(), CardKind::Mega);

        facts.legend = true;
        assert_eq!(card_kind(&facts).unwrap(), CardKind::Legend);
    }

    #[test]
    fn unmatched_kinds_are_fatal() {
        let mut facts = kind_facts();
        facts.stage = Some(RawPokemonStage::LevelUp);
        assert_eq!(card_kind(&facts).unwrap_err().to_string(), "Unknown Pokemon CardKind");

        facts.gx = true;
        assert_eq!(
            card_kind(&facts).unwrap_err().to_string(),
            "GXAbilities specified but could not determine CardKind"
        );

        let mut trainer = kind_facts();
        trainer.stage = None;
        trainer.trainer = Some(RawTrainerType::TechnicalMachine);
        assert_eq!(card_kind(&trainer).unwrap_err().to_string(), "Unknown trainerType");

        trainer.trainer = None;
        assert_eq!(
            card_kind(&trainer).unwrap_err().to_string(),
            "Could not determine card type"
        );
    }

    fn card_facts() -> CardFacts {
        CardFacts {
            name: "Pikachu".to_string(),
            expansion: "UNB".to_string(),
            series: ExpansionSeries::Sm.code(),
            category: ItemCategory::Pokemon,
            no: 1,
            fancy_no: None,
            rarity: RawRarity::Common,
            mask: None,
            effect: None,
            declared_issue: Some(Issue::Standard),
            issue: Some(Issue::Standard),
            tags: Vec::new(),
            region: None,
            asset_path: None,
            full_art: false,
            kind: CardKind::Basic,
            card_code: None,
            in_decks: false,
            has_alternate_print: false,
        }
    }

    #[test]
    fn item_type_table() {
        let mut facts = card_facts();
        let plain = decide("item type", ITEM_TYPE_RULES, &facts).unwrap();
        assert_eq!((plain.rule, plain.outcome), ("card", ItemType::Card));

        facts.mask = Some(FoilMask::Reverse);
        let reverse = decide("item type", ITEM_TYPE_RULES, &facts).unwrap();
        assert_eq!(reverse.outcome, ItemType::ReverseCard);
        assert_eq!(
            reverse.note.as_deref(),
            Some("Card Pikachu (#1) from expansion UNB has FoilMask=Reverse but its issue is ’std’ instead of ’ph’")
        );

        facts.region = Some("FR".to_string());
        assert_eq!(
            decide("item type", ITEM_TYPE_RULES, &facts).unwrap().outcome,
            ItemType::LanguageFr
        );
        facts.region = Some("JP".to_string());
        assert_eq!(
            decide("item type", ITEM_TYPE_RULES, &facts).map(|decision| decision.outcome),
            Err("Unknown region code".to_string())
        );
    }

    #[test]
    fn tools_and_energy() {
        let mut facts = kind_facts();
        facts.stage = None;
        facts.trainer = Some(RawTrainerType::PokemonToolF);
        assert_eq!(card_kind(&facts).unwrap(), CardKind::PokemonTool);

        facts.trainer = None;
        facts.energy = true;
        assert_eq!(card_kind(&facts).unwrap(), CardKind::BasicEnergy);
        facts.special_energy = true;
        assert_eq!(card_kind(&facts).unwrap(), CardKind::SpecialEnergy);
    }
}
