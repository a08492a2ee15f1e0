//! Classification of whole attribute records.

use std::collections::BTreeMap;

use dex_core::{
    BuiltItem, Classified, ClassifyContext, ClassifyError, InconsistencyLog, SkipReason, classify,
};
use dex_model::{
    AttributeCode, AttributeMap, CardFlags, Definition, ExpansionDefinition, ExpansionFlags,
    ExpansionRegistry, ExpansionSeries, Formats, ItemCategory, ItemType, Rarity, ReleaseMap,
};
use serde_json::{Value, json};

fn expansion(code: &str, series: ExpansionSeries) -> ExpansionDefinition {
    ExpansionDefinition {
        name: format!("{code} name"),
        code: code.to_string(),
        key: Some(format!("{code}_key")),
        series,
        formats: Formats::EXPANDED,
        cards: 0,
        secret: 0,
        legal: 0,
        flags: ExpansionFlags::empty(),
        holes: None,
    }
}

struct Fixture {
    registry: ExpansionRegistry,
    releases: ReleaseMap,
    strings: BTreeMap<String, String>,
}

impl Fixture {
    fn new() -> Self {
        let registry = ExpansionRegistry::new(vec![
            expansion("UNB", ExpansionSeries::Sm),
            expansion("GEN", ExpansionSeries::Xy),
            expansion("XYEnergy", ExpansionSeries::Xy),
            expansion("BLW", ExpansionSeries::Bw),
        ]);
        let releases = ReleaseMap::from_registry(&registry);
        let strings = [
            ("card.pikachu", "Pikachu"),
            ("card.potion", "<b>Potion</b>"),
            ("card.water", "Water Energy"),
            ("card.fairy", "Fairy Energy"),
            ("attack.thundershock", "Thunder Shock"),
            ("attack.thundershock.text", "Flip a coin."),
            ("potion.text", "Heal 30 damage."),
            ("broken.text", "Heal $$$30$$$ damage."),
            ("fancy.rc", "rc5"),
            ("product.deckbox", "Lightning Deck Box"),
            ("product.booster", "Unbroken Bonds Booster"),
        ]
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();
        Self {
            registry,
            releases,
            strings,
        }
    }

    fn run(&self, attributes: &AttributeMap) -> (Result<Classified, ClassifyError>, InconsistencyLog) {
        let ctx = ClassifyContext::new(&self.registry, &self.releases, &self.strings);
        let mut log = InconsistencyLog::new();
        let result = classify(attributes, &ctx, &mut log);
        (result, log)
    }

    fn build(&self, attributes: &AttributeMap) -> (BuiltItem, InconsistencyLog) {
        let (result, log) = self.run(attributes);
        match result.unwrap() {
            Classified::Built(item) => (*item, log),
            Classified::Skipped(reason) => panic!("unexpectedly skipped: {reason}"),
        }
    }

    fn fail(&self, attributes: &AttributeMap) -> ClassifyError {
        self.run(attributes).0.unwrap_err()
    }
}

fn record(fields: &[(AttributeCode, Value)]) -> AttributeMap {
    let object = fields
        .iter()
        .map(|(code, value)| (code.0.to_string(), value.clone()))
        .collect();
    AttributeMap::from_json(Value::Object(object)).unwrap()
}

/// A plain UNB item card; `extra` overrides or adds fields.
fn potion(extra: &[(AttributeCode, Value)]) -> AttributeMap {
    let mut fields: BTreeMap<AttributeCode, Value> = [
        (AttributeCode::GUID, json!("potion-guid")),
        (AttributeCode::NAME, json!("$$$card.potion$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::CARD_TYPE, json!("TrainerCard")),
        (AttributeCode::TRAINER_TYPE, json!("Item")),
        (AttributeCode::RARITY, json!("Uncommon")),
        (AttributeCode::ASSET_CLASS, json!("std")),
        (AttributeCode::ORIGINAL_PRINT, json!("potion-guid")),
        (AttributeCode::COLLECTION_NUMBER, json!(5)),
        (AttributeCode::GAME_TEXT, json!("$$$potion.text$$$")),
    ]
    .into_iter()
    .collect();
    fields.extend(extra.iter().cloned());
    record(&fields.into_iter().collect::<Vec<_>>())
}

fn card(definition: &Definition) -> &dex_model::CardDefinition {
    definition.card().unwrap()
}

fn messages(log: &InconsistencyLog) -> Vec<&str> {
    log.entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect()
}

#[test]
fn pokemon_definition() {
    let fixture = Fixture::new();
    let pikachu = record(&[
        (AttributeCode::GUID, json!("pikachu-guid")),
        (AttributeCode::NAME, json!("$$$card.pikachu$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::CARD_TYPE, json!("Pokemon")),
        (AttributeCode::POKEMON_STAGE, json!("Basic")),
        (AttributeCode::RARITY, json!("Common")),
        (AttributeCode::FOIL_MASK, json!("None")),
        (AttributeCode::ASSET_CLASS, json!("std")),
        (AttributeCode::ORIGINAL_PRINT, json!("pikachu-guid")),
        (AttributeCode::COLLECTION_NUMBER, json!(20)),
        (AttributeCode::FAMILY_ID, json!(25)),
        (AttributeCode::HP, json!(60)),
        (AttributeCode::WEAKNESSES, json!(["Fighting"])),
        (AttributeCode::WEAKNESS_AMOUNT, json!(2)),
        (AttributeCode::RETREAT_COST, json!(1)),
        (
            AttributeCode::ABILITIES,
            json!([{
                "title": "$$$attack.thundershock$$$",
                "gameText": "$$$attack.thundershock.text$$$",
                "abilityType": "Attack",
                "damage": 20,
                "cost": {"Colorless": 1, "Lightning": 1},
            }]),
        ),
    ]);

    let (item, log) = fixture.build(&pikachu);
    assert!(log.is_empty());
    assert_eq!(item.guid.as_deref(), Some("pikachu-guid"));
    assert!(!item.true_duplicate);
    insta::assert_json_snapshot!(item.definition, @r#"
    {
      "id": 342360084,
      "name": "Pikachu",
      "cat": 1,
      "kind": 1,
      "no": 20,
      "rarity": 1,
      "family": 25,
      "hp": 60,
      "weakness": 7,
      "retreat": 1,
      "attacks": [
        {
          "name": "Thunder Shock",
          "text": "Flip a coin.",
          "damage": 20,
          "cost": [
            5,
            1
          ]
        }
      ]
    }
    "#);
}

#[test]
fn classification_is_deterministic() {
    let fixture = Fixture::new();
    let attributes = potion(&[(AttributeCode::FOIL_MASK, json!("Reverse"))]);
    let (first, _) = fixture.build(&attributes);
    let (second, _) = fixture.build(&attributes);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.definition).unwrap(),
        serde_json::to_string(&second.definition).unwrap()
    );
}

#[test]
fn alternate_rare_holo_without_effect_is_a_plain_rare() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[
        (AttributeCode::RARITY, json!("RareHolo")),
        (AttributeCode::ASSET_CLASS, json!("alt")),
        (AttributeCode::COLLECTION_NUMBER, json!(150)),
    ]));
    let card = card(&item.definition);
    assert_eq!(card.id.item_kind(), Some(ItemType::Card));
    assert_eq!(card.rarity, Rarity::Rare);
    assert!(log.is_empty());
}

#[test]
fn alternate_with_effect_uses_its_slot() {
    let fixture = Fixture::new();
    let (item, _) = fixture.build(&potion(&[
        (AttributeCode::RARITY, json!("RareHolo")),
        (AttributeCode::ASSET_CLASS, json!("alt")),
        (AttributeCode::FOIL_EFFECT, json!("Cracked_Ice")),
    ]));
    let card = card(&item.definition);
    assert_eq!(card.id.item_kind(), Some(ItemType::AltCrackedIce));
    assert_eq!(card.rarity, Rarity::HoloRare);

    let err = fixture.fail(&potion(&[
        (AttributeCode::ASSET_CLASS, json!("alt")),
        (AttributeCode::FOIL_EFFECT, json!("Galaxy")),
    ]));
    assert_eq!(
        err.to_string(),
        "issue=alt card has no item type for its foil effect and rarity"
    );
}

#[test]
fn yellow_a_b_print() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[
        (AttributeCode::ITEM_TAGS, json!(["YellowA"])),
        (AttributeCode::ASSET_CLASS, json!("yaa")),
        (AttributeCode::COLLECTION_NUMBER, json!(72)),
        (AttributeCode::FANCY_COLLECTION_NUMBER, json!("72b")),
    ]));
    let card = card(&item.definition);
    assert_eq!(card.id.item_kind(), Some(ItemType::YellowAlternateB));
    assert_eq!(card.col_no.as_deref(), Some("72b"));
    assert!(log.is_empty());
}

#[test]
fn yellow_a_without_tag_is_logged() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[
        (AttributeCode::ASSET_CLASS, json!("yaa")),
        (AttributeCode::COLLECTION_NUMBER, json!(72)),
        (AttributeCode::FANCY_COLLECTION_NUMBER, json!("72a")),
    ]));
    assert_eq!(card(&item.definition).id.item_kind(), Some(ItemType::YellowAlternate));
    assert_eq!(
        messages(&log),
        ["issue=yaa card Potion (#72) from expansion UNB lacks tags:YellowA"]
    );
}

#[test]
fn a_suffix_requires_yellow_a() {
    let fixture = Fixture::new();
    let err = fixture.fail(&potion(&[(
        AttributeCode::FANCY_COLLECTION_NUMBER,
        json!("5a"),
    )]));
    assert_eq!(err.to_string(), "-a not parsed as YellowA");
    assert!(err.context()["attributes"].is_object());
}

#[test]
fn reverse_mask_outside_ph_is_logged() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[(AttributeCode::FOIL_MASK, json!("Reverse"))]));
    assert_eq!(card(&item.definition).id.item_kind(), Some(ItemType::ReverseCard));
    assert_eq!(
        messages(&log),
        ["Card Potion (#5) from expansion UNB has FoilMask=Reverse but its issue is ’std’ instead of ’ph’"]
    );
}

#[test]
fn holo_uncommon_pointing_elsewhere_becomes_alternate() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[
        (AttributeCode::FOIL_MASK, json!("Holo")),
        (AttributeCode::FOIL_EFFECT, json!("Cosmos")),
        (AttributeCode::ORIGINAL_PRINT, json!("another-guid")),
    ]));
    assert_eq!(card(&item.definition).id.item_kind(), Some(ItemType::AltCosmos));
    assert_eq!(log.len(), 1);
    assert!(log.entries()[0].message.starts_with("issue=std card Potion (#5)"));
}

#[test]
fn generations_radiant_collection_offset() {
    let fixture = Fixture::new();
    let (item, _) = fixture.build(&potion(&[
        (AttributeCode::RELEASE_CODE, json!("GEN_key")),
        (AttributeCode::COLLECTION_NUMBER, json!(122)),
        (AttributeCode::FANCY_COLLECTION_NUMBER, json!("$$$fancy.rc$$$")),
    ]));
    let card = card(&item.definition);
    assert_eq!(card.no, 105);
    assert_eq!(card.col_no.as_deref(), Some("RC5"));
    assert_eq!(card.id.index(), 105);
}

#[test]
fn slashed_fancy_numbers_keep_the_numerator() {
    let fixture = Fixture::new();
    let (same, _) = fixture.build(&potion(&[
        (AttributeCode::COLLECTION_NUMBER, json!(14)),
        (AttributeCode::FANCY_COLLECTION_NUMBER, json!("14/30")),
    ]));
    assert_eq!(card(&same.definition).col_no, None);

    let (differs, _) = fixture.build(&potion(&[
        (AttributeCode::COLLECTION_NUMBER, json!(14)),
        (AttributeCode::FANCY_COLLECTION_NUMBER, json!("SM14/30")),
    ]));
    assert_eq!(card(&differs.definition).col_no.as_deref(), Some("SM14"));
}

#[test]
fn league_alternate_energy() {
    let fixture = Fixture::new();
    let energy = record(&[
        (AttributeCode::GUID, json!("water-guid")),
        (AttributeCode::NAME, json!("$$$card.water$$$")),
        (AttributeCode::RELEASE_CODE, json!("BLW_key")),
        (AttributeCode::CARD_TYPE, json!("Energy")),
        (AttributeCode::ENERGY_PROVIDED, json!({"options": ["Water"]})),
        (AttributeCode::ITEM_TAGS, json!(["League"])),
        (AttributeCode::ASSET_CLASS, json!("op")),
        (AttributeCode::FOIL_EFFECT, json!("Rainbow")),
        (AttributeCode::FOIL_MASK, json!("Thatch")),
        (AttributeCode::RARITY, json!("Common")),
        (AttributeCode::COLLECTION_NUMBER, json!(105)),
    ]);
    let (item, log) = fixture.build(&energy);
    let card = card(&item.definition);
    assert_eq!(card.id.item_kind(), Some(ItemType::LeagueAlternate));
    assert!(card.flags.contains(CardFlags::LEAGUE));
    assert!(log.is_empty());
}

#[test]
fn league_markers_must_agree() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[(AttributeCode::ITEM_TAGS, json!(["League"]))]));
    assert_eq!(card(&item.definition).id.item_kind(), Some(ItemType::League));
    assert_eq!(
        messages(&log),
        ["Card Potion has tags:League but is not issue=\"op\""]
    );
}

#[test]
fn xy_energy_parallel_holo_is_a_true_duplicate() {
    let fixture = Fixture::new();
    let fairy = record(&[
        (AttributeCode::GUID, json!("fairy-guid-2")),
        (AttributeCode::NAME, json!("$$$card.fairy$$$")),
        (AttributeCode::RELEASE_CODE, json!("XYEnergy_key")),
        (AttributeCode::CARD_TYPE, json!("Energy")),
        (AttributeCode::ENERGY_PROVIDED, json!({"options": ["Fairy"]})),
        (AttributeCode::ASSET_CLASS, json!("ph")),
        (AttributeCode::FOIL_MASK, json!("Holo")),
        (AttributeCode::RARITY, json!("Common")),
        (AttributeCode::COLLECTION_NUMBER, json!(9)),
    ]);
    let (item, _) = fixture.build(&fairy);
    assert!(item.true_duplicate);
    assert_eq!(card(&item.definition).id.item_kind(), Some(ItemType::HoloCard));
}

#[test]
fn markup_is_stripped_and_placeholders_are_fatal() {
    let fixture = Fixture::new();
    let (item, _) = fixture.build(&potion(&[]));
    assert_eq!(item.definition.name(), "Potion");

    let err = fixture.fail(&potion(&[(AttributeCode::GAME_TEXT, json!("$$$broken.text$$$"))]));
    assert_eq!(err.to_string(), "Item definition includes unresolved translation");
    assert_eq!(err.context()["definition"]["name"], "Potion");
}

#[test]
fn missing_rules_text_is_logged() {
    let fixture = Fixture::new();
    let (item, log) = fixture.build(&potion(&[(AttributeCode::GAME_TEXT, json!("$$$nothing$$$"))]));
    let Definition::Trainer(trainer) = &item.definition else {
        panic!("expected a trainer");
    };
    assert_eq!(trainer.text, None);
    assert_eq!(
        messages(&log),
        ["Card Potion (#5) from expansion UNB has missing rules text"]
    );
}

#[test]
fn products_with_cards_must_be_boosters() {
    let fixture = Fixture::new();
    let deck_box = record(&[
        (AttributeCode::NAME, json!("$$$product.deckbox$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::PRODUCT_TYPE, json!("DeckBox")),
        (AttributeCode::ASSET_CLASS, json!("UNBDeckBox")),
        (AttributeCode::NUMBER_OF_CARDS_IN_BOOSTER, json!(10)),
    ]);
    let err = fixture.fail(&deck_box);
    assert_eq!(
        err.to_string(),
        "NumberOfCardsInBooster defined for non-booster category DeckBox"
    );
    assert_eq!(err.context()["attributes"]["10540"], "DeckBox");
}

#[test]
fn booster_packs_take_the_pack_slot() {
    let fixture = Fixture::new();
    let booster = record(&[
        (AttributeCode::NAME, json!("$$$product.booster$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::PRODUCT_TYPE, json!("Packs")),
        (AttributeCode::ASSET_CLASS, json!("UNBBooster")),
        (AttributeCode::NUMBER_OF_CARDS_IN_BOOSTER, json!(10)),
        (AttributeCode::PRODUCT_DESCRIPTION, json!("$$$product.booster.text$$$")),
    ]);
    let (item, log) = fixture.build(&booster);
    let product = item.definition.product().unwrap();
    assert_eq!(product.id, fixture.registry.by_code("UNB").booster());
    assert_eq!(product.cat, ItemCategory::Booster);
    assert_eq!(product.asset, None);
    assert_eq!(product.cards, Some(10));
    assert_eq!(
        messages(&log),
        ["Product Unbroken Bonds Booster (#) from expansion UNB has missing description text"]
    );
}

#[test]
fn gameplay_products_are_keyed_by_asset() {
    let fixture = Fixture::new();
    let deck_box = record(&[
        (AttributeCode::NAME, json!("$$$product.deckbox$$$")),
        (AttributeCode::PRODUCT_TYPE, json!("DeckBox")),
        (AttributeCode::ASSET_CLASS, json!("LightningDeckBox")),
    ]);
    let (item, log) = fixture.build(&deck_box);
    insta::assert_json_snapshot!(item.definition, @r#"
    {
      "id": 2113986560,
      "asset": "LightningDeckBox",
      "name": "Lightning Deck Box",
      "cat": 13
    }
    "#);
    assert!(log.is_empty());

    let unnamed = record(&[
        (AttributeCode::NAME, json!("$$$product.missing$$$")),
        (AttributeCode::PRODUCT_TYPE, json!("Sleeve")),
        (AttributeCode::ASSET_CLASS, json!("PikachuSleeve")),
    ]);
    let (item, log) = fixture.build(&unnamed);
    assert_eq!(item.definition.name(), "PikachuSleeve");
    assert_eq!(log.len(), 1);
}

#[test]
fn skipped_records() {
    let fixture = Fixture::new();
    let cases = [
        (
            potion(&[(AttributeCode::VALID_FOR_TRADE, json!(false))]),
            SkipReason::NotTradable,
        ),
        (
            potion(&[(AttributeCode::NAME, json!("Potion"))]),
            SkipReason::UnlocalizedName,
        ),
        (
            potion(&[(AttributeCode::PRODUCT_TYPE, json!("Currency"))]),
            SkipReason::InternalProductType,
        ),
    ];
    for (attributes, reason) in cases {
        let (result, log) = fixture.run(&attributes);
        assert_eq!(result.unwrap(), Classified::Skipped(reason));
        assert!(log.is_empty());
    }
}

#[test]
fn unknown_enum_names_are_errors() {
    let fixture = Fixture::new();
    let err = fixture.fail(&potion(&[(AttributeCode::RARITY, json!("Mythic"))]));
    assert!(matches!(err, ClassifyError::Attributes { .. }));
    assert!(err.context()["attributes"].is_object());
}
