//! A whole item run over a small catalog.

use std::collections::BTreeMap;

use dex_catalog::{CatalogError, RunInput, RunOptions, RunStage, run_items};
use dex_model::{
    AttributeCode, AttributeMap, DefinitionKey, ExpansionDefinition, ExpansionFlags,
    ExpansionSeries, Formats, ItemCategory,
};
use serde_json::{Value, json};

fn expansion(code: &str, series: ExpansionSeries) -> ExpansionDefinition {
    ExpansionDefinition {
        name: format!("{code} name"),
        code: code.to_string(),
        key: Some(format!("{code}_key")),
        series,
        formats: Formats::STANDARD | Formats::EXPANDED,
        cards: 0,
        secret: 0,
        legal: 0,
        flags: ExpansionFlags::empty(),
        holes: None,
    }
}

fn record(fields: &[(AttributeCode, Value)]) -> AttributeMap {
    let object = fields
        .iter()
        .map(|(code, value)| (code.0.to_string(), value.clone()))
        .collect();
    AttributeMap::from_json(Value::Object(object)).unwrap()
}

fn pokemon(guid: &str, no: u32, rarity: &str) -> AttributeMap {
    record(&[
        (AttributeCode::GUID, json!(guid)),
        (AttributeCode::NAME, json!("$$$card.pikachu$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::CARD_TYPE, json!("Pokemon")),
        (AttributeCode::POKEMON_STAGE, json!("Basic")),
        (AttributeCode::RARITY, json!(rarity)),
        (AttributeCode::ASSET_CLASS, json!("std")),
        (AttributeCode::ORIGINAL_PRINT, json!(guid)),
        (AttributeCode::COLLECTION_NUMBER, json!(no)),
        (AttributeCode::FAMILY_ID, json!(25)),
        (AttributeCode::HP, json!(60)),
    ])
}

fn potion(guid: &str, no: u32) -> AttributeMap {
    record(&[
        (AttributeCode::GUID, json!(guid)),
        (AttributeCode::NAME, json!("$$$card.potion$$$")),
        (AttributeCode::RELEASE_CODE, json!("UNB_key")),
        (AttributeCode::CARD_TYPE, json!("TrainerCard")),
        (AttributeCode::TRAINER_TYPE, json!("Item")),
        (AttributeCode::RARITY, json!("Uncommon")),
        (AttributeCode::ASSET_CLASS, json!("std")),
        (AttributeCode::ORIGINAL_PRINT, json!(guid)),
        (AttributeCode::COLLECTION_NUMBER, json!(no)),
    ])
}

fn releases() -> BTreeMap<String, Vec<AttributeMap>> {
    let unb = vec![
        pokemon("pikachu", 1, "Common"),
        potion("potion", 2),
        pokemon("pikachu-secret", 3, "RareSecret"),
        record(&[
            (AttributeCode::GUID, json!("unb-booster")),
            (AttributeCode::NAME, json!("$$$product.booster$$$")),
            (AttributeCode::RELEASE_CODE, json!("UNB_key")),
            (AttributeCode::PRODUCT_TYPE, json!("Packs")),
            (AttributeCode::ASSET_CLASS, json!("UNBBooster")),
            (AttributeCode::NUMBER_OF_CARDS_IN_BOOSTER, json!(10)),
        ]),
        // Not tradable, never defined.
        record(&[
            (AttributeCode::GUID, json!("hidden")),
            (AttributeCode::NAME, json!("$$$card.potion$$$")),
            (AttributeCode::VALID_FOR_TRADE, json!(false)),
        ]),
    ];
    let products = vec![record(&[
        (AttributeCode::GUID, json!("deck-box")),
        (AttributeCode::NAME, json!("$$$product.deckbox$$$")),
        (AttributeCode::RELEASE_CODE, json!("DeckBoxes")),
        (AttributeCode::PRODUCT_TYPE, json!("DeckBox")),
        (AttributeCode::ASSET_CLASS, json!("LightningDeckBox")),
    ])];
    let avatars = vec![record(&[
        (AttributeCode::GUID, json!("pikachu-box")),
        (AttributeCode::ASSET_CLASS, json!("AvatarPikachuPack")),
    ])];
    // Energy releases are neither expansions nor products.
    let energy = vec![record(&[(AttributeCode::NAME, json!("Nothing here"))])];

    BTreeMap::from([
        ("UNB_key".to_string(), unb),
        ("DeckBoxes".to_string(), products),
        ("AvatarItems".to_string(), avatars),
        ("SM_Energy".to_string(), energy),
    ])
}

fn strings() -> BTreeMap<String, String> {
    [
        ("card.pikachu", "Pikachu"),
        ("card.potion", "Potion"),
        ("product.booster", "Unbroken Bonds Booster"),
        ("product.deckbox", "Lightning Deck Box"),
    ]
    .into_iter()
    .map(|(key, text)| (key.to_string(), text.to_string()))
    .collect()
}

fn catalog() -> Vec<ExpansionDefinition> {
    vec![
        expansion("UNB", ExpansionSeries::Sm),
        expansion("HIF", ExpansionSeries::Sm),
    ]
}

#[test]
fn full_run() {
    let releases = releases();
    let strings = strings();
    let mut progress = Vec::new();
    let output = run_items(
        RunInput {
            expansions: catalog(),
            releases: &releases,
            translator: &strings,
        },
        RunOptions::default(),
        |step| progress.push((step.stage, step.release.to_string())),
    )
    .unwrap();

    assert_eq!(
        progress,
        [
            (RunStage::Expansions, "UNB".to_string()),
            (RunStage::Products, "DeckBoxes".to_string()),
            (RunStage::Currency, "AvatarItems".to_string()),
            (RunStage::Currency, "RewardItems".to_string()),
        ]
    );
    assert_eq!(output.missing, ["HIF"]);
    assert_eq!(output.product_releases, ["DeckBoxes"]);

    let unb = &output.expansions[0];
    assert_eq!((unb.cards, unb.secret), (2, 1));
    assert_eq!(unb.key, None);
    assert_eq!(
        unb.flags,
        ExpansionFlags::INDEX_COMMON_POKEMON | ExpansionFlags::INDEX_UNCOMMON_TRAINER
    );
    assert_eq!(output.expansions[1].key, None);

    let messages: Vec<&str> = output
        .log
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Expansion UNB: Collection count 0 => 2",
            "Expansion UNB: Secret count 0 => 1",
        ]
    );

    let summary = &output.summaries[0];
    assert_eq!((summary.cards, summary.packs, summary.skipped), (3, 1, 1));

    let products = output.product_schema.as_ref().unwrap();
    assert_eq!(products.expansion(), "PTCGO");
    assert_eq!(products.products().count(), 1);
    assert_eq!(products.products().next().unwrap().category(), ItemCategory::DeckBox);

    assert_eq!(output.guids.len(), 6);
    assert_eq!(output.guids.productlist(), ["LightningDeckBox"]);
    assert_eq!(output.guids.itemlist().len(), 5);
    assert!(matches!(output.guids.get("pikachu-box"), Some(DefinitionKey::Id(_))));

    // Products of the PTCGO schema stay out of the item set.
    let items = output.items().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(output.all_schemas().count(), 2);
}

#[test]
fn unknown_attributes_fail_strict_runs() {
    let mut releases = releases();
    let mut unknown = potion("unknown", 2).raw().clone();
    unknown["999999"] = json!(true);
    let unb = releases.get_mut("UNB_key").unwrap();
    unb[1] = AttributeMap::from_json(unknown).unwrap();
    let strings = strings();

    let input = || RunInput {
        expansions: catalog(),
        releases: &releases,
        translator: &strings,
    };
    let err = run_items(input(), RunOptions::default(), |_| {}).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownAttributes { .. }));
    assert_eq!(err.to_string(), "Unknown attributes: 999999");

    let lenient = RunOptions::new().with_strict_attributes(false);
    assert!(run_items(input(), lenient, |_| {}).is_ok());
}

#[test]
fn inconsistent_totals_are_fatal() {
    let mut releases = releases();
    // A gap below the highest number: 2 regular + 1 secret, but the max is 5.
    releases
        .get_mut("UNB_key")
        .unwrap()
        .push(pokemon("gap", 5, "RareRainbow"));
    let strings = strings();

    let err = run_items(
        RunInput {
            expansions: catalog(),
            releases: &releases,
            translator: &strings,
        },
        RunOptions::default().with_product_schema(false),
        |_| {},
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expansion UNB total card count is 2 cards + 2 = 4, but in the schema the max collection number is 5"
    );
}

#[test]
fn classification_errors_name_the_expansion() {
    let mut releases = releases();
    releases
        .get_mut("UNB_key")
        .unwrap()
        .push(pokemon("mythic", 4, "Mythic"));
    let strings = strings();

    let err = run_items(
        RunInput {
            expansions: catalog(),
            releases: &releases,
            translator: &strings,
        },
        RunOptions::default(),
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(&err, CatalogError::Classify { expansion, .. } if expansion == "UNB"));
    assert!(err.context().is_some());
}
