//! Schema aggregation: deduplication, statistics and output order.

use dex_catalog::{CatalogItems, ExpansionSchema, GuidMap};
use dex_core::{BuiltItem, InconsistencyLog};
use dex_model::{
    CardDefinition, CardFlags, CardKind, Definition, DefinitionKey, EnergyCard, ExpansionFlags,
    ItemCategory, ItemId, ItemType, PokemonType, ProductDefinition, Rarity, TrainerCard,
};

const SM: u8 = 10;
const UNB: u8 = 13;

fn trainer(no: u32, item_type: ItemType, rarity: Rarity) -> Definition {
    Definition::Trainer(TrainerCard {
        card: CardDefinition {
            id: ItemId::new(SM, UNB, item_type.code(), no as u16),
            name: format!("Trainer {no}"),
            cat: ItemCategory::Trainer,
            kind: CardKind::Item,
            no,
            col_no: None,
            rarity,
            flags: CardFlags::empty(),
        },
        text: None,
        attacks: Vec::new(),
    })
}

fn energy(no: u32) -> Definition {
    Definition::Energy(EnergyCard {
        card: CardDefinition {
            id: ItemId::new(SM, UNB, ItemType::HoloCard.code(), no as u16),
            name: "Fairy Energy".into(),
            cat: ItemCategory::Energy,
            kind: CardKind::BasicEnergy,
            no,
            col_no: None,
            rarity: Rarity::Common,
            flags: CardFlags::empty(),
        },
        text: None,
        energy: vec![PokemonType::Fairy],
    })
}

fn product(asset: &str) -> Definition {
    Definition::Product(ProductDefinition {
        asset: Some(asset.to_string()),
        id: ItemId::new(63, 0, ItemType::Gameplay.code(), 0),
        name: asset.to_string(),
        cat: ItemCategory::DeckBox,
        cards: None,
        description: None,
    })
}

fn booster() -> Definition {
    Definition::Product(ProductDefinition {
        asset: None,
        id: ItemId::new(SM, UNB, ItemType::BoosterPack.code(), 1),
        name: "Booster".into(),
        cat: ItemCategory::Booster,
        cards: Some(10),
        description: None,
    })
}

fn built(definition: Definition, guid: &str) -> BuiltItem {
    BuiltItem {
        definition,
        guid: Some(guid.to_string()),
        true_duplicate: false,
    }
}

struct Sinks {
    log: InconsistencyLog,
    guids: GuidMap,
}

impl Sinks {
    fn new() -> Self {
        Self {
            log: InconsistencyLog::new(),
            guids: GuidMap::new(),
        }
    }

    fn insert(&mut self, schema: &mut ExpansionSchema, item: BuiltItem) -> dex_catalog::Result<()> {
        schema.insert(item, &mut self.log, &mut self.guids)
    }
}

#[test]
fn true_duplicates_keep_one_definition() {
    let mut sinks = Sinks::new();
    let mut schema = ExpansionSchema::new("UNB");
    for guid in ["fairy-1", "fairy-2"] {
        let mut item = built(energy(9), guid);
        item.true_duplicate = true;
        sinks.insert(&mut schema, item).unwrap();
    }

    assert_eq!(schema.cards().count(), 1);
    assert_eq!(sinks.log.len(), 2);
    assert!(
        sinks
            .log
            .entries()
            .iter()
            .all(|entry| entry.message.starts_with("Encountered true duplicate item"))
    );
    assert_eq!(sinks.guids.get("fairy-1"), sinks.guids.get("fairy-2"));
}

#[test]
fn redefinitions_are_fatal() {
    let mut sinks = Sinks::new();
    let mut schema = ExpansionSchema::new("UNB");
    sinks
        .insert(&mut schema, built(trainer(5, ItemType::Card, Rarity::Common), "a"))
        .unwrap();

    let equivalent = sinks
        .insert(&mut schema, built(trainer(5, ItemType::Card, Rarity::Common), "b"))
        .unwrap_err();
    assert_eq!(
        equivalent.to_string(),
        format!(
            "Overriding {} (with new GUID: b) but the generated definition is equivalent",
            ItemId::new(SM, UNB, 0, 5).value()
        )
    );

    let differing = sinks
        .insert(&mut schema, built(trainer(5, ItemType::Card, Rarity::Rare), "c"))
        .unwrap_err();
    assert!(differing.to_string().contains("(New GUID: c)\n"));
    assert!(differing.context().is_some_and(|context| context["old"].is_object()));

    sinks.insert(&mut schema, built(product("DeckBox"), "d")).unwrap();
    assert!(sinks.insert(&mut schema, built(product("DeckBox"), "e")).is_err());
    assert_eq!(schema.len(), 2);
}

#[test]
fn statistics() {
    let mut sinks = Sinks::new();
    let mut schema = ExpansionSchema::new("UNB");
    let mut radiant = trainer(12, ItemType::Card, Rarity::Common);
    if let Definition::Trainer(card) = &mut radiant {
        card.card.col_no = Some("RC1".into());
    }
    let mut shining = trainer(11, ItemType::Card, Rarity::SecretRare);
    if let Definition::Trainer(card) = &mut shining {
        card.card.flags = CardFlags::SHINING;
    }
    let items = [
        trainer(1, ItemType::Card, Rarity::Common),
        trainer(2, ItemType::ReverseCard, Rarity::Uncommon),
        trainer(10, ItemType::Card, Rarity::Rare),
        shining,
        radiant,
        trainer(13, ItemType::Card, Rarity::SecretRare),
        trainer(13, ItemType::AlternateArt, Rarity::SecretRare),
        // Yellow-A prints count toward neither total.
        trainer(20, ItemType::YellowAlternate, Rarity::Common),
        energy(9),
        booster(),
    ];
    for (index, definition) in items.into_iter().enumerate() {
        sinks.insert(&mut schema, built(definition, &format!("g{index}"))).unwrap();
    }

    let stats = schema.stats();
    assert_eq!(stats.cards, 10);
    assert_eq!(stats.secret, 2);
    assert_eq!(stats.max_collection_no, 20);
    assert_eq!(
        stats.flags,
        ExpansionFlags::INDEX_COMMON_TRAINER
            | ExpansionFlags::INDEX_UNCOMMON_TRAINER
            | ExpansionFlags::INDEX_RARE
            | ExpansionFlags::INDEX_ENERGY
    );
    assert_eq!(schema.packs().count(), 1);
}

#[test]
fn serialization_order() {
    let mut sinks = Sinks::new();
    let mut schema = ExpansionSchema::new("UNB");
    for (definition, guid) in [
        (product("ZebraSleeve"), "p1"),
        (trainer(2, ItemType::Card, Rarity::Common), "c1"),
        (product("AlphaCoin"), "p2"),
        (trainer(1, ItemType::ReverseCard, Rarity::Common), "c2"),
        (trainer(1, ItemType::Card, Rarity::Common), "c3"),
        (booster(), "b1"),
    ] {
        sinks.insert(&mut schema, built(definition, guid)).unwrap();
    }

    let json = serde_json::to_string(&schema).unwrap();
    let id = |item_type: ItemType, no: u16| ItemId::new(SM, UNB, item_type.code(), no).value();
    assert!(json.starts_with(r#"{"expansion":"UNB","items":{"#));
    assert_in_order(
        &json,
        &[
            format!("\"{}\":", id(ItemType::Card, 1)),
            format!("\"{}\":", id(ItemType::ReverseCard, 1)),
            format!("\"{}\":", id(ItemType::Card, 2)),
            "\"packs\":".to_string(),
            format!("\"{}\":", id(ItemType::BoosterPack, 1)),
            "\"products\":".to_string(),
            "\"AlphaCoin\":".to_string(),
            "\"ZebraSleeve\":".to_string(),
        ],
    );
}

/// Each needle occurs in `json`, after the previous one.
fn assert_in_order(json: &str, needles: &[String]) {
    let mut from = 0;
    for needle in needles {
        let position = json[from..]
            .find(needle.as_str())
            .unwrap_or_else(|| panic!("{needle} missing or out of order in {json}"));
        from += position + needle.len();
    }
}

#[test]
fn catalog_items_reject_cross_expansion_keys() {
    let mut sinks = Sinks::new();
    let mut first = ExpansionSchema::new("UNB");
    sinks.insert(&mut first, built(product("DeckBox"), "a")).unwrap();
    sinks
        .insert(&mut first, built(trainer(3, ItemType::Card, Rarity::Common), "b"))
        .unwrap();
    let mut second = ExpansionSchema::new("PTCGO");
    sinks.insert(&mut second, built(product("DeckBox"), "c")).unwrap();
    let empty = ExpansionSchema::new("HIF");

    let mut items = CatalogItems::new();
    items.define(&first).unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.get(&DefinitionKey::Asset("DeckBox".into())).is_some());
    assert_eq!(
        items.define(&second).unwrap_err().to_string(),
        "Redefining item DeckBox"
    );
    assert_eq!(
        items.define(&empty).unwrap_err().to_string(),
        "Expansion HIF has no items defined"
    );

    let json = serde_json::to_string(&items).unwrap();
    assert_in_order(
        &json,
        &[
            format!("\"{}\":", ItemId::new(SM, UNB, 0, 3).value()),
            "\"DeckBox\":".to_string(),
        ],
    );
}
