//! Expansion registry, economy and slug behaviour.

use dex_model::price_index::{currency_items, expansion_price_indexes, price_index_name};
use dex_model::slug::{item_from_slug, slugify, slugify_price_index};
use dex_model::{
    CardDefinition, CardFlags, CardKind, Definition, EnergyCard, ExpansionDefinition,
    ExpansionFlags, ExpansionRegistry, ExpansionSeries, Formats, ItemCategory, ItemId, ItemType,
    PokemonType, ProductDefinition, Rarity, ReleaseMap,
};

fn definition(code: &str, series: ExpansionSeries, flags: ExpansionFlags) -> ExpansionDefinition {
    ExpansionDefinition {
        name: format!("{code} name"),
        code: code.to_string(),
        key: Some(format!("{code}_key")),
        series,
        formats: Formats::EXPANDED | Formats::LEGACY,
        cards: 10,
        secret: 0,
        legal: 0,
        flags,
        holes: None,
    }
}

fn registry() -> ExpansionRegistry {
    ExpansionRegistry::new(vec![
        definition("UNB", ExpansionSeries::Sm, ExpansionFlags::empty()),
        definition("HIF", ExpansionSeries::Sm, ExpansionFlags::MINOR),
        definition("PR-SM", ExpansionSeries::Sm, ExpansionFlags::PROMO),
        definition(
            "XYEnergy",
            ExpansionSeries::Xy,
            ExpansionFlags::ENERGY | ExpansionFlags::INDEX_ENERGY | ExpansionFlags::INDEX_RARE,
        ),
        definition("KSS", ExpansionSeries::Xy, ExpansionFlags::empty()),
    ])
}

#[test]
fn lookups_by_code_and_id_agree() {
    let registry = registry();
    let unb = registry.by_code("unb");
    assert!(unb.is_valid());
    assert_eq!(unb.code(), "UNB");
    assert_eq!((unb.series(), unb.id()), (10, 13));

    let resolved = registry.resolve(10, 13);
    assert_eq!(resolved.code(), "UNB");

    let unknown = registry.resolve(10, 14);
    assert!(!unknown.is_valid());
    assert_eq!(unknown.code(), "");
}

#[test]
fn booster_availability() {
    let registry = registry();
    assert!(registry.by_code("UNB").has_boosters());
    assert!(!registry.by_code("PR-SM").has_boosters());
    assert!(!registry.by_code("KSS").has_boosters());

    let major = registry.by_code("UNB").booster();
    assert_eq!(major.item_kind(), Some(ItemType::BoosterPack));
    assert_eq!(major.index(), 1);
    assert_eq!(registry.by_code("HIF").booster().index(), 2);

    // UNB, HIF, XYEnergy boosters plus the chest and the Pikachu box.
    assert_eq!(currency_items(&registry).len(), 5);
}

#[test]
fn old_sm_promos_are_expanded_only() {
    let registry = registry();
    let promo = registry.by_code("PR-SM");
    assert_eq!(promo.item(93, ItemType::Card, false).formats(&registry), Formats::EXPANDED);
    assert_eq!(
        promo.item(94, ItemType::Card, false).formats(&registry),
        Formats::EXPANDED | Formats::LEGACY
    );
}

#[test]
fn release_map_comes_from_keys() {
    let map = ReleaseMap::from_registry(&registry());
    assert_eq!(map.code_for("UNB_key"), Some("UNB"));
    assert_eq!(map.code_for("missing"), None);
    assert_eq!(map.len(), 5);
}

#[test]
fn price_indexes_follow_index_flags() {
    let registry = registry();
    let energy = registry.by_code("XYEnergy");
    let indexes = expansion_price_indexes(&energy);
    // Rare gets card, reverse and holo; energy gets card and reverse.
    assert_eq!(indexes.len(), 5);
    assert!(indexes.iter().all(|id| id.is_price_index()));

    let names: Vec<String> = indexes.iter().filter_map(|id| price_index_name(*id)).collect();
    assert_eq!(names, ["Rare", "Reverse Rare", "Holo Rare", "Energy", "Reverse Energy"]);
}

#[test]
fn price_index_slugs_round_trip() {
    let registry = registry();
    let unb = registry.by_code("UNB");
    let id = unb.item(5, ItemType::ReverseCard, true);
    let slug = slugify_price_index(id).unwrap();
    assert_eq!(slug, "Typical-Reverse-Uncommon-Trainer");
    assert_eq!(item_from_slug(&format!("UNB/{slug}"), &registry), Some(id));
    assert_eq!(
        item_from_slug("UNB/Typical-Common-Pokemon", &registry),
        Some(unb.item(1, ItemType::Card, true))
    );
}

#[test]
fn card_and_pack_slugs() {
    let registry = registry();
    let energy = registry.by_code("XYEnergy");
    let id = energy.item(9, ItemType::Card, false);
    let water = Definition::Energy(EnergyCard {
        card: CardDefinition {
            id,
            name: "Water Energy".into(),
            cat: ItemCategory::Energy,
            kind: CardKind::BasicEnergy,
            no: 9,
            col_no: None,
            rarity: Rarity::Common,
            flags: CardFlags::empty(),
        },
        text: None,
        energy: vec![PokemonType::Water],
    });
    assert_eq!(slugify(id, Some(&water), &registry).as_deref(), Some("Water-Energy-9"));
    assert_eq!(item_from_slug("XYEnergy/Water-Energy-9", &registry), Some(id));
    // Definition for a different id.
    assert_eq!(slugify(energy.item(8, ItemType::Card, false), Some(&water), &registry), None);

    let pack_id = registry.by_code("UNB").booster();
    let pack = Definition::Product(ProductDefinition {
        asset: None,
        id: pack_id,
        name: "Unbroken Bonds Booster".into(),
        cat: ItemCategory::Booster,
        cards: Some(10),
        description: None,
    });
    assert_eq!(slugify(pack_id, Some(&pack), &registry).as_deref(), Some("Booster-Pack"));
    assert_eq!(item_from_slug("unb/booster-pack", &registry), Some(pack_id));
    assert_eq!(item_from_slug("PR-SM/Booster-Pack", &registry), None);
}

#[test]
fn suffixed_slugs_select_item_type() {
    let registry = registry();
    let parsed = item_from_slug("UNB/Pikachu-72a", &registry).unwrap();
    assert_eq!(parsed.item_kind(), Some(ItemType::YellowAlternate));
    assert_eq!(parsed.index(), 72);
    assert_eq!(item_from_slug("UNB/Pikachu", &registry), None);
    assert_eq!(item_from_slug("NOPE/Pikachu-1", &registry), None);
    assert_eq!(ItemId::from_value(parsed.value()), parsed);
}

#[test]
fn definitions_serialize_id_first() {
    let registry = registry();
    let product = Definition::Product(ProductDefinition {
        asset: Some("LightningDeckBox".into()),
        id: registry.resolve(63, 0).item(0, ItemType::Gameplay, false),
        name: "Lightning Deck Box".into(),
        cat: ItemCategory::DeckBox,
        cards: None,
        description: Some("A deck box.".into()),
    });
    insta::assert_json_snapshot!(product, @r#"
    {
      "id": 2113986560,
      "asset": "LightningDeckBox",
      "name": "Lightning Deck Box",
      "cat": 13,
      "description": "A deck box."
    }
    "#);
}
