//! Argument parsing, decode rendering and a full run against a temporary source directory.

use std::fs;
use std::path::Path;

use clap::{CommandFactory, Parser};
use dex_catalog::RunOptions;
use dex_cli::cli::{Cli, Command, ItemsArgs};
use dex_cli::commands::{Dirs, run_all, run_decode, run_verify};
use dex_cli::decode::{DefinitionView, ItemReport};
use dex_cli::progress::StageProgress;
use dex_model::{
    ExpansionDefinition, ExpansionFlags, ExpansionRegistry, ExpansionSeries, Formats, ItemId,
};
use dex_sources::sha256_hex;
use insta::assert_snapshot;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// UNB #1, a plain card.
const PIKACHU: i32 = 342_360_065;

fn registry() -> ExpansionRegistry {
    ExpansionRegistry::new(vec![ExpansionDefinition {
        name: "Unbroken Bonds".to_string(),
        code: "UNB".to_string(),
        key: None,
        series: ExpansionSeries::Sm,
        formats: Formats::empty(),
        cards: 214,
        secret: 20,
        legal: 0,
        flags: ExpansionFlags::empty(),
        holes: None,
    }])
}

#[test]
fn parses_global_flags_after_the_subcommand() {
    let cli = Cli::try_parse_from(["dex", "decode", "-342362113", "--out", "data"]).unwrap();
    assert_eq!(cli.out.as_deref(), Some(Path::new("data")));
    assert!(cli.sources.is_none());
    let Command::Decode(args) = cli.command else {
        panic!("expected decode");
    };
    assert_eq!(args.itemid, -342_362_113);

    let cli = Cli::try_parse_from(["dex", "--sources", "src", "items", "--no-strict-attributes"])
        .unwrap();
    let Command::Items(args) = cli.command else {
        panic!("expected items");
    };
    let options = RunOptions::from(args);
    assert!(!options.strict_attributes);
    assert!(options.product_schema);

    assert!(Cli::try_parse_from(["dex", "decode", "not-a-number"]).is_err());
}

#[test]
fn every_argument_has_help() {
    let mut command = Cli::command();
    command.build();
    let subcommands: Vec<_> = command.get_subcommands().cloned().collect();
    for cmd in std::iter::once(&command).chain(&subcommands) {
        for arg in cmd.get_arguments() {
            assert!(
                arg.get_help().is_some(),
                "{} --{} has no help",
                cmd.get_name(),
                arg.get_id()
            );
        }
    }
    for id in ["log_level", "log_format"] {
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap();
        for value in arg.get_possible_values() {
            assert!(value.get_help().is_some(), "{id} {} has no help", value.get_name());
        }
    }
}

#[test]
fn decodes_identifier_fields() {
    let registry = registry();
    let pack = ItemReport::new(ItemId::from_value(342_416_385), &registry).unwrap();
    assert_snapshot!(pack.to_string().trim_end(), @r"
    # itemid 342416385
    * Series: SM (seriesId: 10)
    * Expansion: UNB (expansionId: 13)
    * ItemType: BoosterPack (itemType: 55)
    * ItemIndex: MajorPack (itemIndex: 1)
    ");

    let bucket = ItemReport::new(ItemId::from_value(-342_362_113), &registry).unwrap();
    assert_snapshot!(bucket.to_string().trim_end(), @r"
    # itemid -342362113
    * Series: SM (seriesId: 10)
    * Expansion: UNB (expansionId: 13)
    * ItemType: ReverseCard (suffix: p) (itemType: 2)
    * ItemIndex: 1
    * PriceIndex: Reverse Common Pokémon
    ");

    assert!(ItemReport::new(ItemId::from_value(1), &registry).is_none());
}

#[test]
fn decodes_a_pokemon_definition() {
    let registry = registry();
    let schema = serde_json::json!({
        "expansion": "UNB",
        "items": {
            "342360065": {
                "id": 342360065, "name": "Pikachu", "cat": 1, "kind": 1, "no": 1, "rarity": 1,
                "family": 25, "hp": 60, "weakness": 7, "retreat": 1,
                "abilities": [{"name": "Static", "text": "Flip a coin.", "type": 3}],
                "attacks": [
                    {"name": "Thunder Shock", "damage": 20, "cost": [5, 1]},
                    {"name": "Quick Attack", "damage": 10, "op": "+",
                     "text": "Flip a coin. If heads, this attack does 10 more damage.", "cost": [1]}
                ]
            }
        },
        "packs": {},
        "products": {}
    });
    let id = ItemId::from_value(PIKACHU);
    let definition = DefinitionView::find(&schema, id).unwrap().unwrap();
    let families = BTreeMap::from([("25".to_string(), "Pikachu".to_string())]);
    let report = ItemReport::new(id, &registry)
        .unwrap()
        .with_definition(definition, families);

    assert_snapshot!(report.to_string().trim_end(), @r"
    # itemid 342360065
    * Series: SM (seriesId: 10)
    * Expansion: UNB (expansionId: 13)
    * ItemType: Card (itemType: 0)
    * ItemIndex: 1

    # Definition
    * Name: UNB Pikachu #1 (60 HP)
    * Family: Pikachu
    * Category: Pokemon (cat: 1)
    * Kind: Basic (kind: 1)
    * Rarity: Common (rarity: 1)

    # Abilities
    * Static [Ability]
    > Flip a coin.

    # Attacks
    * {L}{C} Thunder Shock: 20
    * {C} Quick Attack: 10+
    > Flip a coin. If heads, this attack does 10 more damage.

    # Traits
    * Weakness: Fighting (2x)
    * Retreat Cost: 1
    ");

    assert!(DefinitionView::find(&schema, ItemId::from_value(PIKACHU + 1)).is_none());
}

fn write_sources(root: &Path) {
    let files = [
        (
            "strings.json",
            "strings",
            None,
            r#"{"set.name.sm10": "Unbroken Bonds", "card.pikachu": "Pikachu", "family.pikachu": "Pikachu"}"#,
        ),
        (
            "set-data.json",
            "set_data",
            None,
            r#"{"SM10": {"externalId": "UNB", "block": "SM", "count": 1}}"#,
        ),
        ("families.json", "families", None, r#"{"25": "$$$family.pikachu$$$", "26": "$$$family.raichu$$$"}"#),
        (
            "items/SM10.json",
            "release",
            Some("SM10"),
            r#"[{"10000": "pikachu", "10140": "$$$card.pikachu$$$", "200300": "Pokemon",
                 "200540": "Basic", "200550": "Common", "200871": "std", "201710": "pikachu",
                 "200780": 1, "200260": 25, "200490": 60}]"#,
        ),
    ];
    let mut manifest = String::from(
        "[manifest]\nschema = \"dex.sources-manifest\"\nschema_version = 1\n\n[pins]\nitems_version = 7\n",
    );
    for (path, role, key, contents) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(&full, contents).unwrap();
        manifest.push_str(&format!(
            "\n[[files]]\npath = \"{path}\"\nsha256 = \"{}\"\nkind = \"json\"\nrole = \"{role}\"\n",
            sha256_hex(contents.as_bytes())
        ));
        if let Some(key) = key {
            manifest.push_str(&format!("key = \"{key}\"\n"));
        }
    }
    fs::write(root.join("manifest.toml"), manifest).unwrap();
}

#[test]
fn full_run_then_decode() {
    let sources = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_sources(sources.path());
    let dirs = Dirs::new(sources.path(), out.path());

    let summary = run_verify(&dirs).unwrap();
    assert_eq!(summary.file_count, 4);
    assert!(summary.has_families);

    let mut progress = StageProgress::hidden();
    let result = run_all(&dirs, RunOptions::from(ItemsArgs::default()), &mut progress).unwrap();
    assert_eq!(result.expansions.expansions, 1);
    assert_eq!(result.families.families, 1);
    assert_eq!(result.families.unresolved, 1);
    assert_eq!(result.items.items, 1);
    assert!(result.items.missing.is_empty());
    assert_eq!(result.items.summaries[0].expansion, "UNB");
    assert_eq!(result.items.summaries[0].cards, 1);
    assert!(out.path().join("catalog/expansions.json").exists());

    let itemlist: Vec<i32> =
        serde_json::from_str(&fs::read_to_string(out.path().join("itemlist.json")).unwrap())
            .unwrap();
    assert_eq!(itemlist.len(), 1);
    let report = run_decode(&dirs, itemlist[0]).unwrap();
    assert!(report.contains("* Expansion: UNB (expansionId: 13)"));
    assert!(report.contains("* Name: UNB Pikachu #1 (60 HP)"));
    assert!(report.contains("* Family: Pikachu"));

    let err = run_decode(&dirs, 1).unwrap_err();
    assert_eq!(err.to_string(), "Invalid itemid 1");
}

#[test]
fn decode_needs_a_previous_run() {
    let out = TempDir::new().unwrap();
    let dirs = Dirs::new(out.path(), out.path());
    let err = run_decode(&dirs, PIKACHU).unwrap_err();
    assert!(format!("{err:#}").starts_with("load expansions (run `dex items` first)"));
}
