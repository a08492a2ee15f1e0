use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dex_catalog::{PRODUCT_SCHEMA, SchemaSummary};
use dex_sources::VerifySummary;

use dex_cli::types::{AllResult, ExpansionsResult, FamiliesResult, ItemsResult};

pub fn print_verify(summary: &VerifySummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Sources"),
        Cell::new(summary.sources_dir.display()),
    ]);
    table.add_row(vec![
        Cell::new("Items version"),
        Cell::new(summary.pins.items_version),
    ]);
    table.add_row(vec![
        Cell::new("Strings version"),
        match &summary.pins.strings_version {
            Some(version) => Cell::new(version),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![Cell::new("Files"), Cell::new(summary.file_count)]);
    table.add_row(vec![Cell::new("Releases"), Cell::new(summary.releases)]);
    table.add_row(vec![
        Cell::new("String releases"),
        Cell::new(summary.string_releases),
    ]);
    table.add_row(vec![
        Cell::new("Family map"),
        check_cell(summary.has_families),
    ]);
    println!("{table}");
    println!("All pinned files match their sha256.");
}

pub fn print_expansions(result: &ExpansionsResult) {
    println!(
        "Expansions: {} ({} release keys)",
        result.expansions, result.releases
    );
    print_path("Catalog", &result.catalog);
    print_path("Set map", &result.set_map);
}

pub fn print_families(result: &FamiliesResult) {
    println!("Families: {}", result.families);
    if result.unresolved > 0 {
        println!("Without translation: {}", result.unresolved);
    }
    print_path("Written", &result.path);
}

pub fn print_items(result: &ItemsResult) {
    println!("Output: {}", result.output_dir.display());
    println!(
        "Started: {} ({} ms)",
        result.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.elapsed.num_milliseconds()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expansion"),
        header_cell("Cards"),
        header_cell("Packs"),
        header_cell("Products"),
        header_cell("Skipped"),
        header_cell("Collection"),
        header_cell("Secret"),
        header_cell("Max No."),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut totals = [0usize; 4];
    for summary in &result.summaries {
        totals[0] += summary.cards;
        totals[1] += summary.packs;
        totals[2] += summary.products;
        totals[3] += summary.skipped;
        table.add_row(summary_row(summary));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        Cell::new(totals[1]).add_attribute(Attribute::Bold),
        Cell::new(totals[2]).add_attribute(Attribute::Bold),
        count_cell(totals[3], Color::DarkGrey).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    println!(
        "Items: {}  GUIDs: {}  Collisions: {}  Inconsistencies: {}  Files written: {}",
        result.items,
        result.guids,
        result.collisions,
        result.inconsistencies,
        result.written.len()
    );
    if !result.product_releases.is_empty() {
        println!("Product releases: {}", result.product_releases.join(", "));
    }
    if !result.missing.is_empty() {
        eprintln!("Expansions without item data:");
        for code in &result.missing {
            eprintln!("- {code}");
        }
    }
}

pub fn print_all(result: &AllResult) {
    print_expansions(&result.expansions);
    print_families(&result.families);
    println!();
    print_items(&result.items);
}

fn summary_row(summary: &SchemaSummary) -> Vec<Cell> {
    let expansion = if summary.expansion == PRODUCT_SCHEMA {
        Cell::new(&summary.expansion).fg(Color::DarkGrey)
    } else {
        Cell::new(&summary.expansion)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    };
    vec![
        expansion,
        Cell::new(summary.cards),
        Cell::new(summary.packs),
        Cell::new(summary.products),
        count_cell(summary.skipped, Color::Yellow),
        Cell::new(summary.stats.cards),
        Cell::new(summary.stats.secret),
        Cell::new(summary.stats.max_collection_no),
    ]
}

fn print_path(label: &str, path: &Path) {
    println!("{label}: {}", path.display());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn check_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
