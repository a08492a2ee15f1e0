use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use dex_catalog::{RunInput, RunOptions, run_items};
use dex_model::{ExpansionDefinition, ExpansionRegistry, ItemId};
use dex_sources::{
    DataLayout, SourceSet, StringDatabase, VerifySummary, build_expansion_catalog,
    build_family_map, write_json, write_run_outputs,
};
use serde::de::DeserializeOwned;
use tracing::{info, info_span, warn};

use crate::cli::ItemsArgs;
use crate::decode::{DefinitionView, ItemReport};
use crate::progress::StageProgress;
use crate::types::{AllResult, ExpansionsResult, FamiliesResult, ItemsResult};

/// Where sources are read from and outputs written to.
#[derive(Debug, Clone)]
pub struct Dirs {
    pub sources: PathBuf,
    pub layout: DataLayout,
}

impl Dirs {
    pub fn new(sources: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            sources: sources.into(),
            layout: DataLayout::new(out),
        }
    }

    /// Flags first, then the environment, then the workspace defaults.
    pub fn resolve(sources: Option<PathBuf>, out: Option<PathBuf>) -> Self {
        Self::new(
            sources.unwrap_or_else(dex_sources::sources_root),
            out.unwrap_or_else(dex_sources::data_root),
        )
    }
}

impl From<ItemsArgs> for RunOptions {
    fn from(args: ItemsArgs) -> Self {
        RunOptions::new()
            .with_strict_attributes(!args.no_strict_attributes)
            .with_product_schema(!args.no_product_schema)
    }
}

fn open_sources(dirs: &Dirs) -> Result<(SourceSet, VerifySummary)> {
    SourceSet::verify(&dirs.sources)
        .with_context(|| format!("verify sources in {}", dirs.sources.display()))
}

fn load_strings(sources: &SourceSet) -> Result<StringDatabase> {
    sources.load_strings().context("load translation strings")
}

pub fn run_verify(dirs: &Dirs) -> Result<VerifySummary> {
    open_sources(dirs).map(|(_, summary)| summary)
}

pub fn run_expansions(dirs: &Dirs) -> Result<ExpansionsResult> {
    let _guard = info_span!("expansions").entered();
    let (sources, _) = open_sources(dirs)?;
    let strings = load_strings(&sources)?;
    let set_data = sources.load_set_data().context("load set data")?;
    let catalog =
        build_expansion_catalog(&set_data, &strings).context("build expansion catalog")?;

    let layout = &dirs.layout;
    let catalog_path = layout.expansion_catalog();
    write_json(&catalog_path, &catalog.expansions).context("write expansion catalog")?;
    let set_map = layout.set_map();
    write_json(&set_map, &catalog.releases).context("write release map")?;
    info!(
        expansions = catalog.expansions.len(),
        releases = catalog.releases.len(),
        "expansion catalog written"
    );
    Ok(ExpansionsResult {
        expansions: catalog.expansions.len(),
        releases: catalog.releases.len(),
        catalog: catalog_path,
        set_map,
    })
}

pub fn run_families(dirs: &Dirs) -> Result<FamiliesResult> {
    let _guard = info_span!("families").entered();
    let (sources, _) = open_sources(dirs)?;
    let strings = load_strings(&sources)?;
    let raw = sources.load_family_keys().context("load family map")?;
    let families = build_family_map(&raw, &strings);

    let path = dirs.layout.families();
    write_json(&path, &families).context("write family map")?;
    info!(families = families.len(), "family map written");
    Ok(FamiliesResult {
        families: families.len(),
        unresolved: raw.len().saturating_sub(families.len()),
        path,
    })
}

pub fn run_items_command(
    dirs: &Dirs,
    options: RunOptions,
    progress: &mut StageProgress,
) -> Result<ItemsResult> {
    let started_at = Utc::now();
    let _guard = info_span!("items").entered();
    let (sources, summary) = open_sources(dirs)?;
    let strings = load_strings(&sources)?;
    let set_data = sources.load_set_data().context("load set data")?;
    let catalog =
        build_expansion_catalog(&set_data, &strings).context("build expansion catalog")?;
    let releases = sources.load_releases().context("load releases")?;

    let output = run_items(
        RunInput {
            expansions: catalog.expansions,
            releases: &releases,
            translator: &strings,
        },
        options,
        |update| progress.update(update),
    )
    .context("item run failed")?;
    progress.finish();

    let written = write_run_outputs(&dirs.layout, &output).context("write item outputs")?;
    let items = output.items().context("collect catalog items")?.len();
    Ok(ItemsResult {
        sources: summary,
        output_dir: dirs.layout.root().to_path_buf(),
        started_at,
        elapsed: Utc::now() - started_at,
        summaries: output.summaries,
        missing: output.missing,
        product_releases: output.product_releases,
        items,
        guids: output.guids.len(),
        collisions: output.guids.collisions().len(),
        inconsistencies: output.log.len(),
        written,
    })
}

pub fn run_all(dirs: &Dirs, options: RunOptions, progress: &mut StageProgress) -> Result<AllResult> {
    let expansions = run_expansions(dirs)?;
    let families = run_families(dirs)?;
    let items = run_items_command(dirs, options, progress)?;
    Ok(AllResult {
        expansions,
        families,
        items,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

/// Decodes `itemid` against the generated data under the output root.
///
/// Without a schema for the expansion only the identifier fields are shown.
pub fn run_decode(dirs: &Dirs, itemid: i32) -> Result<String> {
    let layout = &dirs.layout;
    let expansions: Vec<ExpansionDefinition> = read_json(&layout.expansions())
        .context("load expansions (run `dex items` first)")?;
    let registry = ExpansionRegistry::new(expansions);

    let id = ItemId::from_value(itemid);
    let report = ItemReport::new(id, &registry).ok_or_else(|| anyhow!("Invalid itemid {id}"))?;

    let schema_path = layout.expansion(report.expansion.code());
    if !schema_path.exists() {
        warn!(path = %schema_path.display(), "Could not resolve definition");
        return Ok(report.to_string());
    }
    let schema: serde_json::Value = read_json(&schema_path)?;
    let Some(definition) = DefinitionView::find(&schema, id) else {
        warn!(%id, "item is not defined in its expansion schema");
        return Ok(report.to_string());
    };
    let definition = definition.with_context(|| format!("parse definition of {id}"))?;

    let families_path = layout.families();
    let families: BTreeMap<String, String> = if families_path.exists() {
        read_json(&families_path)?
    } else {
        BTreeMap::new()
    };
    Ok(report.with_definition(definition, families).to_string())
}
